/// Log tags identify the component that emitted a line
///
/// Each tag has a debug key used by the `--debug-<key>` / `--verbose-<key>`
/// command-line flags and a fixed console label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Config,
    Hub,
    Session,
    Sampler,
    Webserver,
    Test,
    Other(String),
}

impl LogTag {
    /// All built-in tags (used when scanning for debug flags)
    pub const BUILTIN: [LogTag; 7] = [
        LogTag::System,
        LogTag::Config,
        LogTag::Hub,
        LogTag::Session,
        LogTag::Sampler,
        LogTag::Webserver,
        LogTag::Test,
    ];

    /// Key used in --debug-<key> flags
    pub fn to_debug_key(&self) -> String {
        match self {
            LogTag::System => "system".to_string(),
            LogTag::Config => "config".to_string(),
            LogTag::Hub => "hub".to_string(),
            LogTag::Session => "session".to_string(),
            LogTag::Sampler => "sampler".to_string(),
            LogTag::Webserver => "webserver".to_string(),
            LogTag::Test => "test".to_string(),
            LogTag::Other(name) => name.to_lowercase(),
        }
    }

    /// Uncolored label for file output
    pub fn to_plain_string(&self) -> String {
        match self {
            LogTag::Other(name) => name.to_uppercase(),
            other => other.to_debug_key().to_uppercase(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_plain_string())
    }
}
