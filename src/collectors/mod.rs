//! Host metrics collectors
//!
//! The sampler asks a [`MetricsSource`] for one [`Category`] at a time and
//! treats the returned text as an opaque payload. Sections are plain
//! `Key: value` lines separated by newlines.

pub mod system;

pub use crate::errors::CollectionError;
pub use system::SysinfoSource;

/// Metrics categories sampled on every tick, in publish order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Hostname, memory totals, operating system
    System,
    /// CPU model and core count
    Cpu,
    /// Disk capacity for the configured mount point
    Disk,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::System, Category::Disk, Category::Cpu];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "system",
            Category::Cpu => "cpu",
            Category::Disk => "disk",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Producer of metrics sections
///
/// Called from the sampler task only; implementations may keep mutable
/// state (refresh buffers) between calls.
pub trait MetricsSource: Send {
    fn collect(&mut self, category: Category) -> Result<String, CollectionError>;
}
