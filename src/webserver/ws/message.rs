/// Broadcast payloads
///
/// A payload is one immutable text message (a metrics section or the
/// timestamp marker). Cloning is a reference-count bump, so fan-out to
/// many subscribers does not copy the text.
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

/// Element id the dashboard swaps the tick timestamp into
pub const TIMESTAMP_TARGET: &str = "#update-timestamp";

/// Format used for the timestamp marker
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Payload(Arc<str>);

impl Payload {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self(text.into())
    }

    /// Out-of-band swap fragment carrying the tick time
    pub fn timestamp_marker<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::new(format!(
            "<div hx-swap-oob=\"innerHTML:{}\">{}</div>",
            TIMESTAMP_TARGET,
            now.format(TIMESTAMP_FORMAT)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_timestamp_marker() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let marker = Payload::timestamp_marker(&now);
        assert_eq!(
            marker.as_str(),
            "<div hx-swap-oob=\"innerHTML:#update-timestamp\">2024-03-09 14:05:07</div>"
        );
    }

    #[test]
    fn test_clone_shares_text() {
        let payload = Payload::from("Cores: 8\n");
        let copy = payload.clone();
        assert_eq!(payload, copy);
        assert!(Arc::ptr_eq(&payload.0, &copy.0));
        assert_eq!(copy.len(), 9);
    }
}
