use std::fmt;

pub const THINGSPEAK_UPDATE_URL: &str = "http://api.thingspeak.com/update";

/// Occupancy as reported upstream, taken right after a gate cycle completes.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct TelemetrySnapshot {
    pub current_count: u32,
    pub daily_entries: u32,
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} daily={}",
            self.current_count, self.daily_entries
        )
    }
}

/// Best effort, fire-and-forget publishing. An `Ok` means the snapshot was
/// accepted for sending, not that it reached the remote end.
pub trait TelemetrySink {
    fn publish(&self, snapshot: TelemetrySnapshot) -> anyhow::Result<()>;
}

pub struct ThingSpeakChannel<'a> {
    pub update_url: &'a str,
    pub api_key: &'a str,
}

impl<'a> ThingSpeakChannel<'a> {
    pub fn new(api_key: &'a str) -> Self {
        Self {
            update_url: THINGSPEAK_UPDATE_URL,
            api_key,
        }
    }

    /// field1 is the current count, field2 the entries since boot.
    pub fn update_url(&self, snapshot: &TelemetrySnapshot) -> String {
        format!(
            "{}?api_key={}&field1={}&field2={}",
            self.update_url, self.api_key, snapshot.current_count, snapshot.daily_entries
        )
    }
}
