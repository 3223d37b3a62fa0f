pub use clock::{Delay, StdDelay};
pub use std_telemetry::{StdTelemetry, StdTelemetryConfig, TelemetryStats, Transport};
pub use telemetry::{TelemetrySink, TelemetrySnapshot, ThingSpeakChannel};

mod clock;
mod std_telemetry;
mod telemetry;
