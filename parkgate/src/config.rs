use std::time::Duration;

use crate::hal::sensor::TriggerThreshold;

pub const DEFAULT_CAPACITY: u32 = 4;
pub const DEFAULT_TRIGGER_THRESHOLD: TriggerThreshold = TriggerThreshold::new(2000);

/// Tunables of the gate loop. Durations are in milliseconds so that the
/// config can be written by hand.
#[derive(Debug, Clone, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParkingConfig {
    /// Parking spaces in the lot
    pub capacity: u32,
    pub trigger_threshold: TriggerThreshold,
    /// Wait between the first read and the confirming read
    pub debounce_ms: u64,
    /// How long the barrier stays open for a vehicle to pass
    pub transit_hold_ms: u64,
    /// Time for the barrier to swing between the two setpoints
    pub barrier_transit_ms: u64,
    pub poll_period_ms: u64,
    pub telemetry_timeout_ms: u64,
}

impl Default for ParkingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            trigger_threshold: DEFAULT_TRIGGER_THRESHOLD,
            debounce_ms: 50,
            transit_hold_ms: 3000,
            barrier_transit_ms: 500,
            poll_period_ms: 300,
            telemetry_timeout_ms: 5000,
        }
    }
}

impl ParkingConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn transit_hold(&self) -> Duration {
        Duration::from_millis(self.transit_hold_ms)
    }

    pub fn barrier_transit(&self) -> Duration {
        Duration::from_millis(self.barrier_transit_ms)
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_millis(self.poll_period_ms)
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_millis(self.telemetry_timeout_ms)
    }
}
