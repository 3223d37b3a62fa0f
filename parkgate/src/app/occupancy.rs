use anyhow::ensure;

use crate::hal::indicator::IndicatorSignal;
use crate::hal::sensor::DetectionPoint;
use crate::svc::TelemetrySnapshot;

/// Vehicles in the lot. `current_count` stays within `0..=capacity` and
/// `daily_entries` only grows, there is no reset until reboot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct OccupancyState {
    current_count: u32,
    daily_entries: u32,
    capacity: u32,
}

impl OccupancyState {
    pub fn new(capacity: u32) -> Self {
        Self {
            current_count: 0,
            daily_entries: 0,
            capacity,
        }
    }

    pub fn current_count(&self) -> u32 {
        self.current_count
    }

    pub fn daily_entries(&self) -> u32 {
        self.daily_entries
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.current_count >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.current_count == 0
    }

    /// Whether a vehicle crossing `point` can be let through.
    pub fn accepts(&self, point: DetectionPoint) -> bool {
        match point {
            DetectionPoint::Entry => !self.is_full(),
            DetectionPoint::Exit => !self.is_empty(),
        }
    }

    /// Counts a vehicle that crossed `point`. Fails without touching the
    /// counters if the crossing would break the bounds.
    pub fn record(&mut self, point: DetectionPoint) -> anyhow::Result<TelemetrySnapshot> {
        ensure!(self.accepts(point), "Cannot record {} in {:?}", point, self);

        match point {
            DetectionPoint::Entry => {
                self.current_count += 1;
                self.daily_entries += 1;
            }
            DetectionPoint::Exit => {
                self.current_count -= 1;
            }
        }

        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            current_count: self.current_count,
            daily_entries: self.daily_entries,
        }
    }

    /// Signal shown while no gate cycle is running.
    pub fn signal(&self) -> IndicatorSignal {
        if self.is_full() {
            IndicatorSignal::Full
        } else {
            IndicatorSignal::Clear
        }
    }
}
