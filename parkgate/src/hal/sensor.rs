use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum DetectionPoint {
    Entry,
    Exit,
}

impl fmt::Display for DetectionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionPoint::Entry => f.write_str("entry"),
            DetectionPoint::Exit => f.write_str("exit"),
        }
    }
}

/// Raw intensity sampled from an infrared proximity sensor, in device units.
#[derive(Default, Copy, Clone, Eq, PartialEq, Debug)]
pub struct SensorReading(u16);

impl SensorReading {
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vehicle reflects the emitted light back, so the reading drops below
/// the threshold when something sits in front of the sensor.
#[derive(Copy, Clone, Eq, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TriggerThreshold(u16);

impl TriggerThreshold {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    pub fn is_triggered(&self, reading: SensorReading) -> bool {
        reading.0 < self.0
    }
}

pub trait SensorReader {
    /// Samples the sensor watching `point`. A failed sample is an error, never
    /// a reading that looks like an empty lane.
    fn read(&self, point: DetectionPoint) -> anyhow::Result<SensorReading>;
}
