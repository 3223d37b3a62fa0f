#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum IndicatorSignal {
    /// Green, there is room for another vehicle
    #[default]
    Clear,
    /// Yellow, the barrier is moving or in an unknown position
    Caution,
    /// Red, the lot is full
    Full,
}

/// Lamp outputs for each signal, as (green, yellow, red).
impl From<IndicatorSignal> for (bool, bool, bool) {
    fn from(signal: IndicatorSignal) -> Self {
        match signal {
            IndicatorSignal::Clear => (true, false, false),
            IndicatorSignal::Caution => (false, true, false),
            IndicatorSignal::Full => (false, false, true),
        }
    }
}

pub trait Indicator {
    /// Implementations must never light more than one lamp at a time, even
    /// while switching between two signals.
    fn set_signal(&self, signal: IndicatorSignal) -> anyhow::Result<()>;
}
