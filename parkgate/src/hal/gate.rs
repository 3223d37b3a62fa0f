/// Barrier angle when the lane is blocked
pub const CLOSED_ANGLE: u8 = 0;
/// Barrier angle when the lane is free
pub const OPEN_ANGLE: u8 = 90;

const MAX_ANGLE: u8 = 90;
const MIN_PULSE_WIDTH_MS: f32 = 0.5;
const PULSE_WIDTH_SPAN_MS: f32 = 2.0;
const PWM_PERIOD_MS: f32 = 20.0;

/// The barrier motor. There is no position feedback: implementations wait a
/// fixed transit time after each command and then assume the barrier arrived.
pub trait GateActuator {
    fn open(&self) -> anyhow::Result<()>;

    fn close(&self) -> anyhow::Result<()>;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum GatePosition {
    #[default]
    Closed,
    Open,
}

impl GatePosition {
    pub fn angle(&self) -> u8 {
        match self {
            GatePosition::Closed => CLOSED_ANGLE,
            GatePosition::Open => OPEN_ANGLE,
        }
    }
}

/// Maps a servo angle to a duty value for a 50Hz PWM whose full period is
/// `duty_range` counts. Angles above 90 are clamped.
pub fn angle_to_duty(angle: u8, duty_range: u32) -> u32 {
    let angle = angle.min(MAX_ANGLE);
    let pulse_width_ms =
        MIN_PULSE_WIDTH_MS + (angle as f32 / MAX_ANGLE as f32) * PULSE_WIDTH_SPAN_MS;
    ((pulse_width_ms / PWM_PERIOD_MS) * duty_range as f32) as u32
}
