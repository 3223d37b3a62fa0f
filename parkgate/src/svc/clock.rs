use std::time::Duration;

/// Suspends the control task. Nothing else runs on the task while waiting.
pub trait Delay {
    fn delay(&self, duration: Duration);
}

#[derive(Default)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
