use crate::config::ParkingConfig;
use crate::hal::indicator::{Indicator, IndicatorSignal};
use crate::hal::sensor::DetectionPoint;
use crate::hal::Platform;
use crate::svc::TelemetrySnapshot;

pub use occupancy::OccupancyState;

mod occupancy;

/// A crossing seen on two consecutive reads of the same sensor.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct DetectionEvent {
    pub kind: DetectionPoint,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum ControllerState {
    /// Gate closed, both sensors polled
    #[default]
    Idle,
    /// Triggered once, the same sensor is read again after the debounce delay
    Confirming(DetectionEvent),
    /// Open, hold, close
    Cycling(DetectionEvent),
}

struct Services<'a> {
    platform: &'a dyn Platform,
    config: ParkingConfig,
}

/// The gate loop. Each call to [`App::update`] is one poll: it runs the state
/// machine until it is back in [`ControllerState::Idle`], so a gate cycle
/// blocks the caller until the barrier is closed again. Neither sensor is
/// read during a cycle.
pub struct App<'a> {
    services: Services<'a>,
    indicator_controller: IndicatorController<'a>,
    occupancy: OccupancyState,
    state: ControllerState,
    /// Set when the barrier did not obey a command. Its position is unknown
    /// until a close succeeds.
    barrier_fault: bool,
    is_wifi_connected: bool,
}

impl<'a> App<'a> {
    pub fn new(platform: &'a dyn Platform, config: ParkingConfig) -> Self {
        let occupancy = OccupancyState::new(config.capacity);

        let mut indicator_controller = IndicatorController::new(platform.indicator());
        indicator_controller.show(occupancy.signal());

        let is_wifi_connected = platform.wifi().is_connected();

        let services = Services { platform, config };

        Self {
            services,
            indicator_controller,
            occupancy,
            state: ControllerState::default(),
            barrier_fault: false,
            is_wifi_connected,
        }
    }

    pub fn occupancy(&self) -> &OccupancyState {
        &self.occupancy
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn update(&mut self) {
        self.update_wifi_state();

        self.step();
        while self.state != ControllerState::Idle {
            self.step();
        }

        let signal = self.steady_signal();
        self.indicator_controller.show(signal);
    }

    /// Performs a single state transition.
    pub fn step(&mut self) {
        let new_state = match self.state {
            ControllerState::Idle => self.poll(),
            ControllerState::Confirming(event) => self.confirm(event),
            ControllerState::Cycling(event) => self.cycle(event),
        };

        if new_state != self.state {
            log::debug!("{:?} -> {:?}", self.state, new_state);
            self.state = new_state;
        }
    }

    fn poll(&mut self) -> ControllerState {
        if self.barrier_fault {
            self.close_faulted_barrier();
            return ControllerState::Idle;
        }

        let sensor = self.services.platform.sensor();

        let (entry, exit) = match (
            sensor.read(DetectionPoint::Entry),
            sensor.read(DetectionPoint::Exit),
        ) {
            (Ok(entry), Ok(exit)) => (entry, exit),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Skipping poll, cannot read sensors: {e}");
                return ControllerState::Idle;
            }
        };

        log::debug!("IR sensor readings - entry: {entry}, exit: {exit}");

        let threshold = self.services.config.trigger_threshold;

        // Entry wins when both fire, exit is read again on the next poll
        if threshold.is_triggered(entry) && self.occupancy.accepts(DetectionPoint::Entry) {
            ControllerState::Confirming(DetectionEvent {
                kind: DetectionPoint::Entry,
            })
        } else if threshold.is_triggered(exit) && self.occupancy.accepts(DetectionPoint::Exit) {
            ControllerState::Confirming(DetectionEvent {
                kind: DetectionPoint::Exit,
            })
        } else {
            ControllerState::Idle
        }
    }

    fn confirm(&mut self, event: DetectionEvent) -> ControllerState {
        let platform = self.services.platform;
        let threshold = self.services.config.trigger_threshold;

        platform.delay().delay(self.services.config.debounce());

        match platform.sensor().read(event.kind) {
            Ok(reading) if threshold.is_triggered(reading) => ControllerState::Cycling(event),
            Ok(reading) => {
                log::debug!("Discarded {} trigger, reading {reading}", event.kind);
                ControllerState::Idle
            }
            Err(e) => {
                log::warn!("Cannot confirm {} trigger: {e}", event.kind);
                ControllerState::Idle
            }
        }
    }

    fn cycle(&mut self, event: DetectionEvent) -> ControllerState {
        let platform = self.services.platform;

        log::info!("Confirmed {}", event.kind);

        // Caution follows the fixed hold window, there is no position feedback
        self.indicator_controller.show(IndicatorSignal::Caution);

        if let Err(e) = platform.gate().open() {
            log::error!("Cannot open gate: {e}");
            self.barrier_fault = true;
            self.close_faulted_barrier();
            return ControllerState::Idle;
        }

        platform.delay().delay(self.services.config.transit_hold());

        if let Err(e) = platform.gate().close() {
            // The vehicle went through the open barrier anyway
            log::error!("Cannot close gate: {e}");
            self.barrier_fault = true;
        }

        match self.occupancy.record(event.kind) {
            Ok(snapshot) => {
                log::info!(
                    "Vehicle {}. Count: {}",
                    match event.kind {
                        DetectionPoint::Entry => "entered",
                        DetectionPoint::Exit => "exited",
                    },
                    snapshot.current_count
                );
                self.publish(snapshot);
            }
            Err(e) => log::error!("{e}"),
        }

        ControllerState::Idle
    }

    fn close_faulted_barrier(&mut self) {
        match self.services.platform.gate().close() {
            Ok(()) => {
                log::info!("Gate closed, resuming");
                self.barrier_fault = false;
            }
            Err(e) => log::warn!("Gate still not closed: {e}"),
        }
    }

    /// Always handed to the sink, which decides what to do while offline.
    fn publish(&self, snapshot: TelemetrySnapshot) {
        if let Err(e) = self.services.platform.telemetry().publish(snapshot) {
            log::warn!("Cannot publish {snapshot}: {e}");
        }
    }

    fn update_wifi_state(&mut self) {
        let is_wifi_connected = self.services.platform.wifi().is_connected();

        if is_wifi_connected != self.is_wifi_connected {
            if is_wifi_connected {
                log::info!("Wi-Fi connected");
            } else {
                log::warn!("Wi-Fi disconnected");
            }
            self.is_wifi_connected = is_wifi_connected;
        }
    }

    /// Never Clear while the barrier position is unknown.
    fn steady_signal(&self) -> IndicatorSignal {
        if self.barrier_fault {
            IndicatorSignal::Caution
        } else {
            self.occupancy.signal()
        }
    }
}

struct IndicatorController<'a> {
    indicator: &'a dyn Indicator,
    signal: Option<IndicatorSignal>,
}

impl<'a> IndicatorController<'a> {
    fn new(indicator: &'a dyn Indicator) -> Self {
        Self {
            indicator,
            signal: None,
        }
    }

    fn show(&mut self, signal: IndicatorSignal) {
        match self.indicator.set_signal(signal) {
            Ok(()) => {
                if self.signal != Some(signal) {
                    log::debug!("Indicator {:?}", signal);
                }
                self.signal = Some(signal);
            }
            Err(e) => {
                log::error!("Cannot set indicator to {:?}: {e}", signal);
                self.signal = None;
            }
        }
    }
}
