//! Simulated lot hardware. Every interaction that changes something in the
//! physical world is appended to a shared journal, in order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::anyhow;

use crate::hal::gate::{GateActuator, GatePosition};
use crate::hal::indicator::{Indicator, IndicatorSignal};
use crate::hal::sensor::{DetectionPoint, SensorReader, SensorReading};
use crate::hal::wifi::{Wifi, WifiConfig};
use crate::hal::Platform;
use crate::svc::{Delay, TelemetrySink, TelemetrySnapshot};

pub const VEHICLE_PRESENT: u16 = 300;
pub const LANE_EMPTY: u16 = 4095;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SimEvent {
    Delay(Duration),
    Indicator(IndicatorSignal),
    Open,
    Close,
    Publish(TelemetrySnapshot),
}

type Journal = Rc<RefCell<Vec<SimEvent>>>;

#[derive(Default)]
struct SimChannel {
    present: Cell<bool>,
    /// Consumed before falling back to `present`. `None` is a failed sample.
    scripted: RefCell<VecDeque<Option<u16>>>,
}

#[derive(Default)]
pub struct SimSensor {
    entry: SimChannel,
    exit: SimChannel,
}

impl SimSensor {
    fn channel(&self, point: DetectionPoint) -> &SimChannel {
        match point {
            DetectionPoint::Entry => &self.entry,
            DetectionPoint::Exit => &self.exit,
        }
    }

    pub fn set_present(&self, point: DetectionPoint, present: bool) {
        self.channel(point).present.set(present);
    }

    pub fn script(&self, point: DetectionPoint, readings: &[Option<u16>]) {
        self.channel(point)
            .scripted
            .borrow_mut()
            .extend(readings.iter().copied());
    }
}

impl SensorReader for SimSensor {
    fn read(&self, point: DetectionPoint) -> anyhow::Result<SensorReading> {
        let channel = self.channel(point);

        match channel.scripted.borrow_mut().pop_front() {
            Some(Some(raw)) => Ok(SensorReading::new(raw)),
            Some(None) => Err(anyhow!("ADC timeout on {point}")),
            None if channel.present.get() => Ok(SensorReading::new(VEHICLE_PRESENT)),
            None => Ok(SensorReading::new(LANE_EMPTY)),
        }
    }
}

pub struct SimIndicator {
    journal: Journal,
    signal: Cell<Option<IndicatorSignal>>,
    pub fail: Cell<bool>,
}

impl SimIndicator {
    pub fn signal(&self) -> Option<IndicatorSignal> {
        self.signal.get()
    }
}

impl Indicator for SimIndicator {
    fn set_signal(&self, signal: IndicatorSignal) -> anyhow::Result<()> {
        if self.fail.get() {
            return Err(anyhow!("GPIO write failed"));
        }

        if self.signal.replace(Some(signal)) != Some(signal) {
            self.journal.borrow_mut().push(SimEvent::Indicator(signal));
        }

        Ok(())
    }
}

pub struct SimGate {
    journal: Journal,
    position: Cell<GatePosition>,
    pub fail_open: Cell<bool>,
    pub fail_close: Cell<bool>,
}

impl SimGate {
    pub fn position(&self) -> GatePosition {
        self.position.get()
    }
}

impl GateActuator for SimGate {
    fn open(&self) -> anyhow::Result<()> {
        if self.fail_open.get() {
            return Err(anyhow!("servo not responding"));
        }
        self.position.set(GatePosition::Open);
        self.journal.borrow_mut().push(SimEvent::Open);
        Ok(())
    }

    fn close(&self) -> anyhow::Result<()> {
        if self.fail_close.get() {
            return Err(anyhow!("servo not responding"));
        }
        self.position.set(GatePosition::Closed);
        self.journal.borrow_mut().push(SimEvent::Close);
        Ok(())
    }
}

pub struct SimTelemetry {
    journal: Journal,
    pub fail: Cell<bool>,
}

impl TelemetrySink for SimTelemetry {
    fn publish(&self, snapshot: TelemetrySnapshot) -> anyhow::Result<()> {
        if self.fail.get() {
            return Err(anyhow!("telemetry queue unavailable"));
        }
        self.journal.borrow_mut().push(SimEvent::Publish(snapshot));
        Ok(())
    }
}

pub struct SimWifi {
    pub connected: Cell<bool>,
}

impl Wifi for SimWifi {
    fn setup(&self, _config: &WifiConfig) -> anyhow::Result<()> {
        self.connected.set(true);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

pub struct SimDelay {
    journal: Journal,
}

impl Delay for SimDelay {
    fn delay(&self, duration: Duration) {
        self.journal.borrow_mut().push(SimEvent::Delay(duration));
    }
}

pub struct SimPlatform {
    journal: Journal,
    pub sensor: SimSensor,
    pub indicator: SimIndicator,
    pub gate: SimGate,
    pub telemetry: SimTelemetry,
    pub wifi: SimWifi,
    delay: SimDelay,
}

impl Default for SimPlatform {
    fn default() -> Self {
        let journal = Journal::default();

        Self {
            sensor: SimSensor::default(),
            indicator: SimIndicator {
                journal: journal.clone(),
                signal: Cell::new(None),
                fail: Cell::new(false),
            },
            gate: SimGate {
                journal: journal.clone(),
                position: Cell::new(GatePosition::Closed),
                fail_open: Cell::new(false),
                fail_close: Cell::new(false),
            },
            telemetry: SimTelemetry {
                journal: journal.clone(),
                fail: Cell::new(false),
            },
            wifi: SimWifi {
                connected: Cell::new(true),
            },
            delay: SimDelay {
                journal: journal.clone(),
            },
            journal,
        }
    }
}

impl SimPlatform {
    /// Returns the journal recorded so far and starts a new one.
    pub fn take_journal(&self) -> Vec<SimEvent> {
        self.journal.take()
    }
}

impl Platform for SimPlatform {
    fn delay(&self) -> &(dyn Delay + '_) {
        &self.delay
    }

    fn gate(&self) -> &(dyn GateActuator + '_) {
        &self.gate
    }

    fn indicator(&self) -> &(dyn Indicator + '_) {
        &self.indicator
    }

    fn sensor(&self) -> &(dyn SensorReader + '_) {
        &self.sensor
    }

    fn telemetry(&self) -> &(dyn TelemetrySink + '_) {
        &self.telemetry
    }

    fn wifi(&self) -> &(dyn Wifi + '_) {
        &self.wifi
    }
}
