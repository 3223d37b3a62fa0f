use crate::hal::gate::GateActuator;
use crate::hal::indicator::Indicator;
use crate::hal::sensor::SensorReader;
use crate::hal::wifi::Wifi;
use crate::svc::{Delay, TelemetrySink};

pub mod gate;
pub mod indicator;
pub mod sensor;
pub mod wifi;

pub trait Platform {
    fn delay(&self) -> &(dyn Delay + '_);
    fn gate(&self) -> &(dyn GateActuator + '_);
    fn indicator(&self) -> &(dyn Indicator + '_);
    fn sensor(&self) -> &(dyn SensorReader + '_);
    fn telemetry(&self) -> &(dyn TelemetrySink + '_);
    fn wifi(&self) -> &(dyn Wifi + '_);
}
