pub mod indicator;
pub mod ir_sensor;
pub mod servo;
pub mod telemetry;
pub mod wifi;
