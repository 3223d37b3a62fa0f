use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::peripherals::Peripherals;

use crate::config::Config;
use crate::drivers::indicator::EspTrafficLight;
use crate::drivers::ir_sensor::EspIrSensors;
use crate::drivers::servo::ServoGate;
use crate::drivers::telemetry::thingspeak_telemetry;
use crate::drivers::wifi::EspWifi;
use parkgate::hal::gate::GateActuator;
use parkgate::hal::indicator::Indicator;
use parkgate::hal::sensor::SensorReader;
use parkgate::hal::wifi::Wifi;
use parkgate::hal::Platform;
use parkgate::svc::{Delay, StdDelay, StdTelemetry, TelemetrySink};

/// ESP32 38 pin devkit on the expansion board.
pub struct PlatformImpl {
    delay: StdDelay,
    gate: ServoGate,
    indicator: EspTrafficLight,
    sensor: EspIrSensors,
    telemetry: StdTelemetry,
    wifi: EspWifi,
}

impl PlatformImpl {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let peripherals =
            Peripherals::take().ok_or_else(|| anyhow::anyhow!("Peripherals already taken"))?;
        let pins = peripherals.pins;

        log::info!("Setup Wi-Fi");
        let wifi = EspWifi::new(peripherals.modem)?;
        wifi.setup(&config.wifi)?;

        log::info!("Setup sensors");
        let sensor = EspIrSensors::new(peripherals.adc1, pins.gpio34, pins.gpio35)?;

        log::info!("Setup indicator");
        let indicator = EspTrafficLight::new(
            pins.gpio21.downgrade_output(),
            pins.gpio22.downgrade_output(),
            pins.gpio23.downgrade_output(),
        )?;

        log::info!("Setup gate");
        let gate = ServoGate::new(
            peripherals.ledc.timer0,
            peripherals.ledc.channel0,
            pins.gpio25,
            config.parking.barrier_transit(),
        )?;
        gate.close()?;

        let telemetry = thingspeak_telemetry(
            config.thingspeak_api_key,
            config.parking.telemetry_timeout(),
        )?;

        Ok(Self {
            delay: StdDelay,
            gate,
            indicator,
            sensor,
            telemetry,
            wifi,
        })
    }
}

impl Platform for PlatformImpl {
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
