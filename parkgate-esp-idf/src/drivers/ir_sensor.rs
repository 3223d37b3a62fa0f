use std::cell::RefCell;

use esp_idf_hal::adc::{AdcChannelDriver, AdcDriver, Atten11dB, ADC1};
use esp_idf_hal::gpio::{Gpio34, Gpio35};
use parkgate::hal::sensor::{DetectionPoint, SensorReader, SensorReading};

type EntryChannel = AdcChannelDriver<'static, Gpio34, Atten11dB<ADC1>>;
type ExitChannel = AdcChannelDriver<'static, Gpio35, Atten11dB<ADC1>>;

/// Two TCRT5000 reflective sensors on ADC1, 12 bit one-shot conversions.
pub struct EspIrSensors {
    adc: RefCell<AdcDriver<'static, ADC1>>,
    entry: RefCell<EntryChannel>,
    exit: RefCell<ExitChannel>,
}

impl EspIrSensors {
    pub fn new(adc: ADC1, entry_pin: Gpio34, exit_pin: Gpio35) -> anyhow::Result<Self> {
        let config = esp_idf_hal::adc::config::Config::new().calibration(false);
        let adc = AdcDriver::new(adc, &config)?;
        let entry = AdcChannelDriver::new(entry_pin)?;
        let exit = AdcChannelDriver::new(exit_pin)?;

        Ok(Self {
            adc: RefCell::new(adc),
            entry: RefCell::new(entry),
            exit: RefCell::new(exit),
        })
    }
}

impl SensorReader for EspIrSensors {
    fn read(&self, point: DetectionPoint) -> anyhow::Result<SensorReading> {
        let mut adc = self.adc.try_borrow_mut()?;

        let raw = match point {
            DetectionPoint::Entry => adc.read(&mut *self.entry.try_borrow_mut()?)?,
            DetectionPoint::Exit => adc.read(&mut *self.exit.try_borrow_mut()?)?,
        };

        Ok(SensorReading::new(raw))
    }
}
