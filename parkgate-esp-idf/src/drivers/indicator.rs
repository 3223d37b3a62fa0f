use std::cell::RefCell;

use esp_idf_hal::gpio::{AnyOutputPin, Output, PinDriver};
use parkgate::hal::indicator::{Indicator, IndicatorSignal};

type Lamp = PinDriver<'static, AnyOutputPin, Output>;

/// Green, yellow and red LEDs, active high.
pub struct EspTrafficLight {
    lamps: RefCell<[Lamp; 3]>,
}

impl EspTrafficLight {
    pub fn new(
        green: AnyOutputPin,
        yellow: AnyOutputPin,
        red: AnyOutputPin,
    ) -> anyhow::Result<Self> {
        let mut lamps = [
            PinDriver::output(green)?,
            PinDriver::output(yellow)?,
            PinDriver::output(red)?,
        ];

        for lamp in lamps.iter_mut() {
            lamp.set_low()?;
        }

        Ok(Self {
            lamps: RefCell::new(lamps),
        })
    }
}

impl Indicator for EspTrafficLight {
    fn set_signal(&self, signal: IndicatorSignal) -> anyhow::Result<()> {
        let (g, y, r): (bool, bool, bool) = signal.into();
        let levels = [g, y, r];

        let mut lamps = self.lamps.try_borrow_mut()?;

        // Switch off first, so that two lamps are never lit together
        for (lamp, _) in lamps.iter_mut().zip(levels).filter(|(_, on)| !on) {
            lamp.set_low()?;
        }

        for (lamp, _) in lamps.iter_mut().zip(levels).filter(|(_, on)| *on) {
            lamp.set_high()?;
        }

        Ok(())
    }
}
