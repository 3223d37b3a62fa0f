use std::cell::RefCell;
use std::time::Duration;

use esp_idf_hal::gpio::OutputPin;
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution, CHANNEL0, TIMER0};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;
use parkgate::hal::gate::{angle_to_duty, GateActuator, GatePosition};

/// Hobby servo driving the barrier arm, 50Hz PWM on LEDC timer 0.
pub struct ServoGate {
    #[allow(dead_code)]
    timer: LedcTimerDriver<'static>,
    driver: RefCell<LedcDriver<'static>>,
    transit_time: Duration,
}

impl ServoGate {
    pub fn new(
        timer: TIMER0,
        channel: CHANNEL0,
        pin: impl Peripheral<P = impl OutputPin> + 'static,
        transit_time: Duration,
    ) -> anyhow::Result<Self> {
        let timer_config = TimerConfig::new()
            .frequency(50.Hz().into())
            .resolution(Resolution::Bits12);
        let timer = LedcTimerDriver::new(timer, &timer_config)?;
        let driver = LedcDriver::new(channel, &timer, pin)?;

        Ok(Self {
            timer,
            driver: RefCell::new(driver),
            transit_time,
        })
    }

    fn move_to(&self, position: GatePosition) -> anyhow::Result<()> {
        {
            let mut driver = self.driver.try_borrow_mut()?;
            let duty = angle_to_duty(position.angle(), driver.get_max_duty() + 1);
            log::debug!("Gate {:?}, duty {duty}", position);
            driver.set_duty(duty)?;
        }

        // No feedback from the servo, give it time to get there
        std::thread::sleep(self.transit_time);

        Ok(())
    }
}

impl GateActuator for ServoGate {
    fn open(&self) -> anyhow::Result<()> {
        self.move_to(GatePosition::Open)
    }

    fn close(&self) -> anyhow::Result<()> {
        self.move_to(GatePosition::Closed)
    }
}
