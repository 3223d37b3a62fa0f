use std::time::Instant;

use esp_idf_sys as _;
use parkgate::app::App;

use parkgate_esp_idf::config::Config;
use parkgate_esp_idf::platform::PlatformImpl;

fn main() -> anyhow::Result<()> {
    esp_idf_sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    log::info!("Smart parking gate");

    let config = Config::default();

    log::info!("Create platform");
    let platform = PlatformImpl::new(&config)?;

    log::info!("Create app");
    let mut app = App::new(&platform, config.parking.clone());

    let poll_period = config.parking.poll_period();

    log::info!("Start loop");

    loop {
        let next_wakeup = Instant::now() + poll_period;

        {
            let start = Instant::now();
            app.update();

            log::trace!("app update took {}ms", (Instant::now() - start).as_millis());
        }

        // After a gate cycle the period is long gone, still give the lane a
        // full period before polling it again
        let delay = next_wakeup
            .checked_duration_since(Instant::now())
            .unwrap_or(poll_period);
        std::thread::sleep(delay);
    }
}
