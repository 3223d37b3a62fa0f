use parkgate::config::ParkingConfig;
use parkgate::hal::sensor::TriggerThreshold;
use parkgate::hal::wifi::WifiConfig;

#[toml_cfg::toml_config]
pub struct TomlConfig {
    #[default("")]
    pub wifi_ssid: &'static str,
    #[default("")]
    pub wifi_password: &'static str,
    #[default("")]
    pub thingspeak_api_key: &'static str,
    #[default(4)]
    pub capacity: u32,
    #[default(2000)]
    pub trigger_threshold: u16,
}

pub struct Config {
    pub wifi: WifiConfig<'static>,
    pub thingspeak_api_key: &'static str,
    pub parking: ParkingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wifi: WifiConfig {
                ssid: TOML_CONFIG.wifi_ssid,
                password: TOML_CONFIG.wifi_password,
            },
            thingspeak_api_key: TOML_CONFIG.thingspeak_api_key,
            parking: ParkingConfig {
                capacity: TOML_CONFIG.capacity,
                trigger_threshold: TriggerThreshold::new(TOML_CONFIG.trigger_threshold),
                ..Default::default()
            },
        }
    }
}
