pub trait Wifi {
    fn setup(&self, config: &WifiConfig) -> anyhow::Result<()>;

    fn is_connected(&self) -> bool;
}

/// Station credentials for the access point serving the lot.
#[derive(Eq, PartialEq, Debug)]
pub struct WifiConfig<'a> {
    pub ssid: &'a str,
    pub password: &'a str,
}
