use std::time::Duration;

use anyhow::bail;
use embedded_svc::http::client::Client;
use embedded_svc::http::Status;
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};
use parkgate::svc::{
    StdTelemetry, StdTelemetryConfig, TelemetrySnapshot, ThingSpeakChannel, Transport,
};

/// ThingSpeak over plain HTTP, one GET per snapshot.
pub fn thingspeak_transport(api_key: &'static str, timeout: Duration) -> Transport {
    Box::new(move |snapshot: &TelemetrySnapshot| -> anyhow::Result<()> {
        let url = ThingSpeakChannel::new(api_key).update_url(snapshot);

        let connection = EspHttpConnection::new(&Configuration {
            timeout: Some(timeout),
            ..Default::default()
        })?;
        let mut client = Client::wrap(connection);

        let response = client.get(&url)?.submit()?;
        let status = response.status();

        // ThingSpeak answers 200 with body "0" when an update is rejected,
        // e.g. when rate limited, but that is not worth a retry either
        if !(200..300).contains(&status) {
            bail!("HTTP status {status}");
        }

        Ok(())
    })
}

pub fn thingspeak_telemetry(
    api_key: &'static str,
    timeout: Duration,
) -> anyhow::Result<StdTelemetry> {
    let config = StdTelemetryConfig {
        stack_size: 12 * 1024,
        ..Default::default()
    };

    StdTelemetry::new_with_config(thingspeak_transport(api_key, timeout), config)
}
