use reqwest::{Client, header::USER_AGENT};
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::error::ClientError;
use crate::map_sys::LatLng;


pub trait Geocoder: Send + Sync {
    // Ok(None) means the service answered but had no address for the point.
    fn reverse(&self, at: LatLng) -> Result<Option<String>, ClientError>;
}


pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl NominatimGeocoder {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(NominatimGeocoder {
            client,
            base_url: config.geocoder_url.clone(),
            user_agent: config.user_agent.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn reverse(&self, at: LatLng) -> Result<Option<String>, ClientError> {
        let lat = at.lat.to_string();
        let lon = at.lng.to_string();

        let text = self.client.get(&format!("{}/reverse", self.base_url))
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[("format", "json"), ("lat", lat.as_str()), ("lon", lon.as_str())])
            .send()
            .and_then(|mut res| res.text())?;

        parse_display_name(&text)
    }
}


fn parse_display_name(text: &str) -> Result<Option<String>, ClientError> {
    let value = serde_json::from_str::<JsonValue>(text)?;

    Ok(value["display_name"].as_str()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_owned()))
}
