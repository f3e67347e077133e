use std::{
    env,
    str::FromStr,
    time::Duration,
};
use log::LevelFilter;

use crate::error::ClientError;


const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000";
const DEFAULT_GEOCODER_URL: &'static str = "https://nominatim.openstreetmap.org";
const DEFAULT_TILE_URL: &'static str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_WORKERS: usize = 4;


#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub geocoder_url: String,
    pub tile_url: String,
    pub user_agent: String,
    pub request_timeout: Option<Duration>,
    pub workers: usize,
    pub guard_in_flight: bool,
    pub log_level: LevelFilter,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError> where
        F: Fn(&str) -> Option<String> {

        let get = |key: &str| lookup(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());

        let request_timeout = match get("FIXHUB_TIMEOUT_SECS") {
            Some(secs) => Some(Duration::new(parse_value::<u64>("FIXHUB_TIMEOUT_SECS", &secs)?, 0)),
            None => None,
        };

        let workers = match get("FIXHUB_WORKERS") {
            Some(cnt) => parse_value::<usize>("FIXHUB_WORKERS", &cnt)?,
            None => DEFAULT_WORKERS,
        };
        if workers == 0 {
            return Err(ClientError::Config("FIXHUB_WORKERS must be at least 1".into()));
        }

        let guard_in_flight = match get("FIXHUB_GUARD_IN_FLIGHT") {
            Some(flag) => parse_flag("FIXHUB_GUARD_IN_FLIGHT", &flag)?,
            None => false,
        };

        let log_level = match get("FIXHUB_LOG") {
            Some(lvl) => parse_value::<LevelFilter>("FIXHUB_LOG", &lvl)?,
            None => LevelFilter::Info,
        };

        Ok(Config {
            base_url: trim_slash(get("FIXHUB_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into())),
            geocoder_url: trim_slash(get("FIXHUB_GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.into())),
            tile_url: get("FIXHUB_TILE_URL").unwrap_or_else(|| DEFAULT_TILE_URL.into()),
            user_agent: get("FIXHUB_USER_AGENT")
                .unwrap_or_else(|| format!("fixhub-client/{}", env!("CARGO_PKG_VERSION"))),
            request_timeout,
            workers,
            guard_in_flight,
            log_level,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}


fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ClientError> {
    value.parse::<T>()
        .map_err(|_| ClientError::Config(format!("{} has an invalid value '{}'", key, value)))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ClientError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ClientError::Config(format!("{} has an invalid value '{}'", key, value))),
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}
