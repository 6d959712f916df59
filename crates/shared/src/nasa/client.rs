use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::feed::{NasaError, NasaFeed, NasaFuture, NeoBrowsePage, NeoFeed, NeoWindow};
use crate::models::{ApodEntry, MarsPhoto, NearEarthObject};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct NasaClientConfig {
    pub base_url: String,
    /// `None` when `NASA_API_KEY` is not configured.
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl NasaClientConfig {
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Error)]
pub enum NasaConfigError {
    #[error("NASA API key not configured")]
    MissingApiKey,
    #[error("invalid NASA base url: {0}")]
    InvalidBaseUrl(String),
    #[error("failed to build NASA http client: {0}")]
    HttpClient(String),
}

#[derive(Clone)]
pub struct NasaClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl NasaClient {
    pub fn new(config: NasaClientConfig) -> Result<Self, NasaConfigError> {
        let api_key = config.api_key.ok_or(NasaConfigError::MissingApiKey)?;
        // A trailing slash makes `Url::join` append rather than replace the last segment.
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))
            .map_err(|err| NasaConfigError::InvalidBaseUrl(err.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|err| NasaConfigError::HttpClient(err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, NasaError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| NasaError::Unavailable(format!("invalid endpoint {path}: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    /// Issues a GET and decodes the JSON body. `operation` names the call in
    /// logs; the URL itself carries the API key and is never logged.
    async fn get_json<T>(&self, operation: &'static str, url: Url) -> Result<T, NasaError>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).send().await.map_err(|err| {
            if err.is_timeout() {
                warn!(operation, "nasa request timed out");
                NasaError::Timeout
            } else {
                warn!(operation, error = %err.without_url(), "nasa request unavailable");
                NasaError::Unavailable("request_unavailable".to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "nasa returned error status");
            return Err(NasaError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|err| {
            if err.is_timeout() {
                NasaError::Timeout
            } else {
                NasaError::InvalidPayload("response_body_read_failed".to_string())
            }
        })?;

        serde_json::from_str::<T>(&body).map_err(|err| {
            warn!(operation, error = %err, "nasa payload did not match expected shape");
            NasaError::InvalidPayload("response_json_parse_failed".to_string())
        })
    }

    pub async fn fetch_apod(&self, date: NaiveDate) -> Result<ApodEntry, NasaError> {
        let date = date.format(DATE_FORMAT).to_string();
        let url = self.endpoint("planetary/apod", &[("date", date.as_str())])?;
        debug!(date = %date, "fetching apod");
        self.get_json("apod", url).await
    }

    pub async fn fetch_latest_rover_photos(
        &self,
        rover: &str,
        camera: Option<&str>,
    ) -> Result<Vec<MarsPhoto>, NasaError> {
        let path = format!("mars-photos/api/v1/rovers/{rover}/latest_photos");
        let query = camera
            .map(|camera| vec![("camera", camera)])
            .unwrap_or_default();
        let url = self.endpoint(&path, &query)?;
        debug!(rover, camera = camera.unwrap_or("any"), "fetching latest rover photos");

        let envelope: LatestPhotosEnvelope = self.get_json("mars_rover_latest", url).await?;
        Ok(envelope.latest_photos)
    }

    pub async fn fetch_neo_feed(&self, window: NeoWindow) -> Result<NeoFeed, NasaError> {
        let start_date = window.start_date.format(DATE_FORMAT).to_string();
        let end_date = window.end_date.format(DATE_FORMAT).to_string();
        let url = self.endpoint(
            "neo/rest/v1/feed",
            &[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
            ],
        )?;
        debug!(start_date = %start_date, end_date = %end_date, "fetching neo feed");

        let envelope: NeoFeedEnvelope = self.get_json("neo_feed", url).await?;
        Ok(NeoFeed {
            element_count: envelope.element_count.unwrap_or(0),
            near_earth_objects: envelope.near_earth_objects,
        })
    }

    pub async fn fetch_neo_browse(&self) -> Result<NeoBrowsePage, NasaError> {
        let url = self.endpoint("neo/rest/v1/neo/browse", &[])?;
        let envelope: NeoBrowseEnvelope = self.get_json("neo_browse", url).await?;
        Ok(NeoBrowsePage {
            total_elements: envelope.page.and_then(|page| page.total_elements),
            near_earth_objects: envelope.near_earth_objects,
        })
    }
}

impl NasaFeed for NasaClient {
    fn apod<'a>(&'a self, date: NaiveDate) -> NasaFuture<'a, ApodEntry> {
        Box::pin(self.fetch_apod(date))
    }

    fn latest_rover_photos<'a>(
        &'a self,
        rover: &'a str,
        camera: Option<&'a str>,
    ) -> NasaFuture<'a, Vec<MarsPhoto>> {
        Box::pin(self.fetch_latest_rover_photos(rover, camera))
    }

    fn neo_feed<'a>(&'a self, window: NeoWindow) -> NasaFuture<'a, NeoFeed> {
        Box::pin(self.fetch_neo_feed(window))
    }

    fn neo_browse<'a>(&'a self) -> NasaFuture<'a, NeoBrowsePage> {
        Box::pin(self.fetch_neo_browse())
    }
}

#[derive(Debug, Deserialize)]
struct LatestPhotosEnvelope {
    #[serde(default)]
    latest_photos: Vec<MarsPhoto>,
}

#[derive(Debug, Deserialize)]
struct NeoFeedEnvelope {
    element_count: Option<u64>,
    #[serde(default)]
    near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

#[derive(Debug, Deserialize)]
struct NeoBrowseEnvelope {
    page: Option<NeoBrowsePageInfo>,
    #[serde(default)]
    near_earth_objects: Vec<NearEarthObject>,
}

#[derive(Debug, Deserialize)]
struct NeoBrowsePageInfo {
    total_elements: Option<u64>,
}
