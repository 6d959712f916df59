use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::models::{ApodEntry, MarsPhoto, NearEarthObject};

pub type NasaFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, NasaError>> + Send + 'a>>;

/// First day the APOD archive has an entry for.
pub fn apod_first_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1995, 6, 16).unwrap_or(NaiveDate::MIN)
}

/// Yesterday's entry is always published, whatever the caller's time zone.
pub fn default_apod_date(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

pub const DEFAULT_ROVER: &str = "curiosity";
pub const DEFAULT_CAMERA: &str = "FHAZ";
pub const KNOWN_ROVERS: [&str; 4] = ["curiosity", "perseverance", "opportunity", "spirit"];

const NEO_WINDOW_DAYS: u64 = 7;

#[derive(Debug, Error)]
pub enum NasaError {
    #[error("nasa request timed out")]
    Timeout,
    #[error("nasa returned status {status}")]
    UpstreamStatus { status: u16 },
    #[error("nasa request failed: {0}")]
    Unavailable(String),
    #[error("nasa returned an invalid payload: {0}")]
    InvalidPayload(String),
}

impl NasaError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// The caller asked for something upstream does not have, as opposed to
    /// the provider failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UpstreamStatus { status: 404 })
    }
}

/// Date range for the NEO feed, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeoWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NeoWindow {
    /// The week ending on `today`. Same input day, same window.
    pub fn ending_on(today: NaiveDate) -> Self {
        Self {
            start_date: today.checked_sub_days(Days::new(NEO_WINDOW_DAYS)).unwrap_or(today),
            end_date: today,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeoFeed {
    pub element_count: u64,
    pub near_earth_objects: BTreeMap<String, Vec<NearEarthObject>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NeoBrowsePage {
    pub total_elements: Option<u64>,
    pub near_earth_objects: Vec<NearEarthObject>,
}

/// Read-only view of the NASA open-data APIs used by the proxies and the
/// assistant.
pub trait NasaFeed: Send + Sync {
    fn apod<'a>(&'a self, date: NaiveDate) -> NasaFuture<'a, ApodEntry>;

    fn latest_rover_photos<'a>(
        &'a self,
        rover: &'a str,
        camera: Option<&'a str>,
    ) -> NasaFuture<'a, Vec<MarsPhoto>>;

    fn neo_feed<'a>(&'a self, window: NeoWindow) -> NasaFuture<'a, NeoFeed>;

    fn neo_browse<'a>(&'a self) -> NasaFuture<'a, NeoBrowsePage>;
}

pub fn normalize_rover(raw: &str) -> Option<&'static str> {
    let normalized = raw.trim().to_ascii_lowercase();
    KNOWN_ROVERS
        .iter()
        .copied()
        .find(|rover| *rover == normalized)
}

pub fn normalize_camera(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.len() > 16 {
        return None;
    }

    trimmed
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
        .then(|| trimmed.to_ascii_uppercase())
}
