pub mod client;
pub mod fallback;
pub mod feed;

pub use client::{NasaClient, NasaClientConfig, NasaConfigError};
pub use feed::{
    DEFAULT_CAMERA, DEFAULT_ROVER, KNOWN_ROVERS, NasaError, NasaFeed, NasaFuture,
    NeoBrowsePage, NeoFeed, NeoWindow, apod_first_date, default_apod_date, normalize_camera,
    normalize_rover,
};
