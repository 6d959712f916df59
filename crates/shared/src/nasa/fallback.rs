//! Previously captured NASA payloads served when a default ("latest") lookup
//! cannot reach upstream. Never used for caller-specified parameters.

use std::collections::BTreeMap;

use serde_json::json;

use crate::models::{
    ApodEntry, MarsCamera, MarsPhoto, MarsRover, MarsRoverPhotosResponse, NearEarthObject,
    NeoPage, NeoTrackerResponse,
};

pub const FALLBACK_APOD_DATE: &str = "2024-11-07";
pub const FALLBACK_APOD_TITLE: &str = "LDN 1471: A Windblown Star Cavity";
pub const FALLBACK_APOD_URL: &str =
    "https://apod.nasa.gov/apod/image/2411/ElephantsTrunk_Mtanous_960.jpg";

const FALLBACK_APOD_EXPLANATION: &str = "What's happening in the Elephant's Trunk?  A dark interstellar cloud of gas and dust punctuated with newly formed stars is being eroded by the stellar winds and energetic light from nearby massive stars.  The featured image depicts the central part of the interstellar dust cloud IC 1396, cataloged as the emission nebula LDN 1471.  Located in the constellation of the King of Aethopia (Cepheus), the dust cloud forms the surface of the nebula's bright rim, where an embedded star cluster (Trumpler 37) is being revealed.  The bright rim is about 10 light-years across and the entire cavity is about 30 light-years across.  The energetic light from the central bright rim excites atoms in the cavity above it and is creating the red glow seen emanating from the Elephant's Trunk.  Located about 2,400 light-years away, the Elephant's Trunk nebula should not be confused with the somewhat more famous (but further away) Eagle Nebula.";

pub fn fallback_apod() -> ApodEntry {
    ApodEntry {
        date: FALLBACK_APOD_DATE.to_string(),
        title: FALLBACK_APOD_TITLE.to_string(),
        explanation: FALLBACK_APOD_EXPLANATION.to_string(),
        url: FALLBACK_APOD_URL.to_string(),
        media_type: "image".to_string(),
        hdurl: Some(
            "https://apod.nasa.gov/apod/image/2411/ElephantsTrunk_Mtanous_4232.jpg".to_string(),
        ),
        copyright: None,
        service_version: Some("v1".to_string()),
        thumbnail_url: None,
    }
}

pub fn fallback_rover_photos() -> MarsRoverPhotosResponse {
    let photos = [
        (
            1,
            3949,
            "https://mars.nasa.gov/msl-raw-images/proj/msl/redops/ods/surface/sol/03949/opgs/edr/fcam/FLB_739290446EDR_F1030564FHAZ00337M_.JPG",
            "2024-01-15",
        ),
        (
            2,
            3948,
            "https://mars.nasa.gov/msl-raw-images/proj/msl/redops/ods/surface/sol/03948/opgs/edr/fcam/FLB_739204046EDR_F1030564FHAZ00337M_.JPG",
            "2024-01-14",
        ),
        (
            3,
            3947,
            "https://mars.nasa.gov/msl-raw-images/proj/msl/redops/ods/surface/sol/03947/opgs/edr/fcam/FLB_739117646EDR_F1030564FHAZ00337M_.JPG",
            "2024-01-13",
        ),
    ]
    .into_iter()
    .map(|(id, sol, img_src, earth_date)| MarsPhoto {
        id,
        sol: Some(sol),
        img_src: img_src.to_string(),
        earth_date: earth_date.to_string(),
        camera: MarsCamera {
            name: Some("FHAZ".to_string()),
            full_name: "Front Hazard Avoidance Camera".to_string(),
        },
        rover: MarsRover {
            name: "Curiosity".to_string(),
            status: Some("active".to_string()),
        },
    })
    .collect();

    MarsRoverPhotosResponse::from_photos(photos)
}

pub fn fallback_neo_feed() -> NeoTrackerResponse {
    let apophis = NearEarthObject {
        id: "2099942".to_string(),
        name: "99942 Apophis (2004 MN4)".to_string(),
        nasa_jpl_url: Some("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr=2099942".to_string()),
        absolute_magnitude_h: Some(19.09),
        estimated_diameter: Some(json!({
            "kilometers": {
                "estimated_diameter_min": 0.3,
                "estimated_diameter_max": 0.67
            }
        })),
        is_potentially_hazardous_asteroid: true,
        close_approach_data: vec![json!({
            "close_approach_date": "2029-04-13",
            "relative_velocity": { "kilometers_per_second": "7.42" },
            "miss_distance": { "kilometers": "38012" },
            "orbiting_body": "Earth"
        })],
    };
    let eros = NearEarthObject {
        id: "2000433".to_string(),
        name: "433 Eros (A898 PA)".to_string(),
        nasa_jpl_url: Some("https://ssd.jpl.nasa.gov/tools/sbdb_lookup.html#/?sstr=2000433".to_string()),
        absolute_magnitude_h: Some(10.31),
        estimated_diameter: Some(json!({
            "kilometers": {
                "estimated_diameter_min": 22.1,
                "estimated_diameter_max": 49.4
            }
        })),
        is_potentially_hazardous_asteroid: false,
        close_approach_data: vec![json!({
            "close_approach_date": "2056-01-24",
            "relative_velocity": { "kilometers_per_second": "3.90" },
            "miss_distance": { "kilometers": "22297000" },
            "orbiting_body": "Earth"
        })],
    };

    let mut near_earth_objects = BTreeMap::new();
    near_earth_objects.insert("2029-04-13".to_string(), vec![apophis]);
    near_earth_objects.insert("2056-01-24".to_string(), vec![eros]);

    NeoTrackerResponse {
        near_earth_objects,
        page: NeoPage { total_elements: 2 },
    }
}
