use crate::models::{ApodEntry, MarsPhoto};
use crate::nasa::NeoBrowsePage;

const APOD_EXPLANATION_PREVIEW_CHARS: usize = 250;
const HAZARD_SAMPLE_SIZE: usize = 3;

pub fn asteroid_summary(page: &NeoBrowsePage) -> String {
    let tracked = page
        .total_elements
        .map(|count| count.to_string())
        .unwrap_or_else(|| "thousands of".to_string());

    let mut text = format!(
        "NASA actively tracks {tracked} near-Earth asteroids! These cosmic rocks orbit close enough to Earth that we monitor them carefully. "
    );

    let sample = &page.near_earth_objects[..page.near_earth_objects.len().min(HAZARD_SAMPLE_SIZE)];
    if !sample.is_empty() {
        let hazardous = sample
            .iter()
            .filter(|neo| neo.is_potentially_hazardous_asteroid)
            .count();
        let names = sample
            .iter()
            .map(|neo| neo.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        text.push_str(&format!(
            "Of the {} recently catalogued objects I looked at ({names}), {hazardous} are classified as potentially hazardous, meaning they're large enough and pass close enough that we keep a watchful eye on them. ",
            sample.len()
        ));
    }

    text.push_str(
        "The good news? No known asteroid poses a threat to Earth in the foreseeable future. Apophis will make an incredibly close pass in 2029, close enough to see with the naked eye! Would you like to know more about specific asteroids or how we track them?",
    );
    text
}

pub fn rover_summary(photos: &[MarsPhoto]) -> String {
    let mut text =
        "Curiosity rover is still going strong on Mars after landing in 2012! ".to_string();

    if let Some(first) = photos.first() {
        let sol = first
            .sol
            .map(|sol| sol.to_string())
            .unwrap_or_else(|| "recent".to_string());
        text.push_str(&format!(
            "It just sent back {} new photos from Sol {sol} (Earth date {}). These images help scientists study Martian geology, search for signs of ancient water, and understand whether Mars could have supported microbial life. ",
            photos.len(),
            first.earth_date
        ));
    }

    text.push_str(
        "Along with Perseverance, these rovers are our eyes on the Red Planet, exploring ancient riverbeds and drilling into rocks that are billions of years old. Would you like to see the latest images or learn about specific Mars discoveries?",
    );
    text
}

pub fn apod_summary(entry: &ApodEntry) -> String {
    let mut text = format!(
        "The Astronomy Picture of the Day for {} features \"{}\"! ",
        entry.date, entry.title
    );

    let explanation = entry.explanation.trim();
    if !explanation.is_empty() {
        let preview: String = explanation
            .chars()
            .take(APOD_EXPLANATION_PREVIEW_CHARS)
            .collect();
        text.push_str(&preview);
        text.push_str("... ");
    }

    text.push_str(
        "\n\nNASA has been sharing space imagery through APOD since 1995, and each image comes with an explanation written by professional astronomers. Want to explore more images from the archive?",
    );
    text
}
