/// NASA-backed topics the assistant can answer from live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NasaTopic {
    Asteroids,
    MarsRover,
    PictureOfTheDay,
}

impl NasaTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asteroids => "asteroids",
            Self::MarsRover => "mars_rover",
            Self::PictureOfTheDay => "apod",
        }
    }
}

const CASUAL_KEYWORDS: [&str; 8] = [
    "hello",
    "hi",
    "hey",
    "thanks",
    "thank you",
    "bye",
    "joke",
    "how are you",
];

/// Evaluated top to bottom; the first rule with a matching keyword wins.
const TOPIC_RULES: [(NasaTopic, &[&str]); 3] = [
    (NasaTopic::Asteroids, &["asteroid", "neo", "near-earth"]),
    (NasaTopic::MarsRover, &["mars", "rover"]),
    (
        NasaTopic::PictureOfTheDay,
        &["astronomy", "apod", "picture"],
    ),
];

pub fn is_casual_message(message: &str) -> bool {
    let normalized = message.to_lowercase();
    CASUAL_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

pub fn classify_topic(message: &str) -> Option<NasaTopic> {
    let normalized = message.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(topic, _)| *topic)
}
