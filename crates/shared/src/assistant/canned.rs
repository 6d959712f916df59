pub const VISION_APOLOGY: &str = "I'm having trouble analyzing the image right now. Could you describe what you'd like to know about it?";

pub const VISION_EMPTY_ANSWER: &str = "I analyzed your image, but couldn't generate a description. Could you tell me more about what you'd like to know?";

pub const CHAT_EMPTY_ANSWER: &str =
    "I'm here to help you explore the cosmos! What would you like to know about space?";

const PERSONA_GREETING: &str = "Hello, space explorer! I'm AstroBot, ready to guide you through the wonders of the cosmos. I can show you stunning space imagery, track asteroids, explore Mars through rover eyes, and chat about anything from black holes to distant galaxies. What cosmic mystery shall we unravel together?";

const PERSONA_INTRODUCTION: &str = "I'm AstroBot, your cosmic companion! I blend NASA's open data with AI to help you explore space phenomena, view breathtaking astronomy images, track near-Earth objects, and learn about our universe. What sparks your curiosity?";

const GENERIC_REPLY: &str = "That's an interesting question about space! I specialize in information from NASA's databases about asteroids, Mars rovers, astronomy imagery, and space exploration. I can help you explore near-Earth objects, view the latest rover photos, learn about the Astronomy Picture of the Day, or discuss general space topics. What specifically would you like to know more about?";

/// Checked in order; the first keyword contained in the message wins.
const CANNED_REPLIES: [(&str, &str); 4] = [
    (
        "hello",
        "Hello! I'm AstroBot. I can help you explore NASA's space data and answer questions about the cosmos. What would you like to learn about?",
    ),
    (
        "space",
        "Space is the vast expanse beyond Earth's atmosphere. It contains countless stars, galaxies, planets, and other celestial objects. NASA continuously explores space to understand the universe better.",
    ),
    (
        "universe",
        "The universe is everything: all galaxies, stars, planets, and space itself. Scientists estimate it's about 13.8 billion years old. NASA studies the universe using telescopes and space missions.",
    ),
    (
        "earth",
        "Earth is our home planet, located in the habitable zone of our solar system. NASA monitors Earth's climate, weather, and changes to help us understand our planet better.",
    ),
];

/// Answer used when no provider is configured at all.
pub fn canned_reply(message: &str) -> &'static str {
    let normalized = message.to_lowercase();
    CANNED_REPLIES
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(GENERIC_REPLY)
}

/// Answer used when the generative call itself fails.
pub fn persona_reply(message: &str) -> &'static str {
    let normalized = message.to_lowercase();
    if normalized.contains("hello") || normalized.contains("hi") {
        PERSONA_GREETING
    } else {
        PERSONA_INTRODUCTION
    }
}
