//! AstroBot: answers a chat turn from NASA data, the generative model, or a
//! canned table, in that order of preference.

pub mod canned;
pub mod compose;
pub mod history;
pub mod intent;
mod router;

pub use history::{MAX_HISTORY_MESSAGE_CHARS, bound_history};
pub use intent::{NasaTopic, classify_topic, is_casual_message};
pub use router::{AssistantReply, AssistantRequest, AssistantRouter};
