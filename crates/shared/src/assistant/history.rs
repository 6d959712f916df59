use crate::models::ChatMessage;

pub const MAX_HISTORY_MESSAGE_CHARS: usize = 4_000;

/// Keeps the most recent `limit` non-empty messages, oldest first, each cut to
/// `MAX_HISTORY_MESSAGE_CHARS`.
pub fn bound_history(history: Vec<ChatMessage>, limit: usize) -> Vec<ChatMessage> {
    let mut kept = history
        .into_iter()
        .rev()
        .filter(|message| !message.content.trim().is_empty())
        .take(limit)
        .map(|mut message| {
            if message.content.chars().count() > MAX_HISTORY_MESSAGE_CHARS {
                message.content = message
                    .content
                    .chars()
                    .take(MAX_HISTORY_MESSAGE_CHARS)
                    .collect();
            }
            message
        })
        .collect::<Vec<_>>();
    kept.reverse();
    kept
}
