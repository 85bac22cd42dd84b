use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A visitor message attached to a story page.
///
/// `story_slug` and `reply_to` are references the site never validates - a
/// message can point at a story or parent that no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatMessage {
    pub id: String,
    pub story_slug: String,
    pub name: String,
    pub message: String,
    pub at: String,
    pub reactions: BTreeMap<String, u32>,
    pub reply_to: Option<String>,
    pub status: String,
    pub moderated: bool,
}

impl Default for ChatMessage {
    fn default() -> Self {
        Self {
            id: String::new(),
            story_slug: String::new(),
            name: String::new(),
            message: String::new(),
            at: String::new(),
            reactions: BTreeMap::new(),
            reply_to: None,
            status: "visible".to_string(),
            moderated: false,
        }
    }
}

/// Incoming message payload as posted by the site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewMessage {
    pub story_slug: String,
    pub name: String,
    pub message: String,
    pub reply_to: Option<String>,
}

impl ChatMessage {
    /// Build a fresh message: UUIDv7 id (time-ordered with a random tail) and
    /// an RFC 3339 timestamp.
    pub fn from_input(input: NewMessage) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            story_slug: input.story_slug,
            name: input.name,
            message: input.message,
            at: Utc::now().to_rfc3339(),
            reply_to: input.reply_to,
            ..Self::default()
        }
    }

    /// Bump the count for one emoji. Counts only ever grow.
    pub fn add_reaction(&mut self, emoji: &str) -> u32 {
        let count = self.reactions.entry(emoji.to_string()).or_insert(0);
        *count += 1;
        *count
    }
}

/// Group a flat message list by story slug, preserving order within each story.
pub fn group_by_story(messages: Vec<ChatMessage>) -> BTreeMap<String, Vec<ChatMessage>> {
    let mut grouped: BTreeMap<String, Vec<ChatMessage>> = BTreeMap::new();
    for message in messages {
        grouped.entry(message.story_slug.clone()).or_default().push(message);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_input_assigns_id_and_timestamp() {
        let msg = ChatMessage::from_input(NewMessage {
            story_slug: "from-trash-to-treasure".into(),
            name: "sam".into(),
            message: "love this".into(),
            reply_to: None,
        });
        assert_eq!(msg.id.len(), 36);
        uuid::Uuid::parse_str(&msg.id).unwrap();
        assert!(!msg.at.is_empty());
        assert_eq!(msg.status, "visible");
        assert!(!msg.moderated);
    }

    #[test]
    fn ids_are_unique() {
        let a = ChatMessage::from_input(NewMessage::default());
        let b = ChatMessage::from_input(NewMessage::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn reactions_count_exactly_once_per_call() {
        let mut msg = ChatMessage::default();
        for expected in 1..=5 {
            assert_eq!(msg.add_reaction("♻️"), expected);
        }
        assert_eq!(msg.add_reaction("👍"), 1);
        assert_eq!(msg.reactions["♻️"], 5);
        assert_eq!(msg.reactions["👍"], 1);
    }

    #[test]
    fn grouping_splits_by_story() {
        let mut a = ChatMessage::default();
        a.story_slug = "alpha".into();
        let mut b = ChatMessage::default();
        b.story_slug = "beta".into();
        let mut c = ChatMessage::default();
        c.story_slug = "alpha".into();

        let grouped = group_by_story(vec![a, b, c]);
        assert_eq!(grouped["alpha"].len(), 2);
        assert_eq!(grouped["beta"].len(), 1);
    }
}
