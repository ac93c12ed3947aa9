use uuid::Uuid;

use super::{MENTION_ATTR, Token, attr_value, is_closing, tokenize};

/// Mentioned user ids in document order, duplicates collapsed.
///
/// A mention is any tag carrying a parseable `data-user-id`; everything
/// else, including malformed markup, is passed over without error.
pub fn extract_mentions(content: &str) -> Vec<Uuid> {
    let mut mentioned = Vec::new();

    for token in tokenize(content) {
        let Token::Tag(tag) = token else { continue };
        if is_closing(tag) {
            continue;
        }
        let Some(raw) = attr_value(tag, MENTION_ATTR) else {
            continue;
        };
        let Ok(id) = Uuid::parse_str(raw) else {
            continue;
        };
        if !mentioned.contains(&id) {
            mentioned.push(id);
        }
    }

    mentioned
}
