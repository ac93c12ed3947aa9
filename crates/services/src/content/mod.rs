//! Pure transforms over rich content: mention extraction and the
//! canonical storage-form rewrite. Nothing in here touches the database.

pub mod mentions;
pub mod rewrite;

pub use mentions::extract_mentions;
pub use rewrite::{rewrite_content, strip_markup};

use crier_config::ContentSettings;

use crate::error::{CoreError, CoreResult};

/// The marker attribute a mention carries.
pub const MENTION_ATTR: &str = "data-user-id";

/// Validate raw content and produce its storage form.
pub(crate) fn prepare(raw: &str, settings: &ContentSettings) -> CoreResult<String> {
    if raw.len() > settings.max_length {
        return Err(CoreError::Validation(format!(
            "content exceeds {} bytes",
            settings.max_length
        )));
    }
    if strip_markup(raw).trim().is_empty() {
        return Err(CoreError::Validation(
            "content is empty once markup is stripped".to_string(),
        ));
    }
    Ok(rewrite_content(raw))
}

/// One lexical unit of rich content. Concatenating the tokens in order
/// reproduces the input byte for byte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    /// A complete tag, angle brackets included.
    Tag(&'a str),
}

/// Split content into text runs and tags. A `<` with no closing `>` is
/// left as text; malformed input never fails here.
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &input[pos..];
        let Some(lt) = rest.find('<') else {
            tokens.push(Token::Text(rest));
            break;
        };
        if lt > 0 {
            tokens.push(Token::Text(&rest[..lt]));
        }
        let Some(gt) = rest[lt..].find('>') else {
            tokens.push(Token::Text(&rest[lt..]));
            break;
        };
        tokens.push(Token::Tag(&rest[lt..lt + gt + 1]));
        pos += lt + gt + 1;
    }

    tokens
}

pub(crate) fn is_closing(tag: &str) -> bool {
    tag.starts_with("</")
}

pub(crate) fn tag_name(tag: &str) -> &str {
    let inner = tag
        .trim_start_matches('<')
        .trim_start_matches('/');
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '>' || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// Value of a double-quoted attribute. The name must be preceded by
/// whitespace so `data-user-id` never matches inside a longer name.
pub(crate) fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!("{name}=\"");
    let mut search_from = 0;

    while let Some(found) = tag[search_from..].find(&needle) {
        let at = search_from + found;
        let preceded_by_space = tag[..at]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_whitespace());
        if preceded_by_space {
            let start = at + needle.len();
            let end = tag[start..].find('"')? + start;
            return Some(&tag[start..end]);
        }
        search_from = at + needle.len();
    }

    None
}

pub(crate) fn has_attr(tag: &str, name: &str) -> bool {
    attr_value(tag, name).is_some()
}

/// An opening `<a>` carrying the mention marker.
pub(crate) fn is_mention_anchor(tag: &str) -> bool {
    !is_closing(tag) && tag_name(tag).eq_ignore_ascii_case("a") && has_attr(tag, MENTION_ATTR)
}
