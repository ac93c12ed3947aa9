use super::{Token, has_attr, is_mention_anchor, tag_name, tokenize};

const BREAK: &str = "<br>";

/// Rewrite content to its canonical storage form.
///
/// Mention links get `target="_blank"` injected, `<br>` variants collapse
/// to a bare `<br>`, and paragraph/div boundaries flatten to the same
/// inline break. Applying the rewrite twice equals applying it once.
pub fn rewrite_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 16);
    let mut pending_break = false;

    for token in tokenize(content) {
        match token {
            Token::Text(text) => {
                // Whitespace that only separates block tags carries no content.
                if pending_break && text.trim().is_empty() {
                    continue;
                }
                flush_break(&mut out, &mut pending_break);
                out.push_str(text);
            }
            Token::Tag(tag) => {
                let name = tag_name(tag);
                if name.eq_ignore_ascii_case("br") {
                    flush_break(&mut out, &mut pending_break);
                    out.push_str(BREAK);
                } else if name.eq_ignore_ascii_case("p") || name.eq_ignore_ascii_case("div") {
                    // A block edge becomes a break only once content
                    // surrounds it; leading and trailing edges vanish.
                    if !out.is_empty() {
                        pending_break = true;
                    }
                } else if is_mention_anchor(tag) {
                    flush_break(&mut out, &mut pending_break);
                    push_with_target(&mut out, tag);
                } else {
                    flush_break(&mut out, &mut pending_break);
                    out.push_str(tag);
                }
            }
        }
    }

    out
}

/// Text content with every tag dropped, for emptiness checks.
pub fn strip_markup(content: &str) -> String {
    let mut text = String::with_capacity(content.len());
    for token in tokenize(content) {
        if let Token::Text(t) = token {
            text.push_str(t);
        }
    }
    text
}

fn flush_break(out: &mut String, pending: &mut bool) {
    if *pending {
        out.push_str(BREAK);
        *pending = false;
    }
}

fn push_with_target(out: &mut String, tag: &str) {
    if has_attr(tag, "target") {
        out.push_str(tag);
        return;
    }
    let insert_at = if tag.ends_with("/>") {
        tag.len() - 2
    } else {
        tag.len() - 1
    };
    out.push_str(tag[..insert_at].trim_end());
    out.push_str(" target=\"_blank\"");
    out.push_str(&tag[insert_at..]);
}
