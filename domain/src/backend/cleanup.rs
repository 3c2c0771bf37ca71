//! Raw model output cleanup
//!
//! Local instruction-tuned models frequently echo chat-template markers or
//! prefix their reply with their own name. Every successful backend result
//! passes through [`clean_response`] before it reaches the transcript.

const INST_OPEN: &str = "[INST]";
const INST_CLOSE: &str = "[/INST]";

/// Normalize raw model output into a transcript-ready reply
///
/// 1. trim surrounding whitespace
/// 2. drop everything from the first `[/INST]` onward
/// 3. remove any remaining `[INST]` / `[/INST]` markers
/// 4. strip one leading speaker label (`[Name]:` or `Name:`)
pub fn clean_response(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(idx) = text.find(INST_CLOSE) {
        text = text[..idx].trim();
    }

    let text = text.replace(INST_CLOSE, "").replace(INST_OPEN, "");
    let text = text.trim();

    strip_speaker_label(text).to_string()
}

/// Remove one leading `[Word]:` / `Word:` label and the whitespace after it
fn strip_speaker_label(text: &str) -> &str {
    let rest = text.strip_prefix('[').unwrap_or(text);

    let word_len: usize = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    if word_len == 0 {
        return text;
    }

    let rest = &rest[word_len..];
    let rest = rest.strip_prefix(']').unwrap_or(rest);
    match rest.strip_prefix(':') {
        Some(after) => after.trim_start(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bracketed_label_and_trailing_template() {
        assert_eq!(
            clean_response("  [Strategic]: We should proceed. [/INST] ignore this"),
            "We should proceed."
        );
    }

    #[test]
    fn test_plain_label() {
        assert_eq!(clean_response("Skeptic: Not so fast."), "Not so fast.");
    }

    #[test]
    fn test_only_one_label_is_stripped() {
        assert_eq!(clean_response("A: B: text"), "B: text");
    }

    #[test]
    fn test_open_markers_removed() {
        assert_eq!(clean_response("[INST] Hello there [INST]"), "Hello there");
    }

    #[test]
    fn test_multi_word_label_is_kept() {
        assert_eq!(
            clean_response("Key point: costs rise."),
            "Key point: costs rise."
        );
    }

    #[test]
    fn test_label_without_colon_is_kept() {
        assert_eq!(clean_response("[Note] keep me"), "[Note] keep me");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean_response("  Just an answer.\n"), "Just an answer.");
        assert_eq!(clean_response(""), "");
    }

    #[test]
    fn test_everything_after_close_marker_dropped() {
        assert_eq!(clean_response("[/INST] all gone"), "");
    }
}
