//! Bionic word emphasis
//!
//! The leading `max(1, floor(len * 0.4))` characters of every word are
//! marked for emphasis. Lengths are counted in Unicode scalar values, so a
//! split never lands inside a multi-byte character.

/// Emphasised share of a word, as the ratio `NUMERATOR / DENOMINATOR` (0.4)
const NUMERATOR: usize = 2;
const DENOMINATOR: usize = 5;

/// Number of leading characters to emphasise
pub fn emphasis_len(word: &str) -> usize {
    let chars = word.chars().count();
    if chars == 0 {
        return 0;
    }
    (chars * NUMERATOR / DENOMINATOR).max(1)
}

/// Split a word into its emphasised prefix and plain remainder
pub fn split_emphasis(word: &str) -> (&str, &str) {
    let count = emphasis_len(word);
    let split = word
        .char_indices()
        .nth(count)
        .map(|(byte, _)| byte)
        .unwrap_or(word.len());
    word.split_at(split)
}

/// Render a word as `<strong>prefix</strong>rest`.
///
/// Both halves are escaped, so source text never becomes markup.
pub fn emphasize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let (bold, rest) = split_emphasis(word);
    format!("<strong>{}</strong>{}", escape_html(bold), escape_html(rest))
}

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// A run of a sentence: either a word or the whitespace between words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Whitespace-delimited word
    Word(&'a str),
    /// Whitespace run, kept verbatim
    Space(&'a str),
}

/// Split a sentence into alternating word and whitespace runs
pub fn tokenize(sentence: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (byte, ch) in sentence.char_indices() {
        let is_space = ch.is_whitespace();
        match in_space {
            Some(previous) if previous != is_space => {
                tokens.push(make_token(&sentence[start..byte], previous));
                start = byte;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }

    if let Some(previous) = in_space {
        tokens.push(make_token(&sentence[start..], previous));
    }

    tokens
}

fn make_token(run: &str, is_space: bool) -> Token<'_> {
    if is_space {
        Token::Space(run)
    } else {
        Token::Word(run)
    }
}
