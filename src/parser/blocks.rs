use std::borrow::Cow;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::Error;

// Mobile export: "[9.41, 3/7/2024] Sender Name: "
// Desktop export: "03/07/24 09.41 - Sender Name: "
static CHAT_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        (?:
            \[\d{1,2}\.\d{2},\s*\d{1,2}/\d{1,2}/\d{4}\]\s*.*?:\s*
            |
            \d{2}/\d{2}/\d{2}\s+\d{2}\.\d{2}\s+-\s+.*?:\s*
        )",
    )
    .unwrap()
});
// Desktop export where the sender is an unsaved number: "03/07/24 09.41 - +62 812-...: "
static PHONE_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}/\d{2}/\d{2}\s+\d{2}\.\d{2}\s+-\s+\+\d.*?:\s*").unwrap());
static NAME_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bNAMA\s*:").unwrap());

/// How label-keyed transcripts are cut into per-person blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitStrategy {
    /// Drop chat headers, then start a new block at every `NAMA:` label.
    #[default]
    LabelAnchored,
    /// Split on desktop chat headers from phone-number senders.
    PhoneHeader,
}

impl FromStr for SplitStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "label" | "label_anchored" => Ok(SplitStrategy::LabelAnchored),
            "header" | "phone_header" => Ok(SplitStrategy::PhoneHeader),
            other => Err(Error::UnknownStrategy {
                kind: "split",
                value: other.to_string(),
            }),
        }
    }
}

/// Message bodies between chat headers. Header text is discarded.
pub fn split_chat_messages(text: &str) -> Vec<&str> {
    non_blank(CHAT_HEADER_RE.split(text))
}

pub fn split_labeled(text: &str, strategy: SplitStrategy) -> Vec<Cow<'_, str>> {
    match strategy {
        SplitStrategy::LabelAnchored => match CHAT_HEADER_RE.replace_all(text, "\n") {
            Cow::Borrowed(text) => split_before_name_labels(text)
                .into_iter()
                .map(Cow::Borrowed)
                .collect(),
            Cow::Owned(text) => split_before_name_labels(&text)
                .into_iter()
                .map(|piece| Cow::Owned(piece.to_string()))
                .collect(),
        },
        SplitStrategy::PhoneHeader => non_blank(PHONE_HEADER_RE.split(text))
            .into_iter()
            .map(Cow::Borrowed)
            .collect(),
    }
}

/// Cut right before each `NAMA:` label so every block opens on a name field.
/// Whatever precedes the first label becomes its own leading block.
fn split_before_name_labels(text: &str) -> Vec<&str> {
    let mut starts: Vec<usize> = NAME_LABEL_RE.find_iter(text).map(|m| m.start()).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }
    let pieces = starts.iter().enumerate().map(|(i, &start)| {
        let end = starts.get(i + 1).copied().unwrap_or(text.len());
        &text[start..end]
    });
    non_blank(pieces)
}

fn non_blank<'a>(pieces: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    pieces.filter(|p| !p.trim().is_empty()).collect()
}

/// Trimmed, non-empty lines of one block, split on `\n` only.
pub fn block_lines(block: &str) -> Vec<String> {
    trimmed(block.split('\n'))
}

/// Like [`block_lines`], but any Unicode line boundary ends a line, so
/// transcripts saved with bare `\r` endings still come apart.
pub fn chat_lines(block: &str) -> Vec<String> {
    trimmed(block.split(is_line_boundary))
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn trimmed<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<String> {
    lines
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}
