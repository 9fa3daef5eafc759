//! Grammar: marker phrases and the attack-label capture rule.
//!
//! Pure byte-level helpers used by [`super::parser::LogStatusParser`]. A
//! [`Phrase`] is an ordered list of words matched case-insensitively, with one
//! or more whitespace bytes between consecutive words. Whitespace is the
//! single-byte set a log reader treats as blank: tab, line feed, vertical tab,
//! form feed, carriage return, the 0x1c..=0x1f separators and space. Matching is a
//! plain substring search over the whole log, not line by line, so a phrase may
//! span a line break.

use std::ops::Range;

/// Ordered words matched case-insensitively with whitespace runs between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    words: Vec<String>,
}

impl Phrase {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(Into::into)
                .filter(|w: &String| !w.is_empty())
                .collect(),
        }
    }

    /// First occurrence of the phrase in `text`.
    pub fn find(&self, text: &[u8]) -> Option<Range<usize>> {
        self.find_from(text, 0)
    }

    /// First occurrence starting at or after `from`.
    pub fn find_from(&self, text: &[u8], from: usize) -> Option<Range<usize>> {
        let first = self.words.first()?.as_bytes()[0];
        (from..text.len())
            .filter(|&pos| text[pos].eq_ignore_ascii_case(&first))
            .find_map(|pos| self.match_at(text, pos).map(|end| pos..end))
    }

    pub fn is_present(&self, text: &[u8]) -> bool {
        self.find(text).is_some()
    }

    /// Match the phrase anchored at `pos`; returns the end offset.
    fn match_at(&self, text: &[u8], pos: usize) -> Option<usize> {
        let mut cursor = pos;
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                let gap = skip_whitespace(text, cursor);
                if gap == cursor {
                    return None;
                }
                cursor = gap;
            }
            let word = word.as_bytes();
            let candidate = text.get(cursor..cursor + word.len())?;
            if !candidate.eq_ignore_ascii_case(word) {
                return None;
            }
            cursor += word.len();
        }
        Some(cursor)
    }
}

/// Marker phrases for a single log code.
#[derive(Debug, Clone)]
pub struct ZoneMarkers {
    /// `ATTACK DETECTED AT <code>`
    pub danger: Phrase,
    /// `NO ATTACK DETECTED AT <code>`
    pub clearance: Phrase,
    /// `<code>. POSSIBLY`, followed by the label and the terminator
    pub label_anchor: Phrase,
}

/// Word that ends an attack label.
const LABEL_TERMINATOR: &[u8] = b"attack";

impl ZoneMarkers {
    pub fn for_code(code: &str) -> Self {
        Self {
            danger: Phrase::new(["ATTACK", "DETECTED", "AT", code]),
            clearance: Phrase::new(["NO", "ATTACK", "DETECTED", "AT", code]),
            label_anchor: Phrase::new([format!("{}.", code), "POSSIBLY".to_string()]),
        }
    }

    /// Extract the attack label that follows the label anchor.
    ///
    /// Each anchor occurrence is tried in order; the first one yielding a
    /// non-empty label wins. `None` means the generic message should be used.
    pub fn capture_label(&self, text: &[u8]) -> Option<String> {
        let mut from = 0;
        while let Some(anchor) = self.label_anchor.find_from(text, from) {
            if let Some(label) = capture_after_anchor(text, anchor.end) {
                return Some(label);
            }
            from = anchor.start + 1;
        }
        None
    }
}

/// Shortest run of ASCII letters and whitespace ending right before the
/// terminator word. At least one whitespace byte must separate it from the
/// anchor.
fn capture_after_anchor(text: &[u8], anchor_end: usize) -> Option<String> {
    let start = skip_whitespace(text, anchor_end);
    if start == anchor_end {
        return None;
    }

    let mut cursor = start;
    while cursor < text.len() {
        if starts_with_ignore_case(&text[cursor..], LABEL_TERMINATOR) {
            let label = trim_whitespace(&text[start..cursor]);
            return if label.is_empty() {
                None
            } else {
                Some(String::from_utf8_lossy(label).into_owned())
            };
        }
        let b = text[cursor];
        if !(b.is_ascii_alphabetic() || is_whitespace(b)) {
            return None;
        }
        cursor += 1;
    }
    None
}

fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\t'..=b'\r' | 0x1c..=0x1f | b' ')
}

fn skip_whitespace(text: &[u8], mut pos: usize) -> usize {
    while pos < text.len() && is_whitespace(text[pos]) {
        pos += 1;
    }
    pos
}

fn trim_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| !is_whitespace(b)).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|&b| !is_whitespace(b)).map_or(start, |i| i + 1);
    &bytes[start..end]
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}
