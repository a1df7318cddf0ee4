/*
 * tokenizer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Splitting raw listing text into padded, classified lines.

use std::fmt;

use crate::layout;
use crate::record::RecordType;

/// Minimum width, in characters, of every retained listing line.
///
/// Fixed-column fields are read without bounds checks against the record
/// layout, so short lines are right-padded with spaces up to this width.
pub const LISTING_WIDTH: usize = 150;

/// One non-blank listing line, right-padded to at least [`LISTING_WIDTH`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingLine(String);

impl ListingLine {
    /// Pad a single raw line. Trailing carriage returns are removed first.
    ///
    /// Returns `None` for lines that are empty once trimmed.
    pub fn new(raw: &str) -> Option<Self> {
        let raw = raw.trim_end_matches('\r');
        if raw.trim().is_empty() {
            return None;
        }

        let mut text = raw.to_string();
        let width = text.chars().count();
        if width < LISTING_WIDTH {
            text.extend(std::iter::repeat_n(' ', LISTING_WIDTH - width));
        }
        Some(ListingLine(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Characters `offset..offset + width`, clamped to the end of the line.
    pub fn column(&self, offset: usize, width: usize) -> &str {
        let start = char_to_byte(&self.0, offset);
        let end = char_to_byte(&self.0, offset.saturating_add(width));
        &self.0[start..end]
    }

    /// Everything from character `offset` to the end of the line.
    pub fn rest_from(&self, offset: usize) -> &str {
        &self.0[char_to_byte(&self.0, offset)..]
    }

    /// Space-separated positional tokens, with empty pieces dropped.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|piece| !piece.is_empty())
    }

    /// The positional token at `index`, if the line has that many.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens().nth(index)
    }

    /// The trimmed type tag in columns 0-9.
    pub fn record_tag(&self) -> &str {
        layout::RECORD_TAG.extract(self).unwrap_or_default().trim()
    }

    /// The classified record type, or `None` for tags outside the format.
    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_tag(self.record_tag())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl fmt::Display for ListingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.trim_end())
    }
}

fn char_to_byte(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// Tokenize lines the caller has already split on line terminators.
pub fn tokenize<I, S>(lines: I) -> Vec<ListingLine>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| ListingLine::new(line.as_ref()))
        .collect()
}

/// Tokenize a whole listing blob, accepting either `\n` or `\r\n` endings.
pub fn tokenize_text(text: &str) -> Vec<ListingLine> {
    tokenize(text.split('\n'))
}
