#![forbid(unsafe_code)]

//! Growable character accumulator used for the pending line and word.
//!
//! Every mutation keeps track of where the visible content ends, so asking
//! whether a buffer is blank, or how long it is without trailing whitespace,
//! costs nothing however long a whitespace run grows.

use std::fmt;
use std::ops::Range;

use crate::seq::{CharSeq, ConcatRightTrim};

/// A growable run of characters with the editing operations the wrapper
/// needs: append, delete a range, trim either end, and borrow a slice.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CharBuffer {
    chars: Vec<char>,
    /// Index just past the last non-whitespace character; 0 when blank.
    content_end: usize,
}

impl CharBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` characters.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chars: Vec::with_capacity(capacity),
            content_end: 0,
        }
    }

    /// Create a buffer holding the characters of `text`.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut buf = Self::new();
        text.chars().for_each(|ch| buf.push(ch));
        buf
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length without trailing whitespace.
    #[inline]
    #[must_use]
    pub fn trimmed_len(&self) -> usize {
        self.content_end
    }

    /// Borrow the contents.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Append one character.
    #[inline]
    pub fn push(&mut self, ch: char) {
        self.chars.push(ch);
        if !ch.is_whitespace() {
            self.content_end = self.chars.len();
        }
    }

    /// Append the contents of another buffer.
    pub fn append(&mut self, other: &CharBuffer) {
        if other.content_end > 0 {
            self.content_end = self.chars.len() + other.content_end;
        }
        self.chars.extend_from_slice(&other.chars);
    }

    /// Remove every character.
    #[inline]
    pub fn clear(&mut self) {
        self.chars.clear();
        self.content_end = 0;
    }

    /// Remove the characters in `range`, shifting the rest down.
    ///
    /// # Panics
    /// Panics if the range is out of bounds.
    pub fn delete(&mut self, range: Range<usize>) {
        let Range { start, end } = range;
        self.chars.drain(start..end);
        if end <= self.content_end {
            self.content_end -= end - start;
        } else if start < self.content_end {
            // The last visible character went with the range.
            self.content_end = content_end(&self.chars[..start]);
        }
    }

    /// Remove leading whitespace.
    pub fn trim_start(&mut self) {
        if self.content_end == 0 {
            self.clear();
            return;
        }
        let leading = leading_whitespace(&self.chars);
        if leading > 0 {
            self.chars.drain(..leading);
            self.content_end -= leading;
        }
    }

    /// Remove trailing whitespace.
    #[inline]
    pub fn trim_end(&mut self) {
        self.chars.truncate(self.content_end);
    }

    /// Whether the buffer is empty or holds only whitespace.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content_end == 0
    }

    /// This buffer followed by `tail`, trailing whitespace hidden, without
    /// scanning either.
    #[must_use]
    pub fn concat_trimmed<'a>(&'a self, tail: &'a CharBuffer) -> ConcatRightTrim<'a> {
        let trimmed = if tail.content_end > 0 {
            self.len() + tail.content_end
        } else {
            self.content_end
        };
        ConcatRightTrim::with_trimmed_len(&self.chars, &tail.chars, trimmed)
    }

    /// This buffer alone, trailing whitespace hidden.
    #[must_use]
    pub fn trimmed(&self) -> ConcatRightTrim<'_> {
        ConcatRightTrim::with_trimmed_len(&[], &self.chars, self.content_end)
    }

    /// Copy `range` out as a `String`.
    #[must_use]
    pub fn substring(&self, range: Range<usize>) -> String {
        self.chars[range].iter().collect()
    }
}

impl CharSeq for CharBuffer {
    #[inline]
    fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    fn char_at(&self, index: usize) -> char {
        self.chars[index]
    }
}

impl fmt::Display for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        self.chars.iter().try_for_each(|&ch| f.write_char(ch))
    }
}

impl fmt::Debug for CharBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharBuffer({:?})", self.to_string())
    }
}

fn content_end(chars: &[char]) -> usize {
    chars
        .iter()
        .rposition(|c| !c.is_whitespace())
        .map_or(0, |i| i + 1)
}

/// Whether `chars` is empty or holds only whitespace.
#[inline]
pub(crate) fn is_blank(chars: &[char]) -> bool {
    chars.iter().all(|c| c.is_whitespace())
}

/// Number of whitespace characters at the start of `chars`.
#[inline]
pub(crate) fn leading_whitespace(chars: &[char]) -> usize {
    chars.iter().take_while(|c| c.is_whitespace()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_append() {
        let mut line = CharBuffer::new();
        line.push('a');
        line.append(&CharBuffer::from_text("bc"));
        assert_eq!(line.to_string(), "abc");
        assert_eq!(line.len(), 3);
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut buf = CharBuffer::with_capacity(2);
        for ch in "abcdefghij".chars() {
            buf.push(ch);
        }
        assert_eq!(buf.to_string(), "abcdefghij");
    }

    #[test]
    fn delete_middle_range() {
        let mut buf = CharBuffer::from_text("abcdef");
        buf.delete(1..3);
        assert_eq!(buf.to_string(), "adef");
        buf.delete(0..4);
        assert!(buf.is_empty());
    }

    #[test]
    fn trim_start_variants() {
        for (input, expected) in [("abc", "abc"), (" abc", "abc"), ("   abc", "abc"), ("  ", "")] {
            let mut buf = CharBuffer::from_text(input);
            buf.trim_start();
            assert_eq!(buf.to_string(), expected, "input {input:?}");
        }
    }

    #[test]
    fn trim_end_variants() {
        for (input, expected) in [("abc  ", "abc"), ("abc", "abc"), ("", ""), ("  ", "")] {
            let mut buf = CharBuffer::from_text(input);
            buf.trim_end();
            assert_eq!(buf.to_string(), expected, "input {input:?}");
        }
    }

    #[test]
    fn blank_detection() {
        assert!(CharBuffer::new().is_blank());
        assert!(CharBuffer::from_text(" \t ").is_blank());
        assert!(!CharBuffer::from_text(" x ").is_blank());
    }

    #[test]
    fn substring_copies_range() {
        let buf = CharBuffer::from_text("héllo");
        assert_eq!(buf.substring(1..4), "éll");
    }

    #[test]
    fn leading_whitespace_counts_prefix() {
        let chars: Vec<char> = "\t  x ".chars().collect();
        assert_eq!(leading_whitespace(&chars), 3);
        assert_eq!(leading_whitespace(&[]), 0);
    }

    #[test]
    fn trimmed_len_follows_every_edit() {
        let mut buf = CharBuffer::from_text("ab  ");
        assert_eq!(buf.trimmed_len(), 2);
        buf.push(' ');
        assert_eq!(buf.trimmed_len(), 2);
        buf.push('c');
        assert_eq!(buf.trimmed_len(), 6);

        buf.append(&CharBuffer::from_text("   "));
        assert_eq!(buf.trimmed_len(), 6);
        buf.append(&CharBuffer::from_text(" d "));
        assert_eq!(buf.trimmed_len(), 11);

        // "ab   c    d "
        buf.delete(0..2);
        assert_eq!(buf.trimmed_len(), 9);
        buf.delete(8..10);
        assert_eq!(buf.to_string(), "   c    ");
        assert_eq!(buf.trimmed_len(), 4);

        buf.trim_start();
        assert_eq!(buf.trimmed_len(), 1);
        buf.trim_end();
        assert_eq!(buf.to_string(), "c");

        buf.clear();
        assert_eq!(buf.trimmed_len(), 0);
    }

    #[test]
    fn trimmed_views_match_a_scan() {
        for (line, word) in [("ab ", "cd  "), ("ab  ", " \t"), ("  ", " "), ("", "x "), ("x", "")] {
            let (line, word) = (CharBuffer::from_text(line), CharBuffer::from_text(word));
            let fast = line.concat_trimmed(&word);
            let scanned = ConcatRightTrim::new(line.as_slice(), word.as_slice());
            assert_eq!(fast.len(), scanned.len(), "{line:?} + {word:?}");
            assert_eq!(word.trimmed().len(), ConcatRightTrim::single(word.as_slice()).len());
        }
    }

    #[test]
    fn buffer_is_a_char_seq() {
        let buf = CharBuffer::from_text("xy");
        let seq: &dyn CharSeq = &buf;
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.char_at(1), 'y');
    }
}
