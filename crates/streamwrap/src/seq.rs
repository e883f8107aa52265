#![forbid(unsafe_code)]

//! Indexable character sequences and zero-copy views over them.
//!
//! Width functions receive a `&dyn CharSeq`. The wrapper probes for overflow
//! once per input character, so the probe must not build a new string each
//! time: [`Concat`] and [`ConcatRightTrim`] present two borrowed slices as a
//! single sequence without copying either of them.
//!
//! # Example
//! ```
//! use streamwrap::seq::{CharSeq, ConcatRightTrim};
//!
//! let line: Vec<char> = "ab ".chars().collect();
//! let word: Vec<char> = "cd  ".chars().collect();
//! let view = ConcatRightTrim::new(&line, &word);
//! assert_eq!(view.len(), 5);
//! assert_eq!(view.char_at(4), 'd');
//! ```

use std::cell::OnceCell;
use std::fmt;

/// A read-only sequence of characters with random access.
pub trait CharSeq {
    /// Number of characters in the sequence.
    fn len(&self) -> usize;

    /// Character at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    fn char_at(&self, index: usize) -> char;

    /// Returns `true` if the sequence holds no characters.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> dyn CharSeq + 'a {
    /// Iterate over the characters in order.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        (0..self.len()).map(move |i| self.char_at(i))
    }
}

impl fmt::Display for dyn CharSeq + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write as _;
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

/// Two slices presented back to back.
#[derive(Debug, Clone, Copy)]
pub struct Concat<'a> {
    head: &'a [char],
    tail: &'a [char],
}

impl<'a> Concat<'a> {
    #[must_use]
    pub fn new(head: &'a [char], tail: &'a [char]) -> Self {
        Self { head, tail }
    }
}

impl CharSeq for Concat<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.head.len() + self.tail.len()
    }

    #[inline]
    fn char_at(&self, index: usize) -> char {
        concat_char_at(self.head, self.tail, index)
    }
}

/// Two slices presented back to back with trailing whitespace hidden.
///
/// The trimmed length is computed on the first call to [`CharSeq::len`] and
/// cached for the lifetime of the view, which is only ever one probe.
#[derive(Debug, Clone)]
pub struct ConcatRightTrim<'a> {
    head: &'a [char],
    tail: &'a [char],
    trimmed_len: OnceCell<usize>,
}

impl<'a> ConcatRightTrim<'a> {
    #[must_use]
    pub fn new(head: &'a [char], tail: &'a [char]) -> Self {
        Self {
            head,
            tail,
            trimmed_len: OnceCell::new(),
        }
    }

    /// View whose trimmed length is already known, skipping the scan.
    ///
    /// `trimmed_len` must be the length of `head ++ tail` without its
    /// trailing whitespace.
    #[must_use]
    pub fn with_trimmed_len(head: &'a [char], tail: &'a [char], trimmed_len: usize) -> Self {
        debug_assert!(trimmed_len <= head.len() + tail.len());
        Self {
            head,
            tail,
            trimmed_len: OnceCell::from(trimmed_len),
        }
    }

    /// View over a single slice, right-trimmed.
    #[must_use]
    pub fn single(chars: &'a [char]) -> Self {
        Self::new(&[], chars)
    }

    fn compute_len(&self) -> usize {
        let mut len = self.head.len() + self.tail.len();
        while len > 0 && concat_char_at(self.head, self.tail, len - 1).is_whitespace() {
            len -= 1;
        }
        len
    }
}

impl CharSeq for ConcatRightTrim<'_> {
    #[inline]
    fn len(&self) -> usize {
        *self.trimmed_len.get_or_init(|| self.compute_len())
    }

    #[inline]
    fn char_at(&self, index: usize) -> char {
        assert!(
            index < self.len(),
            "index {index} out of range for trimmed length {}",
            self.len()
        );
        concat_char_at(self.head, self.tail, index)
    }
}

#[inline]
fn concat_char_at(head: &[char], tail: &[char], index: usize) -> char {
    match head.get(index) {
        Some(&ch) => ch,
        None => tail[index - head.len()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn render(seq: &dyn CharSeq) -> String {
        seq.to_string()
    }

    #[test]
    fn concat_spans_both_halves() {
        let (a, b) = (chars("ab"), chars("cd"));
        let view = Concat::new(&a, &b);
        assert_eq!(view.len(), 4);
        assert_eq!(view.char_at(0), 'a');
        assert_eq!(view.char_at(3), 'd');
        assert_eq!(render(&view), "abcd");
    }

    #[test]
    fn concat_keeps_whitespace() {
        let (a, b) = (chars("ab "), chars("cd  "));
        assert_eq!(render(&Concat::new(&a, &b)), "ab cd  ");
    }

    #[test]
    fn right_trim_hides_trailing_whitespace() {
        let (a, b) = (chars("ab "), chars("cd  "));
        let view = ConcatRightTrim::new(&a, &b);
        assert_eq!(view.len(), 5);
        assert_eq!(render(&view), "ab cd");
    }

    #[test]
    fn right_trim_reaches_into_head() {
        let (a, b) = (chars("ab  "), chars(" \t"));
        let view = ConcatRightTrim::new(&a, &b);
        assert_eq!(render(&view), "ab");
    }

    #[test]
    fn right_trim_of_blank_is_empty() {
        let (a, b) = (chars("  "), chars(" "));
        let view = ConcatRightTrim::new(&a, &b);
        assert!(view.is_empty());
        assert!(ConcatRightTrim::new(&[], &[]).is_empty());
    }

    #[test]
    fn single_slice_view() {
        let word = chars("hey ");
        assert_eq!(render(&ConcatRightTrim::single(&word)), "hey");
    }

    #[test]
    fn known_trimmed_len_is_trusted() {
        let (a, b) = (chars("ab "), chars("c "));
        let view = ConcatRightTrim::with_trimmed_len(&a, &b, 4);
        assert_eq!(view.len(), 4);
        assert_eq!(render(&view), "ab c");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn right_trim_rejects_index_in_trimmed_tail() {
        let (a, b) = (chars("ab"), chars(" "));
        let _ = ConcatRightTrim::new(&a, &b).char_at(2);
    }

    #[test]
    fn dyn_chars_iterates_in_order() {
        let (a, b) = (chars("x"), chars("yz"));
        let view = Concat::new(&a, &b);
        let seq: &dyn CharSeq = &view;
        assert_eq!(seq.chars().collect::<String>(), "xyz");
    }
}
