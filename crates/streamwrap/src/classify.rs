#![forbid(unsafe_code)]

//! Word-membership decisions.
//!
//! A word character is a letter, a configured extra character, or (when
//! enabled) a decimal digit. A punctuation mark that is *not* an extra word
//! character suppresses word membership of the character right after it, so
//! `(` does not fuse with the letters that follow when deciding whether the
//! combined token still fits.

use rustc_hash::FxHashSet;

use crate::buffer::leading_whitespace;
use crate::config::WrapConfig;

/// The separator a digit run may contain once.
pub const DECIMAL_SEPARATOR: char = '.';

/// Classifies characters for one wrap; carries the one-step punctuation
/// memory between calls.
#[derive(Debug, Clone)]
pub struct WordClassifier<'c> {
    extra: &'c FxHashSet<char>,
    digits: bool,
    wrap_decimal_separator: bool,
    previous_was_punctuation: bool,
}

impl<'c> WordClassifier<'c> {
    #[must_use]
    pub fn new(config: &'c WrapConfig) -> Self {
        Self {
            extra: config.extra_word_chars(),
            digits: config.digits_are_word_chars(),
            wrap_decimal_separator: config.wraps_decimal_separator(),
            previous_was_punctuation: false,
        }
    }

    /// Whether `ch` joins the current word at this step.
    #[inline]
    #[must_use]
    pub fn is_word_char(&self, ch: char) -> bool {
        !self.previous_was_punctuation && self.forms_words(ch)
    }

    /// Record `ch` as processed. Call once per input character, after
    /// [`Self::is_word_char`].
    #[inline]
    pub fn observe(&mut self, ch: char) {
        self.previous_was_punctuation = is_generic_punctuation(ch) && !self.extra.contains(&ch);
    }

    /// Whether `word` is a number: decimal digits with at most one
    /// [`DECIMAL_SEPARATOR`] unless separators are allowed to wrap.
    /// Leading whitespace is ignored.
    #[must_use]
    pub fn is_digit_run(&self, word: &[char]) -> bool {
        let body = &word[leading_whitespace(word)..];
        let mut digits = 0usize;
        let mut separators = 0usize;
        for &ch in body {
            if ch.is_ascii_digit() {
                digits += 1;
            } else if ch == DECIMAL_SEPARATOR && !self.wrap_decimal_separator {
                separators += 1;
                if separators > 1 {
                    return false;
                }
            } else {
                return false;
            }
        }
        digits > 0
    }

    fn forms_words(&self, ch: char) -> bool {
        ch.is_alphabetic() || (self.digits && ch.is_ascii_digit()) || self.extra.contains(&ch)
    }
}

/// ASCII punctuation: ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``.
#[inline]
#[must_use]
pub fn is_generic_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn letters_and_default_extras_are_word_chars() {
        let config = WrapConfig::default();
        let classifier = WordClassifier::new(&config);
        for ch in ['a', 'Z', 'é', '\u{4F60}', '\'', '?', ',', '_', '\u{201C}'] {
            assert!(classifier.is_word_char(ch), "{ch:?}");
        }
        for ch in [' ', '\t', '(', '-', '1', '#'] {
            assert!(!classifier.is_word_char(ch), "{ch:?}");
        }
    }

    #[test]
    fn digits_join_words_when_enabled() {
        let config = WrapConfig::default().include_digits_as_word_chars(true);
        let classifier = WordClassifier::new(&config);
        assert!(classifier.is_word_char('7'));
    }

    #[test]
    fn punctuation_suppresses_next_char_only() {
        let config = WrapConfig::default();
        let mut classifier = WordClassifier::new(&config);
        classifier.observe('(');
        assert!(!classifier.is_word_char('a'));
        classifier.observe('a');
        assert!(classifier.is_word_char('b'));
    }

    #[test]
    fn extra_punctuation_does_not_suppress() {
        let config = WrapConfig::default();
        let mut classifier = WordClassifier::new(&config);
        classifier.observe(',');
        assert!(classifier.is_word_char('a'));
    }

    #[test]
    fn configured_punctuation_does_not_suppress() {
        let config = WrapConfig::default().include_word_chars("(");
        let mut classifier = WordClassifier::new(&config);
        classifier.observe('(');
        assert!(classifier.is_word_char('a'));
    }

    #[test]
    fn excluded_extra_becomes_suppressing_punctuation() {
        let config = WrapConfig::default().exclude_word_chars(",");
        let mut classifier = WordClassifier::new(&config);
        assert!(!classifier.is_word_char(','));
        classifier.observe(',');
        assert!(!classifier.is_word_char('a'));
    }

    #[test]
    fn whitespace_clears_punctuation_memory() {
        let config = WrapConfig::default();
        let mut classifier = WordClassifier::new(&config);
        classifier.observe(')');
        classifier.observe(' ');
        assert!(classifier.is_word_char('a'));
    }

    #[test]
    fn digit_runs() {
        let config = WrapConfig::default();
        let classifier = WordClassifier::new(&config);
        assert!(classifier.is_digit_run(&chars("1234567")));
        assert!(classifier.is_digit_run(&chars("  42")));
        assert!(classifier.is_digit_run(&chars("3.14159")));
        assert!(!classifier.is_digit_run(&chars("1.2.3")));
        assert!(!classifier.is_digit_run(&chars("12a")));
        assert!(!classifier.is_digit_run(&chars(".")));
        assert!(!classifier.is_digit_run(&chars("   ")));
    }

    #[test]
    fn wrapping_separator_breaks_digit_run() {
        let config = WrapConfig::default().wrap_decimal_separator(true);
        let classifier = WordClassifier::new(&config);
        assert!(classifier.is_digit_run(&chars("1234")));
        assert!(!classifier.is_digit_run(&chars("3.14")));
    }
}
