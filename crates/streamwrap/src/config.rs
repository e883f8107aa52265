#![forbid(unsafe_code)]

//! Wrap parameters.
//!
//! [`WrapConfig`] is built once and then only read. Setters consume and
//! return the config so they chain; `max_width` is the one fallible setter
//! and reports a bad width before any text is touched.
//!
//! # Example
//! ```
//! use streamwrap::WrapConfig;
//!
//! let config = WrapConfig::new(6)?.insert_hyphens(false);
//! assert_eq!(streamwrap::wrap_with("hellothere", &config), "hellot\nhere");
//! # Ok::<(), streamwrap::WrapError>(())
//! ```

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::error::{Result, WrapError};
use crate::seq::CharSeq;
use crate::width;

/// Measures the rendered width of a run of characters.
pub type WidthFn = Arc<dyn Fn(&dyn CharSeq) -> f64 + Send + Sync>;

/// Characters that join words by default, besides letters: straight and
/// typographic quotes plus `? . / ! , ; : _`.
pub const DEFAULT_EXTRA_WORD_CHARS: &str = "\"'\u{2018}\u{2019}\u{201C}\u{201D}?./!,;:_";

/// Default maximum line width.
pub const DEFAULT_MAX_WIDTH: f64 = 80.0;

/// Parameters for one or more wraps.
#[derive(Clone)]
pub struct WrapConfig {
    max_width: f64,
    width_fn: WidthFn,
    newline: String,
    extra_word_chars: FxHashSet<char>,
    insert_hyphens: bool,
    break_words: bool,
    include_digits_as_word_chars: bool,
    wrap_decimal_separator: bool,
}

impl WrapConfig {
    /// Default config with the given maximum width.
    ///
    /// # Errors
    /// [`WrapError::InvalidMaxWidth`] if `max_width` is not greater than zero.
    pub fn new(max_width: impl Into<f64>) -> Result<Self> {
        Self::default().max_width(max_width)
    }

    /// Set the maximum width of a line as measured by the width function.
    ///
    /// # Errors
    /// [`WrapError::InvalidMaxWidth`] if `max_width` is zero, negative or NaN.
    pub fn max_width(mut self, max_width: impl Into<f64>) -> Result<Self> {
        let max_width = max_width.into();
        if max_width.is_nan() || max_width <= 0.0 {
            return Err(WrapError::InvalidMaxWidth(max_width));
        }
        self.max_width = max_width;
        Ok(self)
    }

    /// Set the function measuring the width of a run of characters.
    #[must_use]
    pub fn string_width<F>(mut self, width_fn: F) -> Self
    where
        F: Fn(&dyn CharSeq) -> f64 + Send + Sync + 'static,
    {
        self.width_fn = Arc::new(width_fn);
        self
    }

    /// Set the line terminator written by stream sinks.
    #[must_use]
    pub fn newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    /// Replace the extra word characters.
    #[must_use]
    pub fn word_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.extra_word_chars = chars.into_iter().collect();
        self
    }

    /// Add to the extra word characters.
    #[must_use]
    pub fn include_word_chars(mut self, chars: &str) -> Self {
        self.extra_word_chars.extend(chars.chars());
        self
    }

    /// Remove from the extra word characters. Letters stay word characters
    /// regardless.
    #[must_use]
    pub fn exclude_word_chars(mut self, chars: &str) -> Self {
        for ch in chars.chars() {
            self.extra_word_chars.remove(&ch);
        }
        self
    }

    /// Set whether a forced break inside a word appends `-`.
    #[must_use]
    pub fn insert_hyphens(mut self, insert: bool) -> Self {
        self.insert_hyphens = insert;
        self
    }

    /// Set whether a word wider than the maximum is split across lines.
    /// When `false` such a word stays whole on its own line.
    #[must_use]
    pub fn break_words(mut self, enabled: bool) -> Self {
        self.break_words = enabled;
        self
    }

    /// Set whether decimal digits join words.
    #[must_use]
    pub fn include_digits_as_word_chars(mut self, include: bool) -> Self {
        self.include_digits_as_word_chars = include;
        self
    }

    /// Set whether a `.` inside a number stops it from counting as a digit
    /// run. Digit runs are never hyphenated.
    #[must_use]
    pub fn wrap_decimal_separator(mut self, wrap: bool) -> Self {
        self.wrap_decimal_separator = wrap;
        self
    }

    #[inline]
    #[must_use]
    pub fn width_limit(&self) -> f64 {
        self.max_width
    }

    /// Width of `text` under this config's width function.
    #[inline]
    #[must_use]
    pub fn measure(&self, text: &dyn CharSeq) -> f64 {
        (self.width_fn)(text)
    }

    /// Whether `text` is wider than the maximum.
    #[inline]
    #[must_use]
    pub fn overflows(&self, text: &dyn CharSeq) -> bool {
        self.measure(text) > self.max_width
    }

    #[inline]
    #[must_use]
    pub fn newline_str(&self) -> &str {
        &self.newline
    }

    #[must_use]
    pub fn extra_word_chars(&self) -> &FxHashSet<char> {
        &self.extra_word_chars
    }

    #[inline]
    #[must_use]
    pub fn inserts_hyphens(&self) -> bool {
        self.insert_hyphens
    }

    #[inline]
    #[must_use]
    pub fn breaks_words(&self) -> bool {
        self.break_words
    }

    #[inline]
    #[must_use]
    pub fn digits_are_word_chars(&self) -> bool {
        self.include_digits_as_word_chars
    }

    #[inline]
    #[must_use]
    pub fn wraps_decimal_separator(&self) -> bool {
        self.wrap_decimal_separator
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            width_fn: Arc::new(width::char_count),
            newline: "\n".to_string(),
            extra_word_chars: DEFAULT_EXTRA_WORD_CHARS.chars().collect(),
            insert_hyphens: true,
            break_words: true,
            include_digits_as_word_chars: false,
            wrap_decimal_separator: false,
        }
    }
}

impl fmt::Debug for WrapConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extra: Vec<char> = self.extra_word_chars.iter().copied().collect();
        extra.sort_unstable();
        f.debug_struct("WrapConfig")
            .field("max_width", &self.max_width)
            .field("newline", &self.newline)
            .field("extra_word_chars", &extra)
            .field("insert_hyphens", &self.insert_hyphens)
            .field("break_words", &self.break_words)
            .field(
                "include_digits_as_word_chars",
                &self.include_digits_as_word_chars,
            )
            .field("wrap_decimal_separator", &self.wrap_decimal_separator)
            .finish_non_exhaustive()
    }
}
