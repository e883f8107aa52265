#![forbid(unsafe_code)]

//! Stock width metrics.
//!
//! Any `Fn(&dyn CharSeq) -> f64` can serve as a width function; these two
//! cover the common cases. [`char_count`] is the default.

use unicode_width::UnicodeWidthChar;

use crate::seq::CharSeq;

/// Width as the number of characters.
#[inline]
#[must_use]
pub fn char_count(text: &dyn CharSeq) -> f64 {
    text.len() as f64
}

/// Width in terminal cells.
///
/// CJK and other East Asian wide characters count as 2, combining marks and
/// control characters as 0.
///
/// # Example
/// ```
/// use streamwrap::WrapConfig;
/// use streamwrap::width::display_width;
///
/// let config = WrapConfig::new(4)
///     .unwrap()
///     .string_width(display_width)
///     .insert_hyphens(false);
/// let wrapped = streamwrap::wrap_with("\u{4F60}\u{597D}\u{4E16}\u{754C}", &config);
/// assert_eq!(wrapped, "\u{4F60}\u{597D}\n\u{4E16}\u{754C}");
/// ```
#[must_use]
pub fn display_width(text: &dyn CharSeq) -> f64 {
    let mut cells = 0usize;
    for ch in text.chars() {
        cells += char_cells(ch);
    }
    cells as f64
}

#[inline]
fn char_cells(ch: char) -> usize {
    if ch.is_ascii() {
        return usize::from((' '..='~').contains(&ch));
    }
    ch.width().unwrap_or(0)
}
