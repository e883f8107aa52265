#![forbid(unsafe_code)]

//! Single-pass streaming line wrapper.
//!
//! [`LineWrapper`] consumes one character at a time and decides, with no
//! lookahead beyond the token it is accumulating, where lines end. It keeps
//! two buffers:
//!
//! - `line`: text committed to the current output line but not yet written.
//! - `word`: the token in progress.
//!
//! After every character the right-trimmed concatenation of the two is what
//! would be written if a break were forced now; it is probed against the
//! maximum width through a [`ConcatRightTrim`](crate::seq::ConcatRightTrim)
//! view. The buffers know their own trimmed lengths, so a probe neither
//! copies nor rescans, and a wrap stays linear in its input.
//!
//! # States
//!
//! | State | `broken` | Entered on |
//! |-------|----------|------------|
//! | accumulating | `false` | start, `'\n'` |
//! | continuation | `true` | any line ended by overflow rather than by input |
//!
//! In the continuation state leading whitespace of the next token is
//! dropped, since the break that ended the previous line already separates
//! them.
//!
//! # Example
//! ```
//! use streamwrap::WrapConfig;
//! use streamwrap::engine::LineWrapper;
//! use streamwrap::sink::LineCollector;
//!
//! let config = WrapConfig::new(10)?;
//! let mut wrapper = LineWrapper::new(&config);
//! let mut sink = LineCollector::new();
//! for ch in "hello there how are you".chars() {
//!     wrapper.push(ch, &mut sink).unwrap();
//! }
//! wrapper.finish(&mut sink).unwrap();
//! assert_eq!(sink.into_lines(), ["hello", "there how", "are you"]);
//! # Ok::<(), streamwrap::WrapError>(())
//! ```

use std::convert::Infallible;
use std::io;

use crate::buffer::{CharBuffer, is_blank};
use crate::classify::WordClassifier;
use crate::config::WrapConfig;
use crate::error::{Result, WrapError};
use crate::sink::{LineSink, infallible};

const INITIAL_CAPACITY: usize = 128;

/// Wrap state for one pass over one input.
#[derive(Debug)]
pub struct LineWrapper<'c> {
    config: &'c WrapConfig,
    classifier: WordClassifier<'c>,
    line: CharBuffer,
    word: CharBuffer,
    broken: bool,
    /// Reused for every write so emitting a line does not allocate.
    scratch: String,
    newlines: usize,
}

impl<'c> LineWrapper<'c> {
    #[must_use]
    pub fn new(config: &'c WrapConfig) -> Self {
        Self {
            config,
            classifier: WordClassifier::new(config),
            line: CharBuffer::with_capacity(INITIAL_CAPACITY),
            word: CharBuffer::with_capacity(INITIAL_CAPACITY),
            broken: false,
            scratch: String::with_capacity(INITIAL_CAPACITY),
            newlines: 0,
        }
    }

    /// Whether the last line written ended at a forced break rather than at
    /// an input newline.
    #[inline]
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.broken
    }

    /// Number of line terminators written so far.
    #[inline]
    #[must_use]
    pub fn newlines_written(&self) -> usize {
        self.newlines
    }

    /// Feed one character.
    ///
    /// # Errors
    /// Whatever the sink reports; the wrapper should be dropped afterwards.
    pub fn push<S: LineSink>(&mut self, ch: char, sink: &mut S) -> Result<(), S::Error> {
        match ch {
            '\n' => self.end_input_line(sink)?,
            '\r' => {}
            _ if self.classifier.is_word_char(ch) => self.push_word_char(ch, sink)?,
            _ => self.push_separator(ch, sink)?,
        }
        self.classifier.observe(ch);
        Ok(())
    }

    /// Write whatever is pending. The final fragment is written as-is,
    /// including trailing whitespace, and without a line terminator.
    ///
    /// # Errors
    /// Whatever the sink reports.
    pub fn finish<S: LineSink>(mut self, sink: &mut S) -> Result<(), S::Error> {
        if !self.line.is_empty() {
            self.line.append(&self.word);
            if self.broken {
                self.line.trim_start();
            }
            write_chars(&mut self.scratch, sink, self.line.as_slice())?;
        } else {
            if self.broken {
                self.word.trim_start();
            }
            if !self.word.is_blank() {
                write_chars(&mut self.scratch, sink, self.word.as_slice())?;
            }
        }
        tracing::debug!(newlines = self.newlines, "wrap finished");
        Ok(())
    }

    /// Pull every character from `source`, then finish.
    ///
    /// # Errors
    /// [`WrapError::Source`] if the source fails, [`WrapError::Sink`] if the
    /// sink does. Nothing is retried.
    pub fn run<I, S>(mut self, source: I, sink: &mut S) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<char>>,
        S: LineSink,
        S::Error: std::error::Error + Send + Sync + 'static,
    {
        for ch in source {
            let ch = ch.map_err(WrapError::Source)?;
            self.push(ch, sink).map_err(WrapError::sink)?;
        }
        self.finish(sink).map_err(WrapError::sink)
    }

    /// Wrap in-memory text into a sink that cannot fail.
    pub fn run_text<S>(mut self, text: &str, sink: &mut S)
    where
        S: LineSink<Error = Infallible>,
    {
        for ch in text.chars() {
            infallible(self.push(ch, sink));
        }
        infallible(self.finish(sink));
    }

    fn end_input_line<S: LineSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        self.line.append(&self.word);
        self.word.clear();
        if self.config.overflows(&self.line) {
            self.line.trim_end();
        }
        if !self.line.is_blank() {
            write_chars(&mut self.scratch, sink, self.line.as_slice())?;
        }
        self.newline(sink)?;
        self.line.clear();
        self.broken = false;
        Ok(())
    }

    fn push_word_char<S: LineSink>(&mut self, ch: char, sink: &mut S) -> Result<(), S::Error> {
        self.word.push(ch);
        if self.broken && self.line.is_empty() {
            self.word.trim_start();
        }
        if !self.pending_overflows() {
            return Ok(());
        }
        if !self.line.is_empty() {
            self.flush_line(sink)?;
            self.word.trim_start();
            if self.config.breaks_words() && self.config.overflows(&self.word.trimmed()) {
                self.force_break(sink)?;
            }
            self.broken = true;
        } else if self.config.breaks_words() {
            self.force_break(sink)?;
        } else {
            // Long word, no breaking: let it run until a separator ends it.
            self.broken = true;
        }
        Ok(())
    }

    fn push_separator<S: LineSink>(&mut self, ch: char, sink: &mut S) -> Result<(), S::Error> {
        if !self.word.is_blank() {
            self.line.append(&self.word);
            self.word.clear();
            if self.broken {
                self.line.trim_start();
            }
        }
        self.word.push(ch);
        if !self.pending_overflows() {
            return Ok(());
        }
        if !self.line.is_empty() {
            if self.line.is_blank() {
                self.line.clear();
            } else {
                self.flush_line(sink)?;
            }
            self.broken = true;
        } else {
            self.drop_overlong_run();
        }
        Ok(())
    }

    /// `ch` pushed a whitespace run past the limit with nothing committed on
    /// the line. A non-blank word would have been committed already, so
    /// everything before `ch` is whitespace and is dropped. `ch` itself is
    /// kept as the start of the next token rather than discarded, so no
    /// visible character is lost.
    fn drop_overlong_run(&mut self) {
        let split = self.word.len() - 1;
        debug_assert!(is_blank(&self.word.as_slice()[..split]));
        self.word.delete(0..split);
    }

    /// Split an overlong word: all but its last two characters plus `-`, or
    /// all but its last character when no hyphen applies.
    fn force_break<S: LineSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        let len = self.word.len();
        let digit_run = self.classifier.is_digit_run(self.word.as_slice());
        let hyphenate = self.config.inserts_hyphens()
            && len > 2
            && !digit_run
            && !is_blank(&self.word.as_slice()[..len - 2]);
        let keep = if hyphenate { 2 } else { 1 };
        let cut = len.saturating_sub(keep);
        let head = &self.word.as_slice()[..cut];
        if !is_blank(head) {
            write_chars(&mut self.scratch, sink, head)?;
        }
        if hyphenate {
            sink.write("-")?;
        }
        self.newline(sink)?;
        tracing::trace!(cut, hyphenate, digit_run, "forced break");
        self.word.delete(0..cut);
        self.broken = true;
        Ok(())
    }

    fn flush_line<S: LineSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        write_chars(&mut self.scratch, sink, self.line.as_slice())?;
        self.newline(sink)?;
        self.line.clear();
        Ok(())
    }

    fn newline<S: LineSink>(&mut self, sink: &mut S) -> Result<(), S::Error> {
        sink.write_newline()?;
        self.newlines += 1;
        Ok(())
    }

    fn pending_overflows(&self) -> bool {
        self.config.overflows(&self.line.concat_trimmed(&self.word))
    }
}

fn write_chars<S: LineSink>(
    scratch: &mut String,
    sink: &mut S,
    chars: &[char],
) -> Result<(), S::Error> {
    if chars.is_empty() {
        return Ok(());
    }
    scratch.clear();
    scratch.extend(chars);
    sink.write(scratch)
}
