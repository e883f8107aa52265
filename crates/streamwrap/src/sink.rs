#![forbid(unsafe_code)]

//! Destinations for wrapped lines.
//!
//! The wrapper reports each output line as zero or more [`LineSink::write`]
//! calls followed by [`LineSink::write_newline`]. The final fragment at end
//! of input gets writes but no newline.

use std::convert::Infallible;
use std::fmt;
use std::io::{self, Write as _};

use encoding_rs::{CoderResult, Encoder, Encoding, UTF_8};

/// Receives wrapped output.
pub trait LineSink {
    type Error;

    /// Append text to the current line.
    fn write(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Terminate the current line.
    fn write_newline(&mut self) -> Result<(), Self::Error>;
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    type Error = S::Error;

    #[inline]
    fn write(&mut self, text: &str) -> Result<(), Self::Error> {
        (**self).write(text)
    }

    #[inline]
    fn write_newline(&mut self) -> Result<(), Self::Error> {
        (**self).write_newline()
    }
}

/// Streams output into an [`io::Write`], terminating lines with a configured
/// newline.
///
/// Output is UTF-8 unless an encoding is given. Characters the encoding
/// cannot represent are written as HTML numeric character references
/// (`&#20320;`). UTF-16 has no encoder and falls back to UTF-8.
pub struct WriterSink<W> {
    inner: W,
    newline: String,
    encoder: Option<Encoder>,
    encoded: Vec<u8>,
}

impl<W: io::Write> WriterSink<W> {
    #[must_use]
    pub fn new(inner: W, newline: impl Into<String>) -> Self {
        Self {
            inner,
            newline: newline.into(),
            encoder: None,
            encoded: Vec::new(),
        }
    }

    /// Like [`WriterSink::new`], encoding the output with `encoding`.
    #[must_use]
    pub fn with_encoding(
        inner: W,
        newline: impl Into<String>,
        encoding: &'static Encoding,
    ) -> Self {
        let output = encoding.output_encoding();
        let mut sink = Self::new(inner, newline);
        if output != UTF_8 {
            sink.encoder = Some(output.new_encoder());
        }
        sink
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Whatever the writer reports.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Write any state the encoder still holds, then flush. Call once, after
    /// the last line.
    ///
    /// # Errors
    /// Whatever the writer reports.
    pub fn finish(&mut self) -> io::Result<()> {
        encode_write(&mut self.inner, &mut self.encoder, &mut self.encoded, "", true)?;
        self.inner.flush()
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> LineSink for WriterSink<W> {
    type Error = io::Error;

    fn write(&mut self, text: &str) -> io::Result<()> {
        encode_write(&mut self.inner, &mut self.encoder, &mut self.encoded, text, false)
    }

    fn write_newline(&mut self) -> io::Result<()> {
        encode_write(
            &mut self.inner,
            &mut self.encoder,
            &mut self.encoded,
            &self.newline,
            false,
        )
    }
}

impl<W> WriterSink<W> {
    /// The encoding bytes are written in.
    #[must_use]
    pub fn encoding(&self) -> &'static Encoding {
        self.encoder.as_ref().map_or(UTF_8, Encoder::encoding)
    }
}

impl<W> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink")
            .field("newline", &self.newline)
            .field("encoding", &self.encoding().name())
            .finish_non_exhaustive()
    }
}

fn encode_write<W: io::Write>(
    inner: &mut W,
    encoder: &mut Option<Encoder>,
    encoded: &mut Vec<u8>,
    mut text: &str,
    last: bool,
) -> io::Result<()> {
    let Some(encoder) = encoder else {
        return inner.write_all(text.as_bytes());
    };
    encoded.clear();
    loop {
        let needed = encoder
            .max_buffer_length_from_utf8_if_no_unmappables(text.len())
            .unwrap_or(text.len());
        // Room for at least one numeric character reference.
        encoded.reserve(needed.max(16));
        let (result, read, _unmappable) = encoder.encode_from_utf8_to_vec(text, encoded, last);
        text = &text[read..];
        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => {}
        }
    }
    inner.write_all(encoded)
}

/// Builds the wrapped text in memory.
#[derive(Debug, Clone, Default)]
pub struct StringSink {
    out: String,
    newline: String,
}

impl StringSink {
    #[must_use]
    pub fn new(newline: impl Into<String>) -> Self {
        Self {
            out: String::new(),
            newline: newline.into(),
        }
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }
}

impl LineSink for StringSink {
    type Error = Infallible;

    fn write(&mut self, text: &str) -> Result<(), Infallible> {
        self.out.push_str(text);
        Ok(())
    }

    fn write_newline(&mut self) -> Result<(), Infallible> {
        self.out.push_str(&self.newline);
        Ok(())
    }
}

/// Collects each line as its own `String`, without separators.
///
/// Every newline produces one element, empty lines included. A trailing
/// fragment becomes one more element only if it is non-empty.
#[derive(Debug, Clone, Default)]
pub struct LineCollector {
    lines: Vec<String>,
    current: String,
}

impl LineCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines terminated so far.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Finish collecting, keeping a non-empty unterminated fragment.
    #[must_use]
    pub fn into_lines(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.lines.push(self.current);
        }
        self.lines
    }
}

impl LineSink for LineCollector {
    type Error = Infallible;

    fn write(&mut self, text: &str) -> Result<(), Infallible> {
        self.current.push_str(text);
        Ok(())
    }

    fn write_newline(&mut self) -> Result<(), Infallible> {
        self.lines.push(std::mem::take(&mut self.current));
        Ok(())
    }
}

/// Unwrap a result that cannot fail.
#[inline]
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
