#![forbid(unsafe_code)]

//! Streaming word wrap.
//!
//! # Role
//! `streamwrap` reflows text so no output line is wider than a maximum,
//! reading its input one character at a time and writing each line as soon
//! as its end is known. Width is whatever a pluggable function says it is:
//! character count by default, terminal cells via [`width::display_width`],
//! or anything else that maps a run of characters to an `f64`.
//!
//! # Primary responsibilities
//! - **[`WrapConfig`]**: maximum width, width function, newline, word
//!   characters, hyphenation and number handling.
//! - **[`LineWrapper`]**: the single-pass break decision engine.
//! - **Sinks** ([`LineSink`]): stream to an [`std::io::Write`], build a
//!   `String`, or collect lines into a `Vec`.
//! - **Sources** ([`source`]): in-memory text, decoded byte streams, files.
//!
//! # Example
//! ```
//! use streamwrap::WrapConfig;
//!
//! let config = WrapConfig::new(6)?;
//! assert_eq!(streamwrap::wrap_with("hellothere", &config), "hello-\nthere");
//! assert_eq!(
//!     streamwrap::wrap_lines("ab (cdefg", &config),
//!     ["ab (", "cdefg"],
//! );
//! # Ok::<(), streamwrap::WrapError>(())
//! ```

pub mod buffer;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod seq;
pub mod sink;
pub mod source;
pub mod width;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

pub use config::{DEFAULT_EXTRA_WORD_CHARS, DEFAULT_MAX_WIDTH, WidthFn, WrapConfig};
pub use engine::LineWrapper;
pub use error::{Result, WrapError};
pub use seq::CharSeq;
pub use sink::{LineCollector, LineSink, StringSink, WriterSink};

/// Wrap `text` at 80 characters.
#[must_use]
pub fn wrap(text: &str) -> String {
    wrap_with(text, &WrapConfig::default())
}

/// Wrap `text` into a string, joining lines with the configured newline.
#[must_use]
pub fn wrap_with(text: &str, config: &WrapConfig) -> String {
    let mut sink = StringSink::new(config.newline_str());
    LineWrapper::new(config).run_text(text, &mut sink);
    sink.into_string()
}

/// Wrap `text` into separate lines.
#[must_use]
pub fn wrap_lines(text: &str, config: &WrapConfig) -> Vec<String> {
    let mut sink = LineCollector::new();
    LineWrapper::new(config).run_text(text, &mut sink);
    sink.into_lines()
}

/// Wrap every character of `source` into `sink`.
///
/// # Errors
/// [`WrapError::Source`] or [`WrapError::Sink`] on the first failure.
/// Output already delivered to the sink stays delivered.
pub fn wrap_stream<I, S>(source: I, sink: &mut S, config: &WrapConfig) -> Result<()>
where
    I: IntoIterator<Item = io::Result<char>>,
    S: LineSink,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    LineWrapper::new(config).run(source, sink)
}

/// Wrap `source` into `writer` as UTF-8, then flush it.
///
/// # Errors
/// As [`wrap_stream`]; a failed flush is a sink error.
pub fn wrap_to_writer<I, W>(source: I, writer: W, config: &WrapConfig) -> Result<()>
where
    I: IntoIterator<Item = io::Result<char>>,
    W: io::Write,
{
    wrap_to_writer_with_encoding(source, writer, UTF_8, config)
}

/// Wrap `source` into `writer` in the given character set, then flush it.
/// See [`WriterSink::with_encoding`] for unmappable characters.
///
/// # Errors
/// As [`wrap_stream`]; a failed flush is a sink error.
pub fn wrap_to_writer_with_encoding<I, W>(
    source: I,
    writer: W,
    encoding: &'static Encoding,
    config: &WrapConfig,
) -> Result<()>
where
    I: IntoIterator<Item = io::Result<char>>,
    W: io::Write,
{
    let mut sink = WriterSink::with_encoding(writer, config.newline_str(), encoding);
    LineWrapper::new(config).run(source, &mut sink)?;
    sink.finish().map_err(WrapError::sink)
}

/// Wrap `source` into a list of lines.
///
/// # Errors
/// [`WrapError::Source`] if the source fails.
pub fn wrap_to_list<I>(source: I, config: &WrapConfig) -> Result<Vec<String>>
where
    I: IntoIterator<Item = io::Result<char>>,
{
    let mut sink = LineCollector::new();
    LineWrapper::new(config).run(source, &mut sink)?;
    Ok(sink.into_lines())
}

/// Wrap `source` into the file at `path` as UTF-8, creating or truncating
/// it.
///
/// # Errors
/// [`WrapError::Resource`] if the file cannot be created, otherwise as
/// [`wrap_to_writer`].
pub fn wrap_to_path<I>(source: I, path: impl AsRef<Path>, config: &WrapConfig) -> Result<()>
where
    I: IntoIterator<Item = io::Result<char>>,
{
    wrap_to_path_with_encoding(source, path, UTF_8, config)
}

/// Wrap `source` into the file at `path` in the given character set.
///
/// # Errors
/// As [`wrap_to_path`].
pub fn wrap_to_path_with_encoding<I>(
    source: I,
    path: impl AsRef<Path>,
    encoding: &'static Encoding,
    config: &WrapConfig,
) -> Result<()>
where
    I: IntoIterator<Item = io::Result<char>>,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| WrapError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), encoding = encoding.name(), "wrapping into file");
    wrap_to_writer_with_encoding(source, BufWriter::new(file), encoding, config)
}
