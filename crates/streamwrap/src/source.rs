#![forbid(unsafe_code)]

//! Character sources.
//!
//! A source is any `IntoIterator<Item = io::Result<char>>`. This module turns
//! in-memory text, byte streams in a given character set, and files into
//! one. Each adapter owns what it opened and releases it when dropped, so a
//! wrap that fails part-way still closes its input exactly once.
//!
//! Embedded resources go through the byte-stream adapter:
//!
//! ```
//! use streamwrap::source::DecodedChars;
//!
//! static RESOURCE: &[u8] = b"caf\xe9";
//! let chars: String = DecodedChars::new(RESOURCE, encoding_rs::WINDOWS_1252)
//!     .collect::<std::io::Result<_>>()
//!     .unwrap();
//! assert_eq!(chars, "café");
//! ```

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};

use crate::error::{Result, WrapError};

/// Bytes requested from the reader per refill.
pub const CHUNK_SIZE: usize = 8192;

/// Characters of in-memory text.
pub fn text_chars(text: &str) -> impl Iterator<Item = io::Result<char>> + '_ {
    text.chars().map(Ok)
}

/// Open `path` and decode it with `encoding`.
///
/// # Errors
/// [`WrapError::Resource`] if the file cannot be opened.
pub fn open_path(
    path: impl AsRef<Path>,
    encoding: &'static Encoding,
) -> Result<DecodedChars<File>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| WrapError::Resource {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), encoding = encoding.name(), "opened source file");
    Ok(DecodedChars::new(file, encoding))
}

/// Decodes a byte stream incrementally into characters.
///
/// A byte-order mark, if present, overrides `encoding` and is not yielded.
/// Malformed sequences decode to U+FFFD.
pub struct DecodedChars<R> {
    reader: R,
    decoder: Decoder,
    bytes: Box<[u8]>,
    decoded: String,
    pos: usize,
    finished: bool,
}

impl<R: Read> DecodedChars<R> {
    #[must_use]
    pub fn new(reader: R, encoding: &'static Encoding) -> Self {
        Self {
            reader,
            decoder: encoding.new_decoder(),
            bytes: vec![0; CHUNK_SIZE].into_boxed_slice(),
            decoded: String::with_capacity(CHUNK_SIZE),
            pos: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn utf8(reader: R) -> Self {
        Self::new(reader, UTF_8)
    }

    /// Recover the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decode the next chunk. `Ok(false)` once the input is exhausted.
    fn refill(&mut self) -> io::Result<bool> {
        self.decoded.clear();
        self.pos = 0;
        while self.decoded.is_empty() {
            if self.finished {
                return Ok(false);
            }
            let read = loop {
                match self.reader.read(&mut self.bytes) {
                    Ok(n) => break n,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                    Err(err) => return Err(err),
                }
            };
            let last = read == 0;
            decode_into(&mut self.decoder, &self.bytes[..read], &mut self.decoded, last);
            self.finished = last;
        }
        Ok(true)
    }
}

impl<R: Read> Iterator for DecodedChars<R> {
    type Item = io::Result<char>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.decoded.len() {
            match self.refill() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }
        let ch = self.decoded[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(Ok(ch))
    }
}

impl<R> std::fmt::Debug for DecodedChars<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedChars")
            .field("encoding", &self.decoder.encoding().name())
            .field("buffered", &(self.decoded.len() - self.pos))
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

fn decode_into(decoder: &mut Decoder, mut src: &[u8], dst: &mut String, last: bool) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(CHUNK_SIZE);
        dst.reserve(needed);
        let (result, read, _replaced) = decoder.decode_to_string(src, dst, last);
        src = &src[read..];
        match result {
            CoderResult::InputEmpty => return,
            CoderResult::OutputFull => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    /// Hands out one byte per read, splitting every multi-byte sequence.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn decode_all<R: Read>(chars: DecodedChars<R>) -> String {
        chars.collect::<io::Result<String>>().expect("decoding failed")
    }

    #[test]
    fn text_chars_yields_every_char() {
        let chars: Vec<char> = text_chars("a\u{e9}\n").map(Result::unwrap).collect();
        assert_eq!(chars, ['a', '\u{e9}', '\n']);
    }

    #[test]
    fn utf8_across_read_boundaries() {
        let text = "h\u{e9}llo \u{4F60}\u{597D} \u{1F600}";
        assert_eq!(decode_all(DecodedChars::utf8(Trickle(text.as_bytes()))), text);
    }

    #[test]
    fn larger_than_one_chunk() {
        let text = "abc\u{e9} ".repeat(CHUNK_SIZE / 2);
        assert_eq!(decode_all(DecodedChars::utf8(text.as_bytes())), text);
    }

    #[test]
    fn legacy_charset() {
        let bytes = b"na\xefve caf\xe9";
        let decoded = decode_all(DecodedChars::new(&bytes[..], encoding_rs::WINDOWS_1252));
        assert_eq!(decoded, "na\u{ef}ve caf\u{e9}");
    }

    #[test]
    fn bom_selects_utf16() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "hi!".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_all(DecodedChars::utf8(&bytes[..])), "hi!");
    }

    #[test]
    fn malformed_input_is_replaced() {
        let decoded = decode_all(DecodedChars::utf8(&b"a\xffb"[..]));
        assert_eq!(decoded, "a\u{FFFD}b");
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert_eq!(DecodedChars::utf8(io::empty()).count(), 0);
    }

    #[test]
    fn read_errors_surface_once() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("disk gone"))
            }
        }
        let mut chars = DecodedChars::utf8(Failing);
        let err = chars.next().expect("an item").expect_err("an error");
        assert_eq!(err.to_string(), "disk gone");
        assert!(chars.next().is_none());
    }

    #[test]
    fn interrupted_reads_are_retried() {
        struct Flaky {
            interrupted: bool,
            data: &'static [u8],
        }
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(io::ErrorKind::Interrupted.into());
                }
                self.data.read(buf)
            }
        }
        let source = Flaky {
            interrupted: false,
            data: b"ok",
        };
        assert_eq!(decode_all(DecodedChars::utf8(source)), "ok");
    }

    #[test]
    fn open_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all("line one\nline two".as_bytes())
            .expect("write temp file");
        let chars = open_path(file.path(), UTF_8).expect("open temp file");
        assert_eq!(decode_all(chars), "line one\nline two");
    }

    #[test]
    fn open_path_missing_file_is_resource_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.txt");
        let err = open_path(&missing, UTF_8).expect_err("file does not exist");
        match err {
            WrapError::Resource { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
