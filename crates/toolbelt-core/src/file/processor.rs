use super::cancel::CancellationToken;
use super::encoding::{TextDecoder, TextEncoding};
use super::writer::write_text;
use crate::error::Result;
use std::path::{Path, PathBuf};
use toolbelt_util::hash::Blake3Stream;

/// Consumer of the chunks produced by [`read_file`](super::read_file).
///
/// `buffer` is the reader's reusable buffer: only `buffer[..bytes_read]` holds
/// data from this chunk, anything after it is left over from earlier reads.
/// `total_bytes` is the file size captured before the first read.
///
/// Any `FnMut(usize, &[u8], u64) -> Result<()>` closure is a processor.
#[allow(async_fn_in_trait)]
pub trait ChunkProcessor {
    async fn process(&mut self, bytes_read: usize, buffer: &[u8], total_bytes: u64) -> Result<()>;
}

impl<F> ChunkProcessor for F
where
    F: FnMut(usize, &[u8], u64) -> Result<()>,
{
    async fn process(&mut self, bytes_read: usize, buffer: &[u8], total_bytes: u64) -> Result<()> {
        self(bytes_read, buffer, total_bytes)
    }
}

/// Keeps every chunk in memory.
#[derive(Debug, Default)]
pub struct CollectProcessor {
    data: Vec<u8>,
}

impl CollectProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl ChunkProcessor for CollectProcessor {
    async fn process(&mut self, bytes_read: usize, buffer: &[u8], total_bytes: u64) -> Result<()> {
        if self.data.is_empty() {
            self.data
                .reserve(usize::try_from(total_bytes).unwrap_or(0).max(bytes_read));
        }
        self.data.extend_from_slice(&buffer[..bytes_read]);
        Ok(())
    }
}

/// BLAKE3 digest of the streamed content.
#[derive(Debug, Default)]
pub struct HashProcessor {
    stream: Blake3Stream,
}

impl HashProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bytes_hashed(&self) -> u64 {
        self.stream.bytes_hashed()
    }

    /// Hex digest of everything processed so far.
    #[must_use]
    pub fn hex_digest(&self) -> String {
        self.stream.finalize_hex()
    }
}

impl ChunkProcessor for HashProcessor {
    async fn process(&mut self, bytes_read: usize, buffer: &[u8], _total_bytes: u64) -> Result<()> {
        self.stream.update(&buffer[..bytes_read]);
        Ok(())
    }
}

/// Decodes chunks as text and appends them to another file.
///
/// The source is decoded with `source_encoding` and written with
/// `target_encoding`. Call [`finish`](Self::finish) after the read completes so
/// a truncated trailing sequence is written as U+FFFD instead of being dropped.
#[derive(Debug)]
pub struct AppendToFileProcessor {
    target: PathBuf,
    decoder: TextDecoder,
    target_encoding: TextEncoding,
    cancel: CancellationToken,
}

impl AppendToFileProcessor {
    #[must_use]
    pub fn new(
        target: impl Into<PathBuf>,
        source_encoding: TextEncoding,
        target_encoding: TextEncoding,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            target: target.into(),
            decoder: TextDecoder::new(source_encoding),
            target_encoding,
            cancel,
        }
    }

    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub async fn finish(&mut self) -> Result<()> {
        let rest = self.decoder.finish();
        if rest.is_empty() {
            return Ok(());
        }
        write_text(&self.target, &rest, self.target_encoding, &self.cancel).await
    }
}

impl ChunkProcessor for AppendToFileProcessor {
    async fn process(&mut self, bytes_read: usize, buffer: &[u8], _total_bytes: u64) -> Result<()> {
        let text = self.decoder.decode_chunk(&buffer[..bytes_read]);
        if text.is_empty() {
            return Ok(());
        }
        write_text(&self.target, &text, self.target_encoding, &self.cancel).await
    }
}
