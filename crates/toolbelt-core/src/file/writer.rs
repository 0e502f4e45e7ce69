use super::cancel::CancellationToken;
use super::encoding::TextEncoding;
use super::reader::DEFAULT_CHUNK_SIZE;
use super::{open_shared, validate_path, Share};
use crate::error::{Error, Result};
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, AsyncWriteExt};
use tracing::debug;

/// Append `text` to `path` in the given encoding, creating the file if needed.
///
/// No byte order mark is written.
///
/// # Errors
/// Argument and cancellation checks happen before the file is opened; see
/// [`write_bytes`].
pub async fn write_text(
    path: &Path,
    text: &str,
    encoding: TextEncoding,
    cancel: &CancellationToken,
) -> Result<()> {
    validate_path(path)?;
    cancel.check()?;
    write_bytes(path, &encoding.encode(text), cancel).await
}

/// Append `data` to `path`, creating the file if needed, and flush.
///
/// The file is held exclusively while writing.
///
/// # Errors
/// - [`Error::MissingInput`](crate::Error::MissingInput) for an empty path,
///   [`Error::Malformed`](crate::Error::Malformed) for invalid path characters.
/// - [`Error::Cancelled`](crate::Error::Cancelled) if `cancel` is already raised.
/// - [`Error::Io`](crate::Error::Io) unchanged from the filesystem.
pub async fn write_bytes(path: &Path, data: &[u8], cancel: &CancellationToken) -> Result<()> {
    validate_path(path)?;
    cancel.check()?;

    let mut file = open_append(path).await?;
    file.write_all(data).await?;
    file.flush().await?;

    debug!(path = %path.display(), bytes = data.len(), "appended bytes");
    Ok(())
}

/// Append everything `source` yields to `path`, returning the number of bytes copied.
///
/// The copy runs in [`DEFAULT_CHUNK_SIZE`] chunks and checks `cancel` before
/// each one. A cancelled copy returns [`Error::Cancelled`](crate::Error::Cancelled);
/// bytes already appended stay in the file.
///
/// `source` must not read from `path` itself, or the copy never reaches end of
/// file. Use [`append_file`] to copy between paths.
pub async fn write_stream<R>(path: &Path, source: &mut R, cancel: &CancellationToken) -> Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    validate_path(path)?;
    cancel.check()?;

    let mut file = open_append(path).await?;
    let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];
    let mut copied: u64 = 0;

    loop {
        if let Err(e) = cancel.check() {
            file.flush().await?;
            debug!(path = %path.display(), copied, "stream copy cancelled");
            return Err(e);
        }

        let n = source.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n]).await?;
        copied += n as u64;
    }
    file.flush().await?;

    debug!(path = %path.display(), copied, "appended stream");
    Ok(copied)
}

/// Append the contents of the file at `source` to `path`.
///
/// The source is held with a shared lock for the whole copy, so a target that is
/// the same file (also through a link) cannot take its exclusive lock.
///
/// # Errors
/// - [`Error::Malformed`](crate::Error::Malformed) if both paths resolve to the
///   same file.
/// - [`Error::Io`](crate::Error::Io) if either file cannot be opened or locked.
/// - Everything [`write_stream`] returns.
pub async fn append_file(path: &Path, source: &Path, cancel: &CancellationToken) -> Result<u64> {
    validate_path(path)?;
    validate_path(source)?;
    cancel.check()?;

    let source_real = tokio::fs::canonicalize(source).await?;
    if let Ok(target_real) = tokio::fs::canonicalize(path).await {
        if target_real == source_real {
            return Err(Error::malformed(
                "path",
                format!("cannot append {} to itself", source.display()),
            ));
        }
    }

    let mut reader = open_shared(OpenOptions::new().read(true), source, Share::Read).await?;
    write_stream(path, &mut reader, cancel).await
}

/// Rewind `source` to its start, then behave like [`write_stream`].
pub async fn write_seekable_stream<R>(
    path: &Path,
    source: &mut R,
    cancel: &CancellationToken,
) -> Result<u64>
where
    R: AsyncRead + AsyncSeek + Unpin + ?Sized,
{
    validate_path(path)?;
    cancel.check()?;
    source.seek(SeekFrom::Start(0)).await?;
    write_stream(path, source, cancel).await
}

async fn open_append(path: &Path) -> std::io::Result<File> {
    open_shared(
        OpenOptions::new().append(true).create(true),
        path,
        Share::None,
    )
    .await
}
