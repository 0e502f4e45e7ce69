//! Streaming file I/O.
//!
//! The reader drives a chunked read loop and hands every chunk to a
//! caller-supplied [`ChunkProcessor`]; what happens to the data is entirely up
//! to the processor. The writer appends text, bytes or a whole source stream.
//!
//! All arguments are validated before any file handle is opened. I/O errors are
//! returned unchanged as [`Error::Io`]; there is no retry. Cancellation is
//! cooperative and only observed at chunk boundaries.

mod cancel;
mod encoding;
mod processor;
mod reader;
mod writer;

pub use cancel::CancellationToken;
pub use encoding::{TextDecoder, TextEncoding};
pub use processor::{AppendToFileProcessor, ChunkProcessor, CollectProcessor, HashProcessor};
pub use reader::{read_all_lines, read_file, read_file_with_chunk_size, DEFAULT_CHUNK_SIZE};
pub use writer::{append_file, write_bytes, write_seekable_stream, write_stream, write_text};

use crate::error::{Error, Result};
use std::io;
use std::path::Path;
use tokio::fs::{File, OpenOptions};

/// Reject empty paths and paths with characters the platform forbids.
fn validate_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(Error::missing("path"));
    }
    if let Some(s) = path.to_str() {
        if toolbelt_util::fs::has_invalid_path_chars(s) {
            return Err(Error::malformed(
                "path",
                format!("{s:?} contains invalid characters"),
            ));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Share {
    /// Other readers may open the file too.
    Read,
    /// Nobody else may open the file while we hold it.
    None,
}

/// Open `path` and take the requested sharing lock.
///
/// On Unix this is an advisory, non-blocking `flock`; a conflicting holder
/// makes the open fail with `WouldBlock`. On Windows the share mode is set at
/// open time.
async fn open_shared(options: &mut OpenOptions, path: &Path, share: Share) -> io::Result<File> {
    #[cfg(windows)]
    {
        const FILE_SHARE_READ: u32 = 0x0000_0001;
        options.share_mode(match share {
            Share::Read => FILE_SHARE_READ,
            Share::None => 0,
        });
    }

    let file = options.open(path).await?;

    #[cfg(unix)]
    lock(&file, share)?;

    Ok(file)
}

#[cfg(unix)]
fn lock(file: &File, share: Share) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let operation = match share {
        Share::Read => libc::LOCK_SH,
        Share::None => libc::LOCK_EX,
    } | libc::LOCK_NB;

    // SAFETY: the descriptor is owned by `file`, which outlives this call.
    let ret = unsafe { libc::flock(file.as_raw_fd(), operation) };
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path(Path::new("")).unwrap_err().is_missing_input());
        assert!(validate_path(Path::new("bad\0name")).unwrap_err().is_malformed());
        assert!(validate_path(Path::new("dir/file.txt")).is_ok());
    }

    #[tokio::test]
    async fn test_exclusive_open_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locked.bin");
        tokio::fs::write(&path, b"x").await.unwrap();

        let _held = open_shared(OpenOptions::new().read(true), &path, Share::None)
            .await
            .unwrap();
        let second = open_shared(OpenOptions::new().read(true), &path, Share::Read).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_shared_opens_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.txt");
        tokio::fs::write(&path, b"x").await.unwrap();

        let _a = open_shared(OpenOptions::new().read(true), &path, Share::Read)
            .await
            .unwrap();
        let b = open_shared(OpenOptions::new().read(true), &path, Share::Read).await;
        assert!(b.is_ok());
    }
}
