use super::cancel::CancellationToken;
use super::encoding::{TextDecoder, TextEncoding};
use super::processor::ChunkProcessor;
use super::{open_shared, validate_path, Share};
use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::AsyncReadExt;
use tracing::{debug, trace};

/// Buffer size for chunked reads and stream copies.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Read `path` in [`DEFAULT_CHUNK_SIZE`] chunks, feeding each to `processor`.
///
/// See [`read_file_with_chunk_size`].
pub async fn read_file<P: ChunkProcessor>(
    path: &Path,
    processor: &mut P,
    progress: Option<&mut dyn FnMut(f64)>,
    cancel: &CancellationToken,
) -> Result<()> {
    read_file_with_chunk_size(path, processor, progress, cancel, DEFAULT_CHUNK_SIZE).await
}

/// Read `path` sequentially in `chunk_size` chunks.
///
/// The file size is taken from metadata once, before the first read. The file
/// is then held exclusively while a single reusable buffer is filled until a
/// read returns 0 bytes. After each chunk the processor runs, then `progress`
/// (if any) receives the cumulative percentage `0.0..=100.0`. The sequence is
/// non-decreasing and a completed read always ends with exactly `100.0`, also
/// for an empty file, which produces no processor calls.
///
/// `cancel` is checked before every read; once raised the call returns
/// [`Error::Cancelled`] without reading further.
///
/// # Errors
/// - [`Error::MissingInput`] for an empty path, [`Error::Malformed`] for a path
///   with invalid characters or a zero `chunk_size`; nothing is opened.
/// - [`Error::Io`] unchanged from the filesystem.
/// - Whatever the processor returns, which stops the read.
pub async fn read_file_with_chunk_size<P: ChunkProcessor>(
    path: &Path,
    processor: &mut P,
    mut progress: Option<&mut dyn FnMut(f64)>,
    cancel: &CancellationToken,
    chunk_size: usize,
) -> Result<()> {
    validate_path(path)?;
    if chunk_size == 0 {
        return Err(Error::malformed("chunk size", "must be greater than zero"));
    }

    let total_bytes = tokio::fs::metadata(path).await?.len();
    let mut file = open_shared(OpenOptions::new().read(true), path, Share::None).await?;
    debug!(path = %path.display(), total_bytes, chunk_size, "reading file");

    let mut buffer = vec![0u8; chunk_size];
    let mut total_read: u64 = 0;
    let mut last_percent = None;

    loop {
        if cancel.is_cancelled() {
            debug!(path = %path.display(), total_read, "read cancelled");
            return Err(Error::Cancelled);
        }

        let bytes_read = file.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }

        processor.process(bytes_read, &buffer, total_bytes).await?;

        total_read += bytes_read as u64;
        let percent = percent_done(total_read, total_bytes);
        trace!(bytes_read, total_read, percent, "chunk processed");
        report(&mut progress, percent);
        last_percent = Some(percent);
    }

    if last_percent != Some(100.0) {
        report(&mut progress, 100.0);
    }

    debug!(path = %path.display(), total_read, "read complete");
    Ok(())
}

/// Read a text file and split it into lines.
///
/// Lines end at `\n`, `\r\n` or `\r`; the terminators are not included and a
/// final terminator does not produce an extra empty line. Other readers may
/// hold the file at the same time.
///
/// # Errors
/// Same argument checks as [`read_file`]; I/O errors and cancellation propagate.
pub async fn read_all_lines(
    path: &Path,
    encoding: TextEncoding,
    cancel: &CancellationToken,
) -> Result<Vec<String>> {
    validate_path(path)?;

    let mut file = open_shared(OpenOptions::new().read(true), path, Share::Read).await?;
    let mut decoder = TextDecoder::new(encoding);
    let mut buffer = vec![0u8; DEFAULT_CHUNK_SIZE];
    let mut text = String::new();

    loop {
        cancel.check()?;
        let bytes_read = file.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        text.push_str(&decoder.decode_chunk(&buffer[..bytes_read]));
    }
    text.push_str(&decoder.finish());

    let lines = split_lines(&text);
    debug!(path = %path.display(), %encoding, lines = lines.len(), "read lines");
    Ok(lines)
}

fn percent_done(read: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (read as f64 / total as f64 * 100.0).min(100.0)
}

fn report(progress: &mut Option<&mut dyn FnMut(f64)>, percent: f64) {
    if let Some(report) = progress.as_deref_mut() {
        report(percent);
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(i) => {
                lines.push(rest[..i].to_string());
                let skip = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::CollectProcessor;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file_with(data: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_file_chunks_and_progress() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let file = temp_file_with(&data);

        let mut chunks = Vec::new();
        let mut processor = |n: usize, buf: &[u8], total: u64| -> Result<()> {
            assert_eq!(buf.len(), DEFAULT_CHUNK_SIZE);
            assert_eq!(total, 10_000);
            chunks.push(buf[..n].to_vec());
            Ok(())
        };
        let mut percents = Vec::new();
        let mut on_progress = |p: f64| percents.push(p);

        read_file(
            file.path(),
            &mut processor,
            Some(&mut on_progress),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(
            chunks.iter().map(Vec::len).collect::<Vec<_>>(),
            vec![4096, 4096, 1808]
        );
        assert_eq!(chunks.concat(), data);

        assert_eq!(percents.len(), 3);
        assert!(percents.windows(2).all(|w| w[0] <= w[1]));
        assert!((percents[0] - 40.96).abs() < 1e-9);
        assert_eq!(*percents.last().unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_read_file_exact_multiple_of_chunk() {
        let file = temp_file_with(&[7u8; 8]);
        let mut collect = CollectProcessor::new();
        let mut percents = Vec::new();
        let mut on_progress = |p: f64| percents.push(p);

        read_file_with_chunk_size(
            file.path(),
            &mut collect,
            Some(&mut on_progress),
            &CancellationToken::new(),
            4,
        )
        .await
        .unwrap();

        assert_eq!(collect.as_slice(), &[7u8; 8]);
        assert_eq!(percents, vec![50.0, 100.0]);
    }

    #[tokio::test]
    async fn test_read_file_empty_file() {
        let file = temp_file_with(b"");
        let mut calls = 0;
        let mut processor = |_: usize, _: &[u8], _: u64| -> Result<()> {
            calls += 1;
            Ok(())
        };
        let mut percents = Vec::new();
        let mut on_progress = |p: f64| percents.push(p);

        read_file(
            file.path(),
            &mut processor,
            Some(&mut on_progress),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        assert_eq!(calls, 0);
        assert_eq!(percents, vec![100.0]);
    }

    #[tokio::test]
    async fn test_read_file_without_progress() {
        let file = temp_file_with(b"hello");
        let mut collect = CollectProcessor::new();

        read_file(file.path(), &mut collect, None, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(collect.into_inner(), b"hello");
    }

    #[tokio::test]
    async fn test_read_file_empty_path() {
        let mut collect = CollectProcessor::new();
        let err = read_file(Path::new(""), &mut collect, None, &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.is_missing_input());
    }

    #[tokio::test]
    async fn test_read_file_zero_chunk_size() {
        let file = temp_file_with(b"x");
        let mut collect = CollectProcessor::new();
        let err = read_file_with_chunk_size(
            file.path(),
            &mut collect,
            None,
            &CancellationToken::new(),
            0,
        )
        .await
        .unwrap_err();
        assert!(err.is_malformed());
    }

    #[tokio::test]
    async fn test_read_file_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut collect = CollectProcessor::new();
        let err = read_file(
            &dir.path().join("nope.bin"),
            &mut collect,
            None,
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

        match err {
            Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected Io, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_file_cancelled_between_chunks() {
        let file = temp_file_with(&[1u8; 100]);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();

        let mut calls = 0;
        let mut processor = |_: usize, _: &[u8], _: u64| -> Result<()> {
            calls += 1;
            trigger.cancel();
            Ok(())
        };

        let err = read_file_with_chunk_size(file.path(), &mut processor, None, &cancel, 10)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_read_file_processor_error_stops_read() {
        let file = temp_file_with(&[1u8; 100]);
        let mut calls = 0;
        let mut processor = |_: usize, _: &[u8], _: u64| -> Result<()> {
            calls += 1;
            Err(Error::other("sink full"))
        };

        let err = read_file_with_chunk_size(
            file.path(),
            &mut processor,
            None,
            &CancellationToken::new(),
            10,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "sink full");
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_read_all_lines() {
        let file = temp_file_with(b"first\r\nsecond\nthird\rfourth\n");
        let lines = read_all_lines(file.path(), TextEncoding::Utf8, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(lines, vec!["first", "second", "third", "fourth"]);
    }

    #[tokio::test]
    async fn test_read_all_lines_utf16() {
        let file = temp_file_with(&TextEncoding::Utf16Le.encode("ahoj\nsvěte"));
        let lines = read_all_lines(file.path(), TextEncoding::Utf16Le, &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(lines, vec!["ahoj", "světe"]);
    }

    #[tokio::test]
    async fn test_read_all_lines_cancelled() {
        let file = temp_file_with(b"a\nb\n");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = read_all_lines(file.path(), TextEncoding::Utf8, &cancel)
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines("").is_empty());
        assert_eq!(split_lines("\n"), vec![""]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(split_lines("a\r\n"), vec!["a"]);
    }

    #[test]
    fn test_percent_done() {
        assert_eq!(percent_done(0, 0), 100.0);
        assert_eq!(percent_done(50, 200), 25.0);
        assert_eq!(percent_done(300, 200), 100.0);
    }
}
