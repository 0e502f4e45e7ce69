use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Characters stripped from file names on every platform, on top of the
/// platform's own reserved set.
pub const INVALID_FILENAME_CHARS: [char; 13] = [
    '?', '{', '}', '&', ':', '|', '[', ']', '<', '>', '~', '#', '%',
];

/// Extensions accepted by [`split_file_name_and_extension`] when the caller has no list of its own.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[".txt", ".jpg"];

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Separator used between entries of `PATH`-like lists.
#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Whether `c` may not appear anywhere in a path on this platform.
#[cfg(windows)]
fn is_invalid_path_char(c: char) -> bool {
    matches!(c, '"' | '<' | '>' | '|') || (c as u32) < 32
}

#[cfg(not(windows))]
fn is_invalid_path_char(c: char) -> bool {
    c == '\0'
}

/// Whether `c` may not appear in a single path component on this platform.
#[cfg(windows)]
fn is_invalid_filename_char(c: char) -> bool {
    is_invalid_path_char(c) || matches!(c, ':' | '*' | '?' | '\\' | '/')
}

#[cfg(not(windows))]
fn is_invalid_filename_char(c: char) -> bool {
    c == '\0' || c == '/'
}

/// Remove every character that is unsafe in a file name.
///
/// Strips [`INVALID_FILENAME_CHARS`], the platform's reserved path and file
/// name characters, the path-list separator and `/`. An empty name is returned
/// unchanged.
#[must_use]
pub fn remove_invalid_filename_chars(file_name: &str) -> String {
    file_name
        .chars()
        .filter(|&c| {
            !INVALID_FILENAME_CHARS.contains(&c)
                && !is_invalid_path_char(c)
                && !is_invalid_filename_char(c)
                && c != PATH_LIST_SEPARATOR
                && c != '/'
        })
        .collect()
}

/// Returns true if the file name contains a character the platform forbids in file names.
#[must_use]
pub fn has_invalid_filename_chars(file_name: &str) -> bool {
    file_name.chars().any(is_invalid_filename_char)
}

/// Returns true if the path contains a character the platform forbids in paths.
#[must_use]
pub fn has_invalid_path_chars(path: &str) -> bool {
    path.chars().any(is_invalid_path_char)
}

/// Size of a regular file in bytes, or 0 if it does not exist.
#[must_use]
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path)
        .ok()
        .filter(fs::Metadata::is_file)
        .map_or(0, |m| m.len())
}

/// Render a byte count with the largest unit that keeps it at or above 1.
///
/// Each step divides by 1024 with integer division, so `1536` becomes `"1 KB"`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes;
    let mut order = 0;
    while size >= 1024 && order < SIZE_UNITS.len() - 1 {
        order += 1;
        size /= 1024;
    }
    format!("{size} {}", SIZE_UNITS[order])
}

/// Size of the file at `path` rendered by [`format_size`].
///
/// # Errors
/// Returns `InvalidInput` if `path` is empty.
pub fn file_size_with_abbreviation(path: &Path) -> io::Result<String> {
    if path.as_os_str().is_empty() {
        return Err(empty_argument("path"));
    }
    Ok(format_size(file_size(path)))
}

/// Extension of `file_name` including the leading dot, or `""` if it has none.
///
/// Only the last path component is considered; a trailing dot yields no extension.
#[must_use]
pub fn extension(file_name: &str) -> &str {
    let name_start = file_name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match file_name[name_start..].rfind('.') {
        Some(dot) if name_start + dot + 1 < file_name.len() => &file_name[name_start + dot..],
        _ => "",
    }
}

/// Returns true if the extension of `file_name` is one of `allowed` (ASCII case-insensitive).
///
/// # Errors
/// Returns `InvalidInput` if `file_name` is empty.
pub fn has_allowed_extension(file_name: &str, allowed: &[&str]) -> io::Result<bool> {
    if file_name.is_empty() {
        return Err(empty_argument("file_name"));
    }
    let ext = extension(file_name);
    Ok(!ext.is_empty() && allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Split a file name into the part before the last dot and its extension.
///
/// `"report.final.txt"` becomes `("report.final", ".txt")`.
///
/// # Errors
/// Returns `InvalidInput` if the name is empty or its extension is not allowed.
pub fn split_file_name_and_extension(
    file_name: &str,
    allowed: &[&str],
) -> io::Result<(String, String)> {
    if !has_allowed_extension(file_name, allowed)? {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("file name '{file_name}' does not have an allowed extension"),
        ));
    }
    let ext = extension(file_name);
    let stem = &file_name[..file_name.len() - ext.len()];
    Ok((stem.to_string(), ext.to_string()))
}

/// Resolve a folder under `base`, creating it if needed.
///
/// An empty `folder` returns `base` itself without touching the filesystem.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn app_data_dir(base: &Path, folder: &str) -> io::Result<PathBuf> {
    if folder.is_empty() {
        return Ok(base.to_path_buf());
    }
    let dir = base.join(folder);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn empty_argument(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("'{name}' cannot be empty"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_remove_invalid_filename_chars() {
        assert_eq!(
            remove_invalid_filename_chars("re?po{r}t&:|[2024]<v1>~#%.txt"),
            "report2024v1.txt"
        );
        assert_eq!(remove_invalid_filename_chars("a/b"), "ab");
        assert_eq!(remove_invalid_filename_chars(""), "");
    }

    #[test]
    fn test_remove_invalid_filename_chars_keeps_valid_names() {
        assert_eq!(
            remove_invalid_filename_chars("notes_2024-01.md"),
            "notes_2024-01.md"
        );
    }

    #[test]
    fn test_has_invalid_filename_chars() {
        assert!(has_invalid_filename_chars("a/b.txt"));
        assert!(has_invalid_filename_chars("a\0b"));
        assert!(!has_invalid_filename_chars("plain.txt"));
        assert!(!has_invalid_filename_chars(""));
    }

    #[test]
    fn test_has_invalid_path_chars() {
        assert!(has_invalid_path_chars("dir/a\0b"));
        assert!(!has_invalid_path_chars("dir/sub/file.txt"));
        assert!(!has_invalid_path_chars(""));
    }

    #[test]
    fn test_file_size() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();
        file.flush().unwrap();

        assert_eq!(file_size(file.path()), 2048);
        assert_eq!(file_size(Path::new("/nonexistent/file")), 0);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_size(3 * 1024_u64.pow(4)), "3 TB");
        assert_eq!(format_size(2048 * 1024_u64.pow(4)), "2048 TB");
    }

    #[test]
    fn test_file_size_with_abbreviation() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[1u8; 3000]).unwrap();
        file.flush().unwrap();

        assert_eq!(file_size_with_abbreviation(file.path()).unwrap(), "2 KB");

        let err = file_size_with_abbreviation(Path::new("")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a.txt"), ".txt");
        assert_eq!(extension("a.b.jpg"), ".jpg");
        assert_eq!(extension("noext"), "");
        assert_eq!(extension("trailing."), "");
        assert_eq!(extension("dir.d/file"), "");
    }

    #[test]
    fn test_split_file_name_and_extension() {
        let (stem, ext) =
            split_file_name_and_extension("report.final.txt", DEFAULT_ALLOWED_EXTENSIONS)
                .unwrap();
        assert_eq!(stem, "report.final");
        assert_eq!(ext, ".txt");

        let err = split_file_name_and_extension("movie.mp4", DEFAULT_ALLOWED_EXTENSIONS)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_has_allowed_extension() {
        assert!(has_allowed_extension("photo.JPG", DEFAULT_ALLOWED_EXTENSIONS).unwrap());
        assert!(!has_allowed_extension("photo.png", DEFAULT_ALLOWED_EXTENSIONS).unwrap());
        assert!(has_allowed_extension("", DEFAULT_ALLOWED_EXTENSIONS).is_err());
    }

    #[test]
    fn test_app_data_dir() {
        let dir = tempdir().unwrap();

        assert_eq!(app_data_dir(dir.path(), "").unwrap(), dir.path());

        let created = app_data_dir(dir.path(), "logs").unwrap();
        assert_eq!(created, dir.path().join("logs"));
        assert!(created.is_dir());

        // Second call is a no-op
        assert_eq!(app_data_dir(dir.path(), "logs").unwrap(), created);
    }
}
