use std::io;
use std::path::PathBuf;

/// Get the data directory for toolbelt.
///
/// Uses platform-appropriate locations:
/// - Linux: `$XDG_DATA_HOME/toolbelt` or `~/.local/share/toolbelt`
/// - macOS: `~/Library/Application Support/toolbelt`
/// - Windows: `%APPDATA%\toolbelt`
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs_next::data_dir().map_or_else(
        || {
            dirs_next::home_dir().map_or_else(
                || PathBuf::from(".toolbelt"),
                |p| p.join(".local").join("share").join("toolbelt"),
            )
        },
        |p| p.join("toolbelt"),
    )
}

/// Resolve (and create) a named folder inside the toolbelt data directory.
///
/// An empty `folder` returns [`data_dir`] without creating anything.
pub fn app_folder(folder: &str) -> io::Result<PathBuf> {
    toolbelt_util::fs::app_data_dir(&data_dir(), folder)
}
