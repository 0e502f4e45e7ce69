//! `toolbelt append`: append text or a file's bytes to a file.

use super::{cancel_on_ctrl_c, fail, print_json};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use toolbelt_core::{append_file, write_text, CancellationToken, Config};

/// Content to append.
#[derive(Debug)]
pub enum Source {
    /// Encoded with the configured encoding.
    Text(String),
    /// Copied byte for byte.
    File(PathBuf),
}

#[derive(Serialize)]
struct AppendOutput {
    ok: bool,
    path: String,
    bytes_appended: u64,
}

pub fn run(config: &Config, path: &Path, source: Source, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let cancel = CancellationToken::new();

    let result = runtime.block_on(async {
        cancel_on_ctrl_c(&cancel);
        append(config, path, source, &cancel).await
    });

    let bytes_appended = match result {
        Ok(n) => n,
        Err(e) => return fail(e, json),
    };

    if json {
        return print_json(&AppendOutput {
            ok: true,
            path: path.display().to_string(),
            bytes_appended,
        });
    }
    println!("appended {bytes_appended} bytes to {}", path.display());
    Ok(())
}

async fn append(
    config: &Config,
    path: &Path,
    source: Source,
    cancel: &CancellationToken,
) -> toolbelt_core::Result<u64> {
    match source {
        Source::Text(text) => {
            write_text(path, &text, config.encoding, cancel).await?;
            Ok(config.encoding.encode(&text).len() as u64)
        }
        Source::File(from) => append_file(path, &from, cancel).await,
    }
}
