//! `toolbelt read`: stream a file through a chunk processor.

use super::{cancel_on_ctrl_c, fail, print_json};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use toolbelt_core::{
    read_file_with_chunk_size, AppendToFileProcessor, CancellationToken, CollectProcessor, Config,
    HashProcessor,
};

/// What to do with the streamed content.
#[derive(Debug)]
pub enum Mode {
    /// Decode with the configured encoding and print to stdout.
    Print,
    /// Print the BLAKE3 digest.
    Hash,
    /// Decode and append to another file, re-encoded with the same encoding.
    AppendTo(PathBuf),
}

#[derive(Serialize)]
struct ReadOutput {
    ok: bool,
    path: String,
    bytes: u64,
    chunk_size: usize,
    encoding: &'static str,
    progress_reports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    blake3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    appended_to: Option<String>,
}

enum Outcome {
    Text(String),
    Digest(String),
    Appended(PathBuf),
}

pub fn run(config: &Config, path: &Path, mode: Mode, json: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().into_diagnostic()?;
    let cancel = CancellationToken::new();

    let mut reports = 0usize;
    let mut last_whole = None;
    let mut on_progress = |percent: f64| {
        reports += 1;
        if json {
            return;
        }
        let whole = percent.floor() as u32;
        if last_whole != Some(whole) {
            last_whole = Some(whole);
            eprint!("\rreading {}: {whole:>3}%", path.display());
            if whole == 100 {
                eprintln!();
            }
            let _ = std::io::stderr().flush();
        }
    };

    let result = runtime.block_on(async {
        cancel_on_ctrl_c(&cancel);
        stream(config, path, mode, &mut on_progress, &cancel).await
    });

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(e) => return fail(e, json),
    };

    if json {
        let mut output = ReadOutput {
            ok: true,
            path: path.display().to_string(),
            bytes: toolbelt_util::fs::file_size(path),
            chunk_size: config.chunk_size,
            encoding: config.encoding.label(),
            progress_reports: reports,
            blake3: None,
            text: None,
            appended_to: None,
        };
        match outcome {
            Outcome::Text(text) => output.text = Some(text),
            Outcome::Digest(digest) => output.blake3 = Some(digest),
            Outcome::Appended(target) => output.appended_to = Some(target.display().to_string()),
        }
        return print_json(&output);
    }

    match outcome {
        Outcome::Text(text) => print!("{text}"),
        Outcome::Digest(digest) => println!("{digest}  {}", path.display()),
        Outcome::Appended(target) => println!("appended to {}", target.display()),
    }
    Ok(())
}

async fn stream(
    config: &Config,
    path: &Path,
    mode: Mode,
    on_progress: &mut dyn FnMut(f64),
    cancel: &CancellationToken,
) -> toolbelt_core::Result<Outcome> {
    match mode {
        Mode::Print => {
            let mut collect = CollectProcessor::new();
            read_file_with_chunk_size(path, &mut collect, Some(on_progress), cancel, config.chunk_size)
                .await?;
            Ok(Outcome::Text(config.encoding.decode(collect.as_slice())))
        }
        Mode::Hash => {
            let mut hash = HashProcessor::new();
            read_file_with_chunk_size(path, &mut hash, Some(on_progress), cancel, config.chunk_size)
                .await?;
            Ok(Outcome::Digest(hash.hex_digest()))
        }
        Mode::AppendTo(target) => {
            let mut append = AppendToFileProcessor::new(
                &target,
                config.encoding,
                config.encoding,
                cancel.clone(),
            );
            read_file_with_chunk_size(path, &mut append, Some(on_progress), cancel, config.chunk_size)
                .await?;
            append.finish().await?;
            Ok(Outcome::Appended(target))
        }
    }
}
