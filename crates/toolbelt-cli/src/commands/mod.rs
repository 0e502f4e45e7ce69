pub mod append;
pub mod convert;
pub mod email;
pub mod file;
pub mod range;
pub mod read;
pub mod text;
pub mod version;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

/// Failure output for JSON mode.
#[derive(Serialize)]
struct Failure<'a> {
    ok: bool,
    error: &'a str,
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

/// Report a user-facing failure and exit non-zero.
///
/// With `--json` the failure is a `{"ok": false, "error": ...}` object on
/// stdout; otherwise the message is rendered by miette on stderr.
pub fn fail(message: impl std::fmt::Display, json: bool) -> Result<()> {
    let message = message.to_string();
    if json {
        print_json(&Failure {
            ok: false,
            error: &message,
        })?;
        std::process::exit(1);
    }
    Err(miette::miette!("{message}"))
}

/// Raise `cancel` when Ctrl-C is received. Must be called inside a runtime.
pub fn cancel_on_ctrl_c(cancel: &toolbelt_core::CancellationToken) {
    let cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling");
            cancel.cancel();
        }
    });
}
