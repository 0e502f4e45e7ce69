use super::{fail, print_json};
use chrono::SecondsFormat;
use miette::Result;
use serde::Serialize;
use toolbelt_core::DateTimeRange;

#[derive(Serialize)]
struct RangeOutput {
    ok: bool,
    start: String,
    end: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<i64>,
}

/// Parse both ends against `formats` and print the validated range.
pub fn run(start: &str, end: &str, formats: &[String], minutes: bool, json: bool) -> Result<()> {
    let formats: Vec<&str> = formats.iter().map(String::as_str).collect();
    let range = match DateTimeRange::parse(start, end, &formats) {
        Ok(range) => range,
        Err(e) => return fail(e, json),
    };
    let duration_minutes = minutes.then(|| range.duration_in_minutes());

    if json {
        return print_json(&RangeOutput {
            ok: true,
            start: range.start().to_rfc3339_opts(SecondsFormat::AutoSi, true),
            end: range.end().to_rfc3339_opts(SecondsFormat::AutoSi, true),
            duration_minutes,
        });
    }

    println!("{range}");
    if let Some(m) = duration_minutes {
        println!("Duration: {m} minutes");
    }
    Ok(())
}
