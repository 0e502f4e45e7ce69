use super::{fail, print_json};
use miette::Result;
use serde::Serialize;
use toolbelt_core::text;

#[derive(Serialize)]
struct TextOutput<'a> {
    ok: bool,
    input: &'a str,
    output: String,
}

pub fn strip_diacritics(input: &str, json: bool) -> Result<()> {
    emit(input, text::remove_diacritics(input), json)
}

pub fn capitalize(input: &str, json: bool) -> Result<()> {
    emit(input, text::first_char_to_upper(input), json)
}

fn emit(input: &str, result: toolbelt_core::Result<String>, json: bool) -> Result<()> {
    let output = match result {
        Ok(output) => output,
        Err(e) => return fail(e, json),
    };
    if json {
        return print_json(&TextOutput {
            ok: true,
            input,
            output,
        });
    }
    println!("{output}");
    Ok(())
}
