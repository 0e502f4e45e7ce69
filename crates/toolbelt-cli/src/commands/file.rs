use super::{fail, print_json};
use miette::Result;
use serde::Serialize;
use std::path::Path;
use toolbelt_core::paths;
use toolbelt_util::fs::{
    extension, file_size, file_size_with_abbreviation, has_allowed_extension,
    remove_invalid_filename_chars, DEFAULT_ALLOWED_EXTENSIONS,
};

#[derive(Serialize)]
struct SanitizeOutput<'a> {
    ok: bool,
    input: &'a str,
    name: &'a str,
    changed: bool,
    extension: &'a str,
    allowed_extension: bool,
}

#[derive(Serialize)]
struct AppDirOutput {
    ok: bool,
    path: String,
}

#[derive(Serialize)]
struct SizeOutput {
    ok: bool,
    path: String,
    bytes: u64,
    display: String,
}

pub fn sanitize(input: &str, json: bool) -> Result<()> {
    let name = remove_invalid_filename_chars(input);
    if name.is_empty() {
        return fail(format!("{input:?} has no valid file name characters"), json);
    }

    if json {
        let allowed_extension =
            has_allowed_extension(&name, DEFAULT_ALLOWED_EXTENSIONS).unwrap_or(false);
        return print_json(&SanitizeOutput {
            ok: true,
            input,
            name: &name,
            changed: name != input,
            extension: extension(&name),
            allowed_extension,
        });
    }
    println!("{name}");
    Ok(())
}

/// Print the size of `path`; a missing file reports `0 B`.
pub fn size(path: &Path, json: bool) -> Result<()> {
    let display = match file_size_with_abbreviation(path) {
        Ok(display) => display,
        Err(e) => return fail(e, json),
    };

    if json {
        return print_json(&SizeOutput {
            ok: true,
            path: path.display().to_string(),
            bytes: file_size(path),
            display,
        });
    }
    println!("{display}");
    Ok(())
}

/// Print the data folder for `folder`, creating it if needed.
pub fn app_dir(folder: &str, json: bool) -> Result<()> {
    let dir = match paths::app_folder(folder) {
        Ok(dir) => dir,
        Err(e) => return fail(e, json),
    };

    if json {
        return print_json(&AppDirOutput {
            ok: true,
            path: dir.display().to_string(),
        });
    }
    println!("{}", dir.display());
    Ok(())
}
