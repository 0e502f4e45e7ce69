use miette::Result;
use serde::Serialize;
use toolbelt_core::version::version_string;
use toolbelt_core::VERSION;

#[derive(Serialize)]
struct VersionOutput<'a> {
    ok: bool,
    name: &'a str,
    version: &'a str,
    long: String,
}

pub fn run(json: bool) -> Result<()> {
    if json {
        return super::print_json(&VersionOutput {
            ok: true,
            name: "toolbelt",
            version: VERSION,
            long: version_string(),
        });
    }
    println!("{}", version_string());
    Ok(())
}
