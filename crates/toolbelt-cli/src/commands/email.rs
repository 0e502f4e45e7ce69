use super::{fail, print_json};
use miette::Result;
use serde::Serialize;
use toolbelt_core::Email;

#[derive(Serialize)]
struct EmailOutput<'a> {
    ok: bool,
    address: &'a str,
    local_part: &'a str,
    domain: &'a str,
}

/// Validate `address` and print its parts.
pub fn run(address: &str, json: bool) -> Result<()> {
    let email = match Email::create(address) {
        Ok(email) => email,
        Err(e) => return fail(e, json),
    };

    if json {
        return print_json(&EmailOutput {
            ok: true,
            address: email.address(),
            local_part: email.local_part(),
            domain: email.domain(),
        });
    }
    println!("{email}");
    Ok(())
}
