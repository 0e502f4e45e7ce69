//! Byte, IP and timestamp conversions.

use super::{fail, print_json};
use chrono::{DateTime, SecondsFormat};
use miette::Result;
use serde::Serialize;
use toolbelt_core::{bytes, ip, unix_time};

#[derive(Serialize)]
struct HexOutput {
    ok: bool,
    len: usize,
    bytes: Vec<u8>,
    hex: String,
}

#[derive(Serialize)]
struct IpOutput {
    ok: bool,
    address: String,
    value: u32,
}

#[derive(Serialize)]
struct TimeOutput {
    ok: bool,
    unix_ms: i64,
    date: String,
}

pub fn hex(input: &str, json: bool) -> Result<()> {
    let decoded = match bytes::hex_to_bytes(input) {
        Ok(decoded) => decoded,
        Err(e) => return fail(e, json),
    };

    if json {
        return print_json(&HexOutput {
            ok: true,
            len: decoded.len(),
            hex: bytes::bytes_to_hex(&decoded),
            bytes: decoded,
        });
    }

    let rendered: Vec<String> = decoded.iter().map(u8::to_string).collect();
    println!("[{}]", rendered.join(", "));
    Ok(())
}

pub fn ip_to_int(address: &str, json: bool) -> Result<()> {
    let value = match ip::ipv4_string_to_u32(address) {
        Ok(value) => value,
        Err(e) => return fail(e, json),
    };
    if json {
        return print_ip(ip::u32_to_ipv4_string(value), value);
    }
    println!("{value}");
    Ok(())
}

pub fn ip_from_int(value: u32, json: bool) -> Result<()> {
    let address = ip::u32_to_ipv4_string(value);
    if json {
        return print_ip(address, value);
    }
    println!("{address}");
    Ok(())
}

fn print_ip(address: String, value: u32) -> Result<()> {
    print_json(&IpOutput {
        ok: true,
        address,
        value,
    })
}

pub fn time_to_date(millis: f64, json: bool) -> Result<()> {
    let Some(date) = unix_time::from_unix_millis_f64(millis) else {
        return fail(format!("{millis} is not a representable Unix timestamp"), json);
    };
    let rendered = date.to_rfc3339_opts(SecondsFormat::AutoSi, true);

    if json {
        return print_json(&TimeOutput {
            ok: true,
            unix_ms: unix_time::to_unix_millis(&date),
            date: rendered,
        });
    }
    println!("{rendered}");
    Ok(())
}

pub fn time_from_date(input: &str, json: bool) -> Result<()> {
    let date = match DateTime::parse_from_rfc3339(input) {
        Ok(date) => date,
        Err(e) => return fail(format!("invalid RFC 3339 date {input:?}: {e}"), json),
    };
    let unix_ms = unix_time::to_unix_millis(&date);

    if json {
        return print_json(&TimeOutput {
            ok: true,
            unix_ms,
            date: date.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        });
    }
    println!("{unix_ms}");
    Ok(())
}
