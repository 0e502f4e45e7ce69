//! String normalization helpers.

use crate::error::{Error, Result};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Strip accents and other combining marks: `"áéÍóúñÑç"` becomes `"aeIounNc"`.
///
/// The input is decomposed (NFD), combining marks are dropped, and the rest is
/// recomposed (NFC).
///
/// # Errors
/// [`Error::MissingInput`] if `input` is empty.
pub fn remove_diacritics(input: &str) -> Result<String> {
    if input.is_empty() {
        return Err(Error::missing("input"));
    }
    Ok(input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect())
}

/// Upper-case the first character and keep the rest as is.
///
/// Characters whose upper case is longer (`'ß'` to `"SS"`) expand.
///
/// # Errors
/// [`Error::MissingInput`] if `input` is empty.
pub fn first_char_to_upper(input: &str) -> Result<String> {
    let mut chars = input.chars();
    let first = chars.next().ok_or(Error::missing("input"))?;

    let mut out = String::with_capacity(input.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_diacritics() {
        assert_eq!(remove_diacritics("áéÍóúñÑç").unwrap(), "aeIounNc");
        assert_eq!(remove_diacritics("Příliš žluťoučký kůň").unwrap(), "Prilis zlutoucky kun");
    }

    #[test]
    fn test_remove_diacritics_plain_text_unchanged() {
        let input = "This string has no accents";
        assert_eq!(remove_diacritics(input).unwrap(), input);
    }

    #[test]
    fn test_remove_diacritics_empty() {
        assert!(remove_diacritics("").unwrap_err().is_missing_input());
    }

    #[test]
    fn test_first_char_to_upper() {
        assert_eq!(first_char_to_upper("hello world").unwrap(), "Hello world");
        assert_eq!(first_char_to_upper("Hello world").unwrap(), "Hello world");
        assert_eq!(first_char_to_upper("émile").unwrap(), "Émile");
        assert_eq!(first_char_to_upper("ßa").unwrap(), "SSa");
    }

    #[test]
    fn test_first_char_to_upper_empty() {
        assert!(first_char_to_upper("").unwrap_err().is_missing_input());
    }
}
