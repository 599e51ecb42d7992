use base64::{engine::general_purpose, Engine as _};

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Removes whitespace and pads `input` with `=` to a multiple of 4.
///
/// Subscription bodies are often wrapped across lines and shipped without
/// padding; both are fixed here before decoding.
pub fn pad_base64(input: &str) -> String {
    let mut raw: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let rem = raw.len() % 4;
    if rem != 0 {
        raw.push_str(&"=".repeat(4 - rem));
    }
    raw
}

/// Decodes a Base64 string, accepting both the standard and the URL-safe
/// alphabet and tolerating missing padding.
///
/// # Returns
/// The decoded text (invalid UTF-8 sequences replaced), or `None` if the
/// input is not Base64.
pub fn base64_decode(input: &str) -> Option<String> {
    let padded = pad_base64(input);
    general_purpose::STANDARD
        .decode(&padded)
        .or_else(|_| general_purpose::URL_SAFE.decode(&padded))
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding() {
        assert_eq!(pad_base64("YWJj"), "YWJj");
        assert_eq!(pad_base64("YWI"), "YWI=");
        assert_eq!(pad_base64("YQ\n"), "YQ==");
    }

    #[test]
    fn test_decode_variants() {
        assert_eq!(base64_decode("YWJj").as_deref(), Some("abc"));
        assert_eq!(base64_decode("YWI").as_deref(), Some("ab"));
        // "??>" encodes to "Pz8+" in the standard alphabet
        assert_eq!(base64_decode("Pz8-").as_deref(), Some("??>"));
        assert_eq!(base64_decode("not base64 !!"), None);
        assert_eq!(base64_decode(&base64_encode("round")).as_deref(), Some("round"));
    }
}
