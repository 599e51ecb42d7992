//! Optional-field access over decoded JSON and YAML mappings.
//!
//! Subscription payloads routinely omit fields or write numbers as strings.
//! Every lookup goes through [`FieldSource`] and resolves a missing value to
//! an explicit default from [`crate::constants`]. A present but empty string
//! counts as missing.

use super::error::ParseError;

/// A decoded document node whose keys can be read as scalars.
pub trait FieldSource {
    /// Scalar at `key` rendered as text. Numbers and booleans are rendered,
    /// nulls and containers are `None`.
    fn scalar(&self, key: &str) -> Option<String>;

    fn contains(&self, key: &str) -> bool;

    fn flag(&self, key: &str) -> Option<bool> {
        match self.scalar(key)?.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

impl FieldSource for serde_json::Value {
    fn scalar(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.is_null())
    }
}

impl FieldSource for serde_yaml::Value {
    fn scalar(&self, key: &str) -> Option<String> {
        self.get(key).and_then(crate::models::scalar_to_string)
    }

    fn contains(&self, key: &str) -> bool {
        self.get(key).map_or(false, |v| !v.is_null())
    }
}

/// Non-empty text at `key`.
pub fn opt_str<S: FieldSource + ?Sized>(src: &S, key: &str) -> Option<String> {
    src.scalar(key).filter(|s| !s.trim().is_empty())
}

/// Text at `key`, or `default` when missing or empty.
pub fn str_or<S: FieldSource + ?Sized>(src: &S, key: &str, default: &str) -> String {
    opt_str(src, key).unwrap_or_else(|| default.to_string())
}

/// Port at `key`, or `default` when missing. Present values must be an
/// integer in 1..=65535.
pub fn port_or<S: FieldSource + ?Sized>(
    src: &S,
    key: &str,
    default: u16,
) -> Result<u16, ParseError> {
    match opt_str(src, key) {
        Some(raw) => parse_port(&raw),
        None => Ok(default),
    }
}

/// Small unsigned integer at `key` (alter ids), or `default` when missing.
pub fn u16_or<S: FieldSource + ?Sized>(
    src: &S,
    key: &str,
    default: u16,
) -> Result<u16, ParseError> {
    match opt_str(src, key) {
        Some(raw) => parse_integral(&raw)
            .ok_or_else(|| ParseError::InvalidJson(format!("{} is not an integer: {}", key, raw))),
        None => Ok(default),
    }
}

pub fn parse_port(raw: &str) -> Result<u16, ParseError> {
    match parse_integral(raw) {
        Some(port) if port != 0 => Ok(port),
        _ => Err(ParseError::InvalidPort(raw.to_string())),
    }
}

/// `8080`, `"8080"` and `8080.0` all read as 8080; `8080.5` does not.
fn parse_integral(raw: &str) -> Option<u16> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<u16>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(&value) {
        Some(value as u16)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_or_number() {
        let v = json!({"port": "8080", "aid": 2, "empty": "", "nil": null});
        assert_eq!(port_or(&v, "port", 443), Ok(8080));
        assert_eq!(u16_or(&v, "aid", 0), Ok(2));
        assert_eq!(str_or(&v, "empty", "auto"), "auto");
        assert_eq!(str_or(&v, "nil", "auto"), "auto");
        assert_eq!(str_or(&v, "absent", "auto"), "auto");
        assert!(!v.contains("nil"));
        assert!(v.contains("aid"));
    }

    #[test]
    fn test_integral_floats() {
        let v = json!({"port": 8080.0, "text": "443.0", "aid": 1.0});
        assert_eq!(port_or(&v, "port", 443), Ok(8080));
        assert_eq!(port_or(&v, "text", 1), Ok(443));
        assert_eq!(u16_or(&v, "aid", 0), Ok(1));
    }

    #[test]
    fn test_bad_ports() {
        let v = json!({"a": "abc", "b": 0, "c": 70000, "d": -1, "e": 8080.5, "f": "NaN", "g": 0.0});
        for key in ["a", "b", "c", "d", "e", "f", "g"] {
            assert!(matches!(port_or(&v, key, 443), Err(ParseError::InvalidPort(_))));
        }
    }

    #[test]
    fn test_yaml_source() {
        let v: serde_yaml::Value =
            serde_yaml::from_str("{server: h, port: 443, tls: true, alterId: '1'}").unwrap();
        assert_eq!(opt_str(&v, "server").as_deref(), Some("h"));
        assert_eq!(port_or(&v, "port", 1), Ok(443));
        assert_eq!(u16_or(&v, "alterId", 0), Ok(1));
        assert_eq!(v.flag("tls"), Some(true));
        assert_eq!(v.flag("udp"), None);
    }
}
