//! Lenient field extraction from JSON request bodies.
//!
//! Each helper takes a JSON value, a key name, and (where it makes sense) a
//! default. A missing key or a value of the wrong type yields the default;
//! none of them fail.

use serde_json::Value;

/// Parses a request body. An empty or whitespace-only body is an empty object.
pub fn parse_body(body: &str) -> Result<Value, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(body)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Integral floats (`5.0`) are accepted; fractional or negative values are not.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    let Some(v) = params.get(name) else {
        return default;
    };
    if let Some(n) = v.as_u64() {
        return n as usize;
    }
    match v.as_f64() {
        Some(f) if f >= 0.0 && f.fract() == 0.0 => f as usize,
        _ => default,
    }
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    param_opt_str(params, name)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts a non-blank string from `params[name]`.
pub fn param_opt_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- parse_body --

    #[test]
    fn empty_body_is_empty_object() {
        assert_eq!(parse_body("").unwrap(), json!({}));
        assert_eq!(parse_body("  \n").unwrap(), json!({}));
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(parse_body("{\"color\":").is_err());
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"count": 7});
        assert_eq!(param_usize(&params, "count", 5), 7);
    }

    #[test]
    fn param_usize_accepts_integral_float() {
        let params = json!({"count": 4.0});
        assert_eq!(param_usize(&params, "count", 5), 4);
    }

    #[test]
    fn param_usize_returns_default_for_fraction() {
        let params = json!({"count": 2.5});
        assert_eq!(param_usize(&params, "count", 5), 5);
    }

    #[test]
    fn param_usize_returns_default_for_negative_integer() {
        let params = json!({"count": -1});
        assert_eq!(param_usize(&params, "count", 5), 5);
    }

    #[test]
    fn param_usize_returns_default_for_string_value() {
        let params = json!({"count": "many"});
        assert_eq!(param_usize(&params, "count", 5), 5);
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing() {
        let params = json!({"style": "analogous"});
        assert_eq!(param_string(&params, "style", "balanced"), "analogous");
    }

    #[test]
    fn param_string_returns_default_when_missing_or_wrong_type() {
        assert_eq!(param_string(&json!({}), "style", "balanced"), "balanced");
        assert_eq!(param_string(&json!({"style": 3}), "style", "balanced"), "balanced");
    }

    #[test]
    fn param_string_returns_default_for_non_object() {
        assert_eq!(param_string(&json!([1, 2]), "style", "balanced"), "balanced");
    }

    // -- param_opt_str --

    #[test]
    fn param_opt_str_skips_blank_values() {
        assert_eq!(param_opt_str(&json!({"culture": "  "}), "culture"), None);
        assert_eq!(param_opt_str(&json!({"culture": null}), "culture"), None);
        assert_eq!(
            param_opt_str(&json!({"culture": "eastern"}), "culture"),
            Some("eastern")
        );
    }
}
