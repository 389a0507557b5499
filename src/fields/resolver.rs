use serde_json::Value;

/// Look up one candidate path.
///
/// A literal key (dots included) wins over dot-path traversal. All-digit
/// segments index into arrays, so `layers.0.name` works.
pub fn lookup<'a>(raw: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(v) = raw.as_object().and_then(|map| map.get(path)) {
        return Some(v);
    }
    if !path.contains('.') {
        return None;
    }

    let mut current = raw;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Defined, non-null, and not a blank string.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// First present value among `paths`, in order.
pub fn resolve<'a, P: AsRef<str>>(raw: &'a Value, paths: &[P]) -> Option<&'a Value> {
    paths
        .iter()
        .filter_map(|p| lookup(raw, p.as_ref()))
        .find(|v| is_present(v))
}

/// Render any JSON value as a string. Never fails.
///
/// Objects exposing a string `name` (e.g. `{"name": "Vietnam"}`) render as
/// that name; other objects, arrays, null and blank strings yield `default`.
pub fn to_safe_string(value: Option<&Value>, default: &str) -> String {
    let rendered = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Object(map)) => map
            .get("name")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        Some(Value::Array(_)) | Some(Value::Null) | None => String::new(),
    };

    if rendered.is_empty() {
        default.to_string()
    } else {
        rendered
    }
}

/// Finite number from a JSON number or numeric string.
///
/// Strings may carry surrounding whitespace and thousands separators.
/// Booleans are not numbers.
pub fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if cleaned.is_empty() {
                return None;
            }
            cleaned.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Coerce to a number, falling back on `default` for anything non-numeric.
pub fn to_number(value: Option<&Value>, default: f64) -> f64 {
    value.and_then(as_number).unwrap_or(default)
}

pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "1" | "on" => Some(true),
            "false" | "no" | "n" | "0" | "off" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Typed view over a raw object, resolving canonical values from alias lists.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    raw: &'a Value,
}

impl<'a> FieldResolver<'a> {
    pub fn new(raw: &'a Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a Value {
        self.raw
    }

    pub fn value<P: AsRef<str>>(&self, paths: &[P]) -> Option<&'a Value> {
        resolve(self.raw, paths)
    }

    /// First candidate rendering to a non-blank string.
    pub fn string<P: AsRef<str>>(&self, paths: &[P]) -> Option<String> {
        paths
            .iter()
            .filter_map(|p| lookup(self.raw, p.as_ref()))
            .map(|v| to_safe_string(Some(v), ""))
            .find(|s| !s.is_empty())
    }

    pub fn string_or<P: AsRef<str>>(&self, paths: &[P], default: &str) -> String {
        self.string(paths).unwrap_or_else(|| default.to_string())
    }

    /// First candidate coercing to a finite number.
    pub fn number<P: AsRef<str>>(&self, paths: &[P]) -> Option<f64> {
        paths
            .iter()
            .filter_map(|p| lookup(self.raw, p.as_ref()))
            .find_map(as_number)
    }

    pub fn number_or<P: AsRef<str>>(&self, paths: &[P], default: f64) -> f64 {
        self.number(paths).unwrap_or(default)
    }

    pub fn boolean<P: AsRef<str>>(&self, paths: &[P]) -> Option<bool> {
        paths
            .iter()
            .filter_map(|p| lookup(self.raw, p.as_ref()))
            .find_map(as_bool)
    }

    /// First candidate that is a non-empty array.
    pub fn array<P: AsRef<str>>(&self, paths: &[P]) -> Option<&'a Vec<Value>> {
        paths
            .iter()
            .filter_map(|p| lookup(self.raw, p.as_ref()))
            .filter_map(Value::as_array)
            .find(|items| !items.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn literal_dotted_key_beats_traversal() {
        let raw = json!({"route.pol": "LIT", "route": {"pol": "NESTED"}});
        assert_eq!(lookup(&raw, "route.pol"), Some(&json!("LIT")));
    }

    #[test]
    fn digit_segments_index_arrays() {
        let raw = json!({"layers": [{"name": "a"}, {"name": "b"}]});
        assert_eq!(lookup(&raw, "layers.1.name"), Some(&json!("b")));
        assert_eq!(lookup(&raw, "layers.9.name"), None);
    }

    #[test]
    fn blank_and_null_are_skipped() {
        let raw = json!({"a": null, "b": "  ", "c": 0});
        assert_eq!(resolve(&raw, &["a", "b", "c"]), Some(&json!(0)));
    }

    #[test]
    fn safe_string_never_returns_empty_for_default() {
        assert_eq!(to_safe_string(None, "n/a"), "n/a");
        assert_eq!(to_safe_string(Some(&json!(null)), "n/a"), "n/a");
        assert_eq!(to_safe_string(Some(&json!({"name": "Vietnam"})), ""), "Vietnam");
        assert_eq!(to_safe_string(Some(&json!([1, 2])), "x"), "x");
        assert_eq!(to_safe_string(Some(&json!(42)), ""), "42");
    }

    #[test]
    fn numbers_coerce_from_strings() {
        assert_eq!(as_number(&json!(" 50,000 ")), Some(50000.0));
        assert_eq!(as_number(&json!("abc")), None);
        assert_eq!(as_number(&json!("NaN")), None);
        assert_eq!(as_number(&json!(true)), None);
        assert_eq!(to_number(Some(&json!("oops")), 7.0), 7.0);
    }

    #[test]
    fn number_skips_non_numeric_candidates() {
        let raw = json!({"value": "n/a", "cargo_value": 1200});
        let f = FieldResolver::new(&raw);
        assert_eq!(f.number(&["value", "cargo_value"]), Some(1200.0));
    }
}
