//! Argument extraction from tool-call JSON

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Required non-empty string argument
pub fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, ToolError> {
    match args.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            Err(ToolError::invalid_argument(format!("{} is required", key)))
        }
        Some(_) => Err(ToolError::invalid_argument(format!(
            "{} must be a string",
            key
        ))),
    }
}

/// Optional integer argument
///
/// JSON clients often send every number as a float, so fractional values
/// are accepted and truncated toward zero.
pub fn optional_int(args: &Map<String, Value>, key: &str) -> Result<Option<i64>, ToolError> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(value) => Ok(Some(value)),
            None => n
                .as_f64()
                .map(|f| Some(f.trunc() as i64))
                .ok_or_else(|| ToolError::invalid_argument(format!("{} is not a valid number", key))),
        },
        Some(_) => Err(ToolError::invalid_argument(format!(
            "{} must be a number",
            key
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_str() {
        let a = args(json!({"pipeline_id": " pipe-1 ", "empty": "", "num": 3}));

        assert_eq!(required_str(&a, "pipeline_id").unwrap(), "pipe-1");
        assert!(matches!(
            required_str(&a, "empty"),
            Err(ToolError::InvalidArgument(ref m)) if m == "empty is required"
        ));
        assert!(required_str(&a, "missing").is_err());
        assert!(required_str(&a, "num").is_err());
    }

    #[test]
    fn test_optional_int_accepts_floats() {
        let a = args(json!({"a": 25, "b": 25.9, "c": -3.5, "d": null, "e": 1e30}));

        assert_eq!(optional_int(&a, "a").unwrap(), Some(25));
        assert_eq!(optional_int(&a, "b").unwrap(), Some(25));
        assert_eq!(optional_int(&a, "c").unwrap(), Some(-3));
        assert_eq!(optional_int(&a, "d").unwrap(), None);
        assert_eq!(optional_int(&a, "e").unwrap(), Some(i64::MAX));
        assert_eq!(optional_int(&a, "missing").unwrap(), None);
    }

    #[test]
    fn test_optional_int_rejects_non_numbers() {
        let a = args(json!({"a": "25", "b": true}));

        assert!(matches!(
            optional_int(&a, "a"),
            Err(ToolError::InvalidArgument(_))
        ));
        assert!(optional_int(&a, "b").is_err());
    }
}
