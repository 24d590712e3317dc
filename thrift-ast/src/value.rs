//! Constant values.

use serde::{Deserialize, Serialize};

/// A constant value as written in the IDL.
///
/// Booleans are integers (`0`/`1`). Enum constants are either integers or
/// identifiers (`Color.RED` or `RED`). Struct literals are maps keyed by
/// field-name strings. Map entries keep the order in which they were
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstValue {
    Integer(i64),
    Double(f64),
    String(String),
    Identifier(String),
    List(Vec<ConstValue>),
    Map(Vec<(ConstValue, ConstValue)>),
}

impl ConstValue {
    /// Short name of the value shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ConstValue::Integer(_) => "integer",
            ConstValue::Double(_) => "double",
            ConstValue::String(_) => "string",
            ConstValue::Identifier(_) => "identifier",
            ConstValue::List(_) => "list",
            ConstValue::Map(_) => "map",
        }
    }

    /// Number of elements for list and map values.
    pub fn len(&self) -> Option<usize> {
        match self {
            ConstValue::List(items) => Some(items.len()),
            ConstValue::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// The string payload of a `String` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstValue::String(s) => Some(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_nested() {
        let value: ConstValue = serde_json::from_str(
            r#"{"map": [[{"string": "a"}, {"list": [{"integer": 1}, {"integer": 2}]}]]}"#,
        )
        .unwrap();

        let ConstValue::Map(entries) = &value else {
            panic!("expected map, got {:?}", value);
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0.as_str(), Some("a"));
        assert_eq!(entries[0].1.len(), Some(2));
    }

    #[test]
    fn test_map_keeps_written_order() {
        let value: ConstValue = serde_json::from_str(
            r#"{"map": [[{"string": "z"}, {"integer": 1}], [{"string": "a"}, {"integer": 2}]]}"#,
        )
        .unwrap();
        let ConstValue::Map(entries) = value else {
            panic!("expected map");
        };
        let keys: Vec<_> = entries.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["z", "a"]);
    }

    #[test]
    fn test_kind() {
        assert_eq!(ConstValue::Integer(1).kind(), "integer");
        assert_eq!(ConstValue::Identifier("A.B".into()).kind(), "identifier");
        assert_eq!(ConstValue::List(vec![]).len(), Some(0));
        assert_eq!(ConstValue::Double(1.5).len(), None);
    }
}
