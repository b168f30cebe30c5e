use serde_json::{Number, Value as JsonValue};

use crate::{
    arena::Resolve,
    assign::Assign,
    compare::{self, Resolved},
    error::{Error, Result},
    value::Double,
    Arena, Value,
};

/// Integers that fit into `i64` become integers, any other number becomes a double.
impl Assign for JsonValue {
    fn assign(self, target: &mut Value) -> Result<()> {
        let value = match self {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(number) => from_number(&number)?,
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(Value::new)
                    .collect::<Result<Vec<_>>>()?,
            ),
            JsonValue::Object(entries) => Value::Object(
                entries
                    .into_iter()
                    .map(|(key, item)| Value::new(item).map(|value| (key, value)))
                    .collect::<Result<_>>()?,
            ),
        };
        *target = value;
        Ok(())
    }
}

impl Assign for &JsonValue {
    fn assign(self, target: &mut Value) -> Result<()> {
        self.clone().assign(target)
    }
}

fn from_number(number: &Number) -> Result<Value> {
    if let Some(integer) = number.as_i64() {
        Ok(Value::Integer(integer))
    } else if let Some(double) = number.as_f64() {
        Ok(Value::Double(Double::new(double)?))
    } else {
        Err(Error::IntegerOutOfRange)
    }
}

impl Arena {
    /// Convert `value` into a `serde_json` tree, copying referents in place of references.
    ///
    /// # Errors
    ///
    /// [`Error::ReferenceCycle`] if `value` reaches a reference cycle.
    pub fn to_serde_json(&self, value: &Value) -> Result<JsonValue> {
        let mut owned = value.clone();
        self.flatten(&mut owned)?;
        Ok(into_serde_json(owned))
    }
}

fn into_serde_json(value: Value) -> JsonValue {
    match value {
        Value::Null | Value::Reference(_) => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Integer(integer) => JsonValue::Number(integer.into()),
        Value::Double(double) => {
            Number::from_f64(double.get()).map_or(JsonValue::Null, JsonValue::Number)
        }
        Value::String(s) => JsonValue::String(s),
        Value::Array(items) => JsonValue::Array(items.into_iter().map(into_serde_json).collect()),
        Value::Object(entries) => JsonValue::Object(
            entries
                .into_iter()
                .map(|(key, item)| (key, into_serde_json(item)))
                .collect(),
        ),
    }
}

impl<R: Resolve + ?Sized> PartialEq<JsonValue> for Resolved<'_, R> {
    fn eq(&self, other: &JsonValue) -> bool {
        eq(self.value(), other, self.resolver())
    }
}

impl<R: Resolve + ?Sized> PartialEq<Resolved<'_, R>> for JsonValue {
    fn eq(&self, other: &Resolved<'_, R>) -> bool {
        other == self
    }
}

fn eq<R: Resolve + ?Sized>(lhs: &Value, rhs: &JsonValue, resolver: &R) -> bool {
    match (compare::resolve(lhs, resolver), rhs) {
        (Value::Null, JsonValue::Null) => true,
        (Value::Bool(l), JsonValue::Bool(r)) => l == r,
        (Value::Integer(l), JsonValue::Number(r)) => r.as_i64() == Some(*l),
        (Value::Double(l), JsonValue::Number(r)) => {
            r.as_i64().is_none() && r.as_f64() == Some(l.get())
        }
        (Value::String(l), JsonValue::String(r)) => l.as_bytes() == r.as_bytes(),
        (Value::Array(l), JsonValue::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| eq(l, r, resolver))
        }
        (Value::Object(l), JsonValue::Object(r)) => {
            l.len() == r.len()
                && l.iter().all(|(key, lv)| match r.get(key) {
                    Some(rv) => eq(lv, rv, resolver),
                    None => false,
                })
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmptyArray, EmptyObject};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(null), Value::Null; "null")]
    #[test_case(json!(true), Value::from(true); "bool")]
    #[test_case(json!(42u64), Value::from(42); "positive number")]
    #[test_case(json!(-42), Value::from(-42); "negative number")]
    #[test_case(json!(3.5), Value::new(3.5).expect("Finite value"); "float number")]
    #[test_case(json!(u64::MAX), Value::new(u64::MAX as f64).expect("Finite value"); "beyond i64")]
    #[test_case(json!("hello"), Value::from("hello"); "string")]
    #[test_case(json!([]), Value::from(EmptyArray); "empty array")]
    #[test_case(json!([1, 2, 3]), Value::array([1, 2, 3]).expect("Valid array"); "array")]
    #[test_case(json!({}), Value::from(EmptyObject); "empty object")]
    #[test_case(
        json!({"b": "test", "a": 1, "c": [true]}),
        Value::object([
            ("a", Value::from(1)),
            ("b", Value::from("test")),
            ("c", Value::array([true]).expect("Valid array")),
        ])
        .expect("Valid object");
        "object"
    )]
    fn test_json_conversion(input: JsonValue, expected: Value) {
        assert_eq!(Value::new(&input), Ok(expected.clone()));
        assert_eq!(Value::new(input), Ok(expected));
    }

    #[test_case(json!(null); "null")]
    #[test_case(json!(false); "bool")]
    #[test_case(json!(-1); "integer")]
    #[test_case(json!(0.25); "double")]
    #[test_case(json!("text"); "string")]
    #[test_case(json!([1, [2, {"k": null}]]); "nested")]
    fn test_round_trip(input: JsonValue) {
        let arena = Arena::new();
        let value = Value::new(&input).expect("Representable input");
        assert_eq!(arena.to_serde_json(&value), Ok(input));
    }

    #[test]
    fn references_are_expanded() {
        let mut arena = Arena::new();
        let target = arena.insert(Value::new(json!({"k": [1, 2]})).expect("Valid input"));
        let value = Value::array([Value::from(target), Value::Reference(None)])
            .expect("Valid array");
        assert_eq!(
            arena.to_serde_json(&value),
            Ok(json!([{"k": [1, 2]}, null]))
        );
    }

    #[test]
    fn cycles_are_reported() {
        let mut arena = Arena::new();
        let id = arena.insert(Value::Null);
        arena[id] = Value::array([id]).expect("Valid array");
        assert_eq!(
            arena.to_serde_json(&Value::from(id)),
            Err(Error::ReferenceCycle(id))
        );
    }

    #[test_case(json!(null), Value::Null; "null equals")]
    #[test_case(json!(true), Value::from(true); "bool equals")]
    #[test_case(json!(42), Value::from(42); "integer equals")]
    #[test_case(json!(3.5), Value::new(3.5).expect("Finite value"); "double equals")]
    #[test_case(json!("hello"), Value::from("hello"); "string equals")]
    #[test_case(json!([1, 2, 3]), Value::array([1, 2, 3]).expect("Valid array"); "array equals")]
    #[test_case(
        json!({"b": "test", "a": 1}),
        Value::object([("a", Value::from(1)), ("b", Value::from("test"))]).expect("Valid object");
        "object equals"
    )]
    fn test_comparison_eq(serde_value: JsonValue, custom: Value) {
        let arena = Arena::new();
        assert_eq!(arena.resolved(&custom), serde_value);
        assert_eq!(serde_value, arena.resolved(&custom));
    }

    #[test_case(json!(null), Value::from(true); "null != bool")]
    #[test_case(json!(true), Value::from(false); "bool not equal")]
    #[test_case(json!(1.0), Value::from(1); "double vs integer")]
    #[test_case(json!(1), Value::new(1.0).expect("Finite value"); "integer vs double")]
    #[test_case(json!("hello"), Value::from("world"); "different strings not equal")]
    #[test_case(json!([1, 2, 3]), Value::array([1, 2, 4]).expect("Valid array"); "different arrays not equal")]
    #[test_case(json!([1]), Value::array([1, 1]).expect("Valid array"); "different lengths not equal")]
    #[test_case(json!({"a": 1}), Value::object([("a", 2)]).expect("Valid object"); "different object not equal")]
    #[test_case(json!({"a": 1}), Value::object([("b", 1)]).expect("Valid object"); "different keys not equal")]
    fn test_comparison_neq(serde_value: JsonValue, custom: Value) {
        let arena = Arena::new();
        assert_ne!(arena.resolved(&custom), serde_value);
        assert_ne!(serde_value, arena.resolved(&custom));
    }

    #[test]
    fn comparison_through_references() {
        let mut arena = Arena::new();
        let target = arena.insert(Value::from("shared"));
        let value = Value::object([("x", target), ("y", target)]).expect("Valid object");
        assert_eq!(arena.resolved(&value), json!({"x": "shared", "y": "shared"}));
    }
}
