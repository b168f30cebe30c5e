mod index;
mod mutate;
mod number;

use std::collections::BTreeMap;

pub use index::Locate;
pub use number::Double;

use crate::{
    arena::ValueId,
    error::{Error, Result},
    kind::Kind,
};

pub(crate) static NULL: Value = Value::Null;
static EMPTY_STRING: String = String::new();
static EMPTY_ARRAY: Vec<Value> = Vec::new();
static EMPTY_OBJECT: BTreeMap<String, Value> = BTreeMap::new();

/// A JSON value that may also hold a non-owning reference into an [`Arena`](crate::Arena).
///
/// Arrays and objects own their children, so every value is a tree. The only edges that leave
/// the tree are [`Value::Reference`] handles, which are resolved by the comparison engine and
/// eliminated by [`Arena::flatten`](crate::Arena::flatten).
///
/// The derived equality is structural: references are equal when they hold the same handle. Use
/// [`Arena::equal`](crate::Arena::equal) or [`Arena::resolved`](crate::Arena::resolved) to
/// compare through references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Double(Double),
    String(String),
    Array(Vec<Value>),
    /// Keys are unique and iterate in byte order, independent of insertion history.
    Object(BTreeMap<String, Value>),
    /// `None` is a reference without a referent.
    Reference(Option<ValueId>),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
            Value::Reference(_) => Kind::Reference,
        }
    }

    /// Move the payload out, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Install `value`, returning the previous payload.
    pub fn replace(&mut self, value: Value) -> Value {
        std::mem::replace(self, value)
    }

    pub fn swap(&mut self, other: &mut Value) {
        std::mem::swap(self, other);
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }
    #[must_use]
    pub fn is_double(&self) -> bool {
        matches!(self, Value::Double(_))
    }
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.is_integer() || self.is_double()
    }
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }
    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// `true` for `Null`, an empty string, array or object, and a reference without a referent.
    /// Numbers and booleans are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null | Value::Reference(None) => true,
            Value::Bool(_) | Value::Integer(_) | Value::Double(_) | Value::Reference(Some(_)) => {
                false
            }
            Value::String(string) => string.is_empty(),
            Value::Array(array) => array.is_empty(),
            Value::Object(object) => object.is_empty(),
        }
    }

    /// Number of array elements, object entries or string bytes. Zero for everything else.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Value::String(string) => string.len(),
            Value::Array(array) => array.len(),
            Value::Object(object) => object.len(),
            _ => 0,
        }
    }

    /// Whether this is an object holding `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        matches!(self, Value::Object(object) if object.contains_key(key))
    }

    #[inline]
    fn mismatch(&self, expected: Kind) -> Error {
        Error::type_mismatch(expected, self.kind())
    }

    // Checked accessors

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is `Null`.
    pub fn get_null(&self) -> Result<()> {
        match self {
            Value::Null => Ok(()),
            _ => Err(self.mismatch(Kind::Null)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a boolean.
    pub fn get_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(value) => Ok(*value),
            _ => Err(self.mismatch(Kind::Bool)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an integer.
    pub fn get_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(value) => Ok(*value),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a double.
    pub fn get_double(&self) -> Result<f64> {
        match self {
            Value::Double(value) => Ok(value.get()),
            _ => Err(self.mismatch(Kind::Double)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a string.
    pub fn get_string(&self) -> Result<&str> {
        match self {
            Value::String(value) => Ok(value),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a string.
    pub fn get_string_mut(&mut self) -> Result<&mut String> {
        match self {
            Value::String(value) => Ok(value),
            _ => Err(self.mismatch(Kind::String)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an array.
    pub fn get_array(&self) -> Result<&[Value]> {
        match self {
            Value::Array(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an array.
    pub fn get_array_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self {
            Value::Array(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Array)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an object.
    pub fn get_object(&self) -> Result<&BTreeMap<String, Value>> {
        match self {
            Value::Object(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an object.
    pub fn get_object_mut(&mut self) -> Result<&mut BTreeMap<String, Value>> {
        match self {
            Value::Object(value) => Ok(value),
            _ => Err(self.mismatch(Kind::Object)),
        }
    }

    /// The referent handle, `None` for a reference without a referent.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a reference.
    pub fn get_reference(&self) -> Result<Option<ValueId>> {
        match self {
            Value::Reference(id) => Ok(*id),
            _ => Err(self.mismatch(Kind::Reference)),
        }
    }

    /// Read either numeric kind as a double.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a number.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Value::Integer(value) => Ok(*value as f64),
            Value::Double(value) => Ok(value.get()),
            _ => Err(self.mismatch(Kind::Double)),
        }
    }

    /// Read either numeric kind as an integer. Doubles are truncated toward zero and saturate at
    /// the `i64` bounds.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is a number.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_i64(&self) -> Result<i64> {
        match self {
            Value::Integer(value) => Ok(*value),
            Value::Double(value) => Ok(value.get() as i64),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    // Trusted accessors.
    //
    // The caller has already branched on `kind()`. A mismatch trips a debug assertion; release
    // builds return a neutral value instead.

    #[inline]
    #[track_caller]
    fn debug_assert_kind(&self, expected: Kind) {
        debug_assert!(
            self.kind() == expected,
            "unchecked {expected} access on a {} value",
            self.kind()
        );
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_bool(&self) -> bool {
        self.debug_assert_kind(Kind::Bool);
        matches!(self, Value::Bool(true))
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_integer(&self) -> i64 {
        self.debug_assert_kind(Kind::Integer);
        match self {
            Value::Integer(value) => *value,
            _ => 0,
        }
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_double(&self) -> f64 {
        self.debug_assert_kind(Kind::Double);
        match self {
            Value::Double(value) => value.get(),
            _ => 0.0,
        }
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_string(&self) -> &str {
        self.debug_assert_kind(Kind::String);
        match self {
            Value::String(value) => value,
            _ => &EMPTY_STRING,
        }
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_array(&self) -> &[Value] {
        self.debug_assert_kind(Kind::Array);
        match self {
            Value::Array(value) => value,
            _ => &EMPTY_ARRAY,
        }
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_object(&self) -> &BTreeMap<String, Value> {
        self.debug_assert_kind(Kind::Object);
        match self {
            Value::Object(value) => value,
            _ => &EMPTY_OBJECT,
        }
    }

    #[inline]
    #[must_use]
    #[track_caller]
    pub fn unchecked_reference(&self) -> Option<ValueId> {
        self.debug_assert_kind(Kind::Reference);
        match self {
            Value::Reference(id) => *id,
            _ => None,
        }
    }

    /// On a mismatch in release builds the payload is replaced with an empty string first.
    #[inline]
    #[track_caller]
    pub fn unchecked_string_mut(&mut self) -> &mut String {
        self.debug_assert_kind(Kind::String);
        if !self.is_string() {
            *self = Value::String(String::new());
        }
        match self {
            Value::String(value) => value,
            _ => unreachable!("A string was just installed"),
        }
    }

    /// On a mismatch in release builds the payload is replaced with an empty array first.
    #[inline]
    #[track_caller]
    pub fn unchecked_array_mut(&mut self) -> &mut Vec<Value> {
        self.debug_assert_kind(Kind::Array);
        if !self.is_array() {
            *self = Value::Array(Vec::new());
        }
        match self {
            Value::Array(value) => value,
            _ => unreachable!("An array was just installed"),
        }
    }

    /// On a mismatch in release builds the payload is replaced with an empty object first.
    #[inline]
    #[track_caller]
    pub fn unchecked_object_mut(&mut self) -> &mut BTreeMap<String, Value> {
        self.debug_assert_kind(Kind::Object);
        if !self.is_object() {
            *self = Value::Object(BTreeMap::new());
        }
        match self {
            Value::Object(value) => value,
            _ => unreachable!("An object was just installed"),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Value>() <= 32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EmptyArray, EmptyObject};
    use test_case::test_case;

    fn double(value: f64) -> Value {
        Value::Double(Double::new(value).expect("Finite value"))
    }

    #[test]
    fn default_is_null() {
        assert_eq!(Value::default(), Value::Null);
        assert_eq!(Value::default().kind(), Kind::Null);
    }

    #[test_case(Value::Null, Kind::Null)]
    #[test_case(Value::Bool(false), Kind::Bool)]
    #[test_case(Value::Integer(-3), Kind::Integer)]
    #[test_case(double(0.5), Kind::Double)]
    #[test_case(Value::String("x".into()), Kind::String)]
    #[test_case(Value::Array(vec![]), Kind::Array)]
    #[test_case(Value::Object(BTreeMap::new()), Kind::Object)]
    #[test_case(Value::Reference(None), Kind::Reference)]
    fn kinds(value: Value, expected: Kind) {
        assert_eq!(value.kind(), expected);
    }

    #[test_case(Value::Null, true)]
    #[test_case(Value::Bool(false), false)]
    #[test_case(Value::Integer(0), false)]
    #[test_case(double(0.0), false)]
    #[test_case(Value::String(String::new()), true)]
    #[test_case(Value::String("a".into()), false)]
    #[test_case(Value::from(EmptyArray), true)]
    #[test_case(Value::Array(vec![Value::Null]), false)]
    #[test_case(Value::from(EmptyObject), true)]
    #[test_case(Value::Reference(None), true)]
    fn emptiness(value: Value, expected: bool) {
        assert_eq!(value.is_empty(), expected);
    }

    #[test]
    fn empty_reference_with_referent() {
        let mut arena = crate::Arena::new();
        let id = arena.insert(Value::Null);
        assert!(!Value::Reference(Some(id)).is_empty());
    }

    #[test]
    fn checked_getters() {
        assert_eq!(Value::Bool(true).get_bool(), Ok(true));
        assert_eq!(Value::Integer(7).get_integer(), Ok(7));
        assert_eq!(double(2.5).get_double(), Ok(2.5));
        assert_eq!(Value::String("s".into()).get_string(), Ok("s"));
        assert_eq!(Value::Null.get_null(), Ok(()));
        assert_eq!(Value::Reference(None).get_reference(), Ok(None));
        assert_eq!(
            Value::Array(vec![Value::Null]).get_array(),
            Ok(&[Value::Null][..])
        );
    }

    #[test_case(Value::Null, Kind::Bool)]
    #[test_case(Value::Integer(1), Kind::Bool)]
    #[test_case(Value::String("true".into()), Kind::Bool)]
    fn checked_bool_mismatch(value: Value, expected: Kind) {
        assert_eq!(
            value.get_bool(),
            Err(Error::TypeMismatch {
                expected,
                found: value.kind()
            })
        );
    }

    #[test]
    fn checked_mismatches() {
        let value = Value::Integer(1);
        assert!(value.get_null().unwrap_err().is_type_mismatch());
        assert!(value.get_double().unwrap_err().is_type_mismatch());
        assert!(value.get_string().unwrap_err().is_type_mismatch());
        assert!(value.get_array().unwrap_err().is_type_mismatch());
        assert!(value.get_object().unwrap_err().is_type_mismatch());
        assert!(value.get_reference().unwrap_err().is_type_mismatch());
        assert!(Value::Null.get_integer().unwrap_err().is_type_mismatch());
    }

    #[test]
    fn mutable_getters() {
        let mut value = Value::String("ab".into());
        value.get_string_mut().expect("A string").push('c');
        assert_eq!(value, Value::String("abc".into()));

        let mut value = Value::from(EmptyArray);
        value.get_array_mut().expect("An array").push(Value::Integer(1));
        assert_eq!(value.len(), 1);

        let mut value = Value::from(EmptyObject);
        value
            .get_object_mut()
            .expect("An object")
            .insert("k".into(), Value::Null);
        assert!(value.contains_key("k"));
    }

    #[test_case(Value::Integer(3), 3.0, 3)]
    #[test_case(double(-2.75), -2.75, -2)]
    fn numbers(value: Value, as_f64: f64, as_i64: i64) {
        assert!(value.is_number());
        assert_eq!(value.as_f64(), Ok(as_f64));
        assert_eq!(value.as_i64(), Ok(as_i64));
    }

    #[test]
    fn non_numbers() {
        assert!(Value::Bool(true).as_f64().unwrap_err().is_type_mismatch());
        assert!(Value::Null.as_i64().unwrap_err().is_type_mismatch());
    }

    #[test]
    fn unchecked_getters() {
        assert!(Value::Bool(true).unchecked_bool());
        assert_eq!(Value::Integer(-9).unchecked_integer(), -9);
        assert_eq!(double(1.25).unchecked_double(), 1.25);
        assert_eq!(Value::String("x".into()).unchecked_string(), "x");
        assert!(Value::from(EmptyArray).unchecked_array().is_empty());
        assert!(Value::from(EmptyObject).unchecked_object().is_empty());
        assert_eq!(Value::Reference(None).unchecked_reference(), None);

        let mut value = Value::Array(vec![]);
        value.unchecked_array_mut().push(Value::Null);
        assert_eq!(value.len(), 1);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "unchecked integer access on a string value")]
    fn unchecked_mismatch_asserts_in_debug() {
        let _ = Value::String("1".into()).unchecked_integer();
    }

    #[test]
    fn take_leaves_null() {
        let mut value = Value::String("payload".into());
        let taken = value.take();
        assert_eq!(taken, Value::String("payload".into()));
        assert!(value.is_null());
    }

    #[test]
    fn swap_exchanges_payloads() {
        let mut lhs = Value::Integer(1);
        let mut rhs = Value::Array(vec![Value::Null]);
        lhs.swap(&mut rhs);
        assert!(lhs.is_array());
        assert_eq!(rhs, Value::Integer(1));
    }

    #[test]
    fn replace_returns_previous() {
        let mut value = Value::Integer(1);
        let previous = value.replace(Value::Bool(false));
        assert_eq!(previous, Value::Integer(1));
        assert_eq!(value, Value::Bool(false));
    }

    #[test]
    fn clone_is_deep() {
        let original = Value::Array(vec![Value::Array(vec![Value::Integer(1)])]);
        let mut copy = original.clone();
        copy.get_array_mut().expect("An array")[0]
            .get_array_mut()
            .expect("An array")
            .push(Value::Integer(2));
        assert_eq!(original.len(), 1);
        assert_eq!(original.get_array().expect("An array")[0].len(), 1);
        assert_eq!(copy.get_array().expect("An array")[0].len(), 2);
    }

    #[test]
    fn clone_from_replaces_payload() {
        let source = Value::Object(BTreeMap::from([("a".to_string(), Value::Integer(1))]));
        let mut target = Value::String("old".into());
        target.clone_from(&source);
        assert_eq!(target, source);
    }
}
