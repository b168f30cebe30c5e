//! The conversion registry: how external types become [`Value`]s.
//!
//! Every type that can be stored implements [`Assign`]. New types join by implementing the
//! trait in their own crate; the value type itself never changes.
use std::{
    borrow::Cow,
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::{
    arena::ValueId,
    error::{Error, Result},
    value::{Double, Value},
};

/// Installs the payload for `Self` into a value.
///
/// Implementations must leave `target` unchanged when they fail.
///
/// ```
/// use jsondom::{Assign, Result, Value};
///
/// struct Celsius(f64);
///
/// impl Assign for Celsius {
///     fn assign(self, target: &mut Value) -> Result<()> {
///         target.set(self.0)
///     }
/// }
///
/// let value = Value::new(Celsius(21.5))?;
/// assert_eq!(value.get_double()?, 21.5);
/// # Ok::<(), jsondom::Error>(())
/// ```
pub trait Assign {
    /// # Errors
    ///
    /// Whatever the conversion cannot represent, such as a non-finite double.
    fn assign(self, target: &mut Value) -> Result<()>;
}

/// A constant object key for a type, used by [`Value::insert_keyed`].
pub trait DefaultKey {
    const KEY: &'static str;
}

/// Installs an empty array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmptyArray;

/// Installs an empty object.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct EmptyObject;

impl Value {
    /// Build a value from any registered type.
    ///
    /// # Errors
    ///
    /// The conversion error of `item`.
    pub fn new<T: Assign>(item: T) -> Result<Value> {
        let mut value = Value::Null;
        item.assign(&mut value)?;
        Ok(value)
    }

    /// Replace the current payload with `item`. The value is unchanged on failure.
    ///
    /// # Errors
    ///
    /// The conversion error of `item`.
    pub fn set<T: Assign>(&mut self, item: T) -> Result<()> {
        item.assign(self)
    }
}

impl Assign for Value {
    fn assign(self, target: &mut Value) -> Result<()> {
        *target = self;
        Ok(())
    }
}

impl Assign for &Value {
    fn assign(self, target: &mut Value) -> Result<()> {
        target.clone_from(self);
        Ok(())
    }
}

impl<T: Assign> Assign for Option<T> {
    fn assign(self, target: &mut Value) -> Result<()> {
        match self {
            Some(item) => item.assign(target),
            None => {
                *target = Value::Null;
                Ok(())
            }
        }
    }
}

macro_rules! from_infallible {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Assign for $ty {
                fn assign(self, target: &mut Value) -> Result<()> {
                    *target = Value::from(self);
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! try_from_fallible {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Assign for $ty {
                fn assign(self, target: &mut Value) -> Result<()> {
                    *target = Value::try_from(self)?;
                    Ok(())
                }
            }
        )*
    };
}

macro_rules! widen_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer(i64::from(value))
                }
            }
        )*
        from_infallible!($($ty),*);
    };
}

macro_rules! narrow_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<$ty> for Value {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self> {
                    i64::try_from(value)
                        .map(Value::Integer)
                        .map_err(|_| Error::IntegerOutOfRange)
                }
            }
        )*
        try_from_fallible!($($ty),*);
    };
}

widen_integer!(i8, i16, i32, i64, u8, u16, u32);
narrow_integer!(u64, usize, isize, i128, u128);

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Double> for Value {
    fn from(value: Double) -> Self {
        Value::Double(value)
    }
}

impl TryFrom<f64> for Value {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Double::new(value).map(Value::Double)
    }
}

impl TryFrom<f32> for Value {
    type Error = Error;

    fn try_from(value: f32) -> Result<Self> {
        Value::try_from(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<Box<str>> for Value {
    fn from(value: Box<str>) -> Self {
        Value::String(value.into_string())
    }
}

impl From<Cow<'_, str>> for Value {
    fn from(value: Cow<'_, str>) -> Self {
        Value::String(value.into_owned())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::String(value.to_string())
    }
}

impl From<EmptyArray> for Value {
    fn from(_: EmptyArray) -> Self {
        Value::Array(Vec::new())
    }
}

impl From<EmptyObject> for Value {
    fn from(_: EmptyObject) -> Self {
        Value::Object(BTreeMap::new())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<&[Value]> for Value {
    fn from(value: &[Value]) -> Self {
        Value::Array(value.to_vec())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Value::Object(value)
    }
}

impl<S: BuildHasher> From<HashMap<String, Value, S>> for Value {
    fn from(value: HashMap<String, Value, S>) -> Self {
        Value::Object(value.into_iter().collect())
    }
}

/// A handle becomes a reference to the stored value.
impl From<ValueId> for Value {
    fn from(value: ValueId) -> Self {
        Value::Reference(Some(value))
    }
}

from_infallible!(
    (),
    bool,
    Double,
    &str,
    String,
    &String,
    Box<str>,
    Cow<'_, str>,
    char,
    EmptyArray,
    EmptyObject,
    Vec<Value>,
    &[Value],
    BTreeMap<String, Value>,
    ValueId,
);
try_from_fallible!(f32, f64);

impl<S: BuildHasher> Assign for HashMap<String, Value, S> {
    fn assign(self, target: &mut Value) -> Result<()> {
        *target = Value::from(self);
        Ok(())
    }
}
