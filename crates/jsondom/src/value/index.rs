use std::{
    collections::BTreeMap,
    ops::{Index, IndexMut},
};

use super::{Value, NULL};
use crate::error::{Error, Result};

/// A position inside an array (`usize`) or an object (`str`, `String`).
///
/// Used by the checked [`Value::at`]/[`Value::at_mut`] accessors and by the `[]` operators.
/// This trait is sealed.
pub trait Locate: private::Sealed {
    #[doc(hidden)]
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value>;
    #[doc(hidden)]
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value>;
    #[doc(hidden)]
    fn index_into<'v>(&self, value: &'v Value) -> &'v Value;
    #[doc(hidden)]
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value;
}

mod private {
    pub trait Sealed {}
    impl Sealed for usize {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl<T> Sealed for &T where T: ?Sized + Sealed {}
}

impl Locate for usize {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        let array = value.get_array()?;
        array.get(*self).ok_or(Error::IndexOutOfRange {
            index: *self,
            len: array.len(),
        })
    }
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        let array = value.get_array_mut()?;
        let len = array.len();
        array
            .get_mut(*self)
            .ok_or(Error::IndexOutOfRange { index: *self, len })
    }
    fn index_into<'v>(&self, value: &'v Value) -> &'v Value {
        match value {
            Value::Array(array) => &array[*self],
            _ => panic!("cannot index into a {} value with a position", value.kind()),
        }
    }
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        match value {
            Value::Array(array) => &mut array[*self],
            _ => panic!("cannot index into a {} value with a position", value.kind()),
        }
    }
}

impl Locate for str {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        value
            .get_object()?
            .get(self)
            .ok_or_else(|| Error::KeyNotFound(self.to_string()))
    }
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        value
            .get_object_mut()?
            .get_mut(self)
            .ok_or_else(|| Error::KeyNotFound(self.to_string()))
    }
    fn index_into<'v>(&self, value: &'v Value) -> &'v Value {
        match value {
            Value::Object(object) => object.get(self).unwrap_or(&NULL),
            _ => &NULL,
        }
    }
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        if value.is_null() {
            *value = Value::Object(BTreeMap::new());
        }
        match value {
            Value::Object(object) => object.entry(self.to_owned()).or_insert(Value::Null),
            _ => panic!("cannot access key {self:?} in a {} value", value.kind()),
        }
    }
}

impl Locate for String {
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        self.as_str().locate(value)
    }
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        self.as_str().locate_mut(value)
    }
    fn index_into<'v>(&self, value: &'v Value) -> &'v Value {
        self.as_str().index_into(value)
    }
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        self.as_str().index_or_insert(value)
    }
}

impl<T> Locate for &T
where
    T: ?Sized + Locate,
{
    fn locate<'v>(&self, value: &'v Value) -> Result<&'v Value> {
        (**self).locate(value)
    }
    fn locate_mut<'v>(&self, value: &'v mut Value) -> Result<&'v mut Value> {
        (**self).locate_mut(value)
    }
    fn index_into<'v>(&self, value: &'v Value) -> &'v Value {
        (**self).index_into(value)
    }
    fn index_or_insert<'v>(&self, value: &'v mut Value) -> &'v mut Value {
        (**self).index_or_insert(value)
    }
}

impl Value {
    /// Checked element or entry access.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if the value is not an array (for positions) or an object (for
    /// keys), [`Error::IndexOutOfRange`] or [`Error::KeyNotFound`] if nothing is there.
    pub fn at<I: Locate>(&self, index: I) -> Result<&Value> {
        index.locate(self)
    }

    /// Mutable counterpart of [`Value::at`].
    ///
    /// # Errors
    ///
    /// Same as [`Value::at`].
    pub fn at_mut<I: Locate>(&mut self, index: I) -> Result<&mut Value> {
        index.locate_mut(self)
    }

    /// Non-failing element or entry access: `None` on any mismatch.
    #[must_use]
    pub fn get<I: Locate>(&self, index: I) -> Option<&Value> {
        index.locate(self).ok()
    }
}

/// Convenience access without error reporting.
///
/// A missing key reads as `Null`. A position past the end, or a position into anything other
/// than an array, panics.
impl<I> Index<I> for Value
where
    I: Locate,
{
    type Output = Value;

    fn index(&self, index: I) -> &Value {
        index.index_into(self)
    }
}

/// Convenience write access.
///
/// A missing key is inserted as `Null` first and a `Null` value is promoted to an object. A
/// position past the end, or any other kind mismatch, panics.
impl<I> IndexMut<I> for Value
where
    I: Locate,
{
    fn index_mut(&mut self, index: I) -> &mut Value {
        index.index_or_insert(self)
    }
}
