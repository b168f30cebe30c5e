use std::collections::{btree_map::Entry, BTreeMap};

use super::Value;
use crate::{
    assign::{Assign, DefaultKey},
    error::{Error, Result},
    kind::Kind,
};

impl Value {
    /// Build an array from `items`.
    ///
    /// # Errors
    ///
    /// Propagates the first conversion failure.
    pub fn array<I>(items: I) -> Result<Value>
    where
        I: IntoIterator,
        I::Item: Assign,
    {
        let mut value = Value::Array(Vec::new());
        value.append(items)?;
        Ok(value)
    }

    /// Build an object by inserting every pair in sequence.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] on the first repeated key, or the first conversion failure.
    pub fn object<I, K, T>(pairs: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Assign,
    {
        let mut value = Value::Object(BTreeMap::new());
        value.insert_all(pairs)?;
        Ok(value)
    }

    /// `Null` may be promoted to `kind`; any other kind than `kind` is a mismatch.
    fn check_promotable(&self, kind: Kind) -> Result<()> {
        let found = self.kind();
        if found == Kind::Null || found == kind {
            Ok(())
        } else {
            Err(Error::type_mismatch(kind, found))
        }
    }

    /// Append one element. `Null` becomes a one-element array.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is `Null` or an array, or the conversion error of
    /// `item`. The value is unchanged on failure.
    pub fn push<T: Assign>(&mut self, item: T) -> Result<()> {
        self.check_promotable(Kind::Array)?;
        let item = Value::new(item)?;
        self.unchecked_promote_array().push(item);
        Ok(())
    }

    /// Append every element of `items` in order.
    ///
    /// All elements are converted before the array is touched, so a failing conversion leaves
    /// the value unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`Value::push`].
    pub fn append<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Assign,
    {
        self.check_promotable(Kind::Array)?;
        let items = items
            .into_iter()
            .map(Value::new)
            .collect::<Result<Vec<_>>>()?;
        let array = self.unchecked_promote_array();
        array.reserve(items.len());
        array.extend(items);
        Ok(())
    }

    /// Insert one entry. `Null` becomes a one-entry object.
    ///
    /// Returns `true` if `key` was newly inserted. An existing entry is left untouched and
    /// `false` is returned.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is `Null` or an object, or the conversion error
    /// of `item`.
    pub fn insert<K, T>(&mut self, key: K, item: T) -> Result<bool>
    where
        K: Into<String>,
        T: Assign,
    {
        self.check_promotable(Kind::Object)?;
        let item = Value::new(item)?;
        match self.unchecked_promote_object().entry(key.into()) {
            Entry::Vacant(entry) => {
                entry.insert(item);
                Ok(true)
            }
            Entry::Occupied(_) => Ok(false),
        }
    }

    /// Insert every pair, or none of them.
    ///
    /// The whole batch is converted and checked for keys that already exist or repeat within
    /// the batch before anything is inserted.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is `Null` or an object, [`Error::DuplicateKey`]
    /// naming the first conflicting key, or the first conversion failure.
    pub fn insert_all<I, K, T>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Assign,
    {
        self.check_promotable(Kind::Object)?;
        let mut staged = BTreeMap::new();
        for (key, item) in pairs {
            let key = key.into();
            if self.contains_key(&key) || staged.contains_key(&key) {
                tracing::debug!(key = %key, "Rejecting object batch with a duplicate key");
                return Err(Error::DuplicateKey(key));
            }
            staged.insert(key, Value::new(item)?);
        }
        self.unchecked_promote_object().append(&mut staged);
        Ok(())
    }

    /// Insert `item` under the key its type declares through [`DefaultKey`].
    ///
    /// # Errors
    ///
    /// Same as [`Value::insert`].
    pub fn insert_keyed<T>(&mut self, item: T) -> Result<bool>
    where
        T: DefaultKey + Assign,
    {
        self.insert(T::KEY, item)
    }

    /// Remove and return the entry under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] unless the value is an object, [`Error::KeyNotFound`] if `key` is
    /// absent.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.get_object_mut()?
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))
    }

    /// Remove every key in order.
    ///
    /// Stops at the first absent key. Removals performed before it are kept.
    ///
    /// # Errors
    ///
    /// Same as [`Value::remove`].
    pub fn remove_all<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let object = self.get_object_mut()?;
        for key in keys {
            let key = key.as_ref();
            if object.remove(key).is_none() {
                return Err(Error::KeyNotFound(key.to_string()));
            }
        }
        Ok(())
    }

    fn unchecked_promote_array(&mut self) -> &mut Vec<Value> {
        if self.is_null() {
            *self = Value::Array(Vec::new());
        }
        self.unchecked_array_mut()
    }

    fn unchecked_promote_object(&mut self) -> &mut BTreeMap<String, Value> {
        if self.is_null() {
            *self = Value::Object(BTreeMap::new());
        }
        self.unchecked_object_mut()
    }
}
