use ahash::AHashSet;

use crate::{
    arena::ValueId,
    error::{Error, Result},
    Arena, Value,
};

impl Arena {
    /// Replace every reference inside `value` with an owned copy of its referent.
    ///
    /// Referents are flattened as they are copied, so the result holds no references. Absent
    /// and unknown referents become `Null`.
    ///
    /// # Errors
    ///
    /// [`Error::ReferenceCycle`] if a referent contains a reference back to itself, directly or
    /// through other referents. Substitutions made before the cycle was found are kept.
    pub fn flatten(&self, value: &mut Value) -> Result<()> {
        let mut path = AHashSet::new();
        self.expand(value, &mut path)
    }

    /// Flatten the value stored under `id` in place.
    ///
    /// Does nothing if `id` was not issued by this arena.
    ///
    /// # Errors
    ///
    /// Same as [`Arena::flatten`]. The stored value is unchanged on failure.
    pub fn flatten_entry(&mut self, id: ValueId) -> Result<()> {
        let Some(stored) = self.get(id) else {
            tracing::debug!(id = %id, "Skipping flatten of an unknown entry");
            return Ok(());
        };
        let mut value = stored.clone();
        let mut path = AHashSet::new();
        path.insert(id);
        self.expand(&mut value, &mut path)?;
        self[id] = value;
        Ok(())
    }

    /// Flatten every stored value in insertion order.
    ///
    /// # Errors
    ///
    /// Stops at the first entry that fails, see [`Arena::flatten_entry`].
    pub fn flatten_all(&mut self) -> Result<()> {
        for idx in 0..self.len() {
            self.flatten_entry(self.id_at(idx))?;
        }
        Ok(())
    }

    fn expand(&self, value: &mut Value, path: &mut AHashSet<ValueId>) -> Result<()> {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.expand(item, path)?;
                }
            }
            Value::Object(entries) => {
                for item in entries.values_mut() {
                    self.expand(item, path)?;
                }
            }
            Value::Reference(None) => *value = Value::Null,
            Value::Reference(Some(id)) => {
                let id = *id;
                *value = self.substitute(id, path)?;
            }
            Value::Null
            | Value::Bool(_)
            | Value::Integer(_)
            | Value::Double(_)
            | Value::String(_) => {}
        }
        Ok(())
    }

    fn substitute(&self, id: ValueId, path: &mut AHashSet<ValueId>) -> Result<Value> {
        if !path.insert(id) {
            tracing::debug!(id = %id, "Reference cycle while flattening");
            return Err(Error::ReferenceCycle(id));
        }
        let mut copy = if let Some(referent) = self.get(id) {
            referent.clone()
        } else {
            tracing::debug!(id = %id, "Unknown referent");
            Value::Null
        };
        tracing::trace!(id = %id, kind = %copy.kind(), "Substituting reference");
        self.expand(&mut copy, path)?;
        path.remove(&id);
        Ok(copy)
    }
}
