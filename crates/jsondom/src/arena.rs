use core::fmt;
use std::{
    cmp::Ordering,
    num::NonZeroU32,
    sync::atomic::{self, AtomicU32},
};

use crate::{
    compare::{self, Resolved},
    Value,
};

static NEXT_ARENA: AtomicU32 = AtomicU32::new(1);

/// Handle of a value stored in an [`Arena`].
///
/// Handles are only issued by [`Arena::insert`] and stay valid for the lifetime of the arena:
/// values are never removed, only replaced. A handle remembers the arena that issued it, and
/// every other arena treats it as unknown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValueId {
    arena: u32,
    slot: NonZeroU32,
}

impl ValueId {
    #[inline]
    fn new(arena: u32, index: usize) -> ValueId {
        let raw = u32::try_from(index + 1).expect("Arena holds more than u32::MAX values");
        ValueId {
            arena,
            slot: NonZeroU32::new(raw).expect("Value is zero"),
        }
    }
    #[inline]
    fn index(self) -> usize {
        self.slot.get() as usize - 1
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot)
    }
}

/// Looks up the referent of a reference.
pub trait Resolve {
    /// The value behind `id`, or `None` if there is no such referent.
    fn referent(&self, id: ValueId) -> Option<&Value>;
}

/// Owning storage for every value that references may point to.
///
/// A [`Value::Reference`] never owns its referent; it holds a [`ValueId`] into an arena. The
/// arena must therefore outlive any comparison or flatten involving such references, which the
/// borrow checker enforces through [`Resolve`].
///
/// A clone keeps the identity of its source, so handles issued before cloning resolve in both.
#[derive(Debug, Clone)]
pub struct Arena {
    id: u32,
    values: Vec<Value>,
}

impl Default for Arena {
    fn default() -> Self {
        Arena::with_capacity(0)
    }
}

impl Arena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_ARENA.fetch_add(1, atomic::Ordering::Relaxed),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Store a value and return its handle.
    pub fn insert(&mut self, value: Value) -> ValueId {
        let id = self.id_at(self.values.len());
        self.values.push(value);
        id
    }

    /// The value behind `id`, or `None` if another arena issued it.
    #[must_use]
    pub fn get(&self, id: ValueId) -> Option<&Value> {
        if id.arena == self.id {
            self.values.get(id.index())
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: ValueId) -> Option<&mut Value> {
        if id.arena == self.id {
            self.values.get_mut(id.index())
        } else {
            None
        }
    }

    #[inline]
    pub(crate) fn id_at(&self, index: usize) -> ValueId {
        ValueId::new(self.id, index)
    }

    /// Replace a stored value, returning the previous one.
    ///
    /// Returns `None` and stores nothing if `id` was not issued by this arena.
    pub fn replace(&mut self, id: ValueId, value: Value) -> Option<Value> {
        self.get_mut(id).map(|slot| std::mem::replace(slot, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValueId, &Value)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, value)| (self.id_at(idx), value))
    }

    /// Follow references until a non-reference value is reached.
    ///
    /// Absent referents, unknown ids and reference chains that loop back on themselves all
    /// resolve to `Null`.
    #[must_use]
    pub fn resolve<'a>(&'a self, value: &'a Value) -> &'a Value {
        compare::resolve(value, self)
    }

    /// Pair a value with this arena for reference-transparent comparisons.
    #[must_use]
    pub fn resolved<'a>(&'a self, value: &'a Value) -> Resolved<'a, Arena> {
        Resolved::new(value, self)
    }

    #[must_use]
    pub fn compare(&self, lhs: &Value, rhs: &Value) -> Ordering {
        compare::compare(lhs, rhs, self)
    }

    #[must_use]
    pub fn equal(&self, lhs: &Value, rhs: &Value) -> bool {
        compare::equal(lhs, rhs, self)
    }
}

impl Resolve for Arena {
    #[inline]
    fn referent(&self, id: ValueId) -> Option<&Value> {
        self.get(id)
    }
}

impl std::ops::Index<ValueId> for Arena {
    type Output = Value;

    #[inline]
    fn index(&self, id: ValueId) -> &Self::Output {
        match self.get(id) {
            Some(value) => value,
            None => panic!("{id} was not issued by this arena"),
        }
    }
}

impl std::ops::IndexMut<ValueId> for Arena {
    #[inline]
    fn index_mut(&mut self, id: ValueId) -> &mut Self::Output {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("{id} was not issued by this arena"),
        }
    }
}
