//! Equality and total order over values, transparent through references.
//!
//! References are replaced by their referents (an absent referent reads as `Null`) before
//! anything else happens. Values of different kinds are then ordered by [`Kind`] rank, values of
//! the same kind by their payloads: `false < true`, integers and doubles numerically, strings by
//! bytes, arrays lexicographically by element, objects lexicographically by key-sorted entry.
use core::fmt;
use std::{cmp::Ordering, collections::BTreeMap, ptr};

use ahash::AHashSet;

use crate::{
    arena::{Resolve, ValueId},
    kind::Kind,
    value::{Double, Value, NULL},
    Arena,
};

/// Resolves nothing. Any reference it sees reads as `Null`.
struct Detached;

impl Resolve for Detached {
    fn referent(&self, _: ValueId) -> Option<&Value> {
        None
    }
}

/// Follow references until a non-reference value is reached.
///
/// A chain that revisits a handle never reaches a value and resolves to `Null`, as do absent
/// and unknown referents.
pub(crate) fn resolve<'a, R>(value: &'a Value, resolver: &'a R) -> &'a Value
where
    R: Resolve + ?Sized,
{
    let mut current = value;
    let mut visited = AHashSet::new();
    loop {
        match current {
            Value::Reference(Some(id)) => {
                if !visited.insert(*id) {
                    tracing::debug!(id = %id, "Reference chain loops back on itself");
                    return &NULL;
                }
                match resolver.referent(*id) {
                    Some(next) => current = next,
                    None => {
                        tracing::debug!(id = %id, "Unknown referent");
                        return &NULL;
                    }
                }
            }
            Value::Reference(None) => return &NULL,
            _ => return current,
        }
    }
}

/// Compare two values whose references live in the same resolver.
pub fn compare<R>(lhs: &Value, rhs: &Value, resolver: &R) -> Ordering
where
    R: Resolve + ?Sized,
{
    Engine::new(resolver, resolver).values(lhs, rhs)
}

/// Reference-transparent equality.
pub fn equal<R>(lhs: &Value, rhs: &Value, resolver: &R) -> bool
where
    R: Resolve + ?Sized,
{
    compare(lhs, rhs, resolver) == Ordering::Equal
}

/// A borrowed external value, already converted to a payload.
#[derive(Clone, Copy)]
enum Raw<'r> {
    Null,
    Bool(bool),
    Integer(i64),
    Double(Double),
    String(&'r str),
    Array(&'r [Value]),
    Object(&'r BTreeMap<String, Value>),
}

impl Raw<'_> {
    fn kind(self) -> Kind {
        match self {
            Raw::Null => Kind::Null,
            Raw::Bool(_) => Kind::Bool,
            Raw::Integer(_) => Kind::Integer,
            Raw::Double(_) => Kind::Double,
            Raw::String(_) => Kind::String,
            Raw::Array(_) => Kind::Array,
            Raw::Object(_) => Kind::Object,
        }
    }
}

struct Engine<'l, 'r, L: ?Sized, R: ?Sized> {
    lhs: &'l L,
    rhs: &'r R,
    /// Pairs of containers reached through references whose comparison is still running.
    /// Reaching one again means the values are cyclic and agree so far.
    in_progress: AHashSet<(*const Value, *const Value)>,
}

impl<'l, 'r, L, R> Engine<'l, 'r, L, R>
where
    L: Resolve + ?Sized,
    R: Resolve + ?Sized,
{
    fn new(lhs: &'l L, rhs: &'r R) -> Self {
        Self {
            lhs,
            rhs,
            in_progress: AHashSet::new(),
        }
    }

    fn values(&mut self, lhs: &Value, rhs: &Value) -> Ordering {
        let through_reference = lhs.is_reference() || rhs.is_reference();
        let (lhs_resolver, rhs_resolver) = (self.lhs, self.rhs);
        let lhs = resolve(lhs, lhs_resolver);
        let rhs = resolve(rhs, rhs_resolver);

        let guarded = through_reference
            && matches!(lhs, Value::Array(_) | Value::Object(_))
            && lhs.kind() == rhs.kind();
        if !guarded {
            return self.resolved(lhs, rhs);
        }
        let key = (ptr::from_ref(lhs), ptr::from_ref(rhs));
        if !self.in_progress.insert(key) {
            return Ordering::Equal;
        }
        let ordering = self.resolved(lhs, rhs);
        self.in_progress.remove(&key);
        ordering
    }

    fn resolved(&mut self, lhs: &Value, rhs: &Value) -> Ordering {
        match (lhs, rhs) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
            (Value::Integer(l), Value::Integer(r)) => l.cmp(r),
            (Value::Double(l), Value::Double(r)) => l.cmp(r),
            (Value::String(l), Value::String(r)) => l.as_bytes().cmp(r.as_bytes()),
            (Value::Array(l), Value::Array(r)) => self.arrays(l, r),
            (Value::Object(l), Value::Object(r)) => self.objects(l, r),
            _ => lhs.kind().cmp(&rhs.kind()),
        }
    }

    fn raw(&mut self, lhs: &Value, rhs: Raw<'_>) -> Ordering {
        let lhs = resolve(lhs, self.lhs);
        match (lhs, rhs) {
            (Value::Null, Raw::Null) => Ordering::Equal,
            (Value::Bool(l), Raw::Bool(r)) => l.cmp(&r),
            (Value::Integer(l), Raw::Integer(r)) => l.cmp(&r),
            (Value::Double(l), Raw::Double(r)) => l.cmp(&r),
            (Value::String(l), Raw::String(r)) => l.as_bytes().cmp(r.as_bytes()),
            (Value::Array(l), Raw::Array(r)) => self.arrays(l, r),
            (Value::Object(l), Raw::Object(r)) => self.objects(l, r),
            _ => lhs.kind().cmp(&rhs.kind()),
        }
    }

    fn arrays(&mut self, lhs: &[Value], rhs: &[Value]) -> Ordering {
        for (l, r) in lhs.iter().zip(rhs) {
            match self.values(l, r) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }
        lhs.len().cmp(&rhs.len())
    }

    fn objects(
        &mut self,
        lhs: &BTreeMap<String, Value>,
        rhs: &BTreeMap<String, Value>,
    ) -> Ordering {
        for ((lk, lv), (rk, rv)) in lhs.iter().zip(rhs) {
            match lk.as_bytes().cmp(rk.as_bytes()) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
            match self.values(lv, rv) {
                Ordering::Equal => {}
                ordering => return ordering,
            }
        }
        lhs.len().cmp(&rhs.len())
    }
}

/// A value viewed through the resolver that owns its referents.
///
/// Implements the full comparison relation, both between views and against plain Rust values:
///
/// ```
/// use jsondom::{Arena, Value};
///
/// let mut arena = Arena::new();
/// let target = arena.insert(Value::from("text"));
/// let reference = Value::from(target);
///
/// assert_eq!(arena.resolved(&reference), "text");
/// assert!(arena.resolved(&reference) > 42);
/// ```
pub struct Resolved<'a, R: ?Sized = Arena> {
    value: &'a Value,
    resolver: &'a R,
}

impl<'a, R: Resolve + ?Sized> Resolved<'a, R> {
    pub fn new(value: &'a Value, resolver: &'a R) -> Self {
        Self { value, resolver }
    }

    /// The value this view was created from, references included.
    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub(crate) fn resolver(&self) -> &'a R {
        self.resolver
    }

    /// The value after following references.
    #[must_use]
    pub fn get(&self) -> &'a Value {
        resolve(self.value, self.resolver)
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.get().kind()
    }

    fn compare_raw(&self, rhs: Raw<'_>) -> Ordering {
        Engine::new(self.resolver, &Detached).raw(self.value, rhs)
    }
}

impl<R: ?Sized> Clone for Resolved<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Resolved<'_, R> {}

impl<R: Resolve + ?Sized> fmt::Debug for Resolved<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resolved").field(self.get()).finish()
    }
}

impl<R: Resolve + ?Sized, S: Resolve + ?Sized> PartialEq<Resolved<'_, S>> for Resolved<'_, R> {
    fn eq(&self, other: &Resolved<'_, S>) -> bool {
        Engine::new(self.resolver, other.resolver).values(self.value, other.value)
            == Ordering::Equal
    }
}

impl<R: Resolve + ?Sized> Eq for Resolved<'_, R> {}

impl<R: Resolve + ?Sized, S: Resolve + ?Sized> PartialOrd<Resolved<'_, S>> for Resolved<'_, R> {
    fn partial_cmp(&self, other: &Resolved<'_, S>) -> Option<Ordering> {
        Some(Engine::new(self.resolver, other.resolver).values(self.value, other.value))
    }
}

impl<R: Resolve + ?Sized> Ord for Resolved<'_, R> {
    fn cmp(&self, other: &Self) -> Ordering {
        Engine::new(self.resolver, other.resolver).values(self.value, other.value)
    }
}

/// Plain Rust values that compare against [`Resolved`] views.
trait AsRaw {
    /// `None` when the value has no JSON counterpart, e.g. NaN.
    fn as_raw(&self) -> Option<Raw<'_>>;
}

impl AsRaw for () {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Null)
    }
}

impl AsRaw for bool {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Bool(*self))
    }
}

macro_rules! raw_integer {
    ($($ty:ty),*) => {
        $(
            impl AsRaw for $ty {
                fn as_raw(&self) -> Option<Raw<'_>> {
                    i64::try_from(*self).ok().map(Raw::Integer)
                }
            }
        )*
    };
}

raw_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl AsRaw for f64 {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Double::new(*self).ok().map(Raw::Double)
    }
}

impl AsRaw for f32 {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Double::new(f64::from(*self)).ok().map(Raw::Double)
    }
}

impl AsRaw for str {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::String(self))
    }
}

impl AsRaw for String {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::String(self))
    }
}

impl AsRaw for [Value] {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Array(self))
    }
}

impl AsRaw for Vec<Value> {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Array(self))
    }
}

impl AsRaw for BTreeMap<String, Value> {
    fn as_raw(&self) -> Option<Raw<'_>> {
        Some(Raw::Object(self))
    }
}

macro_rules! compare_raw {
    ($($ty:ty),*) => {
        $(
            impl<R: Resolve + ?Sized> PartialEq<$ty> for Resolved<'_, R> {
                fn eq(&self, other: &$ty) -> bool {
                    self.partial_cmp(other) == Some(Ordering::Equal)
                }
            }

            impl<R: Resolve + ?Sized> PartialOrd<$ty> for Resolved<'_, R> {
                fn partial_cmp(&self, other: &$ty) -> Option<Ordering> {
                    other.as_raw().map(|raw| self.compare_raw(raw))
                }
            }

            impl<R: Resolve + ?Sized> PartialEq<Resolved<'_, R>> for $ty {
                fn eq(&self, other: &Resolved<'_, R>) -> bool {
                    other == self
                }
            }

            impl<R: Resolve + ?Sized> PartialOrd<Resolved<'_, R>> for $ty {
                fn partial_cmp(&self, other: &Resolved<'_, R>) -> Option<Ordering> {
                    other.partial_cmp(self).map(Ordering::reverse)
                }
            }
        )*
    };
}

compare_raw!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
    [Value],
    Vec<Value>,
    BTreeMap<String, Value>
);

impl<R: Resolve + ?Sized> PartialEq<&str> for Resolved<'_, R> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl<R: Resolve + ?Sized> PartialOrd<&str> for Resolved<'_, R> {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.partial_cmp(*other)
    }
}
