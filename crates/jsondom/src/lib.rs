//! # jsondom
//!
//! An in-memory JSON document model.
//!
//! [`Value`] holds null, booleans, integers, finite doubles, strings, arrays, objects and
//! references. References are handles into an [`Arena`] that owns their referents; comparisons
//! through [`Arena::compare`] or [`Resolved`] look through them and [`Arena::flatten`] replaces
//! them with owned copies.
//!
//! ```
//! use jsondom::{Arena, Value};
//!
//! # fn main() -> jsondom::Result<()> {
//! let mut arena = Arena::new();
//! let shared = arena.insert(Value::array([1, 2, 3])?);
//!
//! let mut document = Value::Null;
//! document.insert("name", "example")?;
//! document.insert("items", shared)?;
//!
//! let items = vec![Value::from(1), Value::from(2), Value::from(3)];
//! assert_eq!(arena.resolved(&document["items"]), items);
//!
//! arena.flatten(&mut document)?;
//! assert_eq!(document["items"][2], Value::from(3));
//! # Ok(())
//! # }
//! ```
mod arena;
mod assign;
mod compare;
mod error;
mod flatten;
mod impls;
mod kind;
mod value;

pub use arena::{Arena, Resolve, ValueId};
pub use assign::{Assign, DefaultKey, EmptyArray, EmptyObject};
pub use compare::{compare, equal, Resolved};
pub use error::{Error, Result};
pub use kind::Kind;
pub use value::{Double, Locate, Value};
