// Copyright (c) 2015-2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Extend a graph with attributes.
//!
//! There are two kinds of attributes. *Typed* attributes are fixed
//! when the graph type is chosen: `Graph<N, E>` stores one `N` with
//! each node and one `E` with each edge, accessible through
//! [`NodeAttributes`] and [`EdgeAttributes`].
//!
//! *Slots* are named, dynamically typed values that can be registered
//! and removed at runtime. Registering a slot returns a [`SlotKey`];
//! every entity then holds a [`Value`] for that slot, which is
//! [`Value::Empty`] until it is set.

use crate::graph::{Edge, Node};
use crate::key::Key;

use std::error;
use std::fmt;

#[cfg(feature = "serialize")]
use serde_derive::{Deserialize, Serialize};

/// Object with associated node attributes.
pub trait NodeAttributes<Attr> {
    // Return the attributes associated with a node.
    fn node(&self, u: Node) -> &Attr;

    // Return mutable attributes associated with a node.
    fn node_mut(&mut self, u: Node) -> &mut Attr;
}

/// Object with associated edge attributes.
pub trait EdgeAttributes<Attr> {
    // Return the attributes associated with an edge.
    fn edge(&self, e: Edge) -> &Attr;

    // Return mutable attributes associated with an edge.
    fn edge_mut(&mut self, e: Edge) -> &mut Attr;
}

/// Error when registering or accessing a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotError {
    /// A slot with this name has already been registered.
    Duplicate(String),
    /// The slot key is not (or no longer) registered.
    Unknown(SlotKey),
    /// A typed value has been read from an empty or differently typed slot.
    InvalidAccess { expected: &'static str, found: &'static str },
}

impl fmt::Display for SlotError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::SlotError::*;
        match self {
            Duplicate(name) => write!(fmt, "slot '{}' is already registered", name),
            Unknown(key) => write!(fmt, "unknown slot {}", key.0),
            InvalidAccess { expected, found } => {
                write!(fmt, "invalid slot access: expected {}, found {}", expected, found)
            }
        }
    }
}

impl error::Error for SlotError {}

/// The key of a registered slot.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SlotKey(Key);

/// A dynamically typed slot value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

static EMPTY: Value = Value::Empty;

impl Default for Value {
    fn default() -> Self {
        Value::Empty
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Bool(x)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Int(x)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<String> for Value {
    fn from(x: String) -> Self {
        Value::Text(x)
    }
}

impl From<&str> for Value {
    fn from(x: &str) -> Self {
        Value::Text(x.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "-"),
            Value::Bool(x) => write!(f, "{}", x),
            Value::Int(x) => write!(f, "{}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(x) => write!(f, "{}", x),
        }
    }
}

impl Value {
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Empty => "empty",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
        }
    }

    fn invalid(&self, expected: &'static str) -> SlotError {
        SlotError::InvalidAccess {
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, SlotError> {
        match *self {
            Value::Bool(x) => Ok(x),
            _ => Err(self.invalid("bool")),
        }
    }

    pub fn as_int(&self) -> Result<i64, SlotError> {
        match *self {
            Value::Int(x) => Ok(x),
            _ => Err(self.invalid("int")),
        }
    }

    pub fn as_float(&self) -> Result<f64, SlotError> {
        match *self {
            Value::Float(x) => Ok(x),
            _ => Err(self.invalid("float")),
        }
    }

    pub fn as_text(&self) -> Result<&str, SlotError> {
        match self {
            Value::Text(x) => Ok(x),
            _ => Err(self.invalid("text")),
        }
    }
}

/// The registered slots of one kind of entity (nodes or edges).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub(crate) struct SlotRegistry {
    slots: Vec<(SlotKey, String)>,
}

impl SlotRegistry {
    pub fn register(&mut self, name: &str) -> Result<SlotKey, SlotError> {
        if self.find(name).is_some() {
            return Err(SlotError::Duplicate(name.to_string()));
        }
        let key = SlotKey(Key::next());
        self.slots.push((key, name.to_string()));
        Ok(key)
    }

    pub fn find(&self, name: &str) -> Option<SlotKey> {
        self.slots.iter().find(|(_, n)| n == name).map(|&(k, _)| k)
    }

    pub fn name(&self, key: SlotKey) -> Option<&str> {
        self.slots.iter().find(|&&(k, _)| k == key).map(|(_, n)| n.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.slots.iter().map(|&(k, _)| k)
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.slots.iter().any(|&(k, _)| k == key)
    }

    pub fn unregister(&mut self, key: SlotKey) -> bool {
        let len = self.slots.len();
        self.slots.retain(|&(k, _)| k != key);
        self.slots.len() != len
    }

    pub fn check(&self, key: SlotKey) -> Result<(), SlotError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(SlotError::Unknown(key))
        }
    }
}

/// The slot values stored with a single entity.
///
/// Entities usually carry very few slots, so a plain vector is used.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub(crate) struct SlotValues(Vec<(SlotKey, Value)>);

impl SlotValues {
    pub fn get(&self, key: SlotKey) -> &Value {
        self.0.iter().find(|&&(k, _)| k == key).map(|(_, v)| v).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, key: SlotKey, value: Value) {
        if let Some(slot) = self.0.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    pub fn remove(&mut self, key: SlotKey) -> Option<Value> {
        let pos = self.0.iter().position(|&(k, _)| k == key)?;
        Some(self.0.swap_remove(pos).1)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{SlotError, SlotRegistry, SlotValues, Value};

    #[test]
    fn test_registry() {
        let mut reg = SlotRegistry::default();
        let a = reg.register("price").unwrap();
        let b = reg.register("label").unwrap();
        assert_ne!(a, b);
        assert_eq!(reg.find("price"), Some(a));
        assert_eq!(reg.name(b), Some("label"));
        assert_eq!(reg.register("price"), Err(SlotError::Duplicate("price".to_string())));

        assert!(reg.unregister(a));
        assert!(!reg.unregister(a));
        assert_eq!(reg.check(a), Err(SlotError::Unknown(a)));
        assert_eq!(reg.check(b), Ok(()));
        // the name can be registered again, with a new key
        let c = reg.register("price").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_values() {
        let mut reg = SlotRegistry::default();
        let a = reg.register("a").unwrap();
        let b = reg.register("b").unwrap();

        let mut values = SlotValues::default();
        assert!(values.get(a).is_empty());
        assert_eq!(values.len(), 0);

        values.set(a, 42i64.into());
        values.set(b, "x".into());
        values.set(a, 43i64.into());
        assert_eq!(values.len(), 2);
        assert_eq!(values.get(a).as_int(), Ok(43));
        assert_eq!(values.get(b).as_text(), Ok("x"));

        assert_eq!(values.remove(a), Some(Value::Int(43)));
        assert!(values.get(a).is_empty());
        assert_eq!(values.remove(a), None);
    }

    #[test]
    fn test_typed_access() {
        assert_eq!(Value::Bool(true).as_bool(), Ok(true));
        assert_eq!(Value::Float(0.5).as_float(), Ok(0.5));
        assert_eq!(
            Value::Empty.as_int(),
            Err(SlotError::InvalidAccess {
                expected: "int",
                found: "empty"
            })
        );
        assert!(Value::Int(1).as_text().is_err());
        assert_eq!(format!("{}", Value::Int(-3)), "-3");
    }
}
