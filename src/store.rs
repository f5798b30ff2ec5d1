//! Named vector storage
//!
//! Vectors are kept in insertion order in a single owned buffer. Capacity
//! starts at a configurable size and doubles when an append would exceed it;
//! allocation failure is reported instead of aborting.

use crate::error::{MinimatError, Result};
use crate::vector::Vec3;
use std::fmt;
use tracing::{debug, error};

/// Default initial capacity of a store
pub const DEFAULT_INITIAL_CAPACITY: usize = 4;

/// A stored vector with its name
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    pub name: String,
    pub value: Vec3,
}

impl Vector {
    pub fn new(name: impl Into<String>, value: Vec3) -> Self {
        Vector {
            name: name.into(),
            value,
        }
    }
}

/// Renders as `name: (x.xx, y.xx, z.xx)`.
impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Check that `name` can be used as a vector name.
///
/// Names start with an ASCII letter or `_`, continue with ASCII letters,
/// digits or `_`, and are at most `max_len` characters long.
pub fn validate_name(name: &str, max_len: usize) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= max_len {
        Ok(())
    } else {
        Err(MinimatError::InvalidName {
            name: name.to_string(),
            max_len,
        })
    }
}

/// Insertion-ordered collection of named vectors
#[derive(Debug)]
pub struct VectorStore {
    entries: Vec<Vector>,
    initial_capacity: usize,
}

impl Default for VectorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VectorStore {
    /// Create an empty store
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::VectorStore;
    ///
    /// let store = VectorStore::new();
    /// assert!(store.is_empty());
    /// assert!(store.list().is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_initial_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Create an empty store that reserves `initial_capacity` slots on first insert.
    pub fn with_initial_capacity(initial_capacity: usize) -> Self {
        VectorStore {
            entries: Vec::new(),
            initial_capacity: initial_capacity.max(1),
        }
    }

    /// Insert a vector, or overwrite the components of an existing one
    ///
    /// # Examples
    ///
    /// ```
    /// use minimat::{Vec3, VectorStore};
    ///
    /// let mut store = VectorStore::new();
    /// store.upsert("a", 1.0, 2.0, 3.0).unwrap();
    /// store.upsert("a", 4.0, 5.0, 6.0).unwrap();
    /// assert_eq!(store.len(), 1);
    /// assert_eq!(store.lookup("a").unwrap().value, Vec3::new(4.0, 5.0, 6.0));
    /// ```
    pub fn upsert(&mut self, name: &str, x: f64, y: f64, z: f64) -> Result<()> {
        self.upsert_vec(name, Vec3::new(x, y, z))
    }

    /// Same as [`VectorStore::upsert`] with the components packed in a [`Vec3`].
    pub fn upsert_vec(&mut self, name: &str, value: Vec3) -> Result<()> {
        if let Some(existing) = self.entries.iter_mut().find(|v| v.name == name) {
            existing.value = value;
            return Ok(());
        }

        self.grow_if_full().map_err(|_| {
            error!(name, len = self.entries.len(), "vector store allocation failed");
            MinimatError::StorageExhausted {
                name: name.to_string(),
            }
        })?;
        self.entries.push(Vector::new(name, value));
        Ok(())
    }

    fn grow_if_full(&mut self) -> std::result::Result<(), std::collections::TryReserveError> {
        let capacity = self.entries.capacity();
        if self.entries.len() < capacity {
            return Ok(());
        }
        let additional = if capacity == 0 {
            self.initial_capacity
        } else {
            capacity
        };
        self.entries.try_reserve_exact(additional)?;
        debug!(capacity = self.entries.capacity(), "vector store grown");
        Ok(())
    }

    /// Find a vector by exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Option<&Vector> {
        self.entries.iter().find(|v| v.name == name)
    }

    /// All vectors in insertion order.
    pub fn list(&self) -> &[Vector] {
        &self.entries
    }

    /// Remove every vector and release the underlying buffer.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}
