//! Minimat - Minimalistic Vector Calculator
//!
//! Copyright (c) 2025 Minimat Contributors
//! Licensed under MIT License
//!
//! An interactive calculator for named three-component vectors: parse a line,
//! resolve names against the store, compute, print. Vectors can be saved to
//! and loaded from a plain CSV file.
//!
//! # Quick Start
//!
//! ```
//! use minimat::{Session, Vec3};
//!
//! let mut session = Session::default();
//! let mut out = Vec::new();
//! for line in ["a = 1, 0, 0", "b = 0, 1, 0", "c = a x b"] {
//!     session.execute(line, &mut out).unwrap();
//! }
//! assert_eq!(session.store().lookup("c").unwrap().value, Vec3::new(0.0, 0.0, 1.0));
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod csv_codec;
pub mod error;
pub mod session;
pub mod shell;
pub mod store;
pub mod vector;

// Re-export main types for convenience
pub use config::MinimatConfig;
pub use error::{MinimatError, Result};
pub use session::{Control, Reply, Session};
pub use store::{Vector, VectorStore};
pub use vector::Vec3;
