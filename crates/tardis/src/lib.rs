//! tardis — undo/redo for JSON trees.
//!
//! A [`Tardis`] owns a `serde_json::Value` and applies path-addressed edits
//! to it. Every edit is one of three primitives ([`CommandKind`]) and is
//! recorded together with its exact inverse in a bounded
//! [`HistoryBuffer`]. Edits sharing a [`BatchId`] undo and redo as a single
//! step.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tardis::{path, Tardis};
//!
//! let mut tardis = Tardis::new(json!({"items": [{"id": 1}]}), 100, |_| {}).unwrap();
//!
//! tardis.insert(path!["items", 1], json!({"id": 2})).unwrap();
//! assert_eq!(tardis.state()["items"], json!([{"id": 1}, {"id": 2}]));
//!
//! tardis.undo().unwrap();
//! assert_eq!(tardis.state()["items"], json!([{"id": 1}]));
//!
//! tardis.redo().unwrap();
//! assert_eq!(tardis.state()["items"], json!([{"id": 1}, {"id": 2}]));
//! ```
//!
//! Several edits can be grouped into one undo step:
//!
//! ```
//! use serde_json::json;
//! use tardis::{path, Tardis};
//!
//! let mut tardis = Tardis::new(json!({"user": {"name": "John"}, "log": []}), 100, |_| {}).unwrap();
//! tardis
//!     .batch(|b| {
//!         b.update(path!["user", "name"], json!("Jane"))?;
//!         b.insert(path!["log", 0], json!("renamed"))
//!     })
//!     .unwrap();
//!
//! assert!(tardis.undo().unwrap());
//! assert_eq!(tardis.state(), &json!({"user": {"name": "John"}, "log": []}));
//! assert!(!tardis.can_undo());
//! ```

pub mod apply;
pub mod command;
pub mod engine;
pub mod error;
pub mod options;

pub use apply::apply_command;
pub use command::{BatchId, BatchIds, Command, CommandKind, CommandRecord};
pub use engine::{Batch, OnChange, Tardis};
pub use error::TardisError;
pub use options::{TardisOptions, DEFAULT_CAPACITY};

pub use tardis_history::{Direction, HistoryBuffer, HistoryError};
pub use tardis_path::{path, Path, PathError, PathStep};
