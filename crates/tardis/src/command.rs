//! Commands, command records, and batch identifiers.

use std::fmt;

use rand::Rng;
use serde_json::Value;
use tardis_history::Direction;
use tardis_path::Path;

/// The three primitive mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Set a field, or insert an array element shifting later ones right.
    Insert,
    /// Replace a field or array element in place.
    Update,
    /// Remove a field, or remove an array element shifting later ones left.
    Delete,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Insert => "insert",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier shared by edits that undo and redo as one step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        BatchId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        BatchId(id.to_string())
    }
}

impl From<String> for BatchId {
    fn from(id: String) -> Self {
        BatchId(id)
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator of fresh [`BatchId`]s.
///
/// Ids have the form `<session>-<counter>`: a random 64-bit session drawn
/// once per generator and a strictly increasing counter.
#[derive(Debug, Clone)]
pub struct BatchIds {
    session: u64,
    next: u64,
}

impl BatchIds {
    pub fn new() -> Self {
        Self::with_session(rand::thread_rng().gen())
    }

    pub fn with_session(session: u64) -> Self {
        Self { session, next: 0 }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn next_id(&mut self) -> BatchId {
        self.next += 1;
        BatchId(format!("{:016x}-{}", self.session, self.next))
    }
}

impl Default for BatchIds {
    fn default() -> Self {
        Self::new()
    }
}

/// One primitive mutation addressed by a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub batch_id: BatchId,
    pub kind: CommandKind,
    pub path: Path,
    /// Payload for insert and update; `None` is treated as `null`.
    pub data: Option<Value>,
    /// Key position for an insert of a new object field. Set on the inverse
    /// of a field delete; `None` appends the field.
    pub key_index: Option<usize>,
}

impl Command {
    pub fn new(kind: CommandKind, path: impl Into<Path>, data: Option<Value>, batch_id: BatchId) -> Self {
        Self {
            batch_id,
            kind,
            path: path.into(),
            data,
            key_index: None,
        }
    }
}

/// A command as applied, paired with the command that reverses it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    pub forward: Command,
    pub inverse: Command,
}

impl CommandRecord {
    /// The command to replay when moving in `direction`: the inverse for
    /// undo, the forward command for redo.
    pub fn command_for(&self, direction: Direction) -> &Command {
        match direction {
            Direction::Backward => &self.inverse,
            Direction::Forward => &self.forward,
        }
    }
}
