//! The undo/redo engine.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tardis_history::{Direction, HistoryBuffer};
use tardis_path::Path;
use tracing::{debug, trace, warn};

use crate::apply::apply_command;
use crate::command::{BatchId, BatchIds, Command, CommandKind, CommandRecord};
use crate::options::TardisOptions;
use crate::TardisError;

/// Change notification callback, invoked with the tree after every
/// successful apply, undo, redo, and reset.
pub type OnChange = Box<dyn FnMut(&Value)>;

/// Owns a JSON tree and a bounded history of the edits applied to it.
pub struct Tardis {
    tree: Value,
    history: HistoryBuffer<CommandRecord>,
    batch_ids: BatchIds,
    on_change: OnChange,
}

impl fmt::Debug for Tardis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tardis")
            .field("tree", &self.tree)
            .field("history", &self.history)
            .field("batch_ids", &self.batch_ids)
            .finish_non_exhaustive()
    }
}

impl Tardis {
    /// Creates an engine over `initial` keeping at most `capacity` edits.
    pub fn new(
        initial: Value,
        capacity: usize,
        on_change: impl FnMut(&Value) + 'static,
    ) -> Result<Self, TardisError> {
        Ok(Self {
            tree: initial,
            history: HistoryBuffer::new(capacity)?,
            batch_ids: BatchIds::new(),
            on_change: Box::new(on_change),
        })
    }

    pub fn with_options(
        initial: Value,
        options: &TardisOptions,
        on_change: impl FnMut(&Value) + 'static,
    ) -> Result<Self, TardisError> {
        options.validate()?;
        Self::new(initial, options.capacity, on_change)
    }

    /// Creates an engine over the JSON form of a typed value.
    pub fn from_serialize<T: Serialize>(
        initial: &T,
        capacity: usize,
        on_change: impl FnMut(&Value) + 'static,
    ) -> Result<Self, TardisError> {
        Self::new(serde_json::to_value(initial)?, capacity, on_change)
    }

    /// The live tree.
    pub fn state(&self) -> &Value {
        &self.tree
    }

    /// Deserializes the live tree into `T`.
    pub fn state_as<T: DeserializeOwned>(&self) -> Result<T, TardisError> {
        Ok(<T as Deserialize>::deserialize(&self.tree)?)
    }

    pub fn into_state(self) -> Value {
        self.tree
    }

    pub fn history(&self) -> &HistoryBuffer<CommandRecord> {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_shift(Direction::Backward)
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_shift(Direction::Forward)
    }

    pub fn set_on_change(&mut self, on_change: impl FnMut(&Value) + 'static) {
        self.on_change = Box::new(on_change);
    }

    /// Returns an id not handed out before by this engine.
    pub fn next_batch_id(&mut self) -> BatchId {
        self.batch_ids.next_id()
    }

    /// Applies one edit and records it.
    ///
    /// Without a `batch_id` the edit forms its own batch. On error the tree
    /// and history are unchanged and the callback is not invoked.
    pub fn apply(
        &mut self,
        kind: CommandKind,
        path: impl Into<Path>,
        data: Option<Value>,
        batch_id: Option<BatchId>,
    ) -> Result<(), TardisError> {
        let batch_id = batch_id.unwrap_or_else(|| self.batch_ids.next_id());
        let forward = Command::new(kind, path, data, batch_id);
        let inverse = apply_command(&mut self.tree, &forward)?;
        debug!(kind = %forward.kind, path = %forward.path, batch = %forward.batch_id, "applied edit");
        self.history.add(CommandRecord { forward, inverse });
        (self.on_change)(&self.tree);
        Ok(())
    }

    pub fn insert(&mut self, path: impl Into<Path>, value: Value) -> Result<(), TardisError> {
        self.apply(CommandKind::Insert, path, Some(value), None)
    }

    pub fn update(&mut self, path: impl Into<Path>, value: Value) -> Result<(), TardisError> {
        self.apply(CommandKind::Update, path, Some(value), None)
    }

    pub fn delete(&mut self, path: impl Into<Path>) -> Result<(), TardisError> {
        self.apply(CommandKind::Delete, path, None, None)
    }

    /// Runs `edits` with a fresh batch id so everything it applies undoes
    /// and redoes as one step.
    ///
    /// Edits applied before an error stay applied and recorded.
    pub fn batch<R>(
        &mut self,
        edits: impl FnOnce(&mut Batch<'_>) -> Result<R, TardisError>,
    ) -> Result<R, TardisError> {
        let id = self.batch_ids.next_id();
        edits(&mut Batch { tardis: self, id })
    }

    /// Reverts the most recent batch. Returns `false` when there is nothing
    /// to undo.
    pub fn undo(&mut self) -> Result<bool, TardisError> {
        self.travel(Direction::Backward)
    }

    /// Re-applies the most recently undone batch. Returns `false` when there
    /// is nothing to redo.
    pub fn redo(&mut self) -> Result<bool, TardisError> {
        self.travel(Direction::Forward)
    }

    fn travel(&mut self, direction: Direction) -> Result<bool, TardisError> {
        let Some(record) = self.history.shift(direction) else {
            trace!(?direction, "history boundary, nothing to replay");
            return Ok(false);
        };
        let command = record.command_for(direction);
        let batch = command.batch_id.clone();
        replay(&mut self.tree, command)?;

        let mut steps = 1usize;
        while self
            .history
            .peek(direction)
            .is_some_and(|next| next.command_for(direction).batch_id == batch)
        {
            let Some(record) = self.history.shift(direction) else {
                break;
            };
            replay(&mut self.tree, record.command_for(direction))?;
            steps += 1;
        }

        debug!(?direction, batch = %batch, steps, "replayed batch");
        (self.on_change)(&self.tree);
        Ok(true)
    }

    /// Replaces the tree and starts a new, empty history of the same
    /// capacity.
    pub fn reset(&mut self, tree: Value) {
        debug!(dropped = self.history.len(), "reset");
        self.history.clear();
        self.tree = tree;
        (self.on_change)(&self.tree);
    }

    /// Drops all history while keeping the current tree.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

fn replay(tree: &mut Value, command: &Command) -> Result<(), TardisError> {
    trace!(kind = %command.kind, path = %command.path, batch = %command.batch_id, "replay");
    if let Err(err) = apply_command(tree, command) {
        warn!(kind = %command.kind, path = %command.path, error = %err, "recorded edit no longer applies");
        return Err(err.into());
    }
    Ok(())
}

/// Handle for applying several edits under one batch id.
///
/// Obtained from [`Tardis::batch`].
pub struct Batch<'a> {
    tardis: &'a mut Tardis,
    id: BatchId,
}

impl Batch<'_> {
    pub fn id(&self) -> &BatchId {
        &self.id
    }

    pub fn state(&self) -> &Value {
        self.tardis.state()
    }

    pub fn apply(&mut self, kind: CommandKind, path: impl Into<Path>, data: Option<Value>) -> Result<(), TardisError> {
        self.tardis.apply(kind, path, data, Some(self.id.clone()))
    }

    pub fn insert(&mut self, path: impl Into<Path>, value: Value) -> Result<(), TardisError> {
        self.apply(CommandKind::Insert, path, Some(value))
    }

    pub fn update(&mut self, path: impl Into<Path>, value: Value) -> Result<(), TardisError> {
        self.apply(CommandKind::Update, path, Some(value))
    }

    pub fn delete(&mut self, path: impl Into<Path>) -> Result<(), TardisError> {
        self.apply(CommandKind::Delete, path, None)
    }
}
