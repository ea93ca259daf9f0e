use serde::{Deserialize, Serialize};
use tardis_history::HistoryError;

use crate::TardisError;

/// History limit used when none is configured.
pub const DEFAULT_CAPACITY: usize = 1000;

/// Engine configuration.
///
/// Deserializes from JSON with every field optional:
///
/// ```
/// use tardis::TardisOptions;
///
/// let options = TardisOptions::from_json_str(r#"{"capacity": 50}"#).unwrap();
/// assert_eq!(options.capacity, 50);
/// assert_eq!(TardisOptions::from_json_str("{}").unwrap(), TardisOptions::default());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TardisOptions {
    /// Maximum number of undoable edits kept in history.
    pub capacity: usize,
}

impl Default for TardisOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl TardisOptions {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity }
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.capacity == 0 {
            return Err(HistoryError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Parses and validates options from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self, TardisError> {
        let options: TardisOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }
}
