#![forbid(unsafe_code)]

//! Drag engine configuration.
//!
//! [`DndConfig`] names the two sentinel drop targets and switches the trash
//! and add-column affordances on or off. It can be built in code or loaded
//! from TOML or JSON:
//!
//! ```toml
//! trash_id = "void"
//! placeholder_id = "placeholder"
//! trashable = true
//! add_column = true
//! ```
//!
//! Loaders validate the result; [`DndConfig::validate_for`] additionally
//! checks the sentinels against a concrete board.

use std::path::Path;

use kanban_core::{Board, UniqueId};
use serde::{Deserialize, Serialize};

/// Default id of the trash drop target.
pub const DEFAULT_TRASH_ID: &str = "void";

/// Default id of the add-column placeholder drop target.
pub const DEFAULT_PLACEHOLDER_ID: &str = "placeholder";

/// Sentinel ids and affordance switches for one board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DndConfig {
    /// Drop target that deletes the dragged item.
    pub trash_id: UniqueId,
    /// Drop target that requests a new column seeded with the dragged item.
    pub placeholder_id: UniqueId,
    /// When false, trash candidates are ignored by the resolver.
    pub trashable: bool,
    /// When false, placeholder candidates are ignored by the resolver.
    pub add_column: bool,
}

impl Default for DndConfig {
    fn default() -> Self {
        Self {
            trash_id: UniqueId::from(DEFAULT_TRASH_ID),
            placeholder_id: UniqueId::from(DEFAULT_PLACEHOLDER_ID),
            trashable: false,
            add_column: true,
        }
    }
}

impl DndConfig {
    /// Use a custom trash id.
    #[must_use]
    pub fn with_trash_id(mut self, id: impl Into<UniqueId>) -> Self {
        self.trash_id = id.into();
        self
    }

    /// Use a custom placeholder id.
    #[must_use]
    pub fn with_placeholder_id(mut self, id: impl Into<UniqueId>) -> Self {
        self.placeholder_id = id.into();
        self
    }

    /// Enable or disable the trash target.
    #[must_use]
    pub fn trashable(mut self, enabled: bool) -> Self {
        self.trashable = enabled;
        self
    }

    /// Enable or disable the add-column placeholder.
    #[must_use]
    pub fn add_column(mut self, enabled: bool) -> Self {
        self.add_column = enabled;
        self
    }

    /// Whether `id` is the trash sentinel.
    #[must_use]
    pub fn is_trash(&self, id: &UniqueId) -> bool {
        &self.trash_id == id
    }

    /// Whether `id` is the placeholder sentinel.
    #[must_use]
    pub fn is_placeholder(&self, id: &UniqueId) -> bool {
        &self.placeholder_id == id
    }

    /// Whether a droppable with this id currently takes part in collision
    /// detection. Disabled sentinels behave as if they were not rendered.
    #[must_use]
    pub fn accepts_target(&self, id: &UniqueId) -> bool {
        if self.is_trash(id) {
            return self.trashable;
        }
        if self.is_placeholder(id) {
            return self.add_column;
        }
        true
    }

    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DndConfigError> {
        let config: Self = toml::from_str(s).map_err(DndConfigError::Toml)?;
        config.into_validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, DndConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DndConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, DndConfigError> {
        let config: Self = serde_json::from_str(s).map_err(DndConfigError::Json)?;
        config.into_validated()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DndConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DndConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate the sentinels on their own.
    ///
    /// Returns a list of problems; an empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.trash_id.is_empty() {
            errors.push("trash_id must not be empty".into());
        }
        if self.placeholder_id.is_empty() {
            errors.push("placeholder_id must not be empty".into());
        }
        if self.trash_id == self.placeholder_id {
            errors.push(format!(
                "trash_id and placeholder_id must differ, both are `{}`",
                self.trash_id
            ));
        }
        errors
    }

    /// Validate the sentinels against the ids present on `board`.
    #[must_use]
    pub fn validate_for(&self, board: &Board) -> Vec<String> {
        let mut errors = self.validate();
        for (name, sentinel) in [
            ("trash_id", &self.trash_id),
            ("placeholder_id", &self.placeholder_id),
        ] {
            if board.is_column(sentinel) {
                errors.push(format!("{name} `{sentinel}` collides with a column id"));
            }
            if board.item(sentinel).is_some() {
                errors.push(format!("{name} `{sentinel}` collides with an item id"));
            }
        }
        errors
    }

    fn into_validated(self) -> Result<Self, DndConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DndConfigError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading a drag configuration.
#[derive(Debug)]
pub enum DndConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for DndConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for DndConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
