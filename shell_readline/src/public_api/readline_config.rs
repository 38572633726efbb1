// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Display, Formatter, Result as FmtResult},
          fs,
          path::{Path, PathBuf}};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::{CONTINUATION_PROMPT_DEFAULT, HISTORY_SIZE_DEFAULT,
            MAX_AUTOCOMPLETE_ENTRIES_DEFAULT, PASTE_THRESHOLD_DEFAULT,
            PRINT_WIDE_PADDING_DEFAULT, ReadlineError};

/// Tunables for [`crate::LineEditor`]. Every field is optional in the JSON file, missing
/// fields take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadlineOptions {
    /// Capacity of the history ring.
    pub history_size: usize,
    /// More candidates than this and the user is asked before they are listed.
    pub max_autocomplete_entries: usize,
    /// Used by [`crate::ReadlineAsync::read_line()`] when no continuation prompt is given.
    pub continuation_prompt: String,
    /// Spaces between the columns of [`crate::LineEditor::print_wide()`].
    pub print_wide_padding: usize,
    /// Input chunks with more chars than this (that don't start with ESC) are treated as
    /// pastes, and fed to the editor one char at a time.
    pub paste_threshold: usize,
}

impl Default for ReadlineOptions {
    fn default() -> Self {
        Self {
            history_size: HISTORY_SIZE_DEFAULT,
            max_autocomplete_entries: MAX_AUTOCOMPLETE_ENTRIES_DEFAULT,
            continuation_prompt: CONTINUATION_PROMPT_DEFAULT.to_string(),
            print_wide_padding: PRINT_WIDE_PADDING_DEFAULT,
            paste_threshold: PASTE_THRESHOLD_DEFAULT,
        }
    }
}

/// Names of the folder and file under the OS config folder.
#[derive(Debug, Clone, Copy)]
pub enum ConfigPaths {
    TopLevelFolderName,
    OptionsFile,
}

impl Display for ConfigPaths {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let path = match self {
            ConfigPaths::TopLevelFolderName => "r3bl-shell-readline",
            ConfigPaths::OptionsFile => "options.json",
        };
        write!(f, "{path}")
    }
}

/// This is where the options file is expected to be.
#[must_use]
pub fn try_get_options_file_path() -> Option<PathBuf> {
    let home_config_folder_path = config_dir()?;
    Some(
        home_config_folder_path
            .join(ConfigPaths::TopLevelFolderName.to_string())
            .join(ConfigPaths::OptionsFile.to_string()),
    )
}

impl ReadlineOptions {
    /// Parse the options from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can't be read, and
    /// [`ReadlineError::Config`] if it isn't valid.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ReadlineError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let it: Self = serde_json::from_str(&content)
            .map_err(|error| ReadlineError::Config(format!("{}: {error}", path.display())))?;
        it.validate()?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Loaded readline options", path = %path.display(), options = ?it);
        Ok(it)
    }

    /// Load the options from the user's config folder, eg:
    /// `~/.config/r3bl-shell-readline/options.json` on Linux. Falls back to the defaults
    /// when there is no such file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn try_load_from_config_folder() -> Result<Self, ReadlineError> {
        match try_get_options_file_path() {
            Some(path) if path.exists() => Self::try_load(path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ReadlineError> {
        if self.history_size == 0 {
            return Err(ReadlineError::Config(
                "history_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
