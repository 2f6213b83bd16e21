//! This module provides the `DefinitionLoader` struct, responsible for loading machine
//! definitions from files, directories and strings.

use crate::parser::parse;
use crate::types::{MachineDefinition, NtmError};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of definition files.
pub const DEFINITION_EXTENSION: &str = "csv";

/// `DefinitionLoader` is a utility struct for loading machine definitions.
pub struct DefinitionLoader;

impl DefinitionLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(MachineDefinition)` if the file is successfully read and parsed.
    /// * `Err(NtmError::FileError)` if the file cannot be read.
    /// * Any parse or validation error from [`parse`].
    pub fn load_definition(path: &Path) -> Result<MachineDefinition, NtmError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NtmError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let definition = parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            machine = %definition.name,
            transitions = definition.transitions.len(),
            "Loaded definition"
        );

        Ok(definition)
    }

    /// Loads a single machine definition from the provided string content.
    pub fn load_definition_from_string(content: &str) -> Result<MachineDefinition, NtmError> {
        parse(content)
    }

    /// Loads every definition file (`.csv` extension) in a directory, sorted by path.
    ///
    /// Directories and files with other extensions are skipped. Each element of the result
    /// is either the path and its definition, or the error that occurred while loading it.
    pub fn load_definitions(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, MachineDefinition), NtmError>> {
        if !directory.exists() {
            return vec![Err(NtmError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NtmError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        let mut paths = Vec::new();
        let mut results = Vec::new();

        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file()
                        && path
                            .extension()
                            .is_some_and(|ext| ext == DEFINITION_EXTENSION)
                    {
                        paths.push(path);
                    }
                }
                Err(e) => results.push(Err(NtmError::FileError(format!(
                    "Failed to read directory entry: {}",
                    e
                )))),
            }
        }

        paths.sort();
        results.extend(paths.into_iter().map(|path| {
            Self::load_definition(&path)
                .map(|definition| (path.clone(), definition))
                .map_err(|e| {
                    NtmError::FileError(format!(
                        "Failed to load definition from {}: {}",
                        path.display(),
                        e
                    ))
                })
        }));

        results
    }
}
