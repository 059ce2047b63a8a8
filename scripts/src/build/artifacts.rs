//! Resolution of compiled contract artifacts by contract name

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy::json_abi::ContractObject;
use serde_json::Value;
use tracing::debug;

use crate::{deploy::ContractDefinition, errors::ScriptError};

/// Directory holding the compiler's build metadata, never a contract artifact
const BUILD_INFO_DIR: &str = "build-info";

/// A directory of compiled artifacts, as laid out by Hardhat (`artifacts/`)
/// or Foundry (`out/`)
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    /// Top of the artifacts tree
    root: PathBuf,
}

impl ArtifactStore {
    /// Artifacts found below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory searched for artifacts
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find the single artifact named `name` and read its definition
    pub fn resolve(&self, name: &str) -> Result<ContractDefinition, ScriptError> {
        if !self.root.is_dir() {
            return Err(ScriptError::definition_not_found(
                name,
                format!("artifacts directory {} does not exist", self.root.display()),
            ));
        }

        let file_name = format!("{name}.json");
        let mut candidates = Vec::new();
        find_artifacts(&self.root, &file_name, &mut candidates)
            .map_err(|e| ScriptError::definition_not_found(name, e.to_string()))?;

        let mut matches = Vec::new();
        for path in candidates {
            if let Some(definition) = read_artifact(&path, name)? {
                matches.push(definition);
            }
        }

        match matches.len() {
            0 => Err(ScriptError::definition_not_found(
                name,
                format!("no artifact named {file_name} under {}", self.root.display()),
            )),
            1 => Ok(matches.remove(0)),
            _ => {
                let paths = matches
                    .iter()
                    .map(|definition| definition.source().display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(ScriptError::definition_not_found(
                    name,
                    format!("ambiguous, found several artifacts: {paths}"),
                ))
            }
        }
    }
}

/// Recursively collect the files called `file_name` below `dir`
fn find_artifacts(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Symlinked directories are not followed
        if entry.file_type()?.is_dir() {
            if path.file_name().is_some_and(|dir| dir == BUILD_INFO_DIR) {
                continue;
            }
            find_artifacts(&path, file_name, found)?;
        } else if path.file_name().is_some_and(|file| file == file_name) {
            found.push(path);
        }
    }
    Ok(())
}

/// Parse the artifact at `path`, or `None` when it describes another contract
fn read_artifact(path: &Path, name: &str) -> Result<Option<ContractDefinition>, ScriptError> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScriptError::definition_not_found(name, format!("{}: {e}", path.display()))
    })?;
    let json: Value = serde_json::from_str(&content).map_err(|e| {
        ScriptError::definition_not_found(name, format!("{}: {e}", path.display()))
    })?;

    // Hardhat names the contract explicitly, Foundry only through the file name
    if let Some(contract_name) = json.get("contractName").and_then(Value::as_str) {
        if contract_name != name {
            debug!("Skipping {}, it holds {contract_name}", path.display());
            return Ok(None);
        }
    }

    let object: ContractObject = serde_json::from_str(&content).map_err(|e| {
        ScriptError::definition_not_found(name, format!("{}: {e}", path.display()))
    })?;

    Ok(Some(ContractDefinition::new(
        name,
        object.abi.unwrap_or_default(),
        object.bytecode.unwrap_or_default(),
        path.to_path_buf(),
    )))
}
