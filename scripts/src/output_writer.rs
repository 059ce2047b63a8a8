//! Opt-in JSON record of deployments

use std::{fs, path::Path};

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::{deploy::DeployedContract, errors::ScriptError};

/// Record the given deployment under `contract` in the JSON file at `file_path`,
/// keeping the entries of other contracts
pub fn write_deployment(
    file_path: &Path,
    contract: &str,
    deployed: &DeployedContract,
) -> Result<(), ScriptError> {
    // If the file doesn't exist, start from an empty object
    let mut parsed_json = if file_path.exists() {
        get_json_from_file(file_path)?
    } else {
        Map::new()
    };

    parsed_json.insert(
        contract.to_string(),
        json!({
            "deploy": deployed.address().to_string(),
            "tx": deployed.tx_hash().to_string(),
        }),
    );

    // Write the updated json back to the file
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    Value::Object(parsed_json)
        .serialize(&mut serializer)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    fs::write(file_path, out).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    Ok(())
}

/// Parses the JSON object stored at the given path
fn get_json_from_file(file_path: &Path) -> Result<Map<String, Value>, ScriptError> {
    let file_contents =
        fs::read_to_string(file_path).map_err(|e| ScriptError::JsonOutputError(e.to_string()))?;

    match serde_json::from_str(&file_contents)
        .map_err(|e| ScriptError::JsonOutputError(e.to_string()))?
    {
        Value::Object(map) => Ok(map),
        _ => Err(ScriptError::JsonOutputError(format!(
            "{} does not hold a JSON object",
            file_path.display()
        ))),
    }
}
