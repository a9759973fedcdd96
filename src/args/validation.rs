use serde_json::Value;
use std::{fs, path::PathBuf};

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The input file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not a json object
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let path = check_readable_file(file)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' could not be read: {e}"))?;
    let json: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("The json file '{file}' is not valid json: {e}"))?;
    validate_json_format(&json)?;
    Ok(json)
}

/// Both snapshot shapes are objects carrying a non-empty `rounds` array or a `holes` array.
///
/// # Errors
///
/// Will return `Err` if the json is neither a round nor a tournament snapshot
fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(object) = json.as_object() else {
        return Err("The json file is not in the correct format. Expected an object.".to_string());
    };
    let is_round = object.get("holes").is_some_and(Value::is_array)
        && object.get("participants").is_some_and(Value::is_array);
    let is_tournament = object.get("rounds").is_some_and(Value::is_array);
    if !is_round && !is_tournament {
        return Err(concat!(
            "The json file is not in the correct format. ",
            "Expected a round (holes, participants) or a tournament (rounds)."
        )
        .to_string());
    }
    Ok(())
}
