use serde_json::Value;
use std::{fs, path::PathBuf};

fn read_json(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("The json file '{file}' could not be read: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("The json file '{file}' is not valid json: {e}"))
}

/// # Errors
///
/// Will return `Err` if the file is not readable or is not valid json
pub fn check_readable_json(file: &str) -> Result<Value, String> {
    let json = read_json(file)?;
    if !json.is_object() {
        return Err(format!("The json file '{file}' must hold an object."));
    }
    Ok(json)
}

/// # Errors
///
/// Will return `Err` if the file is not readable, is not valid json, or is
/// not in the prefill format
pub fn check_readable_file_and_json(file: &str) -> Result<Value, String> {
    let json = read_json(file)?;
    validate_json_format(&json)?;
    Ok(json)
}

/// Validate the json file format
/// format we expect is this:
/// { "golfers": [{"id": <int>, "name": "Firstname Lastname"}, ...]
/// , "seasons": [{ "season": {"year": <int>}, "weeks": [...], "teams": [...], ... }]
/// }
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_json_format(json: &Value) -> Result<(), String> {
    let Some(root) = json.as_object() else {
        return Err("The json file is not in the correct format. Expected an object.".to_string());
    };

    let expected_keys = ["golfers", "seasons"];
    for key in root.keys() {
        if !expected_keys.contains(&key.as_str()) {
            return Err(format!(
                "The json file is not in the correct format. Expected keys: {expected_keys:?}"
            ));
        }
    }

    if let Some(golfers) = root.get("golfers") {
        let Some(golfers) = golfers.as_array() else {
            return Err("The json key golfers is not in the correct format. Expected an array.".to_string());
        };
        for golfer in golfers {
            if !golfer["id"].is_i64() || !golfer["name"].is_string() {
                return Err(
                    "The json key golfers is not in the correct format. Expected objects with keys id and name.".to_string()
                );
            }
        }
    }

    let Some(seasons) = root.get("seasons").and_then(Value::as_array) else {
        return Err("The json key seasons is missing or is not an array.".to_string());
    };
    for season in seasons {
        if !season.is_object() {
            return Err(
                "The json key seasons is not in the correct format. Expected objects.".to_string(),
            );
        }
        if !season["season"]["year"].is_i64() {
            return Err(
                "The json key season.year is not in the correct format. Expected a number."
                    .to_string(),
            );
        }
        for key in ["weeks", "teams", "holes", "scores", "subs", "matchups"] {
            let value = &season[key];
            if !value.is_null() && !value.is_array() {
                return Err(format!(
                    "The json key {key} is not in the correct format. Expected an array."
                ));
            }
        }
    }

    Ok(())
}
