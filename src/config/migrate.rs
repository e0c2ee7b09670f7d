//! Configuration file upgrades: older config files lack the payroll keys
//! added over time. `check` reports them, `migrate` fills them with the
//! defaults while leaving every user value untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Top-level keys of the default configuration, in file order.
fn default_mapping() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())?;
    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{}: top level must be a mapping",
            path.display()
        ))),
    }
}

/// Collect missing keys, descending one level into nested sections
/// (`rates.lateness`, `default_shifts.malam`, ...).
fn missing_in(current: &Mapping, defaults: &Mapping, prefix: &str, out: &mut Vec<String>) {
    for (key, default_val) in defaults {
        let name = match key.as_str() {
            Some(k) if prefix.is_empty() => k.to_string(),
            Some(k) => format!("{prefix}.{k}"),
            None => continue,
        };

        match (current.get(key), default_val) {
            (None, _) => out.push(name),
            (Some(Value::Mapping(cur)), Value::Mapping(def)) if prefix.is_empty() => {
                missing_in(cur, def, &name, out)
            }
            _ => {}
        }
    }
}

fn fill_in(current: &mut Mapping, defaults: &Mapping, top_level: bool) {
    for (key, default_val) in defaults {
        match current.get_mut(key) {
            None => {
                current.insert(key.clone(), default_val.clone());
            }
            Some(Value::Mapping(cur)) if top_level => {
                if let Value::Mapping(def) = default_val {
                    fill_in(cur, def, false);
                }
            }
            Some(_) => {}
        }
    }
}

/// Keys present in the defaults but absent from the file at `path`.
pub fn check_config_file(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut missing = Vec::new();
    missing_in(&current, &defaults, "", &mut missing);
    Ok(missing)
}

/// Add the missing keys to the file at `path`.
/// Returns the keys that were added (empty → file unchanged).
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let missing = check_config_file(path)?;
    if missing.is_empty() {
        return Ok(missing);
    }

    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;
    fill_in(&mut current, &defaults, true);

    let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    Ok(missing)
}
