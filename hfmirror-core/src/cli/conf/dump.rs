use crate::conf::load_config;
use serde::Serialize;
use std::path::PathBuf;

/// JSON unless `yaml` is set.
pub fn dump(path: PathBuf, json: bool, yaml: bool) -> anyhow::Result<()> {
    let cfg = load_config(&path)?;

    let out = if yaml && !json {
        to_yaml(&cfg)?
    } else {
        to_json(&cfg)?
    };
    println!("{out}");

    Ok(())
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub(crate) fn to_yaml<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_yaml::to_string(value)?)
}
