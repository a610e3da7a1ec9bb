use std::{any::type_name, path::Path};

use anyhow::Context;
use serde::de::DeserializeOwned;

/// Loads a TOML file into `T`.  Both I/O and syntax errors name the file and the target type.
pub fn read_toml<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let parsed = fs_err::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|text| toml::from_str(&text).map_err(anyhow::Error::from));
    parsed.with_context(|| format!("Failed to load {} from {path:?}", type_name::<T>()))
}
