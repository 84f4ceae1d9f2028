//! Typed string map carrying algorithm tunables
//!
//! Numbers are stored as decimal strings and bytes as standard base64, so the
//! JSON form is a flat `{ "key": "value" }` object.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ParamsError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_number(&mut self, key: &str, value: u32) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get_number(&self, key: &str) -> Result<u32, ParamsError> {
        let raw = self.raw(key)?;
        raw.parse::<u32>().map_err(|e| ParamsError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn set_bytes(&mut self, key: &str, value: &[u8]) {
        self.0.insert(key.to_string(), STANDARD.encode(value));
    }

    pub fn get_bytes(&self, key: &str) -> Result<Vec<u8>, ParamsError> {
        let raw = self.raw(key)?;
        STANDARD.decode(raw).map_err(|e| ParamsError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn get_string(&self, key: &str) -> Result<String, ParamsError> {
        self.raw(key).map(str::to_string)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn raw(&self, key: &str) -> Result<&str, ParamsError> {
        self.0
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ParamsError::KeyNotFound(key.to_string()))
    }
}
