//! Miscellaneous settings for an input set, passed through without validation.

use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
/// Key-value settings which are handed on as they are.
pub struct InputSetSettings {
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
}

impl InputSetSettings {
    pub fn new() -> InputSetSettings {
        InputSetSettings::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    /// Set a value, returning the previous value of the key if there was one.
    pub fn insert<T: Into<Value>>(&mut self, key: &str, value: T) -> Option<Value> {
        self.settings.insert(key.to_string(), value.into())
    }
}
