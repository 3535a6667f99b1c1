use crate::domain::config::Scope;
use crate::domain::ports::ConfigProvider;
use crate::error::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Configuration values held in memory, keyed by path.
///
/// Store-scoped values override the default scope. The JSON form is:
///
/// ```json
/// { "default": { "payment/checkoutcom_vault/active": "1" },
///   "stores": { "en": { "settings/checkoutcom_configuration/debug": "1" } } }
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StaticConfig {
    #[serde(default)]
    default: HashMap<String, String>,
    #[serde(default)]
    stores: HashMap<String, HashMap<String, String>>,
}

impl StaticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        Ok(serde_json::from_reader(source)?)
    }

    pub fn set(&mut self, scope: Scope, path: impl Into<String>, value: impl Into<String>) {
        let values = match scope {
            Scope::Default => &mut self.default,
            Scope::Store(code) => self.stores.entry(code).or_default(),
        };
        values.insert(path.into(), value.into());
    }

    pub fn with(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(Scope::Default, path, value);
        self
    }
}

impl ConfigProvider for StaticConfig {
    fn value(&self, path: &str, scope: &Scope) -> Option<String> {
        if let Scope::Store(code) = scope
            && let Some(value) = self.stores.get(code).and_then(|values| values.get(path))
        {
            return Some(value.clone());
        }
        self.default.get(path).cloned()
    }
}
