use std::env;

use serde_derive::Deserialize;

use crate::error::{ChainError, Result};

pub const DEFAULT_GENESIS_MARKER: &str = "Genesis Block: ";

const ENV_GENESIS_MARKER: &str = "HASH_CHAIN_GENESIS_MARKER";
const ENV_MAX_PAYLOAD: &str = "HASH_CHAIN_MAX_PAYLOAD";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChainConfig {
    /// Payload of the genesis block.
    pub genesis_marker: String,
    /// Reject appends with payloads longer than this many bytes.
    pub max_payload_size: Option<usize>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            genesis_marker: DEFAULT_GENESIS_MARKER.to_string(),
            max_payload_size: None,
        }
    }
}

impl ChainConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overridden by `HASH_CHAIN_GENESIS_MARKER` and `HASH_CHAIN_MAX_PAYLOAD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(marker) = lookup(ENV_GENESIS_MARKER) {
            config.genesis_marker = marker;
        }
        if let Some(raw) = lookup(ENV_MAX_PAYLOAD) {
            let limit = raw.trim().parse::<usize>().map_err(|e| {
                ChainError::Config(format!("{} must be a byte count, got {:?}: {}", ENV_MAX_PAYLOAD, raw, e))
            })?;
            config.max_payload_size = Some(limit);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ChainConfig::default();
        assert_eq!(config.genesis_marker, "Genesis Block: ");
        assert_eq!(config.max_payload_size, None);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ChainConfig::from_json(r#"{"max_payload_size": 64}"#).unwrap();
        assert_eq!(config.genesis_marker, DEFAULT_GENESIS_MARKER);
        assert_eq!(config.max_payload_size, Some(64));
    }

    #[test]
    fn test_from_json_rejects_unknown_field() {
        let err = ChainConfig::from_json(r#"{"difficulty": 4}"#).unwrap_err();
        assert!(matches!(err, ChainError::Config(_)));
    }

    #[test]
    fn test_from_lookup() {
        let config = ChainConfig::from_lookup(lookup_from(&[
            (ENV_GENESIS_MARKER, "origin"),
            (ENV_MAX_PAYLOAD, " 128 "),
        ]))
        .unwrap();
        assert_eq!(config.genesis_marker, "origin");
        assert_eq!(config.max_payload_size, Some(128));
    }

    #[test]
    fn test_from_lookup_bad_limit() {
        let err = ChainConfig::from_lookup(lookup_from(&[(ENV_MAX_PAYLOAD, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_PAYLOAD));
    }
}
