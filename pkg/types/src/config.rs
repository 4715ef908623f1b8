use serde::{Deserialize, Serialize};

/// CLI configuration file (YAML).
///
/// Example `grr.yaml`:
/// ```yaml
/// address: https://mimir.example.com
/// tenant-id: team-a
/// api-key: my-secret-key
/// timeout-secs: 10
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MimirConfigFile {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, alias = "tenant-id")]
    pub tenant_id: Option<String>,
    #[serde(default, alias = "api-key")]
    pub api_key: Option<String>,
    #[serde(default, alias = "timeout-secs")]
    pub timeout_secs: Option<u64>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let cfg: MimirConfigFile = load_config_file("/nonexistent/grr-config.yaml").unwrap();
        assert!(cfg.address.is_none());
        assert!(cfg.tenant_id.is_none());
    }

    #[test]
    fn test_accepts_kebab_case_keys() {
        let cfg: MimirConfigFile = serde_yaml::from_str(
            "address: http://mimir:9009\ntenant-id: team-a\napi-key: k\ntimeout-secs: 5\n",
        )
        .unwrap();
        assert_eq!(cfg.address.as_deref(), Some("http://mimir:9009"));
        assert_eq!(cfg.tenant_id.as_deref(), Some("team-a"));
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.timeout_secs, Some(5));
    }
}
