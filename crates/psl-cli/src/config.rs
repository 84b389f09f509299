use std::path::PathBuf;

/// CLI runtime configuration, loaded from environment variables.
pub struct Config {
    /// Calibration TOML to use instead of the built-in table.
    pub calibration_path: Option<PathBuf>,
    /// Whether detection-quality jitter is applied.
    pub jitter_enabled: bool,
    /// Seed for reproducible jitter.
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from `PSL_*` environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            calibration_path: get("PSL_CALIBRATION")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            jitter_enabled: get("PSL_JITTER").map(|v| v != "0").unwrap_or(true),
            seed: get("PSL_SEED").and_then(|v| v.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert!(config.calibration_path.is_none());
        assert!(config.jitter_enabled);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PSL_CALIBRATION", "/etc/psl/cal.toml"),
            ("PSL_JITTER", "0"),
            ("PSL_SEED", "1234"),
        ]));
        assert_eq!(config.calibration_path, Some(PathBuf::from("/etc/psl/cal.toml")));
        assert!(!config.jitter_enabled);
        assert_eq!(config.seed, Some(1234));
    }

    #[test]
    fn test_bad_seed_ignored() {
        let config = Config::from_lookup(lookup(&[("PSL_SEED", "abc")]));
        assert!(config.seed.is_none());
    }
}
