use std::{path::Path, time::Duration};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use merkle_tree::{IncrementalMerkleTree, MAX_DEPTH};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tunables for the ledger and its boundaries
///
/// Values are layered: built-in defaults, then an optional TOML file, then `SHIELDED_`-prefixed
/// environment variables (e.g. `SHIELDED_TREE_DEPTH=16`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Depth of the commitment tree, which must match the circuits
    pub tree_depth: usize,
    /// How many commitments to fetch per request when syncing the tree
    pub sync_page_size: u64,
    /// How long to wait for the prover before giving up
    pub prover_timeout_secs: u64,
    /// How many inputs the transfer circuit takes
    pub circuit_inputs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tree_depth: 20,
            sync_page_size: 100,
            prover_timeout_secs: 120,
            circuit_inputs: 2,
        }
    }
}

impl Config {
    /// The prefix for environment overrides
    pub const ENV_PREFIX: &'static str = "SHIELDED_";

    /// The layered sources, without extracting them
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Config::default()));

        let figment = match path {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment,
        };

        figment.merge(Env::prefixed(Self::ENV_PREFIX))
    }

    /// Load and validate the config, reading `path` if it's given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract().map_err(Box::new)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.tree_depth == 0 || self.tree_depth > MAX_DEPTH {
            return Err(Error::InvalidConfig(format!(
                "tree_depth must be between 1 and {MAX_DEPTH}, got {}",
                self.tree_depth
            )));
        }

        if self.sync_page_size == 0 {
            return Err(Error::InvalidConfig("sync_page_size must be positive".into()));
        }

        if self.prover_timeout_secs == 0 {
            return Err(Error::InvalidConfig(
                "prover_timeout_secs must be positive".into(),
            ));
        }

        if self.circuit_inputs == 0 {
            return Err(Error::InvalidConfig("circuit_inputs must be positive".into()));
        }

        Ok(())
    }

    /// [`Config::prover_timeout_secs`] as a [`Duration`]
    #[must_use]
    pub fn prover_timeout(&self) -> Duration {
        Duration::from_secs(self.prover_timeout_secs)
    }

    /// An empty commitment tree of the configured depth
    pub fn tree(&self) -> Result<IncrementalMerkleTree> {
        Ok(IncrementalMerkleTree::new(self.tree_depth)?)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.prover_timeout(), Duration::from_secs(120));
            assert_eq!(config.tree().unwrap().depth(), 20);
            Ok(())
        });
    }

    #[test]
    fn file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "ledger.toml",
                r#"
                    tree_depth = 16
                    sync_page_size = 10
                "#,
            )?;
            jail.set_env("SHIELDED_SYNC_PAGE_SIZE", "500");

            let config = Config::load(Some(Path::new("ledger.toml"))).unwrap();

            assert_eq!(config.tree_depth, 16);
            assert_eq!(config.sync_page_size, 500);
            assert_eq!(config.circuit_inputs, 2);
            Ok(())
        });
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("SHIELDED_TREE_DEPTH", "33");
            assert!(matches!(Config::load(None), Err(Error::InvalidConfig(_))));

            jail.set_env("SHIELDED_TREE_DEPTH", "8");
            jail.set_env("SHIELDED_PROVER_TIMEOUT_SECS", "0");
            assert!(matches!(Config::load(None), Err(Error::InvalidConfig(_))));
            Ok(())
        });
    }

    #[test]
    fn malformed_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.set_env("SHIELDED_TREE_DEPTH", "deep");
            assert!(matches!(Config::load(None), Err(Error::Config(_))));
            Ok(())
        });
    }
}
