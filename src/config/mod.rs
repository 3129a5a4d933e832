// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::storage::map::DEFAULT_NUM_OF_SHARDS;
use crate::workload::Params;

pub const PROD: &str = "prod";
pub const TEST: &str = "test";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Root {
    pub stripemap: RootBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RootBox {
    pub env: String,
    pub logs: Option<Logs>,
    pub storage: Option<Storage>,
    pub workload: Option<Workload>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Storage {
    pub shards: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Workload {
    /// Worker threads; 0 means one per available core.
    pub threads: usize,
    pub keys: usize,
    pub passes: usize,
    pub seed: Option<u64>,
    /// Shard counts to run the workload against, in order.
    pub shard_counts: Option<Vec<usize>>,
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    fn is_test(&self) -> bool;
    fn storage(&self) -> Storage;
    fn workload(&self) -> Option<&Workload>;
    fn params(&self) -> Params;
    fn shard_counts(&self) -> Vec<usize>;
}

// Config type alias for convenience
pub type Config = Root;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.stripemap.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.stripemap.env == PROD
    }

    fn is_test(&self) -> bool {
        self.stripemap.env == TEST
    }

    fn storage(&self) -> Storage {
        self.stripemap.storage.clone().unwrap_or(Storage {
            shards: DEFAULT_NUM_OF_SHARDS,
        })
    }

    fn workload(&self) -> Option<&Workload> {
        self.stripemap.workload.as_ref()
    }

    fn params(&self) -> Params {
        let defaults = Params::default();
        match self.workload() {
            Some(w) => Params {
                threads: if w.threads == 0 { num_cpus::get() } else { w.threads },
                keys: w.keys,
                passes: w.passes,
                seed: w.seed.unwrap_or(defaults.seed),
            },
            None => defaults,
        }
    }

    fn shard_counts(&self) -> Vec<usize> {
        self.workload()
            .and_then(|w| w.shard_counts.clone())
            .unwrap_or_else(|| vec![self.storage().shards])
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("load config from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Root = serde_yaml::from_str(data).context("unmarshal yaml")?;

        if cfg.storage().shards == 0 {
            anyhow::bail!("invalid storage.shards configured: must be at least 1");
        }

        if let Some(workload) = cfg.workload() {
            if workload.keys == 0 || workload.passes == 0 {
                anyhow::bail!("invalid workload configured: keys and passes must be positive");
            }
            let expected = cfg.params().threads.checked_mul(workload.passes);
            if expected.map_or(true, |n| i64::try_from(n).is_err()) {
                anyhow::bail!("invalid workload configured: threads * passes overflows a counter");
            }
            if workload
                .shard_counts
                .as_ref()
                .is_some_and(|counts| counts.is_empty() || counts.contains(&0))
            {
                anyhow::bail!("invalid workload.shard_counts configured: need non-zero entries");
            }
        }

        Ok(cfg)
    }
}

// Test config is always available for integration tests
mod test_config;
pub use test_config::new_test_config;
