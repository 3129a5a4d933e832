use super::{Config, Logs, RootBox, Storage, Workload};

/// Creates a new test configuration: the three-thread, two-pass workload
/// over 50k keys, run against one shard and against a hundred.
pub fn new_test_config() -> Config {
    Config {
        stripemap: RootBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            storage: Some(Storage { shards: 3 }),
            workload: Some(Workload {
                threads: 3,
                keys: 50_000,
                passes: 2,
                seed: Some(0),
                shard_counts: Some(vec![1, 100]),
            }),
        },
    }
}
