//! Shard replay smoke entry point.
//!
//! # Responsibility
//! - Replay one generated shard tree through the registry end to end.
//! - Keep output deterministic for quick local sanity checks.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use traitdex_core::{install_index, load_shard_dir, ShardRegistry};

fn main() -> ExitCode {
    let Some(root) = env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: traitdex <shard-tree-root>");
        return ExitCode::FAILURE;
    };

    let shards = match load_shard_dir(&root) {
        Ok(shards) => shards,
        Err(err) => {
            eprintln!("traitdex: {err}");
            return ExitCode::FAILURE;
        }
    };

    let registry = ShardRegistry::new();
    for shard in shards {
        registry.submit(shard);
    }
    // Installing after every submission exercises the buffered path, the
    // worst case the registry must support; the whole tree drains here.
    let index = install_index(&registry);

    let index = index.borrow();
    println!("traitdex_core version={}", traitdex_core::core_version());
    println!("capabilities={}", index.len());
    for capability in index.capability_names() {
        let packages = index.get(capability).map_or(0, |bucket| bucket.len());
        let implementors = index.implementor_count(capability).unwrap_or(0);
        println!("capability={capability} packages={packages} implementors={implementors}");
    }
    ExitCode::SUCCESS
}
