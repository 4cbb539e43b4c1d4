//! Shard file and shard tree loading.

use crate::loader::script::{capability_from_path, parse_shard_script};
use crate::loader::{LoaderError, LoaderResult};
use crate::model::shard::ShardPayload;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads one shard script from disk.
pub fn load_shard_file(path: &Path) -> LoaderResult<ShardPayload> {
    let capability = capability_from_path(path)?;
    let source = fs::read_to_string(path).map_err(|err| LoaderError::UnreadableShard {
        path: path.display().to_string(),
        source: err,
    })?;
    let shard = parse_shard_script(&capability, &source)?;
    debug!(
        "event=shard_loaded module=loader capability={} packages={} implementors={}",
        shard.capability,
        shard.package_count(),
        shard.implementor_count()
    );
    Ok(shard)
}

/// Walks a shard tree and loads every `trait.*.js` script.
///
/// Paths are visited in sorted order, so replay order is deterministic across
/// platforms and runs.
pub fn load_shard_dir(root: &Path) -> LoaderResult<Vec<ShardPayload>> {
    let mut paths = Vec::new();
    collect_shard_paths(root, &mut paths)?;
    paths.sort();
    paths.iter().map(|path| load_shard_file(path)).collect()
}

fn collect_shard_paths(dir: &Path, out: &mut Vec<PathBuf>) -> LoaderResult<()> {
    let read_error = |err| LoaderError::UnreadableShard {
        path: dir.display().to_string(),
        source: err,
    };

    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_dir() {
            collect_shard_paths(&path, out)?;
        } else if is_shard_file(&path) {
            out.push(path);
        }
    }
    Ok(())
}

fn is_shard_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("trait.") && name.ends_with(".js"))
}
