//! Shard script payload extraction and capability path derivation.

use crate::loader::{LoaderError, LoaderResult};
use crate::model::shard::{ImplementorDescriptor, PackageBucket, ShardPayload};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Directory segment every shard script lives under.
const SHARD_DIR_SEGMENT: &str = "trait.impl";
const SHARD_FILE_PREFIX: &str = "trait.";
const SHARD_FILE_SUFFIX: &str = ".js";

// Generated wrapper shape:
//   (function() {var implementors = {...};
//   if (window.register_implementors) {...} else {...}})()
// The closing `if (window.register_implementors)` anchors the payload end, so
// `};` inside markup strings cannot cut the capture short.
static PAYLOAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)var implementors = (\{.*?\});\s*if \(window\.register_implementors\)")
        .expect("valid shard payload regex")
});

/// Derives a capability name from a generated shard path.
///
/// Everything after the `trait.impl` segment is the capability module path;
/// the filename contributes its middle piece (`trait.Binary.js` → `Binary`).
/// Segments join with `::`: `trait.impl/core/fmt/trait.Binary.js` becomes
/// `core::fmt::Binary`.
pub fn capability_from_path(path: &Path) -> LoaderResult<String> {
    let invalid = || LoaderError::InvalidShardPath(path.display().to_string());

    let mut segments = Vec::new();
    let mut saw_shard_dir = false;
    for component in path.components() {
        let part = component.as_os_str().to_str().ok_or_else(invalid)?;
        if saw_shard_dir {
            segments.push(part);
        } else if part == SHARD_DIR_SEGMENT {
            saw_shard_dir = true;
        }
    }

    let file_name = segments.pop().ok_or_else(invalid)?;
    let trait_name = file_name
        .strip_prefix(SHARD_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(SHARD_FILE_SUFFIX))
        .filter(|rest| !rest.is_empty())
        .ok_or_else(invalid)?;
    segments.push(trait_name);

    Ok(segments.join("::"))
}

/// Extracts and parses the payload object from one generated shard script.
pub fn parse_shard_script(capability: &str, source: &str) -> LoaderResult<ShardPayload> {
    let captures = PAYLOAD_RE
        .captures(source)
        .ok_or_else(|| LoaderError::MalformedPayload {
            capability: capability.to_string(),
            message: "script does not contain a `var implementors = {...}` payload".to_string(),
        })?;
    parse_shard_payload(capability, &captures[1])
}

/// Parses one bare JSON payload object into a shard.
///
/// An empty object is a legal payload and yields an empty bucket.
pub fn parse_shard_payload(capability: &str, payload: &str) -> LoaderResult<ShardPayload> {
    let raw: BTreeMap<String, Vec<Value>> =
        serde_json::from_str(payload).map_err(|err| LoaderError::MalformedPayload {
            capability: capability.to_string(),
            message: err.to_string(),
        })?;

    let mut packages = PackageBucket::new();
    for (package, entries) in raw {
        let mut descriptors = Vec::with_capacity(entries.len());
        for entry in entries {
            descriptors.push(descriptor_from_value(capability, &package, entry)?);
        }
        packages.insert(package, descriptors);
    }
    Ok(ShardPayload::with_packages(capability, packages))
}

// Generated payloads encode one implementor either as a bare markup string or
// as an array whose first element is the markup string; both occur in the
// wild, depending on the producer version.
fn descriptor_from_value(
    capability: &str,
    package: &str,
    value: Value,
) -> LoaderResult<ImplementorDescriptor> {
    let unsupported = || LoaderError::UnsupportedDescriptor {
        capability: capability.to_string(),
        package: package.to_string(),
    };

    match value {
        Value::String(markup) => Ok(ImplementorDescriptor::new(markup)),
        Value::Array(items) => match items.into_iter().next() {
            Some(Value::String(markup)) => Ok(ImplementorDescriptor::new(markup)),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}
