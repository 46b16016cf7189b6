//! Resolve an asset's GUID from its `.meta` sidecar.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::info;
use regex::Regex;

use super::constants::META_SUFFIX;
use super::util::read_file_normalized;
use crate::error::Result;

/// `guid: <hex>` at the start of any line.
static META_GUID_RE: OnceLock<Regex> = OnceLock::new();

fn meta_guid_re() -> &'static Regex {
    META_GUID_RE.get_or_init(|| Regex::new(r"(?mi)^guid:\s*([0-9a-f]+)").unwrap())
}

/// `Foo.cs` -> `Foo.cs.meta`.
pub fn meta_path(asset: &Path) -> PathBuf {
    let mut s = asset.as_os_str().to_os_string();
    s.push(META_SUFFIX);
    PathBuf::from(s)
}

/// First GUID in `meta` text, or an empty string if there is none.
pub fn parse_meta_guid(meta: &str) -> String {
    meta_guid_re()
        .captures(meta)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// GUID of `asset`. `Ok(None)` when the sidecar is absent or carries no GUID.
pub fn resolve_guid(asset: &Path) -> Result<Option<String>> {
    let meta = meta_path(asset);
    if !meta.is_file() {
        info!("no meta file for {}", asset.display());
        return Ok(None);
    }
    let guid = parse_meta_guid(&read_file_normalized(&meta)?);
    if guid.is_empty() {
        info!("no guid in {}", meta.display());
        return Ok(None);
    }
    Ok(Some(guid))
}
