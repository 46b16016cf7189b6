//! Find script attachments and serialized script references in scene text.

use std::sync::OnceLock;

use regex::Regex;

use super::constants::is_engine_field;
use super::models::ScriptReference;

/// Source of [`ScriptReference`]s for one scene's text.
pub trait ReferenceExtractor: Sync {
    fn extract(&self, scene_text: &str) -> Vec<ScriptReference>;
}

/// Scans raw text for `MonoBehaviour` blocks (class id 114) with regexes.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReferenceExtractor;

impl ReferenceExtractor for TextReferenceExtractor {
    fn extract(&self, scene_text: &str) -> Vec<ScriptReference> {
        find_script_references(scene_text)
    }
}

/// Start of any document; behaviour blocks end at the next one.
static BLOCK_BOUNDARY_RE: OnceLock<Regex> = OnceLock::new();

/// `m_Script: {fileID: 11500000, guid: <hex>, type: 3}`
static SCRIPT_RE: OnceLock<Regex> = OnceLock::new();

/// `<field>: {... guid: <hex> ...}` on one line, also as a `- <field>: ...` sequence item.
static FIELD_REF_RE: OnceLock<Regex> = OnceLock::new();

const BEHAVIOUR_BLOCK_START: &str = "--- !u!114 ";

fn block_boundary_re() -> &'static Regex {
    BLOCK_BOUNDARY_RE.get_or_init(|| Regex::new(r"(?m)^--- ").unwrap())
}

fn script_re() -> &'static Regex {
    SCRIPT_RE.get_or_init(|| {
        Regex::new(r"m_Script:\s*\{\s*fileID:\s*-?\d+,\s*guid:\s*([0-9a-fA-F]+),\s*type:\s*3\s*\}")
            .unwrap()
    })
}

fn field_ref_re() -> &'static Regex {
    FIELD_REF_RE.get_or_init(|| {
        Regex::new(
            r"(?m)^[ \t]*(?:-[ \t]+)?([A-Za-z_][A-Za-z0-9_]*):[ \t]*\{[^}\n]*\bguid:[ \t]*([0-9a-fA-F]+)[^}\n]*\}",
        )
        .unwrap()
    })
}

/// Text of every behaviour block, marker line included.
pub fn behaviour_blocks(source: &str) -> Vec<&str> {
    let starts: Vec<usize> = block_boundary_re()
        .find_iter(source)
        .map(|m| m.start())
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| &source[start..starts.get(i + 1).copied().unwrap_or(source.len())])
        .filter(|block| block.starts_with(BEHAVIOUR_BLOCK_START))
        .collect()
}

/// References in one behaviour block: the attachment first, then user fields in line order.
/// A block without an `m_Script` reference yields nothing.
pub fn block_references(block: &str) -> Vec<ScriptReference> {
    let Some(owner) = script_re()
        .captures(block)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
    else {
        return Vec::new();
    };
    let mut refs = vec![ScriptReference::attachment(owner)];
    for cap in field_ref_re().captures_iter(block) {
        let (Some(name), Some(guid)) = (cap.get(1), cap.get(2)) else {
            continue;
        };
        if is_engine_field(name.as_str()) {
            continue;
        }
        refs.push(ScriptReference::field(owner, name.as_str(), guid.as_str()));
    }
    refs
}

/// All script references in a scene, in block order.
pub fn find_script_references(source: &str) -> Vec<ScriptReference> {
    behaviour_blocks(source)
        .into_iter()
        .flat_map(block_references)
        .collect()
}
