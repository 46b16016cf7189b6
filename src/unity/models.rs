//! Data models shared by the scene parser, the reference extractor and the usage analysis.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// A `GameObject` document: the node that carries the display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectNode {
    pub id: String,
    pub name: String,
}

/// A `Transform`/`RectTransform` document: the node that carries parent/child links.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransformNode {
    pub id: String,
    pub owner_object_id: String,
    /// `None` when the document has no `m_Father` or it is the null reference.
    pub parent_id: Option<String>,
    /// Declaration order; this is the sibling order of the dump.
    pub child_ids: Vec<String>,
}

/// Everything one scene parse pass produces, keyed by each document's anchor id.
#[derive(Debug, Default)]
pub struct SceneGraph {
    pub objects: HashMap<String, ObjectNode>,
    pub transforms: HashMap<String, TransformNode>,
    /// Anchor ids of transforms in the order their documents appeared.
    pub transform_order: Vec<String>,
    /// `None` when the scene has no `SceneRoots` document at all.
    pub root_list: Option<Vec<String>>,
}

/// A C# source file registered with a GUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRecord {
    pub guid: String,
    /// Project-relative path with `/` separators, e.g. `Assets/Scripts/Player.cs`.
    pub relative_path: String,
    pub path: PathBuf,
}

impl ScriptRecord {
    /// Number of path separators; shallower scripts sort first in the report.
    pub fn depth(&self) -> usize {
        self.relative_path.matches('/').count()
    }
}

/// One reference found in a behaviour block of a scene.
///
/// An empty `field_name` marks the self-attachment of `owner_guid`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptReference {
    pub owner_guid: String,
    pub field_name: String,
    pub target_guid: String,
}

impl ScriptReference {
    pub fn attachment(owner_guid: impl Into<String>) -> Self {
        ScriptReference {
            owner_guid: owner_guid.into(),
            field_name: String::new(),
            target_guid: String::new(),
        }
    }

    pub fn field(
        owner_guid: impl Into<String>,
        field_name: impl Into<String>,
        target_guid: impl Into<String>,
    ) -> Self {
        ScriptReference {
            owner_guid: owner_guid.into(),
            field_name: field_name.into(),
            target_guid: target_guid.into(),
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.field_name.is_empty()
    }
}

/// Per-run context: every registered script and every scene reference.
/// Built once by the scan and passed to the analysis; no global state.
#[derive(Debug, Default)]
pub struct ProjectIndex {
    /// GUID -> script. Last writer wins on duplicates.
    pub scripts: BTreeMap<String, ScriptRecord>,
    pub references: Vec<ScriptReference>,
    pub scenes: Vec<PathBuf>,
}

impl ProjectIndex {
    /// Register `record`, returning the record it replaced if the GUID was already taken.
    pub fn insert_script(&mut self, record: ScriptRecord) -> Option<ScriptRecord> {
        self.scripts.insert(record.guid.clone(), record)
    }
}
