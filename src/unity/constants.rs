//! File names, serialization keys and markers of the Unity text asset format.

/// Subdirectory of the project root that holds every scanned asset.
pub const ASSETS_DIR: &str = "Assets";

/// Sidecar suffix appended to an asset path (`Foo.cs` -> `Foo.cs.meta`).
pub const META_SUFFIX: &str = ".meta";

pub const SCENE_EXTENSION: &str = ".unity";
pub const SCRIPT_EXTENSION: &str = ".cs";

/// Suffix of per-scene hierarchy dumps (`Main.unity` -> `Main.unity.dump`).
pub const DUMP_SUFFIX: &str = ".dump";

pub const REPORT_FILE_NAME: &str = "UnusedScripts.csv";
pub const REPORT_COLUMNS: [&str; 2] = ["Relative Path", "GUID"];

/// First line of a text-serialized asset. Binary scenes do not carry it.
pub const YAML_HEADER: &str = "%YAML";

/// Top-level body keys that decide a document's kind.
pub const OBJECT_KEY: &str = "GameObject";
pub const TRANSFORM_KEYS: &[&str] = &["Transform", "RectTransform"];
pub const ROOT_LIST_KEY: &str = "SceneRoots";

pub const NAME_FIELD: &str = "m_Name";
pub const OWNER_FIELD: &str = "m_GameObject";
pub const PARENT_FIELD: &str = "m_Father";
pub const CHILDREN_FIELD: &str = "m_Children";
pub const ROOTS_FIELD: &str = "m_Roots";

/// Identifier key inside a `{fileID: N}` reference literal.
pub const FILE_ID_KEY: &str = "fileID";

/// `fileID: 0` is the null reference.
pub const NULL_FILE_ID: &str = "0";

/// Prefix of engine-serialized fields; never a user field reference.
pub const ENGINE_FIELD_PREFIX: &str = "m_";

/// Repeated twice per depth level in hierarchy dumps.
pub const INDENT_MARKER: &str = "-";

pub fn is_engine_field(name: &str) -> bool {
    name.starts_with(ENGINE_FIELD_PREFIX)
}
