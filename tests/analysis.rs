//! Integration tests for scan_project, find_unused_scripts and analyze_project.

mod common;
use common::{behaviour, meta, project, scene};

use upa::unity::{find_field_names, find_unused_scripts, scan_project, TextReferenceExtractor};
use upa::{analyze_project, AnalyzerError};

const GUID_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const GUID_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const GUID_C: &str = "cccccccccccccccccccccccccccccccc";

const A_WITH_TARGET: &str = r#"
using UnityEngine;

public class A : MonoBehaviour
{
    public B target;
}
"#;

const A_WITHOUT_TARGET: &str = r#"
using UnityEngine;

public class A : MonoBehaviour
{
    public B renamedTarget;
}
"#;

const B_SOURCE: &str = "using UnityEngine;\npublic class B : MonoBehaviour { }\n";
const C_SOURCE: &str = "using UnityEngine;\npublic class C : MonoBehaviour { }\n";

fn scene_attaching_a_with_target() -> String {
    scene(&[behaviour(
        "500",
        GUID_A,
        &[format!("target: {{fileID: 11400000, guid: {}, type: 3}}", GUID_B).as_str()],
    )])
}

fn unused_paths(root: &std::path::Path) -> Vec<String> {
    let (index, _) = scan_project(root, &TextReferenceExtractor);
    find_unused_scripts(&index)
        .into_iter()
        .map(|s| s.relative_path)
        .collect()
}

#[test]
fn declared_field_keeps_target_used() {
    let scene_text = scene_attaching_a_with_target();
    let (_dir, root) = project(&[
        ("Assets/Scripts/A.cs", A_WITH_TARGET),
        ("Assets/Scripts/A.cs.meta", &meta(GUID_A)),
        ("Assets/Scripts/B.cs", B_SOURCE),
        ("Assets/Scripts/B.cs.meta", &meta(GUID_B)),
        ("Assets/Scenes/Main.unity", &scene_text),
    ]);
    assert!(unused_paths(&root).is_empty());
}

#[test]
fn stale_field_leaves_target_unused() {
    let scene_text = scene_attaching_a_with_target();
    let (_dir, root) = project(&[
        ("Assets/Scripts/A.cs", A_WITHOUT_TARGET),
        ("Assets/Scripts/A.cs.meta", &meta(GUID_A)),
        ("Assets/Scripts/B.cs", B_SOURCE),
        ("Assets/Scripts/B.cs.meta", &meta(GUID_B)),
        ("Assets/Scenes/Main.unity", &scene_text),
    ]);
    assert_eq!(unused_paths(&root), vec!["Assets/Scripts/B.cs"]);
}

#[test]
fn only_unreferenced_script_is_reported() {
    let scene_text = scene_attaching_a_with_target();
    let (_dir, root) = project(&[
        ("Assets/Scripts/A.cs", A_WITH_TARGET),
        ("Assets/Scripts/A.cs.meta", &meta(GUID_A)),
        ("Assets/Scripts/B.cs", B_SOURCE),
        ("Assets/Scripts/B.cs.meta", &meta(GUID_B)),
        ("Assets/Scripts/C.cs", C_SOURCE),
        ("Assets/Scripts/C.cs.meta", &meta(GUID_C)),
        ("Assets/Scenes/Main.unity", &scene_text),
    ]);
    assert_eq!(unused_paths(&root), vec!["Assets/Scripts/C.cs"]);
}

#[test]
fn unparsable_owner_makes_field_references_stale() {
    let scene_text = scene_attaching_a_with_target();
    let (_dir, root) = project(&[
        ("Assets/A.cs", "public class A : MonoBehaviour { public B target"),
        ("Assets/A.cs.meta", &meta(GUID_A)),
        ("Assets/B.cs", B_SOURCE),
        ("Assets/B.cs.meta", &meta(GUID_B)),
        ("Assets/Main.unity", &scene_text),
    ]);
    assert_eq!(unused_paths(&root), vec!["Assets/B.cs"]);
}

#[test]
fn script_without_meta_is_not_registered() {
    let (_dir, root) = project(&[
        ("Assets/Orphan.cs", C_SOURCE),
        ("Assets/C.cs", C_SOURCE),
        ("Assets/C.cs.meta", &meta(GUID_C)),
    ]);
    assert_eq!(unused_paths(&root), vec!["Assets/C.cs"]);
}

#[test]
fn report_orders_shallow_first() {
    let (_dir, root) = project(&[
        ("Assets/Deep/Er/Z.cs", C_SOURCE),
        ("Assets/Deep/Er/Z.cs.meta", &meta("01")),
        ("Assets/Deep/B.cs", C_SOURCE),
        ("Assets/Deep/B.cs.meta", &meta("02")),
        ("Assets/Top.cs", C_SOURCE),
        ("Assets/Top.cs.meta", &meta("03")),
        ("Assets/Deep/A.cs", C_SOURCE),
        ("Assets/Deep/A.cs.meta", &meta("04")),
    ]);
    assert_eq!(
        unused_paths(&root),
        vec![
            "Assets/Top.cs",
            "Assets/Deep/A.cs",
            "Assets/Deep/B.cs",
            "Assets/Deep/Er/Z.cs",
        ]
    );
}

#[test]
fn duplicate_guid_keeps_last_path() {
    let (_dir, root) = project(&[
        ("Assets/First.cs", C_SOURCE),
        ("Assets/First.cs.meta", &meta(GUID_C)),
        ("Assets/Second.cs", C_SOURCE),
        ("Assets/Second.cs.meta", &meta(GUID_C)),
    ]);
    let (index, _) = scan_project(&root, &TextReferenceExtractor);
    assert_eq!(index.scripts.len(), 1);
    assert_eq!(index.scripts[GUID_C].relative_path, "Assets/Second.cs");
}

#[test]
fn missing_assets_dir_reports_nothing() {
    let (_dir, root) = project(&[("ProjectSettings/ProjectVersion.txt", "m_EditorVersion: 2022.3\n")]);
    assert!(unused_paths(&root).is_empty());
}

#[test]
fn analyze_project_writes_dumps_and_report() {
    let scene_text = format!(
        "{}--- !u!1 &100\nGameObject:\n  m_Name: Player\n--- !u!4 &101\nTransform:\n  m_GameObject: {{fileID: 100}}\n  m_Children: []\n  m_Father: {{fileID: 0}}\n--- !u!1660057539 &9223372036854775807\nSceneRoots:\n  m_Roots:\n  - {{fileID: 101}}\n",
        scene_attaching_a_with_target()
    );
    let (_dir, root) = project(&[
        ("Assets/Scripts/A.cs", A_WITHOUT_TARGET),
        ("Assets/Scripts/A.cs.meta", &meta(GUID_A)),
        ("Assets/Scripts/B.cs", B_SOURCE),
        ("Assets/Scripts/B.cs.meta", &meta(GUID_B)),
        ("Assets/Scenes/Main.unity", &scene_text),
    ]);
    let out = root.join("out/nested");
    let summary = analyze_project(&root, &out).unwrap();
    assert_eq!(summary.scenes, 1);
    assert_eq!(summary.dumps_written, 1);
    assert_eq!(summary.scripts, 2);
    assert_eq!(summary.used, 1);
    assert_eq!(summary.unused, 1);
    assert_eq!(
        std::fs::read_to_string(out.join("Main.unity.dump")).unwrap(),
        "Player\n"
    );
    assert_eq!(
        std::fs::read_to_string(out.join("UnusedScripts.csv")).unwrap(),
        format!("Relative Path,GUID\nAssets/Scripts/B.cs,{}\n", GUID_B)
    );
}

#[test]
fn analyze_project_rejects_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = analyze_project(&missing, &dir.path().join("out")).unwrap_err();
    assert!(matches!(err, AnalyzerError::NotADirectory(_)));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn field_names_from_unity_script() {
    let source = r#"
using System.Collections.Generic;
using UnityEngine;

namespace Game.Ui
{
    [RequireComponent(typeof(Canvas))]
    public sealed class Menu : MonoBehaviour
    {
        [SerializeField] private Button playButton;
        public List<Button> extraButtons = new List<Button>();
        private static Menu instance;
        public bool IsOpen => gameObject.activeSelf;
    }
}
"#;
    let names: Vec<_> = find_field_names(std::path::Path::new("Menu.cs"), source)
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(names, vec!["extraButtons", "playButton"]);
}

#[test]
fn list_item_reference_keeps_target_used() {
    let spawner = r#"
using System.Collections.Generic;
using UnityEngine;

public class Spawner : MonoBehaviour
{
    [System.Serializable]
    public struct Wave
    {
        public B enemy;
        public int count;
    }

    public List<Wave> waves;
}
"#;
    let scene_text = scene(&[behaviour(
        "500",
        GUID_A,
        &[
            "waves:",
            format!("- enemy: {{fileID: 11400000, guid: {}, type: 3}}", GUID_B).as_str(),
            "  count: 2",
        ],
    )]);
    let (_dir, root) = project(&[
        ("Assets/Spawner.cs", spawner),
        ("Assets/Spawner.cs.meta", &meta(GUID_A)),
        ("Assets/B.cs", B_SOURCE),
        ("Assets/B.cs.meta", &meta(GUID_B)),
        ("Assets/Main.unity", &scene_text),
    ]);
    assert!(unused_paths(&root).is_empty());
}

#[test]
fn report_quotes_path_with_comma() {
    let (_dir, root) = project(&[
        ("Assets/Foo, Bar/X.cs", C_SOURCE),
        ("Assets/Foo, Bar/X.cs.meta", &meta("ab")),
    ]);
    let out = root.join("out");
    analyze_project(&root, &out).unwrap();
    assert_eq!(
        std::fs::read_to_string(out.join("UnusedScripts.csv")).unwrap(),
        "Relative Path,GUID\n\"Assets/Foo, Bar/X.cs\",ab\n"
    );
}

#[test]
fn same_scene_name_in_two_folders_writes_one_dump() {
    let level = |name: &str| {
        format!(
            "%YAML 1.1\n--- !u!1 &1\nGameObject:\n  m_Name: {}\n--- !u!4 &2\nTransform:\n  m_GameObject: {{fileID: 1}}\n  m_Children: []\n  m_Father: {{fileID: 0}}\n",
            name
        )
    };
    let (first, second) = (level("FromA"), level("FromB"));
    let (_dir, root) = project(&[
        ("Assets/Levels/A/Main.unity", &first),
        ("Assets/Levels/B/Main.unity", &second),
    ]);
    let out = root.join("out");
    let summary = analyze_project(&root, &out).unwrap();
    assert_eq!(summary.scenes, 2);
    assert_eq!(summary.dumps_written, 1);
    assert_eq!(
        std::fs::read_to_string(out.join("Main.unity.dump")).unwrap(),
        "FromB\n"
    );
}
