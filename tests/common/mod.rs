//! Shared test helpers.

#![allow(dead_code)]

use std::path::PathBuf;

/// Create a temp dir and write files. Returns (guard, root). Paths are relative to root; parent dirs are created.
pub fn project(files: &[(&str, &str)]) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_path_buf();
    for (path, content) in files {
        let full = root.join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
    }
    (dir, root)
}

/// Minimal `.meta` sidecar carrying `guid`.
pub fn meta(guid: &str) -> String {
    format!(
        "fileFormatVersion: 2\nguid: {}\nMonoImporter:\n  externalObjects: {{}}\n  serializedVersion: 2\n",
        guid
    )
}

/// A MonoBehaviour document attaching script `guid`, followed by `fields` lines.
pub fn behaviour(anchor: &str, guid: &str, fields: &[&str]) -> String {
    let mut doc = format!(
        "--- !u!114 &{}\nMonoBehaviour:\n  m_ObjectHideFlags: 0\n  m_GameObject: {{fileID: 100}}\n  m_Enabled: 1\n  m_Script: {{fileID: 11500000, guid: {}, type: 3}}\n  m_Name: \n",
        anchor, guid
    );
    for field in fields {
        doc.push_str("  ");
        doc.push_str(field);
        doc.push('\n');
    }
    doc
}

/// Scene text: YAML header followed by `documents`.
pub fn scene(documents: &[String]) -> String {
    let mut text = String::from("%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n");
    for doc in documents {
        text.push_str(doc);
    }
    text
}
