//! List the instance fields a C# script declares, using the tree-sitter C# grammar.

use std::collections::BTreeSet;
use std::path::Path;

use log::warn;
use tree_sitter::{Node, Parser};

use super::util::read_file_normalized;
use crate::error::{AnalyzerError, Result};

/// Declarations whose fields Unity can serialize.
const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "struct_declaration",
    "record_declaration",
    "record_struct_declaration",
];

/// Modifiers that make a field non-instance.
const NON_INSTANCE_MODIFIERS: &[&str] = &["static", "const"];

fn node_text<'a>(node: Node<'_>, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// First type declaration in pre-order.
fn find_type_declaration(node: Node<'_>) -> Option<Node<'_>> {
    if TYPE_DECLARATIONS.contains(&node.kind()) {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_type_declaration(child) {
            return Some(found);
        }
    }
    None
}

fn is_instance_field(field: Node<'_>, source: &str) -> bool {
    let mut cursor = field.walk();
    let is_instance = field
        .children(&mut cursor)
        .filter(|c| c.kind() == "modifier")
        .all(|m| !NON_INSTANCE_MODIFIERS.contains(&node_text(m, source).trim()));
    is_instance
}

fn declarator_name<'a>(declarator: Node<'_>, source: &'a str) -> Option<&'a str> {
    if let Some(name) = declarator.child_by_field_name("name") {
        return Some(node_text(name, source));
    }
    let mut cursor = declarator.walk();
    let name = declarator
        .children(&mut cursor)
        .find(|c| c.kind() == "identifier")
        .map(|c| node_text(c, source));
    name
}

fn collect_field_names(field: Node<'_>, source: &str, out: &mut BTreeSet<String>) {
    let mut cursor = field.walk();
    for child in field.children(&mut cursor) {
        if child.kind() != "variable_declaration" {
            continue;
        }
        let mut decl_cursor = child.walk();
        for declarator in child.children(&mut decl_cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name) = declarator_name(declarator, source) {
                out.insert(name.to_string());
            }
        }
    }
}

fn walk_fields(node: Node<'_>, source: &str, out: &mut BTreeSet<String>) {
    if node.kind() == "field_declaration" && is_instance_field(node, source) {
        collect_field_names(node, source, out);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_fields(child, source, out);
    }
}

/// Instance field names declared inside the first type of `source`.
/// Errors when the grammar cannot load or the source contains syntax errors.
pub fn find_field_names(path: &Path, source: &str) -> Result<BTreeSet<String>> {
    let parse_error = |message: &str| AnalyzerError::Parse {
        path: path.to_path_buf(),
        message: message.to_string(),
    };
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_c_sharp::LANGUAGE.into())
        .map_err(|e| parse_error(&e.to_string()))?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| parse_error("parser returned no tree"))?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(parse_error("syntax error"));
    }
    let mut names = BTreeSet::new();
    if let Some(decl) = find_type_declaration(root) {
        walk_fields(decl, source, &mut names);
    }
    Ok(names)
}

/// Field names of the script at `path`; empty (with a warning) when it cannot be read or parsed.
pub fn script_field_names(path: &Path) -> BTreeSet<String> {
    let result = read_file_normalized(path).and_then(|source| find_field_names(path, &source));
    match result {
        Ok(names) => names,
        Err(e) => {
            warn!("{}; its field references are treated as stale", e);
            BTreeSet::new()
        }
    }
}
