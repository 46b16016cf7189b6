//! Render a scene's transform tree as an indented list of object names.

use std::collections::HashSet;

use log::warn;

use super::constants::INDENT_MARKER;
use super::models::SceneGraph;

/// Root transforms in output order: the `SceneRoots` list when the scene has one,
/// otherwise every parentless transform in document order.
pub fn root_ids(graph: &SceneGraph) -> Vec<String> {
    match &graph.root_list {
        Some(roots) => roots.clone(),
        None => graph
            .transform_order
            .iter()
            .filter(|id| {
                graph
                    .transforms
                    .get(id.as_str())
                    .is_some_and(|t| t.parent_id.is_none())
            })
            .cloned()
            .collect(),
    }
}

fn indent(depth: usize) -> String {
    INDENT_MARKER.repeat(depth * 2)
}

/// Pre-order dump lines. A transform that is missing, or whose object is missing,
/// ends its branch without output. Each transform is visited at most once.
pub fn hierarchy_lines(graph: &SceneGraph) -> Vec<String> {
    let mut lines = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let roots = root_ids(graph);
    let mut stack: Vec<(&str, usize)> = roots.iter().rev().map(|id| (id.as_str(), 0)).collect();

    while let Some((id, depth)) = stack.pop() {
        let Some(transform) = graph.transforms.get(id) else {
            continue;
        };
        if !visited.insert(transform.id.as_str()) {
            warn!("transform &{} reached twice; cycle or shared child skipped", id);
            continue;
        }
        let Some(object) = graph.objects.get(&transform.owner_object_id) else {
            continue;
        };
        lines.push(format!("{}{}", indent(depth), object.name));
        for child in transform.child_ids.iter().rev() {
            stack.push((child.as_str(), depth + 1));
        }
    }
    lines
}

/// Dump file contents: one line per object, each newline-terminated.
pub fn render_dump(graph: &SceneGraph) -> String {
    let mut out = String::new();
    for line in hierarchy_lines(graph) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}
