//! Scene document model: split a `.unity` file into its documents and read the
//! `GameObject`, `Transform` and `SceneRoots` shapes out of them.
//!
//! A scene is a sequence of documents, each opened by a marker line such as
//! `--- !u!4 &1234` carrying the class id and the anchor id. The kind of a document
//! is decided by the top-level key of its body (`GameObject:`, `Transform:`, ...)
//! rather than by the class id, so unknown class ids never break the parse.
//! Only the subset of the YAML dialect Unity writes for these shapes is understood:
//! `key: scalar`, `key: {flow: map}`, `key: []` and block sequences of flow values.

use std::sync::OnceLock;

use log::{debug, trace, warn};
use regex::Regex;

use super::constants::{
    CHILDREN_FIELD, FILE_ID_KEY, NAME_FIELD, NULL_FILE_ID, OBJECT_KEY, OWNER_FIELD, PARENT_FIELD,
    ROOTS_FIELD, ROOT_LIST_KEY, TRANSFORM_KEYS, YAML_HEADER,
};
use super::models::{ObjectNode, SceneGraph, TransformNode};

/// `--- !u!<classID> &<anchor>` with an optional ` stripped` suffix.
static DOCUMENT_MARKER_RE: OnceLock<Regex> = OnceLock::new();

fn document_marker_re() -> &'static Regex {
    DOCUMENT_MARKER_RE.get_or_init(|| {
        Regex::new(r"(?m)^--- !u!(-?\d+) &(-?\d+)( stripped)?[ \t]*$").unwrap()
    })
}

/// One document of a scene file, still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument<'a> {
    pub class_id: &'a str,
    pub anchor: &'a str,
    pub stripped: bool,
    /// Text between the marker line and the next marker (or end of file).
    pub body: &'a str,
}

/// A parsed value of the body subset described in the module docs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    /// Inline `{a: b, c: d}` mapping, in declaration order.
    Map(Vec<(String, String)>),
    Seq(Vec<Value>),
    /// Nested block mapping; its contents are not needed by any shape.
    Block,
}

impl Value {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// `fileID` of an inline reference literal.
    pub fn file_id(&self) -> Option<&str> {
        match self {
            Value::Map(pairs) => pairs
                .iter()
                .find(|(k, _)| k == FILE_ID_KEY)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    pub fn items(&self) -> &[Value] {
        match self {
            Value::Seq(items) => items,
            _ => &[],
        }
    }
}

/// Body of a document: its top-level key and the properties beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentBody {
    pub kind_key: String,
    pub fields: Vec<(String, Value)>,
}

impl DocumentBody {
    /// First property named `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

/// Kind of a document, decided by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Object,
    Transform,
    RootList,
    Unknown,
}

pub fn classify(body: &DocumentBody) -> DocumentKind {
    let key = body.kind_key.as_str();
    if key == OBJECT_KEY {
        DocumentKind::Object
    } else if TRANSFORM_KEYS.contains(&key) {
        DocumentKind::Transform
    } else if key == ROOT_LIST_KEY {
        DocumentKind::RootList
    } else {
        DocumentKind::Unknown
    }
}

/// Split scene text into documents. Text before the first marker (the `%YAML`/`%TAG` header) is dropped.
pub fn split_documents(source: &str) -> Vec<RawDocument<'_>> {
    let markers: Vec<_> = document_marker_re().captures_iter(source).collect();
    let mut docs = Vec::with_capacity(markers.len());
    for (i, cap) in markers.iter().enumerate() {
        let (Some(whole), Some(class_id), Some(anchor)) = (cap.get(0), cap.get(1), cap.get(2))
        else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(source.len());
        docs.push(RawDocument {
            class_id: class_id.as_str(),
            anchor: anchor.as_str(),
            stripped: cap.get(3).is_some(),
            body: &source[whole.end()..end],
        });
    }
    docs
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// Split `key: rest` at the first `:` that ends the key.
fn split_key(line: &str) -> Option<(&str, &str)> {
    let pos = line.find(':')?;
    let rest = &line[pos + 1..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some((line[..pos].trim(), rest.trim()))
}

fn unquote(text: &str) -> String {
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return text[1..text.len() - 1].replace("''", "'");
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        return text[1..text.len() - 1]
            .replace("\\\"", "\"")
            .replace("\\\\", "\\");
    }
    text.to_string()
}

fn parse_flow_map(inner: &str) -> Vec<(String, String)> {
    inner
        .split(',')
        .filter_map(|pair| split_key(pair.trim()))
        .map(|(k, v)| (k.to_string(), unquote(v)))
        .collect()
}

/// Parse a value written on the same line as its key, or after `- `.
pub fn parse_inline(text: &str) -> Value {
    let t = text.trim();
    if t.len() >= 2 && t.starts_with('{') && t.ends_with('}') {
        return Value::Map(parse_flow_map(&t[1..t.len() - 1]));
    }
    if t.len() >= 2 && t.starts_with('[') && t.ends_with(']') {
        let inner = t[1..t.len() - 1].trim();
        if inner.is_empty() {
            return Value::Seq(Vec::new());
        }
        // Only flat sequences occur in the shapes we read; split on top-level commas.
        let mut items = Vec::new();
        let mut depth = 0usize;
        let mut start = 0;
        for (i, c) in inner.char_indices() {
            match c {
                '{' | '[' => depth += 1,
                '}' | ']' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    items.push(parse_inline(&inner[start..i]));
                    start = i + 1;
                }
                _ => {}
            }
        }
        items.push(parse_inline(&inner[start..]));
        return Value::Seq(items);
    }
    Value::Scalar(unquote(t))
}

/// Key awaiting its block value on the following lines.
struct Pending {
    key: String,
    items: Vec<Value>,
    item_indent: Option<usize>,
    nested: bool,
}

impl Pending {
    fn finish(self) -> (String, Value) {
        let value = if !self.items.is_empty() || self.item_indent.is_some() {
            Value::Seq(self.items)
        } else if self.nested {
            Value::Block
        } else {
            Value::Scalar(String::new())
        };
        (self.key, value)
    }
}

/// Parse a document body. `None` when the body has no top-level key.
pub fn parse_body(text: &str) -> Option<DocumentBody> {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let first = lines.next()?;
    if indent_of(first) != 0 {
        return None;
    }
    let (kind_key, _) = split_key(first.trim_end())?;
    let mut body = DocumentBody {
        kind_key: kind_key.to_string(),
        fields: Vec::new(),
    };
    let mut prop_indent: Option<usize> = None;
    let mut pending: Option<Pending> = None;

    for line in lines {
        let indent = indent_of(line);
        let trimmed = line.trim();
        let pi = *prop_indent.get_or_insert(indent);
        let item = trimmed
            .strip_prefix("- ")
            .or_else(|| (trimmed == "-").then_some(""));

        if indent < pi {
            continue;
        }
        if let (Some(item), Some(p)) = (item, pending.as_mut()) {
            let accepts = match p.item_indent {
                Some(ii) => ii == indent,
                None => !p.nested,
            };
            if accepts {
                p.item_indent = Some(indent);
                p.items.push(parse_inline(item));
                continue;
            }
        }
        if indent == pi && item.is_none() {
            if let Some(p) = pending.take() {
                body.fields.push(p.finish());
            }
            let Some((key, rest)) = split_key(trimmed) else {
                continue;
            };
            if rest.is_empty() {
                pending = Some(Pending {
                    key: key.to_string(),
                    items: Vec::new(),
                    item_indent: None,
                    nested: false,
                });
            } else {
                body.fields.push((key.to_string(), parse_inline(rest)));
            }
            continue;
        }
        // Deeper continuation line: nested mapping or the inside of a sequence item.
        if let Some(p) = pending.as_mut() {
            if p.item_indent.is_none() {
                p.nested = true;
            }
        }
    }
    if let Some(p) = pending.take() {
        body.fields.push(p.finish());
    }
    Some(body)
}

fn file_ids(value: Option<&Value>) -> Vec<String> {
    value
        .map(|v| {
            v.items()
                .iter()
                .filter_map(Value::file_id)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_object(anchor: &str, body: &DocumentBody) -> Option<ObjectNode> {
    let name = body.get(NAME_FIELD)?.as_scalar()?;
    Some(ObjectNode {
        id: anchor.to_string(),
        name: name.to_string(),
    })
}

fn parse_transform(anchor: &str, body: &DocumentBody) -> TransformNode {
    let owner_object_id = body
        .get(OWNER_FIELD)
        .and_then(Value::file_id)
        .unwrap_or_default()
        .to_string();
    let parent_id = body
        .get(PARENT_FIELD)
        .and_then(Value::file_id)
        .filter(|id| *id != NULL_FILE_ID)
        .map(str::to_string);
    TransformNode {
        id: anchor.to_string(),
        owner_object_id,
        parent_id,
        child_ids: file_ids(body.get(CHILDREN_FIELD)),
    }
}

/// Build the object/transform/root maps of one scene's text.
pub fn parse_scene(source: &str) -> SceneGraph {
    let mut graph = SceneGraph::default();
    for doc in split_documents(source) {
        let Some(body) = parse_body(doc.body) else {
            debug!("document !u!{} &{} has no body", doc.class_id, doc.anchor);
            continue;
        };
        if doc.stripped {
            debug!("stripped document !u!{} &{} ({})", doc.class_id, doc.anchor, body.kind_key);
        }
        match classify(&body) {
            DocumentKind::Object => match parse_object(doc.anchor, &body) {
                Some(object) => {
                    graph.objects.insert(object.id.clone(), object);
                }
                None => debug!("GameObject &{} has no {}", doc.anchor, NAME_FIELD),
            },
            DocumentKind::Transform => {
                let transform = parse_transform(doc.anchor, &body);
                if graph.transforms.contains_key(&transform.id) {
                    warn!("duplicate transform anchor &{}", transform.id);
                } else {
                    graph.transform_order.push(transform.id.clone());
                }
                graph.transforms.insert(transform.id.clone(), transform);
            }
            DocumentKind::RootList => {
                let roots = file_ids(body.get(ROOTS_FIELD));
                graph.root_list.get_or_insert_with(Vec::new).extend(roots);
            }
            DocumentKind::Unknown => {
                trace!("skipping {} !u!{} &{}", body.kind_key, doc.class_id, doc.anchor);
            }
        }
    }
    graph
}

/// Text-serialized scenes start with the `%YAML` header; binary ones do not.
pub fn is_text_scene(text: &str) -> bool {
    text.starts_with(YAML_HEADER)
}
