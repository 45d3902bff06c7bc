//! Location-annotated syntax trees and in-tree location rewriting.
//!
//! Hosts that read positions from the tree itself, rather than from a
//! standalone map, get the stage-2 tree back with each node's `loc` moved
//! from intermediate coordinates to original coordinates.
//!
//! Trees are kept as JSON. Any object carrying a `loc` with `start` and `end`
//! points counts as a located node, wherever it sits: under `body`,
//! `declarations`, `expression` or any other key. Only the `line` and
//! `column` of each point are rewritten; every other key survives.

use crate::lookup::Translator;
use retrace_common::Position;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// The source range a node was produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// First position of the node.
    pub start: Position,
    /// Position just past the node.
    pub end: Position,
}

impl SourceLocation {
    /// Creates a location from its endpoints.
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Reads the `loc` of a JSON node, if it has a well-formed one.
    pub fn of(node: &Value) -> Option<Self> {
        let loc = node.get("loc")?;
        Some(Self {
            start: point(loc.get("start")?)?,
            end: point(loc.get("end")?)?,
        })
    }
}

fn point(value: &Value) -> Option<Position> {
    point_in(value.as_object()?)
}

fn point_in(p: &Map<String, Value>) -> Option<Position> {
    let line = u32::try_from(p.get("line")?.as_u64()?).ok()?;
    let column = u32::try_from(p.get("column")?.as_u64()?).ok()?;
    Some(Position::new(line, column))
}

/// A stage-2 output tree.
///
/// The tree is whatever JSON the transformer produced. Nodes are objects
/// with a `type` key; located nodes also carry `loc`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyntaxNode(Value);

impl SyntaxNode {
    /// Creates a node of the given type with no other fields.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind: String = kind.into();
        Self(json!({ "type": kind }))
    }

    /// The node's `type`, if it has one.
    pub fn kind(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// The node's location, if it has one.
    pub fn loc(&self) -> Option<SourceLocation> {
        SourceLocation::of(&self.0)
    }

    /// Looks up a field of the node.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The JSON behind this node.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Unwraps the JSON behind this node.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Sets a field, replacing any previous value.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            fields.insert(key.to_string(), value.into());
        }
        self
    }

    /// Sets the node's location.
    pub fn with_loc(self, start: Position, end: Position) -> Self {
        let loc = json!({
            "start": { "line": start.line, "column": start.column },
            "end": { "line": end.line, "column": end.column },
        });
        self.with_field("loc", loc)
    }

    /// Appends a child to the list under `key`, creating the list if needed.
    pub fn with_child(mut self, key: &str, child: SyntaxNode) -> Self {
        if let Value::Object(fields) = &mut self.0 {
            match fields
                .entry(key.to_string())
                .or_insert_with(|| Value::Array(Vec::new()))
            {
                Value::Array(items) => items.push(child.0),
                slot => *slot = Value::Array(vec![child.0]),
            }
        }
        self
    }

    /// Visits every node of the tree, parents before children and fields in
    /// key order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Value)) {
        walk_value(&self.0, visit);
    }
}

impl From<Value> for SyntaxNode {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn walk_value<'a>(value: &'a Value, visit: &mut impl FnMut(&'a Value)) {
    match value {
        Value::Object(fields) => {
            if fields.contains_key("type") {
                visit(value);
            }
            for (key, child) in fields {
                if key != "loc" {
                    walk_value(child, visit);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| walk_value(item, visit)),
        _ => {}
    }
}

/// Rewrites every node location from intermediate to original coordinates.
///
/// Start and end translate independently. An endpoint that does not
/// translate keeps its intermediate value, so a node can come back with a
/// rewritten start and an untouched end. Returns a new tree; the input is
/// consumed.
pub fn patch_locations(translator: &Translator, node: SyntaxNode) -> SyntaxNode {
    let mut value = node.0;
    patch_value(translator, &mut value);
    SyntaxNode(value)
}

fn patch_value(translator: &Translator, value: &mut Value) {
    match value {
        Value::Object(fields) => {
            if let Some(Value::Object(loc)) = fields.get_mut("loc") {
                for endpoint in ["start", "end"] {
                    if let Some(Value::Object(p)) = loc.get_mut(endpoint) {
                        patch_point(translator, p);
                    }
                }
            }
            for (key, child) in fields.iter_mut() {
                if key != "loc" {
                    patch_value(translator, child);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(|item| patch_value(translator, item)),
        _ => {}
    }
}

fn patch_point(translator: &Translator, p: &mut Map<String, Value>) {
    let Some(intermediate) = point_in(p) else {
        return;
    };
    if let Some(original) = translator.original_position_for(intermediate) {
        p.insert("line".to_string(), original.line.into());
        p.insert("column".to_string(), original.column.into());
    }
}
