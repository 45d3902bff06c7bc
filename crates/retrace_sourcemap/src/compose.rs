//! Composition of the stage-2 map with the stage-1 map.
//!
//! The generated side of every stage-2 mapping is copied verbatim; only the
//! original side is rewritten through a [`Translator`] over stage 1's map.
//! Mappings whose intermediate position does not translate are dropped.

use crate::error::SourceMapError;
use crate::lookup::Translator;
use crate::raw::RawMapping;
use retrace_common::Position;
use serde_json::Value;
use sourcemap::{SourceMap, SourceMapBuilder};
use tracing::debug;

/// A map reported by a stage-2 transformer, in either of its two shapes.
#[derive(Clone, Debug)]
pub enum OutputMap {
    /// A list of mapping tuples with no lookup capability.
    Raw(Vec<RawMapping>),
    /// A structured, encodable source map.
    Structured(SourceMap),
}

impl OutputMap {
    /// Decodes a map from JSON: an array is a raw list, an object a structured map.
    pub fn from_json(value: Value) -> Result<Self, SourceMapError> {
        match value {
            Value::Array(_) => Ok(OutputMap::Raw(serde_json::from_value(value)?)),
            Value::Object(_) => {
                let encoded = serde_json::to_vec(&value)?;
                Ok(OutputMap::Structured(SourceMap::from_slice(&encoded)?))
            }
            other => Err(SourceMapError::UnsupportedShape {
                found: json_type(&other),
            }),
        }
    }

    /// Encodes the map as JSON in its own shape.
    pub fn to_json(&self) -> Result<Value, SourceMapError> {
        match self {
            OutputMap::Raw(mappings) => Ok(serde_json::to_value(mappings)?),
            OutputMap::Structured(map) => {
                let mut encoded = Vec::new();
                map.to_writer(&mut encoded)?;
                Ok(serde_json::from_slice(&encoded)?)
            }
        }
    }

    /// Builds a point-lookup index over this map.
    pub fn translator(&self) -> Translator {
        match self {
            OutputMap::Raw(mappings) => Translator::from_raw(mappings),
            OutputMap::Structured(map) => Translator::new(map),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The single author-written file a composed map points back to.
#[derive(Clone, Copy, Debug)]
pub struct OriginalSource<'a> {
    /// The file name recorded as the composed map's only source.
    pub file_name: &'a str,
    /// The file's text, embedded as the source's content.
    pub text: &'a str,
}

/// Composes a stage-2 map of either shape with stage 1's translator.
///
/// The result keeps the stage-2 shape: raw lists stay raw lists, structured
/// maps stay structured.
pub fn compose(stage1: &Translator, stage2: &OutputMap, original: OriginalSource<'_>) -> OutputMap {
    match stage2 {
        OutputMap::Raw(mappings) => OutputMap::Raw(compose_raw(stage1, mappings)),
        OutputMap::Structured(map) => OutputMap::Structured(compose_structured(stage1, map, original)),
    }
}

/// Rewrites a raw mapping list through stage 1.
///
/// Each surviving tuple keeps its width: named entries stay 5-tuples and
/// unnamed ones 4-tuples. Entries without an original position, or whose
/// original position does not translate, are omitted.
pub fn compose_raw(stage1: &Translator, stage2: &[RawMapping]) -> Vec<RawMapping> {
    let composed: Vec<RawMapping> = stage2
        .iter()
        .filter_map(|mapping| {
            let resolved = stage1.original_position_for(mapping.original?)?;
            Some(RawMapping {
                generated: mapping.generated,
                original: Some(resolved),
                name: mapping.name.clone(),
            })
        })
        .collect();
    debug!(
        kept = composed.len(),
        dropped = stage2.len() - composed.len(),
        "composed raw mapping list"
    );
    composed
}

/// Builds a new structured map from final code straight to the original file.
///
/// Every mapping names `original.file_name` as its source, and the map embeds
/// `original.text` as that source's content.
pub fn compose_structured(
    stage1: &Translator,
    stage2: &SourceMap,
    original: OriginalSource<'_>,
) -> SourceMap {
    let mut builder = SourceMapBuilder::new(None);
    let src_id = builder.add_source(original.file_name);
    builder.set_source_contents(src_id, Some(original.text));

    let mut kept = 0usize;
    let mut dropped = 0usize;
    for token in stage2.tokens() {
        if token.get_source().is_none() {
            dropped += 1;
            continue;
        }
        let intermediate = Position::from_zero_based(token.get_src_line(), token.get_src_col());
        let Some(resolved) = stage1.original_position_for(intermediate) else {
            dropped += 1;
            continue;
        };
        let (src_line, src_col) = resolved.to_zero_based();
        builder.add(
            token.get_dst_line(),
            token.get_dst_col(),
            src_line,
            src_col,
            Some(original.file_name),
            token.get_name(),
            false,
        );
        kept += 1;
    }
    debug!(kept, dropped, "composed structured map");
    builder.into_sourcemap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pos(line: u32, column: u32) -> Position {
        Position::new(line, column)
    }

    /// Stage 1: intermediate (1,0) <- original (3,0); intermediate (2,4) <- original (5,6).
    fn stage1() -> Translator {
        Translator::from_raw(&[
            RawMapping::new(pos(1, 0), pos(3, 0)),
            RawMapping::new(pos(2, 4), pos(5, 6)),
        ])
    }

    const ORIGINAL: OriginalSource<'static> = OriginalSource {
        file_name: "App.tsx",
        text: "// header\n\nconst a = 1;\n\nlet   b: string = '';\n",
    };

    #[test]
    fn raw_rewrites_original_side_only() {
        let stage2 = vec![
            RawMapping::new(pos(10, 2), pos(1, 0)),
            RawMapping::new(pos(11, 0), pos(2, 9)).named("b"),
        ];
        let composed = compose_raw(&stage1(), &stage2);
        assert_eq!(
            composed,
            vec![
                RawMapping::new(pos(10, 2), pos(3, 0)),
                RawMapping::new(pos(11, 0), pos(5, 6)).named("b"),
            ]
        );
    }

    #[test]
    fn raw_preserves_tuple_width() {
        let stage2 = vec![
            RawMapping::new(pos(1, 0), pos(1, 0)),
            RawMapping::new(pos(1, 3), pos(1, 2)).named("x"),
        ];
        let composed = compose_raw(&stage1(), &stage2);
        let widths: Vec<usize> = composed.iter().map(RawMapping::width).collect();
        assert_eq!(widths, vec![4, 5]);
        assert_eq!(
            serde_json::to_value(&composed).unwrap(),
            json!([[1, 0, 3, 0], [1, 3, 3, 0, "x"]])
        );
    }

    #[test]
    fn raw_drops_unresolved_and_generated_only() {
        let stage2 = vec![
            RawMapping::generated_only(pos(1, 0)),
            RawMapping::new(pos(1, 5), pos(7, 0)),
            RawMapping::new(pos(2, 0), pos(2, 1)),
            RawMapping::new(pos(3, 0), pos(2, 4)),
        ];
        let composed = compose_raw(&stage1(), &stage2);
        assert_eq!(composed, vec![RawMapping::new(pos(3, 0), pos(5, 6))]);
    }

    fn structured_stage2() -> SourceMap {
        let mut builder = SourceMapBuilder::new(Some("bundle.js"));
        // final (1,0) has no original
        builder.add(0, 0, 0, 0, None, None, false);
        // final (2,0) <- intermediate (1,0)
        builder.add(1, 0, 0, 0, Some("App.js"), None, false);
        // final (2,7) <- intermediate (2,4), named
        builder.add(1, 7, 1, 4, Some("App.js"), Some("b"), false);
        // final (3,0) <- intermediate (4,0): unmapped in stage 1
        builder.add(2, 0, 3, 0, Some("App.js"), None, false);
        builder.into_sourcemap()
    }

    #[test]
    fn structured_embeds_original_source() {
        let composed = compose_structured(&stage1(), &structured_stage2(), ORIGINAL);
        assert_eq!(composed.get_source_count(), 1);
        assert_eq!(composed.get_source(0), Some("App.tsx"));
        assert_eq!(composed.get_source_contents(0), Some(ORIGINAL.text));
    }

    #[test]
    fn structured_rewrites_and_drops() {
        let composed = compose_structured(&stage1(), &structured_stage2(), ORIGINAL);
        let tokens: Vec<_> = composed
            .tokens()
            .map(|t| {
                (
                    t.get_dst_line(),
                    t.get_dst_col(),
                    t.get_src_line(),
                    t.get_src_col(),
                    t.get_source().map(str::to_owned),
                    t.get_name().map(str::to_owned),
                )
            })
            .collect();
        assert_eq!(
            tokens,
            vec![
                (1, 0, 2, 0, Some("App.tsx".to_string()), None),
                (1, 7, 4, 6, Some("App.tsx".to_string()), Some("b".to_string())),
            ]
        );
    }

    #[test]
    fn composed_lookup_matches_manual_chain() {
        let s1 = stage1();
        let s2 = structured_stage2();
        let composed = Translator::new(&compose_structured(&s1, &s2, ORIGINAL));
        let s2_lookup = Translator::new(&s2);

        for query in [pos(2, 0), pos(2, 3), pos(2, 7), pos(2, 20)] {
            let chained = s2_lookup
                .original_position_for(query)
                .and_then(|p| s1.original_position_for(p));
            assert_eq!(composed.original_position_for(query), chained, "at {query}");
        }
    }

    #[test]
    fn compose_keeps_shape() {
        let raw = OutputMap::Raw(vec![RawMapping::new(pos(1, 0), pos(1, 0))]);
        assert!(matches!(compose(&stage1(), &raw, ORIGINAL), OutputMap::Raw(_)));

        let structured = OutputMap::Structured(structured_stage2());
        assert!(matches!(
            compose(&stage1(), &structured, ORIGINAL),
            OutputMap::Structured(_)
        ));
    }

    #[test]
    fn json_shape_dispatch() {
        let raw = OutputMap::from_json(json!([[1, 0, 1, 0]])).unwrap();
        assert!(matches!(raw, OutputMap::Raw(ref m) if m.len() == 1));

        let structured = OutputMap::Structured(structured_stage2()).to_json().unwrap();
        assert_eq!(structured["version"], json!(3));
        let back = OutputMap::from_json(structured).unwrap();
        assert_eq!(back.translator().original_position_for(pos(2, 7)), Some(pos(2, 4)));

        let err = OutputMap::from_json(json!("nope")).unwrap_err();
        assert!(matches!(err, SourceMapError::UnsupportedShape { found: "string" }));
    }
}
