//! Raw mapping lists: one JSON array per mapping.
//!
//! Some stage-2 transformers report their map as a list of tuples instead of
//! an encoded source map:
//!
//! ```text
//! [generatedLine, generatedColumn]
//! [generatedLine, generatedColumn, originalLine, originalColumn]
//! [generatedLine, generatedColumn, originalLine, originalColumn, name]
//! ```
//!
//! Consumers distinguish the shapes by length, so the width of every tuple is
//! significant and survives a decode/encode cycle.

use retrace_common::Position;
use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One entry of a raw mapping list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawMapping {
    /// Position in the generated code.
    pub generated: Position,
    /// Position in the code the generated code came from, if any.
    pub original: Option<Position>,
    /// Symbol name; only meaningful when `original` is present.
    pub name: Option<String>,
}

impl RawMapping {
    /// A mapping with no original position (synthetic output).
    pub fn generated_only(generated: Position) -> Self {
        Self {
            generated,
            original: None,
            name: None,
        }
    }

    /// A mapping from `generated` back to `original`.
    pub fn new(generated: Position, original: Position) -> Self {
        Self {
            generated,
            original: Some(original),
            name: None,
        }
    }

    /// Attaches a symbol name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the number of elements this mapping encodes to.
    pub fn width(&self) -> usize {
        match (&self.original, &self.name) {
            (None, _) => 2,
            (Some(_), None) => 4,
            (Some(_), Some(_)) => 5,
        }
    }
}

impl Serialize for RawMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.width()))?;
        seq.serialize_element(&self.generated.line)?;
        seq.serialize_element(&self.generated.column)?;
        if let Some(original) = self.original {
            seq.serialize_element(&original.line)?;
            seq.serialize_element(&original.column)?;
            if let Some(name) = &self.name {
                seq.serialize_element(name)?;
            }
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for RawMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(RawMappingVisitor)
    }
}

struct RawMappingVisitor;

impl<'de> Visitor<'de> for RawMappingVisitor {
    type Value = RawMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an array of 2, 4 or 5 mapping elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<RawMapping, A::Error> {
        let line: u32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        let column: u32 = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(1, &self))?;
        let generated = Position::new(line, column);

        let Some(original_line) = seq.next_element::<Option<u32>>()? else {
            return Ok(RawMapping::generated_only(generated));
        };
        let original_column: Option<u32> = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(3, &self))?;

        // A non-string name slot (e.g. `null`) counts as no name.
        let name = seq
            .next_element::<Option<serde_json::Value>>()?
            .flatten()
            .and_then(|v| v.as_str().map(str::to_owned));

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(6, &self));
        }

        // `null` in either original slot leaves the mapping without an origin.
        let (Some(original_line), Some(original_column)) = (original_line, original_column) else {
            return Ok(RawMapping::generated_only(generated));
        };
        Ok(RawMapping {
            generated,
            original: Some(Position::new(original_line, original_column)),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_original_slots_decode_as_generated_only() {
        let list: Vec<RawMapping> =
            serde_json::from_str(r#"[[1, 0, null, null], [2, 3, null, null, "x"], [3, 0, 4, null]]"#)
                .unwrap();
        assert_eq!(list[0], RawMapping::generated_only(Position::new(1, 0)));
        assert_eq!(list[1], RawMapping::generated_only(Position::new(2, 3)));
        assert_eq!(list[2], RawMapping::generated_only(Position::new(3, 0)));
        assert_eq!(serde_json::to_value(&list[0]).unwrap(), serde_json::json!([1, 0]));
    }

    #[test]
    fn decode_all_widths() {
        let list: Vec<RawMapping> =
            serde_json::from_str(r#"[[1, 0], [1, 4, 2, 6], [2, 0, 3, 1, "render"]]"#).unwrap();
        assert_eq!(list[0], RawMapping::generated_only(Position::new(1, 0)));
        assert_eq!(
            list[1],
            RawMapping::new(Position::new(1, 4), Position::new(2, 6))
        );
        assert_eq!(list[2].name.as_deref(), Some("render"));
        assert_eq!(
            list.iter().map(RawMapping::width).collect::<Vec<_>>(),
            vec![2, 4, 5]
        );
    }

    #[test]
    fn encode_preserves_width() {
        let list = vec![
            RawMapping::new(Position::new(3, 2), Position::new(5, 0)),
            RawMapping::new(Position::new(3, 9), Position::new(5, 7)).named("props"),
        ];
        let json = serde_json::to_string(&list).unwrap();
        assert_eq!(json, r#"[[3,2,5,0],[3,9,5,7,"props"]]"#);
    }

    #[test]
    fn null_name_decodes_as_unnamed() {
        let m: RawMapping = serde_json::from_str("[1, 0, 1, 0, null]").unwrap();
        assert!(m.name.is_none());
        assert_eq!(m.width(), 4);
        assert_eq!(serde_json::to_string(&m).unwrap(), "[1,0,1,0]");
    }

    #[test]
    fn three_elements_rejected() {
        assert!(serde_json::from_str::<RawMapping>("[1, 0, 2]").is_err());
    }

    #[test]
    fn six_elements_rejected() {
        assert!(serde_json::from_str::<RawMapping>(r#"[1, 0, 2, 0, "a", 9]"#).is_err());
    }
}
