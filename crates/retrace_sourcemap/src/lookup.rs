//! Point lookup from intermediate positions back to original positions.

use crate::error::SourceMapError;
use crate::raw::RawMapping;
use retrace_common::Position;
use sourcemap::SourceMap;

/// One mapping, reduced to what a lookup needs.
#[derive(Clone, Copy, Debug)]
struct Entry {
    generated: Position,
    original: Option<Position>,
}

/// A point-lookup index over the stage-1 map.
///
/// Lookups only run one way: from a position in the map's generated
/// (intermediate) code to the original code. A lookup picks the mapping with
/// the greatest generated position at or before the query on the same line;
/// a query before the first mapping of its line, or landing on a mapping with
/// no original position, is unresolved.
#[derive(Clone, Debug, Default)]
pub struct Translator {
    /// Sorted by generated position; stable, so ties keep map order.
    entries: Vec<Entry>,
}

impl Translator {
    /// Indexes a decoded structured map.
    pub fn new(map: &SourceMap) -> Self {
        let entries = map
            .tokens()
            .map(|token| Entry {
                generated: Position::from_zero_based(token.get_dst_line(), token.get_dst_col()),
                original: token
                    .get_source()
                    .map(|_| Position::from_zero_based(token.get_src_line(), token.get_src_col())),
            })
            .collect();
        Self::from_entries(entries)
    }

    /// Decodes and indexes a map from its JSON text.
    pub fn parse(map_text: &str) -> Result<Self, SourceMapError> {
        let map = SourceMap::from_slice(map_text.as_bytes())?;
        Ok(Self::new(&map))
    }

    /// Indexes a raw mapping list, which has no lookup of its own.
    pub fn from_raw(mappings: &[RawMapping]) -> Self {
        let entries = mappings
            .iter()
            .map(|m| Entry {
                generated: m.generated,
                original: m.original,
            })
            .collect();
        Self::from_entries(entries)
    }

    fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.sort_by_key(|e| e.generated);
        Self { entries }
    }

    /// Returns the original position for a generated position, or `None` when
    /// the map has no mapping covering it.
    pub fn original_position_for(&self, generated: Position) -> Option<Position> {
        let upper = self.entries.partition_point(|e| e.generated <= generated);
        let mut found = upper.checked_sub(1)?;
        let key = self.entries[found].generated;
        if key.line != generated.line {
            return None;
        }
        while found > 0 && self.entries[found - 1].generated == key {
            found -= 1;
        }
        self.entries[found].original
    }

    /// Returns the number of indexed mappings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map had no mappings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<&SourceMap> for Translator {
    fn from(map: &SourceMap) -> Self {
        Self::new(map)
    }
}
