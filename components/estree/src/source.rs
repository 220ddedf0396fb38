//! Source position types attached to AST nodes.
//!
//! Position recording is opt-in: a parse configured without `ranges` or
//! `loc` produces nodes whose [`NodePos`] is entirely empty, and the
//! serializer emits nothing for it.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A line/column pair, 1-indexed line and 0-indexed column as in ESTree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number, starting at 1
    pub line: u32,
    /// Column number, starting at 0
    pub column: u32,
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("line", &self.line)?;
        map.serialize_entry("column", &self.column)?;
        map.end()
    }
}

/// Start/end line-column range, optionally tagged with a source name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Location of the first character of the node
    pub start: Position,
    /// Location one past the last character of the node
    pub end: Position,
    /// Source name supplied via the `source` option, if any
    pub source: Option<String>,
}

impl Serialize for SourceLocation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(src) = &self.source {
            map.serialize_entry("source", src)?;
        }
        map.serialize_entry("start", &self.start)?;
        map.serialize_entry("end", &self.end)?;
        map.end()
    }
}

/// Optional position attachment carried by every node.
///
/// `start`/`end` are byte offsets into the source, present iff the parse
/// requested ranges; `loc` is present iff the parse requested locations.
/// Both default to absent so synthesized nodes need no special handling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodePos {
    /// Start offset, present iff ranges were requested
    pub start: Option<u32>,
    /// End offset, present iff ranges were requested
    pub end: Option<u32>,
    /// Line/column range, present iff locations were requested
    pub loc: Option<SourceLocation>,
}

impl NodePos {
    /// True when no position information is attached.
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.loc.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(NodePos::default().is_empty());
    }

    #[test]
    fn test_position_serializes_line_column() {
        let pos = Position { line: 3, column: 7 };
        let json = serde_json::to_value(pos).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["column"], 7);
    }

    #[test]
    fn test_location_source_only_when_set() {
        let loc = SourceLocation {
            start: Position { line: 1, column: 0 },
            end: Position { line: 1, column: 1 },
            source: None,
        };
        let json = serde_json::to_value(&loc).unwrap();
        assert!(json.get("source").is_none());
    }
}
