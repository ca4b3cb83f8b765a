//! Position resolution
//!
//! Turns byte offsets into (line, column) pairs. The printer only ever asks
//! for lines; columns are kept for callers that report positions.

use serde::{Deserialize, Serialize};

use crate::ast::types::{Pos, Position};

/// Resolves a source offset into a line and column.
pub trait PositionResolver {
    fn position(&self, pos: Pos) -> Position;
}

/// Line start table for one source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIndex {
    /// Offset of the first byte of every line; always starts with 0
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// Build from precomputed line starts. A missing leading 0 is added and
    /// the table is sorted, so any parser's bookkeeping is accepted.
    pub fn from_line_starts(mut line_starts: Vec<usize>) -> Self {
        line_starts.sort_unstable();
        line_starts.dedup();
        if line_starts.first() != Some(&0) {
            line_starts.insert(0, 0);
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Offset of a 1-based (line, column) pair. Lines past the end clamp to
    /// the last line.
    pub fn offset(&self, line: usize, column: usize) -> Pos {
        let idx = line.saturating_sub(1).min(self.line_starts.len().saturating_sub(1));
        let start = self.line_starts.get(idx).copied().unwrap_or(0);
        Pos(start + column.saturating_sub(1))
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self { line_starts: vec![0] }
    }
}

impl PositionResolver for LineIndex {
    fn position(&self, pos: Pos) -> Position {
        let idx = match self.line_starts.binary_search(&pos.0) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        let start = self.line_starts.get(idx).copied().unwrap_or(0);
        Position {
            line: idx + 1,
            column: pos.0.saturating_sub(start) + 1,
            offset: pos.0,
        }
    }
}
