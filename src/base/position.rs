//! Line/column positions and source locations.

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A span representing a range in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Where a node lives in source.
///
/// Library and synthetic entities have no syntax to point at; they report
/// [`Location::NonExistent`] instead of a zeroed span.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    File { path: SmolStr, span: Span },
    NonExistent,
}

impl Location {
    pub fn file(path: impl Into<SmolStr>, span: Span) -> Self {
        Location::File {
            path: path.into(),
            span,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Location::File { path, .. } => Some(path),
            Location::NonExistent => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Location::File { span, .. } => Some(*span),
            Location::NonExistent => None,
        }
    }
}

/// Index for converting byte offsets into line/column positions.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
        );
        Self { line_starts }
    }

    /// Convert a byte offset to a line/column position.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let column = offset - self.line_starts[line];
        Position::new(line as u32, column.into())
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }
}
