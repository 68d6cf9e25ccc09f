//! In-memory document tree.
//!
//! The renderer builds a `Document` from the form definition and field
//! values; the docx writer serializes it. Table rows start with one cell per
//! grid column and are merged in place, so a `Row` always reflects the
//! post-merge cell topology.

use super::definition::{Alignment, PageGeometry, Rgb, RowHeight, Spacing, VerticalAlign};
use super::units::{FontSize, Length};
use super::FormError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Single,
}

impl BorderStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
        }
    }
}

/// One side of a cell border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    /// Line width in eighths of a point.
    pub size: u32,
    pub space: u32,
    /// `None` is the automatic (black) colour.
    pub color: Option<Rgb>,
}

impl Border {
    /// Single, thin (half point), automatic colour.
    pub fn single() -> Self {
        Self {
            style: BorderStyle::Single,
            size: 4,
            space: 0,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
}

impl CellBorders {
    pub fn all(border: Border) -> Self {
        Self {
            top: Some(border),
            left: Some(border),
            bottom: Some(border),
            right: Some(border),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.top.is_some() && self.left.is_some() && self.bottom.is_some() && self.right.is_some()
    }

    /// Sides in the order WordprocessingML expects them.
    pub fn sides(&self) -> [(&'static str, Option<Border>); 4] {
        [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
    /// `None` inherits the document body size.
    pub size: Option<FontSize>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            underline: false,
            color: None,
            size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub align: Option<Alignment>,
    pub spacing: Option<Spacing>,
    pub single_line: bool,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|run| run.text.is_empty())
    }
}

/// A leaf or merged table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// First grid column covered.
    pub grid_start: usize,
    pub span: usize,
    pub width: Length,
    pub vertical_align: Option<VerticalAlign>,
    pub borders: CellBorders,
    pub paragraphs: Vec<Paragraph>,
}

impl Cell {
    fn new(grid_start: usize, width: Length) -> Self {
        Self {
            grid_start,
            span: 1,
            width,
            vertical_align: None,
            borders: CellBorders::default(),
            paragraphs: vec![Paragraph::empty()],
        }
    }

    pub fn grid_end(&self) -> usize {
        self.grid_start + self.span - 1
    }

    pub fn covers(&self, column: usize) -> bool {
        column >= self.grid_start && column <= self.grid_end()
    }

    /// Remove all text, leaving the single empty paragraph a cell requires.
    pub fn clear(&mut self) {
        self.paragraphs = vec![Paragraph::empty()];
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Replace the cell's paragraphs outright.
    pub fn set_paragraphs(&mut self, paragraphs: Vec<Paragraph>) {
        self.paragraphs = if paragraphs.is_empty() {
            vec![Paragraph::empty()]
        } else {
            paragraphs
        };
    }

    pub fn set_all_borders(&mut self, border: Border) {
        self.borders = CellBorders::all(border);
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub height: RowHeight,
    pub cells: Vec<Cell>,
}

impl Row {
    /// Collapse grid columns `first..=last` into the cell at `first`.
    pub fn merge(&mut self, first: usize, last: usize) -> Result<&mut Cell, FormError> {
        let columns = self.cells.last().map(|cell| cell.grid_end() + 1).unwrap_or(0);
        if first > last || last >= columns {
            return Err(FormError::InvalidMerge {
                first,
                last,
                columns,
            });
        }

        let start = self.position_of(first)?;
        let end = self.position_of(last)?;

        let absorbed: Vec<Cell> = self.cells.drain(start + 1..=end).collect();
        let target = &mut self.cells[start];
        for cell in absorbed {
            target.span += cell.span;
            target.width = target.width + cell.width;
            target
                .paragraphs
                .extend(cell.paragraphs.into_iter().filter(|p| !p.is_empty()));
        }
        Ok(target)
    }

    /// The cell covering grid column `column`.
    pub fn cell_mut(&mut self, column: usize) -> Result<&mut Cell, FormError> {
        let index = self.position_of(column)?;
        Ok(&mut self.cells[index])
    }

    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.covers(column))
    }

    fn position_of(&self, column: usize) -> Result<usize, FormError> {
        self.cells
            .iter()
            .position(|cell| cell.covers(column))
            .ok_or(FormError::ColumnOutOfRange(column))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub style: String,
    pub align: Alignment,
    pub columns: Vec<Length>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<Length>) -> Self {
        Self {
            style: "TableGrid".to_string(),
            align: Alignment::Center,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> Length {
        self.columns.iter().copied().sum()
    }

    /// Append a row with one unmerged cell per grid column.
    pub fn add_row(&mut self, height: RowHeight) -> &mut Row {
        let cells = self
            .columns
            .iter()
            .enumerate()
            .map(|(column, width)| Cell::new(column, *width))
            .collect();
        self.rows.push(Row { height, cells });
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Every cell of every row, in document order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }
}

/// A laid-out document ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageGeometry,
    pub font: String,
    pub body_size: FontSize,
    /// Paragraphs above the table.
    pub header: Vec<Paragraph>,
    pub table: Table,
}
