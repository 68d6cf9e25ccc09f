//! Form module - builds the Form 'A' mediation application as a .docx file.
//!
//! - `definition` - the static layout of the form (headers, rows, merges)
//! - `fields` - placeholder values and their substitution
//! - `profile` - per-revision layout values (margins, alignment, spacing)
//! - `layout` - the in-memory table grid the renderer fills
//! - `docx` - WordprocessingML serialization
//! - `renderer` - ties the above together and writes the file

pub mod definition;
pub mod docx;
pub mod fields;
pub mod layout;
pub mod profile;
pub mod renderer;
pub mod traits;
pub mod units;

pub use definition::FormDefinition;
pub use fields::FieldValues;
pub use profile::{ProfileName, RenderProfile};
pub use renderer::{FormGenerator, FormRenderer};
pub use traits::Generator;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while laying out or writing the form.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form table must declare 3 columns, found {0}")]
    ColumnCount(usize),
    #[error("row {row} has a cell spanning zero columns")]
    EmptySpan { row: usize },
    #[error("row {row} covers {covered} columns, expected 3")]
    RowWidth { row: usize, covered: usize },
    #[error("cannot merge columns {first}..={last} in a row of {columns} columns")]
    InvalidMerge {
        first: usize,
        last: usize,
        columns: usize,
    },
    #[error("no cell covers column {0}")]
    ColumnOutOfRange(usize),
    #[error("failed to serialize document XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to build document archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("failed to create {}: {source}", .path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write document: {0}")]
    WriteOutput(#[source] std::io::Error),
}

/// Result of a successful render.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub path: PathBuf,
    /// Archive size in bytes.
    pub size: u64,
    /// Number of table rows written.
    pub rows: usize,
}
