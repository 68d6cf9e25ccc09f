#![allow(dead_code)]

use mediation_form_server::form::{FieldValues, FormRenderer, RenderProfile};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One `w:tc` as read back from `word/document.xml`.
#[derive(Debug, Default, Clone)]
pub struct ParsedCell {
    pub span: usize,
    /// (side, val, sz, color)
    pub borders: Vec<(String, String, String, String)>,
    pub v_align: Option<String>,
    pub paragraphs: Vec<String>,
}

impl ParsedCell {
    /// Non-empty paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .filter(|p| !p.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParsedRow {
    /// (val, hRule)
    pub height: Option<(String, String)>,
    pub cells: Vec<ParsedCell>,
}

impl ParsedRow {
    pub fn spans(&self) -> Vec<usize> {
        self.cells.iter().map(|cell| cell.span).collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct ParsedDocument {
    /// Paragraphs outside the table.
    pub body_paragraphs: Vec<String>,
    pub grid: Vec<String>,
    pub rows: Vec<ParsedRow>,
    pub page_size: Option<(String, String)>,
    pub margins: Vec<(String, String)>,
}

fn attr(element: &BytesStart, name: &str) -> Option<String> {
    element
        .try_get_attribute(name)
        .ok()
        .flatten()
        .map(|a| a.unescape_value().unwrap().into_owned())
}

pub fn parse_document(xml: &str) -> ParsedDocument {
    let mut reader = Reader::from_str(xml);
    let mut doc = ParsedDocument::default();
    let mut in_cell = false;
    let mut in_borders = false;
    let mut in_text = false;
    let mut paragraph: Option<String> = None;

    loop {
        let event = reader.read_event().unwrap();
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = String::from_utf8(e.name().as_ref().to_vec()).unwrap();
                match name.as_str() {
                    "w:tr" => doc.rows.push(ParsedRow::default()),
                    "w:trHeight" => {
                        let row = doc.rows.last_mut().unwrap();
                        row.height = Some((
                            attr(e, "w:val").unwrap_or_default(),
                            attr(e, "w:hRule").unwrap_or_default(),
                        ));
                    }
                    "w:tc" => {
                        in_cell = true;
                        let row = doc.rows.last_mut().unwrap();
                        row.cells.push(ParsedCell {
                            span: 1,
                            ..ParsedCell::default()
                        });
                    }
                    "w:gridSpan" => {
                        let cell = doc.rows.last_mut().unwrap().cells.last_mut().unwrap();
                        cell.span = attr(e, "w:val").unwrap().parse().unwrap();
                    }
                    "w:tcBorders" => in_borders = !is_empty,
                    "w:top" | "w:left" | "w:bottom" | "w:right" if in_borders => {
                        let cell = doc.rows.last_mut().unwrap().cells.last_mut().unwrap();
                        cell.borders.push((
                            name.trim_start_matches("w:").to_string(),
                            attr(e, "w:val").unwrap_or_default(),
                            attr(e, "w:sz").unwrap_or_default(),
                            attr(e, "w:color").unwrap_or_default(),
                        ));
                    }
                    "w:vAlign" => {
                        let cell = doc.rows.last_mut().unwrap().cells.last_mut().unwrap();
                        cell.v_align = attr(e, "w:val");
                    }
                    "w:p" => {
                        if is_empty {
                            push_paragraph(&mut doc, in_cell, String::new());
                        } else {
                            paragraph = Some(String::new());
                        }
                    }
                    "w:br" => {
                        if let Some(p) = paragraph.as_mut() {
                            p.push('\n');
                        }
                    }
                    "w:t" => in_text = !is_empty,
                    "w:gridCol" => doc.grid.push(attr(e, "w:w").unwrap_or_default()),
                    "w:pgSz" => {
                        doc.page_size = Some((
                            attr(e, "w:w").unwrap_or_default(),
                            attr(e, "w:h").unwrap_or_default(),
                        ));
                    }
                    "w:pgMar" => {
                        for side in ["w:top", "w:right", "w:bottom", "w:left"] {
                            doc.margins
                                .push((side.to_string(), attr(e, side).unwrap_or_default()));
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref t) => {
                if in_text {
                    if let Some(p) = paragraph.as_mut() {
                        p.push_str(&t.unescape().unwrap());
                    }
                }
            }
            Event::End(ref e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(p) = paragraph.take() {
                        push_paragraph(&mut doc, in_cell, p);
                    }
                }
                b"w:t" => in_text = false,
                b"w:tc" => in_cell = false,
                b"w:tcBorders" => in_borders = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    doc
}

fn push_paragraph(doc: &mut ParsedDocument, in_cell: bool, text: String) {
    if in_cell {
        let cell = doc.rows.last_mut().unwrap().cells.last_mut().unwrap();
        cell.paragraphs.push(text);
    } else {
        doc.body_paragraphs.push(text);
    }
}

/// Read one part of a .docx archive as a string.
pub fn read_part(path: &Path, part: &str) -> String {
    let file = File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name(part).unwrap();
    let mut contents = String::new();
    entry.read_to_string(&mut contents).unwrap();
    contents
}

pub fn part_names(path: &Path) -> Vec<String> {
    let file = File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(String::from).collect()
}

/// Render Form 'A' with the replica profile into a fresh temp directory.
pub fn render_to_temp(fields: &FieldValues) -> (TempDir, PathBuf) {
    render_with_profile(fields, RenderProfile::replica())
}

pub fn render_with_profile(fields: &FieldValues, profile: RenderProfile) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Form_A_Mediation_Replica.docx");
    FormRenderer::form_a(profile)
        .unwrap()
        .render(fields, &path)
        .unwrap();
    (dir, path)
}

pub fn parsed(path: &Path) -> ParsedDocument {
    parse_document(&read_part(path, "word/document.xml"))
}

pub fn sample_fields() -> FieldValues {
    FieldValues::with_defaults()
        .with("client_name", "Acme Corp")
        .with("branch_address", "123 Main St")
        .with("mobile", "9998887777")
        .with("customer_name", "Beta LLC")
        .with("address1", "456 Side Rd")
}
