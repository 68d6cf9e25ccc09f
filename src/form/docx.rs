//! WordprocessingML (.docx) serializer.
//!
//! Writes a laid-out `Document` as a minimal but complete OOXML package:
//! content types, package and document relationships, the main document
//! part, styles (including the "Table Grid" table style), settings and the
//! core/app property parts.

use chrono::{SecondsFormat, Utc};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::definition::{Alignment, RowHeight, VerticalAlign};
use super::layout::{Cell, Document, Paragraph, Row, Run, Table};
use super::FormError;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";

pub const DOCUMENT_PART: &str = "word/document.xml";
pub const STYLES_PART: &str = "word/styles.xml";

/// Single line spacing, in 240ths of a line.
const SINGLE_LINE: &str = "240";

/// Metadata stored in `docProps/core.xml`.
#[derive(Debug, Clone)]
pub struct DocumentProperties {
    pub title: String,
    pub creator: String,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: "Form A - Mediation Application".to_string(),
            creator: env!("CARGO_PKG_NAME").to_string(),
        }
    }
}

/// Serialize `document` to `destination`, truncating any existing file.
///
/// Returns the size of the written archive in bytes.
pub fn write_docx(
    document: &Document,
    properties: &DocumentProperties,
    destination: &Path,
) -> Result<u64, FormError> {
    let file = File::create(destination).map_err(|source| FormError::CreateOutput {
        path: destination.to_path_buf(),
        source,
    })?;

    let file = write_package(document, properties, file)?;
    let size = file.metadata().map_err(FormError::WriteOutput)?.len();
    Ok(size)
}

/// Serialize `document` into an in-memory archive.
pub fn to_bytes(document: &Document, properties: &DocumentProperties) -> Result<Vec<u8>, FormError> {
    let cursor = write_package(document, properties, std::io::Cursor::new(Vec::new()))?;
    Ok(cursor.into_inner())
}

fn write_package<W: Write + Seek>(
    document: &Document,
    properties: &DocumentProperties,
    sink: W,
) -> Result<W, FormError> {
    let parts: [(&str, Vec<u8>); 8] = [
        ("[Content_Types].xml", content_types()?),
        ("_rels/.rels", package_relationships()?),
        ("word/_rels/document.xml.rels", document_relationships()?),
        (DOCUMENT_PART, document_xml(document)?),
        (STYLES_PART, styles_xml(document)?),
        ("word/settings.xml", settings_xml()?),
        ("docProps/core.xml", core_properties(properties)?),
        ("docProps/app.xml", app_properties()?),
    ];

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(sink);
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(&bytes).map_err(FormError::WriteOutput)?;
    }
    Ok(zip.finish()?)
}

/// Thin wrapper over `quick_xml::Writer` for element-at-a-time output.
struct Xml {
    writer: Writer<Vec<u8>>,
}

impl Xml {
    fn new() -> Result<Self, FormError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), FormError> {
        let mut tag = BytesStart::new(name);
        tag.extend_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(tag))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), FormError> {
        let mut tag = BytesStart::new(name);
        tag.extend_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(tag))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), FormError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), FormError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// `<name attrs>text</name>`
    fn element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<(), FormError> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    fn finish(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}

fn content_types() -> Result<Vec<u8>, FormError> {
    let overrides = [
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];

    let mut xml = Xml::new()?;
    xml.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    for (part, content_type) in overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    xml.end("Types")?;
    Ok(xml.finish())
}

fn relationships(entries: &[(&str, &str, &str)]) -> Result<Vec<u8>, FormError> {
    let mut xml = Xml::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_RELS)])?;
    for &(id, kind, target) in entries {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", kind), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn package_relationships() -> Result<Vec<u8>, FormError> {
    relationships(&[
        ("rId1", REL_OFFICE_DOCUMENT, DOCUMENT_PART),
        ("rId2", REL_CORE, "docProps/core.xml"),
        ("rId3", REL_EXTENDED, "docProps/app.xml"),
    ])
}

fn document_relationships() -> Result<Vec<u8>, FormError> {
    relationships(&[
        ("rId1", REL_STYLES, "styles.xml"),
        ("rId2", REL_SETTINGS, "settings.xml"),
    ])
}

fn document_xml(document: &Document) -> Result<Vec<u8>, FormError> {
    let mut xml = Xml::new()?;
    xml.start("w:document", &[("xmlns:w", NS_W), ("xmlns:r", NS_R)])?;
    xml.start("w:body", &[])?;

    for paragraph in &document.header {
        write_paragraph(&mut xml, paragraph, &document.font)?;
    }
    write_table(&mut xml, &document.table, &document.font)?;

    // A table may not be the last body element.
    xml.empty("w:p", &[])?;
    write_section(&mut xml, document)?;

    xml.end("w:body")?;
    xml.end("w:document")?;
    Ok(xml.finish())
}

fn write_section(xml: &mut Xml, document: &Document) -> Result<(), FormError> {
    let page = &document.page;
    let width = page.width.twips().to_string();
    let height = page.height.twips().to_string();
    let top = page.margins.top.twips().to_string();
    let right = page.margins.right.twips().to_string();
    let bottom = page.margins.bottom.twips().to_string();
    let left = page.margins.left.twips().to_string();

    xml.start("w:sectPr", &[])?;
    xml.empty("w:pgSz", &[("w:w", width.as_str()), ("w:h", height.as_str())])?;
    xml.empty(
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    xml.end("w:sectPr")
}

fn alignment_value(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => "left",
        Alignment::Center => "center",
    }
}

fn vertical_value(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Center => "center",
    }
}

fn write_paragraph(xml: &mut Xml, paragraph: &Paragraph, font: &str) -> Result<(), FormError> {
    let has_properties = paragraph.spacing.is_some() || paragraph.align.is_some();
    if !has_properties && paragraph.runs.is_empty() {
        return xml.empty("w:p", &[]);
    }

    xml.start("w:p", &[])?;
    if has_properties {
        xml.start("w:pPr", &[])?;
        if let Some(spacing) = paragraph.spacing {
            let before = spacing.before.twips().to_string();
            let after = spacing.after.twips().to_string();
            if paragraph.single_line {
                xml.empty(
                    "w:spacing",
                    &[
                        ("w:before", before.as_str()),
                        ("w:after", after.as_str()),
                        ("w:line", SINGLE_LINE),
                        ("w:lineRule", "auto"),
                    ],
                )?;
            } else {
                xml.empty(
                    "w:spacing",
                    &[("w:before", before.as_str()), ("w:after", after.as_str())],
                )?;
            }
        }
        if let Some(align) = paragraph.align {
            xml.empty("w:jc", &[("w:val", alignment_value(align))])?;
        }
        xml.end("w:pPr")?;
    }
    for run in &paragraph.runs {
        write_run(xml, run, font)?;
    }
    xml.end("w:p")
}

fn write_run(xml: &mut Xml, run: &Run, font: &str) -> Result<(), FormError> {
    xml.start("w:r", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:eastAsia", font),
            ("w:cs", font),
        ],
    )?;
    if run.bold {
        xml.empty("w:b", &[])?;
    }
    if let Some(color) = run.color {
        xml.empty("w:color", &[("w:val", color.hex().as_str())])?;
    }
    if let Some(size) = run.size {
        let half_points = size.half_points().to_string();
        xml.empty("w:sz", &[("w:val", half_points.as_str())])?;
        xml.empty("w:szCs", &[("w:val", half_points.as_str())])?;
    }
    if run.underline {
        xml.empty("w:u", &[("w:val", "single")])?;
    }
    xml.end("w:rPr")?;

    for (index, line) in run.text.split('\n').enumerate() {
        if index > 0 {
            xml.empty("w:br", &[])?;
        }
        xml.element("w:t", &[("xml:space", "preserve")], line)?;
    }
    xml.end("w:r")
}

fn write_table(xml: &mut Xml, table: &Table, font: &str) -> Result<(), FormError> {
    let width = table.width().twips().to_string();

    xml.start("w:tbl", &[])?;
    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblStyle", &[("w:val", table.style.as_str())])?;
    xml.empty("w:tblW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
    xml.empty("w:jc", &[("w:val", alignment_value(table.align))])?;
    xml.empty("w:tblLayout", &[("w:type", "fixed")])?;
    xml.empty(
        "w:tblLook",
        &[
            ("w:val", "04A0"),
            ("w:firstRow", "1"),
            ("w:lastRow", "0"),
            ("w:firstColumn", "1"),
            ("w:lastColumn", "0"),
            ("w:noHBand", "0"),
            ("w:noVBand", "1"),
        ],
    )?;
    xml.end("w:tblPr")?;

    xml.start("w:tblGrid", &[])?;
    for column in &table.columns {
        let twips = column.twips().to_string();
        xml.empty("w:gridCol", &[("w:w", twips.as_str())])?;
    }
    xml.end("w:tblGrid")?;

    for row in &table.rows {
        write_row(xml, row, font)?;
    }
    xml.end("w:tbl")
}

fn write_row(xml: &mut Xml, row: &Row, font: &str) -> Result<(), FormError> {
    xml.start("w:tr", &[])?;
    if let RowHeight::AtLeast(height) = row.height {
        let twips = height.twips().to_string();
        xml.start("w:trPr", &[])?;
        xml.empty("w:trHeight", &[("w:val", twips.as_str()), ("w:hRule", "atLeast")])?;
        xml.end("w:trPr")?;
    }
    for cell in &row.cells {
        write_cell(xml, cell, font)?;
    }
    xml.end("w:tr")
}

fn write_cell(xml: &mut Xml, cell: &Cell, font: &str) -> Result<(), FormError> {
    let width = cell.width.twips().to_string();

    xml.start("w:tc", &[])?;
    xml.start("w:tcPr", &[])?;
    xml.empty("w:tcW", &[("w:w", width.as_str()), ("w:type", "dxa")])?;
    if cell.span > 1 {
        let span = cell.span.to_string();
        xml.empty("w:gridSpan", &[("w:val", span.as_str())])?;
    }

    let sides = cell.borders.sides();
    if sides.iter().any(|(_, border)| border.is_some()) {
        xml.start("w:tcBorders", &[])?;
        for (side, border) in sides {
            if let Some(border) = border {
                let size = border.size.to_string();
                let space = border.space.to_string();
                let color = border.color.map(|c| c.hex()).unwrap_or_else(|| "auto".to_string());
                xml.empty(
                    &format!("w:{}", side),
                    &[
                        ("w:val", border.style.as_str()),
                        ("w:sz", size.as_str()),
                        ("w:space", space.as_str()),
                        ("w:color", color.as_str()),
                    ],
                )?;
            }
        }
        xml.end("w:tcBorders")?;
    }

    if let Some(align) = cell.vertical_align {
        xml.empty("w:vAlign", &[("w:val", vertical_value(align))])?;
    }
    xml.end("w:tcPr")?;

    for paragraph in &cell.paragraphs {
        write_paragraph(xml, paragraph, font)?;
    }
    xml.end("w:tc")
}

fn styles_xml(document: &Document) -> Result<Vec<u8>, FormError> {
    let font = document.font.as_str();
    let body_size = document.body_size.half_points().to_string();

    let mut xml = Xml::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_W)])?;

    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:eastAsia", font),
            ("w:cs", font),
        ],
    )?;
    xml.empty("w:sz", &[("w:val", body_size.as_str())])?;
    xml.empty("w:szCs", &[("w:val", body_size.as_str())])?;
    xml.empty("w:lang", &[("w:val", "en-IN")])?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    xml.empty(
        "w:spacing",
        &[("w:after", "0"), ("w:line", SINGLE_LINE), ("w:lineRule", "auto")],
    )?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    xml.start(
        "w:style",
        &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal")])?;
    xml.empty("w:qFormat", &[])?;
    xml.end("w:style")?;

    xml.start(
        "w:style",
        &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")],
    )?;
    xml.empty("w:name", &[("w:val", "Normal Table")])?;
    xml.empty("w:uiPriority", &[("w:val", "99")])?;
    xml.empty("w:semiHidden", &[])?;
    xml.start("w:tblPr", &[])?;
    xml.empty("w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    write_cell_margins(&mut xml)?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.start("w:style", &[("w:type", "table"), ("w:styleId", "TableGrid")])?;
    xml.empty("w:name", &[("w:val", "Table Grid")])?;
    xml.empty("w:basedOn", &[("w:val", "TableNormal")])?;
    xml.empty("w:uiPriority", &[("w:val", "59")])?;
    xml.start("w:tblPr", &[])?;
    xml.start("w:tblBorders", &[])?;
    for side in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        xml.empty(
            &format!("w:{}", side),
            &[
                ("w:val", "single"),
                ("w:sz", "4"),
                ("w:space", "0"),
                ("w:color", "auto"),
            ],
        )?;
    }
    xml.end("w:tblBorders")?;
    write_cell_margins(&mut xml)?;
    xml.end("w:tblPr")?;
    xml.end("w:style")?;

    xml.end("w:styles")?;
    Ok(xml.finish())
}

fn write_cell_margins(xml: &mut Xml) -> Result<(), FormError> {
    xml.start("w:tblCellMar", &[])?;
    xml.empty("w:top", &[("w:w", "0"), ("w:type", "dxa")])?;
    xml.empty("w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
    xml.empty("w:bottom", &[("w:w", "0"), ("w:type", "dxa")])?;
    xml.empty("w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
    xml.end("w:tblCellMar")
}

fn settings_xml() -> Result<Vec<u8>, FormError> {
    let mut xml = Xml::new()?;
    xml.start("w:settings", &[("xmlns:w", NS_W)])?;
    xml.empty("w:defaultTabStop", &[("w:val", "720")])?;
    xml.empty("w:characterSpacingControl", &[("w:val", "doNotCompress")])?;
    xml.start("w:compat", &[])?;
    xml.empty(
        "w:compatSetting",
        &[
            ("w:name", "compatibilityMode"),
            ("w:uri", "http://schemas.microsoft.com/office/word"),
            ("w:val", "15"),
        ],
    )?;
    xml.end("w:compat")?;
    xml.end("w:settings")?;
    Ok(xml.finish())
}

fn core_properties(properties: &DocumentProperties) -> Result<Vec<u8>, FormError> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let mut xml = Xml::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.element("dc:title", &[], &properties.title)?;
    xml.element("dc:creator", &[], &properties.creator)?;
    xml.element("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    xml.element("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &now)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties() -> Result<Vec<u8>, FormError> {
    let mut xml = Xml::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.element("Application", &[], env!("CARGO_PKG_NAME"))?;
    xml.end("Properties")?;
    Ok(xml.finish())
}
