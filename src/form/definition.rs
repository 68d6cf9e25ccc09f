//! Declarative description of Form 'A'.
//!
//! A `FormDefinition` is pure data: page size, header lines, column widths
//! and one `RowSpec` per table row. Nothing here touches the field values or
//! the output format; the renderer walks the definition in document order.

use super::units::{FontSize, Length};
use super::FormError;

/// Every table row has exactly this many logical columns before merges.
pub const COLUMN_COUNT: usize = 3;

/// Fallback shown for a conditional field that is absent or empty.
pub const BLANK_FALLBACK: &str = "________________";

pub const DEFAULT_FONT: &str = "Times New Roman";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
}

/// An RGB font colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    /// Uppercase hex as used in `w:color/@w:val`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// What a paragraph says before field values are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Static text, emitted as written.
    Literal(String),
    /// Text containing `{{name}}` placeholder tokens.
    Template(String),
    /// The value of `field` if present and non-empty, otherwise `fallback`.
    Conditional { field: String, fallback: String },
}

impl Content {
    pub fn literal(text: impl Into<String>) -> Self {
        Content::Literal(text.into())
    }

    pub fn template(text: impl Into<String>) -> Self {
        Content::Template(text.into())
    }

    pub fn conditional(field: impl Into<String>) -> Self {
        Content::Conditional {
            field: field.into(),
            fallback: BLANK_FALLBACK.to_string(),
        }
    }
}

/// Space before and after a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub before: Length,
    pub after: Length,
}

impl Spacing {
    pub fn pt(before: f64, after: f64) -> Self {
        Self {
            before: Length::pt(before),
            after: Length::pt(after),
        }
    }
}

/// One paragraph inside a table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphSpec {
    pub content: Content,
    pub bold: bool,
    pub underline: bool,
    pub color: Option<Rgb>,
    /// `None` leaves the alignment to the paragraph style.
    pub align: Option<Alignment>,
    /// `None` uses the profile's cell spacing.
    pub spacing: Option<Spacing>,
    pub single_line: bool,
}

impl ParagraphSpec {
    pub fn new(content: Content) -> Self {
        Self {
            content,
            bold: false,
            underline: false,
            color: None,
            align: Some(Alignment::Left),
            spacing: None,
            single_line: true,
        }
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::new(Content::literal(text))
    }

    pub fn template(text: impl Into<String>) -> Self {
        Self::new(Content::template(text))
    }

    pub fn conditional(field: impl Into<String>) -> Self {
        Self::new(Content::conditional(field))
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn center(mut self) -> Self {
        self.align = Some(Alignment::Center);
        self
    }

    pub fn unaligned(mut self) -> Self {
        self.align = None;
        self
    }

    /// Explicit spacing, without the single line-spacing rule.
    pub fn spaced(mut self, before_pt: f64, after_pt: f64) -> Self {
        self.spacing = Some(Spacing::pt(before_pt, after_pt));
        self.single_line = false;
        self
    }
}

/// One cell of a row. `span > 1` merges that many adjacent columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub span: usize,
    /// `None` uses the profile's default vertical alignment.
    pub vertical_align: Option<VerticalAlign>,
    /// Empty for a blank cell that only carries borders.
    pub paragraphs: Vec<ParagraphSpec>,
}

impl CellSpec {
    pub fn blank() -> Self {
        Self {
            span: 1,
            vertical_align: None,
            paragraphs: Vec::new(),
        }
    }

    pub fn single(paragraph: ParagraphSpec) -> Self {
        Self::stacked(vec![paragraph])
    }

    pub fn stacked(paragraphs: Vec<ParagraphSpec>) -> Self {
        Self {
            span: 1,
            vertical_align: None,
            paragraphs,
        }
    }

    pub fn span(mut self, columns: usize) -> Self {
        self.span = columns;
        self
    }

    pub fn top(mut self) -> Self {
        self.vertical_align = Some(VerticalAlign::Top);
        self
    }

    pub fn middle(mut self) -> Self {
        self.vertical_align = Some(VerticalAlign::Center);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// Row height class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHeight {
    Auto,
    /// Minimum height; content may still grow the row.
    AtLeast(Length),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    pub height: RowHeight,
    pub cells: Vec<CellSpec>,
}

impl RowSpec {
    pub fn at_least(inches: f64, cells: Vec<CellSpec>) -> Self {
        Self {
            height: RowHeight::AtLeast(Length::inches(inches)),
            cells,
        }
    }

    pub fn auto(cells: Vec<CellSpec>) -> Self {
        Self {
            height: RowHeight::Auto,
            cells,
        }
    }

    /// Merge ranges as inclusive `(first, last)` column pairs, one per cell
    /// that spans more than one column.
    pub fn merges(&self) -> Vec<(usize, usize)> {
        let mut merges = Vec::new();
        let mut column = 0;
        for cell in &self.cells {
            if cell.span > 1 {
                merges.push((column, column + cell.span - 1));
            }
            column += cell.span;
        }
        merges
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLine {
    pub text: String,
    pub bold: bool,
    pub size: FontSize,
}

impl HeaderLine {
    pub fn new(text: impl Into<String>, bold: bool, size: f64) -> Self {
        Self {
            text: text.into(),
            bold,
            size: FontSize(size),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub top: Length,
    pub right: Length,
    pub bottom: Length,
    pub left: Length,
}

impl Margins {
    pub fn uniform(length: Length) -> Self {
        Self {
            top: length,
            right: length,
            bottom: length,
            left: length,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub width: Length,
    pub height: Length,
    pub margins: Margins,
}

impl PageGeometry {
    /// A4 portrait, 210 x 297 mm.
    pub fn a4(margin: Length) -> Self {
        Self {
            width: Length::mm(210.0),
            height: Length::mm(297.0),
            margins: Margins::uniform(margin),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormDefinition {
    pub page: PageGeometry,
    pub font: String,
    pub body_size: FontSize,
    pub headers: Vec<HeaderLine>,
    pub columns: Vec<Length>,
    pub rows: Vec<RowSpec>,
}

impl FormDefinition {
    /// Check that every row covers exactly the declared columns.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.columns.len() != COLUMN_COUNT {
            return Err(FormError::ColumnCount(self.columns.len()));
        }
        for (index, row) in self.rows.iter().enumerate() {
            if row.cells.iter().any(|cell| cell.span == 0) {
                return Err(FormError::EmptySpan { row: index + 1 });
            }
            let covered: usize = row.cells.iter().map(|cell| cell.span).sum();
            if covered != COLUMN_COUNT {
                return Err(FormError::RowWidth {
                    row: index + 1,
                    covered,
                });
            }
        }
        Ok(())
    }

    /// The mediation application form, Form 'A' under rule 3(1).
    pub fn form_a() -> Self {
        let label = |text: &str| CellSpec::single(ParagraphSpec::literal(text).bold());
        let serial = |text: &str| CellSpec::single(ParagraphSpec::literal(text).center());
        let value = |token: &str| CellSpec::single(ParagraphSpec::template(token).bold());

        let address_block = |second_label: &str, value: ParagraphSpec| {
            CellSpec::stacked(vec![
                ParagraphSpec::literal("REGISTERED ADDRESS:").bold().spaced(2.0, 0.0),
                value.clone().spaced(0.0, 0.0),
                ParagraphSpec::literal(" ").unaligned().spaced(0.0, 0.0),
                ParagraphSpec::literal(second_label).bold().spaced(0.0, 0.0),
                value.spaced(0.0, 2.0),
            ])
            .middle()
        };

        let rows = vec![
            RowSpec::at_least(0.44, vec![label("DETAILS OF PARTIES:").span(3)]),
            RowSpec::at_least(
                0.45,
                vec![
                    serial("1").top(),
                    CellSpec::single(
                        ParagraphSpec::literal("Name of\nApplicant")
                            .bold()
                            .spaced(2.0, 2.0),
                    )
                    .top(),
                    value("{{client_name}}").top(),
                ],
            ),
            RowSpec::at_least(
                0.37,
                vec![
                    CellSpec::blank(),
                    label("Address and contact details of Applicant").span(2),
                ],
            ),
            RowSpec::at_least(
                1.12,
                vec![
                    serial("1").middle(),
                    label("Address").middle(),
                    address_block(
                        "CORRESPONDENCE BRANCH ADDRESS:",
                        ParagraphSpec::template("{{branch_address}}"),
                    ),
                ],
            ),
            RowSpec::at_least(
                0.37,
                vec![CellSpec::blank(), label("Telephone No."), value("{{mobile}}")],
            ),
            RowSpec::at_least(
                0.37,
                vec![CellSpec::blank(), label("Mobile No."), CellSpec::blank()],
            ),
            RowSpec::at_least(
                0.37,
                vec![
                    CellSpec::blank(),
                    label("Email ID"),
                    CellSpec::single(
                        ParagraphSpec::template("{{email}}")
                            .color(Rgb::BLUE)
                            .underline(),
                    ),
                ],
            ),
            RowSpec::at_least(
                0.37,
                vec![
                    serial("2").top(),
                    label("Name, Address and Contact details of Opposite Party:").span(2),
                ],
            ),
            RowSpec::at_least(
                0.37,
                vec![
                    CellSpec::blank(),
                    label("Address and contact details of Defendant/s").span(2),
                ],
            ),
            RowSpec::at_least(
                0.37,
                vec![
                    CellSpec::blank(),
                    label("Name").top(),
                    value("{{customer_name}}").top(),
                ],
            ),
            RowSpec::at_least(
                1.58,
                vec![
                    CellSpec::blank(),
                    label("Address").middle(),
                    address_block(
                        "CORRESPONDENCE ADDRESS:",
                        ParagraphSpec::conditional("address1"),
                    ),
                ],
            ),
            RowSpec::at_least(
                0.44,
                vec![CellSpec::blank(), label("Telephone No."), CellSpec::blank()],
            ),
            RowSpec::at_least(
                0.44,
                vec![CellSpec::blank(), label("Mobile No."), CellSpec::blank()],
            ),
            RowSpec::at_least(
                0.44,
                vec![CellSpec::blank(), label("Email ID"), CellSpec::blank()],
            ),
            RowSpec::at_least(0.44, vec![label("DETAILS OF DISPUTE:").span(3)]),
            RowSpec::at_least(
                0.44,
                vec![CellSpec::single(
                    ParagraphSpec::literal(
                        "THE COMM. COURTS (PRE-INSTITUTION.........SETTLEMENT) RULES,2018",
                    )
                    .bold()
                    .underline()
                    .center(),
                )
                .middle()
                .span(3)],
            ),
            RowSpec::at_least(
                0.22,
                vec![
                    CellSpec::blank(),
                    label(
                        "Nature of disputes as per section 2(1)(c) of the Commercial Courts Act, 2015 (4 of 2016):",
                    )
                    .span(2),
                ],
            ),
        ];

        Self {
            page: PageGeometry::a4(Length::inches(0.3)),
            font: DEFAULT_FONT.to_string(),
            body_size: FontSize(10.5),
            headers: vec![
                HeaderLine::new("FORM 'A'", true, 12.0),
                HeaderLine::new("MEDIATION APPLICATION FORM", true, 12.0),
                HeaderLine::new("[REFER RULE 3(1)]", true, 11.0),
                HeaderLine::new("Mumbai District Legal Services Authority", false, 12.0),
                HeaderLine::new("City Civil Court, Mumbai", false, 12.0),
            ],
            columns: vec![
                Length::inches(0.37),
                Length::inches(1.2),
                Length::inches(5.68),
            ],
            rows,
        }
    }
}
