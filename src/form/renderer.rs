//! Form renderer.
//!
//! Walks a `FormDefinition` in document order: header lines first, then each
//! row top to bottom. A row's merges are applied as soon as the row exists,
//! so every fill targets the final cell topology. Cells are filled left to
//! right and every cell, blank or not, gets all four borders.

use std::path::{Path, PathBuf};

use super::definition::{Alignment, CellSpec, FormDefinition, Margins, ParagraphSpec, Spacing};
use super::docx::{self, DocumentProperties};
use super::fields::FieldValues;
use super::layout::{Border, Cell, Document, Paragraph, Run, Table};
use super::profile::RenderProfile;
use super::traits::Generator;
use super::units::{FontSize, Length};
use super::{FormError, RenderedDocument};

/// Renders a validated form definition under one profile.
#[derive(Debug, Clone)]
pub struct FormRenderer {
    definition: FormDefinition,
    profile: RenderProfile,
    properties: DocumentProperties,
}

impl FormRenderer {
    pub fn new(definition: FormDefinition, profile: RenderProfile) -> Result<Self, FormError> {
        definition.validate()?;
        Ok(Self {
            definition,
            profile,
            properties: DocumentProperties::default(),
        })
    }

    /// Form 'A' under the given profile.
    pub fn form_a(profile: RenderProfile) -> Result<Self, FormError> {
        Self::new(FormDefinition::form_a(), profile)
    }

    pub fn with_properties(mut self, properties: DocumentProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn profile(&self) -> &RenderProfile {
        &self.profile
    }

    /// Build the document tree without touching the filesystem.
    pub fn layout(&self, fields: &FieldValues) -> Result<Document, FormError> {
        let mut page = self.definition.page;
        page.margins = Margins::uniform(self.profile.margin);

        let mut table = Table::new(self.definition.columns.clone());
        for (index, spec) in self.definition.rows.iter().enumerate() {
            let row = table.add_row(spec.height);
            for (first, last) in spec.merges() {
                row.merge(first, last)?;
            }

            let mut column = 0;
            for cell_spec in &spec.cells {
                let cell = row.cell_mut(column)?;
                self.fill_cell(cell, cell_spec, fields);
                column += cell_spec.span;
            }
            log::debug!(
                "laid out row {} with {} cell(s)",
                index + 1,
                row.cells.len()
            );
        }

        Ok(Document {
            page,
            font: self.definition.font.clone(),
            body_size: self.definition.body_size,
            header: self.header_paragraphs(),
            table,
        })
    }

    /// Lay out the form and write it to `destination`, replacing any
    /// existing file. The parent directory must already exist.
    pub fn render(
        &self,
        fields: &FieldValues,
        destination: &Path,
    ) -> Result<RenderedDocument, FormError> {
        let document = self.layout(fields)?;
        let size = docx::write_docx(&document, &self.properties, destination)?;

        log::info!("File created successfully: {}", destination.display());
        Ok(RenderedDocument {
            path: destination.to_path_buf(),
            size,
            rows: document.table.rows.len(),
        })
    }

    fn header_paragraphs(&self) -> Vec<Paragraph> {
        let last = self.definition.headers.len().saturating_sub(1);
        self.definition
            .headers
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let after = if index == last {
                    self.profile.header_gap
                } else {
                    Length::ZERO
                };
                let mut run = Run::new(line.text.clone());
                run.bold = line.bold;
                run.size = Some(line.size);
                Paragraph {
                    align: Some(Alignment::Center),
                    spacing: Some(Spacing {
                        before: Length::ZERO,
                        after,
                    }),
                    single_line: false,
                    runs: vec![run],
                }
            })
            .collect()
    }

    fn fill_cell(&self, cell: &mut Cell, spec: &CellSpec, fields: &FieldValues) {
        if !spec.is_blank() {
            cell.clear();
            cell.vertical_align = Some(spec.vertical_align.unwrap_or(self.profile.vertical_align));

            let paragraphs = spec
                .paragraphs
                .iter()
                .map(|paragraph| self.paragraph(paragraph, fields))
                .collect::<Vec<_>>();

            if self.profile.leading_blank_paragraph {
                for paragraph in paragraphs {
                    cell.add_paragraph(paragraph);
                }
            } else {
                cell.set_paragraphs(paragraphs);
            }
        }
        cell.set_all_borders(Border::single());
    }

    fn paragraph(&self, spec: &ParagraphSpec, fields: &FieldValues) -> Paragraph {
        let text = fields.resolve(&spec.content);
        let spacing = spec.spacing.unwrap_or(Spacing {
            before: self.profile.cell_spacing,
            after: self.profile.cell_spacing,
        });

        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run {
                text,
                bold: spec.bold,
                underline: spec.underline,
                color: spec.color,
                size: Some(self.body_size()),
            }]
        };

        Paragraph {
            align: spec.align,
            spacing: Some(spacing),
            single_line: spec.single_line,
            runs,
        }
    }

    fn body_size(&self) -> FontSize {
        self.definition.body_size
    }
}

/// Renders with fixed field values to a fixed path.
#[derive(Debug, Clone)]
pub struct FormGenerator {
    renderer: FormRenderer,
    fields: FieldValues,
    destination: PathBuf,
}

impl FormGenerator {
    pub fn new(renderer: FormRenderer, fields: FieldValues, destination: impl Into<PathBuf>) -> Self {
        Self {
            renderer,
            fields,
            destination: destination.into(),
        }
    }

    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }
}

impl Generator for FormGenerator {
    fn generate(&self) -> Result<RenderedDocument, FormError> {
        self.renderer.render(&self.fields, &self.destination)
    }

    fn destination(&self) -> &Path {
        &self.destination
    }
}
