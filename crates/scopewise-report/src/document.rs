//! Typed content blocks and the builder that accumulates them.
//!
//! Blocks carry content only. Measuring, wrapping and pagination happen in
//! [`crate::layout`].

/// A row of a [`Block::Table`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// Drawn bold on a tinted background.
    pub highlighted: bool,
}

/// One unit of report content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Large cover title with an optional subtitle.
    Title { text: String, subtitle: Option<String> },
    /// Section heading.
    Heading(String),
    Subheading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    /// Tinted box with a caption and label/value lines.
    InfoBox {
        caption: String,
        lines: Vec<(String, String)>,
    },
    /// Prominent figure, e.g. the total investment.
    Callout {
        label: String,
        value: String,
        note: Option<String>,
    },
    Table {
        headers: Vec<String>,
        /// Relative column widths. Normalised during layout.
        widths: Vec<f32>,
        rows: Vec<TableRow>,
    },
    /// Continue on a fresh page.
    PageBreak,
    /// Vertical gap in points.
    Spacer(f32),
}

/// A sequence of blocks plus document-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub author: String,
    /// Printed in every page footer.
    pub document_id: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self {
            doc: Document {
                title: title.into(),
                document_id: document_id.into(),
                ..Default::default()
            },
        }
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.doc.author = author.into();
        self
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.doc.blocks.push(block);
        self
    }

    pub fn title(&mut self, text: impl Into<String>, subtitle: Option<String>) -> &mut Self {
        self.push(Block::Title {
            text: text.into(),
            subtitle,
        })
    }

    pub fn heading(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Heading(text.into()))
    }

    pub fn subheading(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Subheading(text.into()))
    }

    pub fn paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Block::Paragraph(text.into()))
    }

    pub fn bullets<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Block::Bullets(items.into_iter().map(Into::into).collect()))
    }

    pub fn info_box(
        &mut self,
        caption: impl Into<String>,
        lines: Vec<(String, String)>,
    ) -> &mut Self {
        self.push(Block::InfoBox {
            caption: caption.into(),
            lines,
        })
    }

    pub fn callout(
        &mut self,
        label: impl Into<String>,
        value: impl Into<String>,
        note: Option<String>,
    ) -> &mut Self {
        self.push(Block::Callout {
            label: label.into(),
            value: value.into(),
            note,
        })
    }

    pub fn table(
        &mut self,
        headers: Vec<String>,
        widths: Vec<f32>,
        rows: Vec<TableRow>,
    ) -> &mut Self {
        self.push(Block::Table {
            headers,
            widths,
            rows,
        })
    }

    pub fn page_break(&mut self) -> &mut Self {
        self.push(Block::PageBreak)
    }

    pub fn spacer(&mut self, height: f32) -> &mut Self {
        self.push(Block::Spacer(height))
    }

    pub fn build(self) -> Document {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_order() {
        let mut builder = DocumentBuilder::new("Report", "SW-ACME-20260101").author("Scopewise");
        builder
            .title("Report", None)
            .heading("One")
            .bullets(["a", "b"])
            .page_break()
            .paragraph("text");
        let doc = builder.build();

        assert_eq!(doc.author, "Scopewise");
        assert_eq!(doc.blocks.len(), 5);
        assert_eq!(doc.blocks[1], Block::Heading("One".to_string()));
        assert_eq!(
            doc.blocks[2],
            Block::Bullets(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(doc.blocks[3], Block::PageBreak);
    }
}
