//! Measuring and paginating blocks onto fixed A4 pages.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page; the PDF encoder flips them. Every block is measured into rows. A
//! block is placed whole when it fits the space left on the page, otherwise it
//! starts a fresh page. Only blocks taller than an empty page are split, and
//! then only between rows.

use crate::document::{Block, Document, TableRow};
use crate::error::ReportError;
use crate::text::{Face, text_width, wrap};

pub const PAGE_WIDTH: f32 = 595.0;
pub const PAGE_HEIGHT: f32 = 842.0;
pub const MARGIN: f32 = 50.0;
pub const FOOTER_HEIGHT: f32 = 30.0;

pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
pub const CONTENT_TOP: f32 = MARGIN;
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN - FOOTER_HEIGHT;

/// Usable height of an empty page.
pub const PAGE_CAPACITY: f32 = CONTENT_BOTTOM - CONTENT_TOP;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

impl Color {
    pub const TEXT: Color = Color(0.13, 0.13, 0.16);
    pub const MUTED: Color = Color(0.42, 0.45, 0.5);
    pub const ACCENT: Color = Color(0.06, 0.36, 0.62);
    pub const TINT: Color = Color(0.93, 0.95, 0.98);
    pub const HIGHLIGHT: Color = Color(0.85, 0.91, 0.97);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0);
}

/// A drawing primitive. `y` of text is its baseline; `y` of a rect is its top edge.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        x: f32,
        y: f32,
        size: f32,
        face: Face,
        color: Color,
        text: String,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
}

impl Element {
    fn shifted(mut self, dy: f32) -> Self {
        match &mut self {
            Element::Text { y, .. } | Element::Rect { y, .. } => *y += dy,
        }
        self
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rect { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// All text on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(Element::text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub pages: Vec<Page>,
}

/// An indivisible horizontal band of a block, positioned relative to its own top.
#[derive(Debug, Clone, Default)]
struct Row {
    height: f32,
    elements: Vec<Element>,
}

impl Row {
    fn empty(height: f32) -> Self {
        Self {
            height,
            elements: Vec::new(),
        }
    }

    /// One line of text, vertically centred in `height`.
    fn line(x: f32, height: f32, size: f32, face: Face, color: Color, text: String) -> Self {
        Self {
            height,
            elements: vec![text_at(x, baseline(height, size), size, face, color, text)],
        }
    }

    /// Paint a full-width background behind the row.
    fn with_background(mut self, color: Color) -> Self {
        self.elements.insert(
            0,
            Element::Rect {
                x: MARGIN,
                y: 0.0,
                width: CONTENT_WIDTH,
                height: self.height,
                color,
            },
        );
        self
    }
}

/// A measured block.
#[derive(Debug, Default)]
struct Measured {
    rows: Vec<Row>,
    /// Gap left below the block.
    gap: f32,
    /// Headings are kept together with the first row of what follows.
    keep_with_next: bool,
    page_break: bool,
}

impl Measured {
    fn height(&self) -> f32 {
        self.rows.iter().map(|r| r.height).sum()
    }

    fn first_row_height(&self) -> f32 {
        self.rows.first().map(|r| r.height).unwrap_or(0.0)
    }
}

fn baseline(line_height: f32, size: f32) -> f32 {
    (line_height + size * 0.7) / 2.0
}

fn text_at(x: f32, y: f32, size: f32, face: Face, color: Color, text: String) -> Element {
    Element::Text {
        x,
        y,
        size,
        face,
        color,
        text,
    }
}

fn wrapped_rows(
    text: &str,
    x: f32,
    width: f32,
    size: f32,
    line_height: f32,
    face: Face,
    color: Color,
) -> Vec<Row> {
    wrap(text, size, face, width)
        .into_iter()
        .map(|line| Row::line(x, line_height, size, face, color, line))
        .collect()
}

fn measure(block: &Block) -> Result<Measured, ReportError> {
    let measured = match block {
        Block::Title { text, subtitle } => {
            let mut rows = vec![Row::empty(6.0).with_background(Color::ACCENT), Row::empty(18.0)];
            rows.extend(wrapped_rows(
                text,
                MARGIN,
                CONTENT_WIDTH,
                24.0,
                30.0,
                Face::Bold,
                Color::TEXT,
            ));
            if let Some(subtitle) = subtitle {
                rows.extend(wrapped_rows(
                    subtitle,
                    MARGIN,
                    CONTENT_WIDTH,
                    12.0,
                    18.0,
                    Face::Regular,
                    Color::MUTED,
                ));
            }
            Measured {
                rows,
                gap: 16.0,
                ..Default::default()
            }
        }
        Block::Heading(text) => {
            let mut rows = vec![Row::empty(8.0)];
            rows.extend(wrapped_rows(
                text,
                MARGIN,
                CONTENT_WIDTH,
                16.0,
                22.0,
                Face::Bold,
                Color::ACCENT,
            ));
            rows.push(Row {
                height: 8.0,
                elements: vec![Element::Rect {
                    x: MARGIN,
                    y: 2.0,
                    width: CONTENT_WIDTH,
                    height: 0.8,
                    color: Color::ACCENT,
                }],
            });
            Measured {
                rows,
                gap: 4.0,
                keep_with_next: true,
                ..Default::default()
            }
        }
        Block::Subheading(text) => Measured {
            rows: wrapped_rows(
                text,
                MARGIN,
                CONTENT_WIDTH,
                11.0,
                16.0,
                Face::Bold,
                Color::TEXT,
            ),
            gap: 2.0,
            keep_with_next: true,
            ..Default::default()
        },
        Block::Paragraph(text) => Measured {
            rows: wrapped_rows(
                text,
                MARGIN,
                CONTENT_WIDTH,
                10.0,
                14.0,
                Face::Regular,
                Color::TEXT,
            ),
            gap: 8.0,
            ..Default::default()
        },
        Block::Bullets(items) => {
            let indent = 14.0;
            let mut rows = Vec::new();
            for item in items {
                let mut item_rows = wrapped_rows(
                    item,
                    MARGIN + indent,
                    CONTENT_WIDTH - indent,
                    10.0,
                    14.0,
                    Face::Regular,
                    Color::TEXT,
                );
                if let Some(first) = item_rows.first_mut() {
                    first.elements.push(text_at(
                        MARGIN + 3.0,
                        baseline(14.0, 10.0),
                        10.0,
                        Face::Regular,
                        Color::ACCENT,
                        "•".to_string(),
                    ));
                }
                rows.extend(item_rows);
            }
            Measured {
                rows,
                gap: 8.0,
                ..Default::default()
            }
        }
        Block::InfoBox { caption, lines } => {
            let pad = 12.0;
            let label_width = 90.0;
            let mut rows = vec![Row::empty(pad)];
            rows.extend(wrapped_rows(
                caption,
                MARGIN + pad,
                CONTENT_WIDTH - 2.0 * pad,
                11.0,
                20.0,
                Face::Bold,
                Color::ACCENT,
            ));
            for (label, value) in lines {
                let mut value_rows = wrapped_rows(
                    value,
                    MARGIN + pad + label_width,
                    CONTENT_WIDTH - 2.0 * pad - label_width,
                    10.0,
                    15.0,
                    Face::Regular,
                    Color::TEXT,
                );
                if let Some(first) = value_rows.first_mut() {
                    first.elements.push(text_at(
                        MARGIN + pad,
                        baseline(15.0, 10.0),
                        10.0,
                        Face::Bold,
                        Color::MUTED,
                        label.clone(),
                    ));
                }
                rows.extend(value_rows);
            }
            rows.push(Row::empty(pad));
            Measured {
                rows: rows
                    .into_iter()
                    .map(|r| r.with_background(Color::TINT))
                    .collect(),
                gap: 12.0,
                ..Default::default()
            }
        }
        Block::Callout { label, value, note } => {
            let pad = 16.0;
            let inner = CONTENT_WIDTH - 2.0 * pad;
            let mut rows = vec![Row::empty(pad)];
            rows.extend(wrapped_rows(
                label,
                MARGIN + pad,
                inner,
                11.0,
                16.0,
                Face::Regular,
                Color::MUTED,
            ));
            rows.extend(wrapped_rows(
                value,
                MARGIN + pad,
                inner,
                26.0,
                34.0,
                Face::Bold,
                Color::ACCENT,
            ));
            if let Some(note) = note {
                rows.extend(wrapped_rows(
                    note,
                    MARGIN + pad,
                    inner,
                    9.0,
                    14.0,
                    Face::Regular,
                    Color::MUTED,
                ));
            }
            rows.push(Row::empty(pad));
            Measured {
                rows: rows
                    .into_iter()
                    .map(|r| r.with_background(Color::HIGHLIGHT))
                    .collect(),
                gap: 16.0,
                ..Default::default()
            }
        }
        Block::Table {
            headers,
            widths,
            rows,
        } => Measured {
            rows: table_rows(headers, widths, rows)?,
            gap: 12.0,
            ..Default::default()
        },
        Block::PageBreak => Measured {
            page_break: true,
            ..Default::default()
        },
        Block::Spacer(height) => Measured {
            rows: vec![Row::empty(height.max(0.0))],
            ..Default::default()
        },
    };
    Ok(measured)
}

fn table_rows(
    headers: &[String],
    widths: &[f32],
    rows: &[TableRow],
) -> Result<Vec<Row>, ReportError> {
    let columns = headers.len();
    if columns == 0 || widths.len() != columns {
        return Err(ReportError::Layout(format!(
            "table has {} headers but {} column widths",
            columns,
            widths.len()
        )));
    }
    if let Some(bad) = rows.iter().find(|r| r.cells.len() != columns) {
        return Err(ReportError::Layout(format!(
            "table row has {} cells, expected {}",
            bad.cells.len(),
            columns
        )));
    }
    let sum: f32 = widths.iter().sum();
    if sum <= 0.0 {
        return Err(ReportError::Layout("table column widths sum to zero".to_string()));
    }

    let pad = 6.0;
    let mut x = MARGIN;
    let columns: Vec<(f32, f32)> = widths
        .iter()
        .map(|w| {
            let width = CONTENT_WIDTH * w / sum;
            let col = (x, width);
            x += width;
            col
        })
        .collect();

    let build = |cells: &[String], face: Face, color: Color, background: Option<Color>| {
        let size = 10.0;
        let line_height = 14.0;
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(&columns)
            .map(|(cell, (_, width))| wrap(cell, size, face, width - 2.0 * pad))
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        let height = lines as f32 * line_height + 2.0 * pad;

        let mut row = Row::empty(height);
        for (cell_lines, (col_x, _)) in wrapped.into_iter().zip(&columns) {
            for (i, line) in cell_lines.into_iter().enumerate() {
                let y = pad + i as f32 * line_height + baseline(line_height, size);
                row.elements
                    .push(text_at(col_x + pad, y, size, face, color, line));
            }
        }
        match background {
            Some(bg) => row.with_background(bg),
            None => {
                // Hairline under plain rows.
                row.elements.push(Element::Rect {
                    x: MARGIN,
                    y: height - 0.5,
                    width: CONTENT_WIDTH,
                    height: 0.5,
                    color: Color::TINT,
                });
                row
            }
        }
    };

    let mut out = vec![build(headers, Face::Bold, Color::WHITE, Some(Color::ACCENT))];
    for row in rows {
        out.push(if row.highlighted {
            build(row.cells.as_slice(), Face::Bold, Color::TEXT, Some(Color::HIGHLIGHT))
        } else {
            build(row.cells.as_slice(), Face::Regular, Color::TEXT, None)
        });
    }
    Ok(out)
}

/// Places rows on pages top to bottom.
struct Paginator {
    pages: Vec<Page>,
    cursor: f32,
}

impl Paginator {
    fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: CONTENT_TOP,
        }
    }

    fn remaining(&self) -> f32 {
        CONTENT_BOTTOM - self.cursor
    }

    fn at_top(&self) -> bool {
        self.cursor <= CONTENT_TOP
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor = CONTENT_TOP;
    }

    fn place_row(&mut self, row: Row) {
        let top = self.cursor;
        if let Some(page) = self.pages.last_mut() {
            page.elements
                .extend(row.elements.into_iter().map(|e| e.shifted(top)));
        }
        self.cursor += row.height;
    }

    fn place(&mut self, block: Measured, follow: f32) {
        if block.page_break {
            if !self.at_top() {
                self.new_page();
            }
            return;
        }

        let height = block.height();
        let needed = if block.keep_with_next {
            height + block.gap + follow
        } else {
            height
        };
        let blank = block.rows.iter().all(|r| r.elements.is_empty());

        if blank && (self.at_top() || height > self.remaining()) {
            // Blank space never starts or opens a page.
            if !self.at_top() {
                self.cursor = CONTENT_BOTTOM;
            }
            return;
        }

        if height <= PAGE_CAPACITY && needed > self.remaining() && !self.at_top() {
            self.new_page();
        }

        if height <= self.remaining() {
            for row in block.rows {
                self.place_row(row);
            }
        } else {
            // Taller than a whole page: split between rows.
            for row in block.rows {
                if row.height > self.remaining() && !self.at_top() {
                    self.new_page();
                }
                self.place_row(row);
            }
        }
        self.cursor = (self.cursor + block.gap).min(CONTENT_BOTTOM);
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Lay the document out on pages, including the footer on each page.
pub fn layout(doc: &Document) -> Result<Layout, ReportError> {
    let measured = doc
        .blocks
        .iter()
        .map(measure)
        .collect::<Result<Vec<_>, _>>()?;

    // A kept block needs room for the whole chain of kept blocks after it
    // plus the first row of the block that ends the chain.
    let follows: Vec<f32> = (0..measured.len())
        .map(|i| {
            let mut follow = 0.0;
            for next in &measured[i + 1..] {
                if next.page_break {
                    break;
                }
                if next.keep_with_next {
                    follow += next.height() + next.gap;
                } else {
                    follow += next.first_row_height();
                    break;
                }
            }
            follow
        })
        .collect();

    let mut paginator = Paginator::new();
    for (block, follow) in measured.into_iter().zip(follows) {
        paginator.place(block, follow);
    }
    let mut pages = paginator.finish();

    // A trailing page break leaves an empty last page behind.
    if pages.len() > 1 && pages.last().is_some_and(|p| p.elements.is_empty()) {
        pages.pop();
    }

    let total = pages.len();
    for (index, page) in pages.iter_mut().enumerate() {
        add_footer(page, &doc.document_id, index + 1, total);
    }

    tracing::debug!(blocks = doc.blocks.len(), pages = total, "Laid out report");
    Ok(Layout { pages })
}

fn add_footer(page: &mut Page, document_id: &str, number: usize, total: usize) {
    let size = 8.0;
    let rule_y = CONTENT_BOTTOM + 10.0;
    let text_y = rule_y + 14.0;
    let label = format!("Page {} of {}", number, total);
    let label_width = text_width(&label, size, Face::Regular);

    page.elements.push(Element::Rect {
        x: MARGIN,
        y: rule_y,
        width: CONTENT_WIDTH,
        height: 0.5,
        color: Color::MUTED,
    });
    page.elements.push(text_at(
        MARGIN,
        text_y,
        size,
        Face::Regular,
        Color::MUTED,
        document_id.to_string(),
    ));
    page.elements.push(text_at(
        PAGE_WIDTH - MARGIN - label_width,
        text_y,
        size,
        Face::Regular,
        Color::MUTED,
        label,
    ));
}
