//! Sanction order document.
//!
//! Rendering happens in three steps:
//!
//! 1. [`SanctionDocument::from_order`] decides *what* is printed: letterhead,
//!    introduction, the line-item table, closing text and signatures.
//! 2. [`layout`] decides *where*: it flows the content down A4 pages, wraps
//!    text, draws the bordered table and starts new pages as needed. Positions
//!    are millimetres measured from the top-left corner of the page, and text
//!    is measured with the standard Helvetica glyph widths.
//! 3. [`crate::core::pdf::write_pdf`] turns the positioned pages into PDF bytes.
//!
//! Steps 1 and 2 are pure, so the same order always produces the same pages.

use crate::{
    config::DocumentConfig,
    core::{amount::group_digits, pdf, sanction::SanctionOrder},
    errors::Result,
};

/// Column headings of the line-item table.
pub const TABLE_HEADINGS: [&str; 7] = [
    "S.No",
    "Application ID",
    "Name",
    "Designation",
    "NIC PIN",
    "Days",
    "Amount",
];

const COLUMN_WIDTHS_MM: [f32; 7] = [12.0, 26.0, 44.0, 44.0, 20.0, 14.0, 20.0];

const PT_TO_MM: f32 = 0.352_8;

/// Advance widths in 1/1000 em of Helvetica for `' '..='~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Advance widths in 1/1000 em of Helvetica-Bold for `' '..='~'`.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

/// Used for characters outside printable ASCII.
const FALLBACK_WIDTH: u16 = 1000;

const LETTERHEAD_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;
const TABLE_SIZE: f32 = 9.0;
const BODY_LINE_MM: f32 = 5.5;
const ROW_HEIGHT_MM: f32 = 7.0;
/// Extra row height per wrapped cell line
const CELL_LINE_MM: f32 = 4.0;
const CELL_PADDING_MM: f32 = 1.5;
const SIGNATURE_WIDTH_MM: f32 = 60.0;

/// A run of introductory text, printed bold when emphasized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Text, including any surrounding spaces
    pub text: String,
    /// Whether the run is printed bold
    pub emphasized: bool,
}

impl Span {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// One row of the line-item table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Column headings
    Header(Vec<String>),
    /// One teacher
    Item(Vec<String>),
    /// Label spanning the non-numeric columns, grand total in the amount column
    Total {
        /// Label text
        label: String,
        /// Grouped grand total
        amount: String,
    },
}

/// Everything printed on a sanction order, before layout.
#[derive(Debug, Clone, PartialEq)]
pub struct SanctionDocument {
    /// Document title metadata and printed title
    pub title: String,
    /// Centered organization lines
    pub letterhead: Vec<String>,
    /// Introductory sentence
    pub intro: Vec<Span>,
    /// Header row, one row per line, totals row
    pub table: Vec<TableRow>,
    /// Closing paragraphs
    pub closing: Vec<String>,
    /// Signatory name followed by designation lines
    pub signature: Vec<String>,
    /// Reference-number line
    pub reference: String,
    /// Numbered recipients of copies
    pub copy_to: Vec<String>,
    /// Distance from the page top past which the closing block moves to a new page
    pub closing_break_threshold_mm: f32,
}

impl SanctionDocument {
    /// Assembles the printed content of `order`.
    #[must_use]
    pub fn from_order(order: &SanctionOrder, config: &DocumentConfig) -> Self {
        let currency = &config.currency;
        let intro = vec![
            Span::plain(
                "Sanction of the competent authority is hereby accorded for the payment of ",
            ),
            Span::emphasized(format!("{currency} {}/-", order.total.grouped)),
            Span::plain(" ("),
            Span::emphasized(order.total.words.clone()),
            Span::plain(") as remuneration to the following guest teachers for the month of "),
            Span::emphasized(order.month.clone()),
            Span::plain(" "),
            Span::emphasized(order.year().to_string()),
            Span::plain(" as per the details given below:"),
        ];

        let mut table = Vec::with_capacity(order.lines.len() + 2);
        table.push(TableRow::Header(
            TABLE_HEADINGS.iter().map(ToString::to_string).collect(),
        ));
        for (index, line) in order.lines.iter().enumerate() {
            table.push(TableRow::Item(vec![
                (index + 1).to_string(),
                line.app_id.clone(),
                line.name.clone(),
                line.designation.clone(),
                line.nic_pin.clone(),
                line.days.to_string(),
                group_digits(line.amount),
            ]));
        }
        table.push(TableRow::Total {
            label: "Total".to_string(),
            amount: order.total.grouped.clone(),
        });

        let mut signature = vec![format!("({})", config.signatory_name)];
        signature.extend(config.signatory_designation.iter().cloned());

        Self {
            title: config.title.clone(),
            letterhead: config.letterhead.clone(),
            intro,
            table,
            closing: config.closing.clone(),
            signature,
            reference: format!(
                "{} ______________________          Dated: {}",
                config.reference_prefix,
                order.issued_date.format("%d/%m/%Y")
            ),
            copy_to: config.copy_to.clone(),
            closing_break_threshold_mm: config.closing_break_threshold_mm,
        }
    }

    /// Number of table rows including header and totals.
    #[must_use]
    pub fn table_row_count(&self) -> usize {
        self.table.len()
    }
}

/// Physical page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width
    pub width_mm: f32,
    /// Page height
    pub height_mm: f32,
    /// Margin on every side
    pub margin_mm: f32,
}

impl PageGeometry {
    /// A4 portrait with 15 mm margins.
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_mm: 15.0,
    };

    fn content_width(&self) -> f32 {
        self.width_mm - 2.0 * self.margin_mm
    }

    fn bottom(&self) -> f32 {
        self.height_mm - self.margin_mm
    }
}

/// A positioned drawing instruction; `y` grows downward from the page top.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline at `(x, y)`
    Text {
        /// Left edge
        x: f32,
        /// Baseline
        y: f32,
        /// Font size in points
        size: f32,
        /// Bold face
        bold: bool,
        /// The text
        text: String,
    },
    /// Straight rule between two points
    Line {
        /// Start x
        x1: f32,
        /// Start y
        y1: f32,
        /// End x
        x2: f32,
        /// End y
        y2: f32,
    },
}

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Drawing instructions in paint order
    pub ops: Vec<DrawOp>,
}

/// Printed width of `text` in millimetres at `size` points.
#[must_use]
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let widths = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };
    let units: u32 = text
        .chars()
        .map(|ch| {
            let width = u32::from(ch)
                .checked_sub(u32::from(' '))
                .and_then(|offset| usize::try_from(offset).ok())
                .and_then(|offset| widths.get(offset).copied())
                .unwrap_or(FALLBACK_WIDTH);
            u32::from(width)
        })
        .sum();
    #[allow(clippy::cast_precision_loss)]
    let ems = units as f32 / 1000.0;
    ems * size * PT_TO_MM
}

struct Cursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.margin_mm,
        }
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.margin_mm;
    }

    /// Whether `height` more millimetres fit on this page. Anything fits on a
    /// fresh page.
    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.geometry.bottom() || self.y <= self.geometry.margin_mm
    }

    /// Starts a new page unless `height` more millimetres fit on this one.
    fn ensure(&mut self, height: f32) {
        if !self.fits(height) {
            self.new_page();
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, y: f32, size: f32, bold: bool, text: &str) {
        self.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            text: text.to_string(),
        });
    }

    fn rule(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(DrawOp::Line { x1, y1, x2, y2 });
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool, line_height: f32) {
        self.ensure(line_height);
        self.y += line_height;
        let x = ((self.geometry.width_mm - text_width(text, size, bold)) / 2.0)
            .max(self.geometry.margin_mm);
        self.text(x, self.y, size, bold, text);
    }

    fn left(&mut self, x: f32, text: &str, size: f32, bold: bool, line_height: f32) {
        self.ensure(line_height);
        self.y += line_height;
        self.text(x, self.y, size, bold, text);
    }

    fn paragraph(&mut self, spans: &[Span], size: f32) {
        let left = self.geometry.margin_mm;
        for line in wrap(spans, size, self.geometry.content_width()) {
            self.ensure(BODY_LINE_MM);
            self.y += BODY_LINE_MM;
            let mut x = left;
            for word in line {
                if !word.joined && x > left {
                    x += text_width(" ", size, false);
                }
                self.text(x, self.y, size, word.bold, &word.text);
                x += text_width(&word.text, size, word.bold);
            }
        }
    }

    fn signature(&mut self, lines: &[String]) {
        let block_height = BODY_LINE_MM * lines.len() as f32;
        self.ensure(block_height);
        let x = self.geometry.width_mm - self.geometry.margin_mm - SIGNATURE_WIDTH_MM;
        for (index, line) in lines.iter().enumerate() {
            self.y += BODY_LINE_MM;
            self.text(x, self.y, BODY_SIZE, index == 0, line);
        }
    }

    /// Draws the table, repeating the header row at the top of every page
    /// the table continues on.
    fn table(&mut self, rows: &[TableRow]) {
        let header = rows
            .iter()
            .find(|row| matches!(row, TableRow::Header(_)))
            .map(|row| (row, table_cells(row)));

        for row in rows {
            let cells = table_cells(row);
            if !self.fits(row_height(&cells)) {
                self.new_page();
                if let Some((header, header_cells)) = &header {
                    if !matches!(row, TableRow::Header(_)) {
                        self.table_row(header, header_cells);
                    }
                }
            }
            self.table_row(row, &cells);
        }
    }

    fn table_row(&mut self, row: &TableRow, cells: &[Vec<String>]) {
        let left = self.geometry.margin_mm;
        let right = left + COLUMN_WIDTHS_MM.iter().sum::<f32>();
        let top = self.y;
        let bottom = top + row_height(cells);
        let first_baseline = top + ROW_HEIGHT_MM - 2.0;

        self.rule(left, top, right, top);
        self.rule(left, bottom, right, bottom);

        match row {
            TableRow::Header(_) | TableRow::Item(_) => {
                let bold = matches!(row, TableRow::Header(_));
                let mut x = left;
                self.rule(x, top, x, bottom);
                for (lines, width) in cells.iter().zip(COLUMN_WIDTHS_MM) {
                    self.cell(x, first_baseline, bold, lines);
                    x += width;
                    self.rule(x, top, x, bottom);
                }
            }
            TableRow::Total { label, .. } => {
                let split = right - AMOUNT_WIDTH_MM;
                self.rule(left, top, left, bottom);
                self.rule(split, top, split, bottom);
                self.rule(right, top, right, bottom);
                let label_x = split - CELL_PADDING_MM - text_width(label, TABLE_SIZE, true);
                self.text(label_x, first_baseline, TABLE_SIZE, true, label);
                if let Some(amount) = cells.first() {
                    self.cell(split, first_baseline, true, amount);
                }
            }
        }
        self.y = bottom;
    }

    fn cell(&mut self, x: f32, first_baseline: f32, bold: bool, lines: &[String]) {
        let mut baseline = first_baseline;
        for line in lines.iter().filter(|line| !line.is_empty()) {
            self.text(x + CELL_PADDING_MM, baseline, TABLE_SIZE, bold, line);
            baseline += CELL_LINE_MM;
        }
    }
}

const AMOUNT_WIDTH_MM: f32 = COLUMN_WIDTHS_MM[COLUMN_WIDTHS_MM.len() - 1];

/// Wrapped text of each cell; a totals row has only its amount cell.
fn table_cells(row: &TableRow) -> Vec<Vec<String>> {
    match row {
        TableRow::Header(cells) | TableRow::Item(cells) => {
            let bold = matches!(row, TableRow::Header(_));
            cells
                .iter()
                .zip(COLUMN_WIDTHS_MM)
                .map(|(cell, width)| {
                    wrap_cell(cell, width - 2.0 * CELL_PADDING_MM, TABLE_SIZE, bold)
                })
                .collect()
        }
        TableRow::Total { amount, .. } => vec![wrap_cell(
            amount,
            AMOUNT_WIDTH_MM - 2.0 * CELL_PADDING_MM,
            TABLE_SIZE,
            true,
        )],
    }
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    #[allow(clippy::cast_precision_loss)]
    let extra = (lines - 1) as f32;
    ROW_HEIGHT_MM + CELL_LINE_MM * extra
}

#[derive(Debug, Clone)]
struct Word {
    text: String,
    bold: bool,
    /// Printed directly after the previous word, with no space
    joined: bool,
}

fn wrap(spans: &[Span], size: f32, max_width: f32) -> Vec<Vec<Word>> {
    let mut words: Vec<Word> = Vec::new();
    let mut space_pending = false;
    for span in spans {
        let starts_with_space = span.text.starts_with(char::is_whitespace);
        for (index, part) in span.text.split_whitespace().enumerate() {
            let joined = index == 0 && !starts_with_space && !space_pending && !words.is_empty();
            words.push(Word {
                text: part.to_string(),
                bold: span.emphasized,
                joined,
            });
        }
        if !span.text.trim().is_empty() {
            space_pending = span.text.ends_with(char::is_whitespace);
        } else if !span.text.is_empty() {
            space_pending = true;
        }
    }

    // Joined words wrap together with the word they are attached to.
    let mut units: Vec<Vec<Word>> = Vec::new();
    for word in words {
        match units.last_mut() {
            Some(unit) if word.joined => unit.push(word),
            _ => units.push(vec![word]),
        }
    }

    let space = text_width(" ", size, false);
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut current: Vec<Word> = Vec::new();
    let mut width = 0.0;
    for unit in units {
        let unit_width: f32 = unit.iter().map(|w| text_width(&w.text, size, w.bold)).sum();
        let needed = if current.is_empty() { unit_width } else { space + unit_width };
        if !current.is_empty() && width + needed > max_width {
            lines.push(std::mem::take(&mut current));
            width = unit_width;
        } else {
            width += needed;
        }
        current.extend(unit);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    // The first word of each line starts at the margin.
    for line in &mut lines {
        if let Some(first) = line.first_mut() {
            first.joined = false;
        }
    }
    lines
}

/// Breaks cell text into lines no wider than `max_width`, at spaces where
/// possible. A word wider than the cell is split between characters.
fn wrap_cell(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width(&candidate, size, bold) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && text_width(&current, size, bold) > max_width {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Flows a document onto pages.
#[must_use]
pub fn layout(document: &SanctionDocument, geometry: PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(geometry);
    let left = geometry.margin_mm;
    let right = geometry.width_mm - geometry.margin_mm;

    for line in &document.letterhead {
        cursor.centered(line, LETTERHEAD_SIZE, true, 6.0);
    }
    cursor.y += 2.0;
    cursor.centered(&document.title, TITLE_SIZE, true, 7.0);
    cursor.y += 2.0;
    let y = cursor.y;
    cursor.rule(left, y, right, y);

    cursor.y += 2.0;
    cursor.paragraph(&document.intro, BODY_SIZE);

    cursor.y += 4.0;
    cursor.table(&document.table);

    cursor.y += 6.0;
    if cursor.y > document.closing_break_threshold_mm {
        cursor.new_page();
    }
    for paragraph in &document.closing {
        cursor.paragraph(&[Span::plain(paragraph.clone())], BODY_SIZE);
        cursor.y += 2.0;
    }

    cursor.y += 10.0;
    cursor.signature(&document.signature);

    cursor.y += 6.0;
    cursor.left(left, &document.reference, BODY_SIZE, false, BODY_LINE_MM);
    if !document.copy_to.is_empty() {
        cursor.y += 2.0;
        cursor.left(left, "Copy forwarded for information to:", BODY_SIZE, false, BODY_LINE_MM);
        for (index, recipient) in document.copy_to.iter().enumerate() {
            let line = format!("{}. {recipient}", index + 1);
            cursor.left(left + 5.0, &line, BODY_SIZE, false, BODY_LINE_MM);
        }
    }

    cursor.y += 10.0;
    cursor.signature(&document.signature);

    cursor.pages
}

/// Renders `order` to PDF bytes.
///
/// # Errors
/// Returns `Error::Render` if the PDF cannot be assembled.
pub fn render(order: &SanctionOrder, config: &DocumentConfig) -> Result<Vec<u8>> {
    let document = SanctionDocument::from_order(order, config);
    let pages = layout(&document, PageGeometry::A4);
    pdf::write_pdf(&document.title, &pages, PageGeometry::A4)
}
