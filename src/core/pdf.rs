//! PDF output for laid-out pages.
//!
//! Uses the built-in Helvetica faces, so no font files are needed at runtime.

use crate::{
    core::document::{DrawOp, Page, PageGeometry},
    errors::{Error, Result},
};
use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

const LAYER_NAME: &str = "Content";
const RULE_THICKNESS: f32 = 0.5;

fn render_error(context: &str, err: impl std::fmt::Display) -> Error {
    Error::Render {
        message: format!("{context}: {err}"),
    }
}

/// Draws `pages` into a PDF document and returns its bytes.
///
/// Page coordinates are measured from the top of the page; they are flipped
/// here to PDF's bottom-left origin.
pub fn write_pdf(title: &str, pages: &[Page], geometry: PageGeometry) -> Result<Vec<u8>> {
    let width = Mm(geometry.width_mm);
    let height = Mm(geometry.height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);

    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| render_error("Failed to load Helvetica", e))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| render_error("Failed to load Helvetica Bold", e))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) = doc.add_page(width, height, LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, geometry.height_mm, &regular, &bold);
    }

    doc.save_to_bytes()
        .map_err(|e| render_error("Failed to assemble PDF", e))
}

fn draw_page(
    layer: &PdfLayerReference,
    page: &Page,
    page_height: f32,
    regular: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.set_outline_thickness(RULE_THICKNESS);
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                bold: is_bold,
                text,
            } => {
                let font = if *is_bold { bold } else { regular };
                layer.use_text(text.as_str(), *size, Mm(*x), Mm(page_height - *y), font);
            }
            DrawOp::Line { x1, y1, x2, y2 } => {
                layer.add_line(Line {
                    points: vec![
                        (Point::new(Mm(*x1), Mm(page_height - *y1)), false),
                        (Point::new(Mm(*x2), Mm(page_height - *y2)), false),
                    ],
                    is_closed: false,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_pdf_multiple_pages() -> Result<()> {
        let page = Page {
            ops: vec![
                DrawOp::Text {
                    x: 15.0,
                    y: 20.0,
                    size: 10.0,
                    bold: false,
                    text: "Sanction".to_string(),
                },
                DrawOp::Line {
                    x1: 15.0,
                    y1: 22.0,
                    x2: 195.0,
                    y2: 22.0,
                },
            ],
        };
        let bytes = write_pdf("Test", &[page.clone(), page], PageGeometry::A4)?;
        assert!(bytes.starts_with(b"%PDF"));
        Ok(())
    }

    #[test]
    fn test_write_pdf_empty_document() -> Result<()> {
        let bytes = write_pdf("Empty", &[], PageGeometry::A4)?;
        assert!(bytes.starts_with(b"%PDF"));
        Ok(())
    }
}
