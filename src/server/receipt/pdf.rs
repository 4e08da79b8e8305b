//! Minimal PDF backend for receipt blocks.
//!
//! Emits a single-page document sized for an 80mm-class thermal printer:
//! 226pt wide, Helvetica base fonts, one text operation per block. The
//! output contains no timestamps or generated IDs, so identical blocks
//! produce identical bytes.

use super::{Align, Block};

const PAGE_WIDTH: f32 = 226.0;
const MIN_PAGE_HEIGHT: f32 = 600.0;
const MARGIN: f32 = 10.0;
const LINE_GAP: f32 = 2.0;
/// Average Helvetica glyph width as a fraction of the font size; close
/// enough to place centered and right-aligned lines on a 226pt page.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// Render blocks to PDF bytes.
pub(crate) fn render(blocks: &[Block]) -> Vec<u8> {
    let height = page_height(blocks);
    assemble(&content_stream(blocks, height), height)
}

/// The page grows with the item count; receipts print on continuous roll
/// paper, so a single long page beats pagination.
fn page_height(blocks: &[Block]) -> f32 {
    let text: f32 = blocks.iter().map(|b| b.size + LINE_GAP).sum();
    (text + 2.0 * MARGIN).max(MIN_PAGE_HEIGHT)
}

fn content_stream(blocks: &[Block], height: f32) -> String {
    let mut ops = String::new();
    let mut y = height - MARGIN;
    for block in blocks {
        y -= block.size;
        let font = if block.bold { "F2" } else { "F1" };
        let width = block.text.chars().count() as f32 * block.size * GLYPH_WIDTH_RATIO;
        let x = match block.align {
            Align::Left => MARGIN,
            Align::Center => ((PAGE_WIDTH - width) / 2.0).max(MARGIN),
            Align::Right => (PAGE_WIDTH - MARGIN - width).max(MARGIN),
        };
        ops.push_str(&format!(
            "BT /{} {:.1} Tf {:.1} {:.1} Td ({}) Tj ET\n",
            font,
            block.size,
            x,
            y,
            escape(&block.text)
        ));
        y -= LINE_GAP;
    }
    ops
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn assemble(content: &str, height: f32) -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.0} {:.0}] \
             /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>",
            PAGE_WIDTH, height
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ),
    ];

    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }
    let xref_at = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        )
        .as_bytes(),
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str, align: Align) -> Block {
        Block {
            text: text.to_string(),
            size: 9.0,
            bold: false,
            align,
        }
    }

    #[test]
    fn output_is_a_pdf_document() {
        let bytes = render(&[block("Bill No: 1", Align::Left)]);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains("(Bill No: 1) Tj"));
        assert!(body.contains("/BaseFont /Helvetica"));
    }

    #[test]
    fn bold_blocks_select_the_bold_font() {
        let bytes = render(&[Block {
            text: "TOTAL: Rs. 360.00".to_string(),
            size: 11.0,
            bold: true,
            align: Align::Right,
        }]);
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains("/F2 11.0 Tf"));
    }

    #[test]
    fn parentheses_are_escaped() {
        let bytes = render(&[block("Thali (large)", Align::Left)]);
        let body = String::from_utf8(bytes).unwrap();
        assert!(body.contains(r"(Thali \(large\)) Tj"));
    }

    #[test]
    fn identical_blocks_render_identical_bytes() {
        let blocks = vec![block("Naan x3  Rs. 60.00", Align::Left)];
        assert_eq!(render(&blocks), render(&blocks));
    }

    #[test]
    fn long_receipts_grow_the_page() {
        let blocks: Vec<Block> = (0..200)
            .map(|i| block(&format!("Item {i}"), Align::Left))
            .collect();
        let body = String::from_utf8(render(&blocks)).unwrap();
        // 200 lines at 11pt each cannot fit the minimum height
        assert!(!body.contains("/MediaBox [0 0 226 600]"));
    }
}
