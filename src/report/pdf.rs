//! PDF report rendering via `printpdf`.
//!
//! Builds the full report document in memory: title, timestamp, original
//! image, spot mask, color chart, metrics table and recommendations, laid
//! out with a simple y-cursor that opens a new page when a block does not
//! fit. Intermediate images are embedded directly from their in-memory
//! buffers; nothing is written to disk on any path.

use std::io::BufWriter;

use chrono::Utc;
use image::DynamicImage;
use printpdf::{
    BuiltinFont, Image as PdfImage, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference,
};
use tracing::debug;

use super::{chart, ReportError, ReportRenderer};
use crate::analysis::{metrics, PixelBuffer, SkinMetrics};
use crate::config::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const MARGIN_LEFT: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 18.0;
const CONTENT_TOP: f32 = PAGE_HEIGHT_MM - 20.0;

/// Photo and mask display box (4 x 3 inches).
const PHOTO_W: f32 = 101.6;
const PHOTO_H: f32 = 76.2;

/// Chart display box (4 x 2 inches).
const CHART_W: f32 = 101.6;
const CHART_H: f32 = 50.8;

/// Value column offset for the metrics table.
const VALUE_COLUMN: f32 = 90.0;

/// Embedded images are placed at this resolution before scaling.
const IMAGE_DPI: f32 = 300.0;

/// Renders analysis reports as single-flow PDF documents.
pub struct PdfReportRenderer;

impl ReportRenderer for PdfReportRenderer {
    fn render(
        &self,
        metrics_record: &SkinMetrics,
        image: &PixelBuffer,
        recommendations: &[String],
    ) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            "Skin Analysis Report",
            mm(PAGE_WIDTH_MM),
            mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;
        let courier = doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(|e| ReportError::Render(format!("PDF font error: {e}")))?;

        {
            let mut cur = Cursor {
                doc: &doc,
                layer: doc.get_page(page).get_layer(layer),
                y: CONTENT_TOP,
            };

            // Title and generation timestamp
            cur.text("Skin Analysis Report", 16.0, MARGIN_LEFT, &bold);
            cur.y -= 8.0;
            cur.text(
                &format!("Generated on: {}", Utc::now().format("%Y-%m-%d %H:%M:%S")),
                10.0,
                MARGIN_LEFT,
                &font,
            );
            cur.y -= 10.0;

            // Original image
            cur.heading("Original Image", &bold, PHOTO_H);
            cur.image(image.to_dynamic_image(), PHOTO_W, PHOTO_H);

            // Spot mask
            cur.heading("Spot Detection", &bold, PHOTO_H);
            cur.image(
                DynamicImage::ImageLuma8(metrics::spot_mask(image)),
                PHOTO_W,
                PHOTO_H,
            );

            // Color chart with channel labels under the bars
            cur.heading("Skin Color Analysis", &bold, CHART_H + 6.0);
            cur.image(
                DynamicImage::ImageRgb8(chart::color_bar_chart(&metrics_record.average_color)),
                CHART_W,
                CHART_H,
            );
            let centers = chart::bar_center_fractions();
            for (frac, label) in centers.iter().zip(["Blue", "Green", "Red"]) {
                let x = MARGIN_LEFT + frac * CHART_W - 3.0;
                cur.layer.use_text(label, 8.0 as _, mm(x), mm(cur.y), &font);
            }
            cur.y -= 8.0;

            // Metrics table
            cur.heading("Analysis Results", &bold, 30.0);
            cur.row("Parameter", "Value", &bold);
            cur.row("Skin Type", metrics_record.skin_type.label(), &courier);
            cur.row(
                "Brightness",
                &format!("{:.2}", metrics_record.brightness),
                &courier,
            );
            cur.row(
                "Spot Percentage",
                &format!("{:.2}%", metrics_record.spot_percentage * 100.0),
                &courier,
            );
            cur.row(
                "Texture: Roughness",
                &format!("{:.4}", metrics_record.texture.roughness),
                &courier,
            );
            cur.row(
                "Texture: Pattern uniformity",
                &format!("{:.4}", metrics_record.texture.pattern_uniformity),
                &courier,
            );
            cur.y -= 6.0;

            // Recommendations
            cur.heading("Recommendations", &bold, 12.0);
            for rec in recommendations {
                for line in wrap_text(&format!("· {rec}"), 85) {
                    cur.ensure_room(4.5);
                    cur.text(&line, 9.0, MARGIN_LEFT + 5.0, &font);
                }
                cur.y -= 1.5;
            }
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ReportError::Render(format!("PDF save error: {e}")))?;
        let bytes = buf
            .into_inner()
            .map_err(|e| ReportError::Render(format!("PDF buffer error: {e}")))?;

        debug!(bytes = bytes.len(), "Report rendered");
        Ok(bytes)
    }
}

/// Millimeter constructor; the cast keeps the call sites independent of the
/// precision `Mm` wraps.
fn mm(value: f32) -> Mm {
    Mm(value as _)
}

/// Y-cursor over the document: tracks the write position on the current
/// page and opens a fresh page when a block would cross the bottom margin.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl Cursor<'_> {
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < MARGIN_BOTTOM {
            let (page, layer) = self
                .doc
                .add_page(mm(PAGE_WIDTH_MM), mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = CONTENT_TOP;
        }
    }

    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.layer.use_text(text, size as _, mm(x), mm(self.y), font);
        self.y -= 4.5;
    }

    /// Section heading; reserves room for the heading plus the block below.
    fn heading(&mut self, title: &str, bold: &IndirectFontRef, block_height: f32) {
        self.ensure_room(block_height + 12.0);
        self.layer
            .use_text(title, 11.0 as _, mm(MARGIN_LEFT), mm(self.y), bold);
        self.y -= 6.0;
    }

    /// Two-column table row.
    fn row(&mut self, label: &str, value: &str, font: &IndirectFontRef) {
        self.ensure_room(4.5);
        self.layer
            .use_text(label, 9.0 as _, mm(MARGIN_LEFT + 5.0), mm(self.y), font);
        self.layer
            .use_text(value, 9.0 as _, mm(VALUE_COLUMN), mm(self.y), font);
        self.y -= 4.5;
    }

    /// Embed an in-memory image scaled into a fixed display box, top edge at
    /// the current cursor.
    fn image(&mut self, img: DynamicImage, target_w: f32, target_h: f32) {
        let natural_w = img.width() as f32 * 25.4 / IMAGE_DPI;
        let natural_h = img.height() as f32 * 25.4 / IMAGE_DPI;

        self.y -= target_h;
        PdfImage::from_dynamic_image(&img).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(MARGIN_LEFT)),
                translate_y: Some(mm(self.y)),
                scale_x: Some((target_w / natural_w) as _),
                scale_y: Some((target_h / natural_h) as _),
                ..Default::default()
            },
        );
        self.y -= 6.0;
    }
}

/// Simple word-wrap for recommendation lines.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::solid_buffer;
    use crate::analysis::{classify, metrics as metrics_mod};

    fn rendered(recs: &[String]) -> Vec<u8> {
        let buffer = solid_buffer(20, 20, [180, 150, 120]);
        let record = metrics_mod::extract(&buffer);
        PdfReportRenderer
            .render(&record, &buffer, recs)
            .unwrap()
    }

    #[test]
    fn render_produces_a_pdf_document() {
        let buffer = solid_buffer(20, 20, [180, 150, 120]);
        let record = metrics_mod::extract(&buffer);
        let recs = classify::recommendations(&record);

        let bytes = rendered(&recs);
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn long_recommendation_lists_flow_onto_further_pages() {
        let many: Vec<String> = (0..120)
            .map(|i| format!("Recommendation number {i} with enough words to wrap onto lines."))
            .collect();
        let long = rendered(&many);
        let short = rendered(&["One.".to_string()]);
        assert!(long.len() > short.len());
    }

    #[test]
    fn wrap_text_respects_max_width() {
        let lines = wrap_text("one two three four five six seven", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.len() <= 10));
    }

    #[test]
    fn wrap_text_keeps_single_short_line() {
        assert_eq!(wrap_text("short line", 80), vec!["short line".to_string()]);
    }
}
