//! PDF serialization and the transient file that carries it to the client.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};
use uuid::Uuid;

use crate::render::font_metrics::PageConfig;
use crate::render::layout::{DocumentLayout, DOCUMENT_TITLE};
use crate::render::RenderError;

/// Serializes a laid-out document to PDF bytes using the built-in Helvetica font.
pub fn write_pdf(layout: &DocumentLayout, config: &PageConfig) -> Result<Vec<u8>, RenderError> {
    let width = Mm(config.page_width_mm);
    let height = Mm(config.page_height_mm);

    let (doc, first_page, first_layer) = PdfDocument::new(DOCUMENT_TITLE, width, height, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    for (idx, page) in layout.pages.iter().enumerate() {
        let (page_idx, layer_idx) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, format!("Layer {}", idx + 1))
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));

        for line in &page.lines {
            layer.use_text(
                line.text.as_str(),
                config.font_size_pt,
                Mm(line.x_mm),
                Mm(line.baseline_mm),
                &font,
            );
        }
    }

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

/// Writes `bytes` to a uniquely named file in `dir` and returns a read handle.
///
/// The path is removed before this returns: the handle keeps the data readable
/// for streaming, and nothing is left behind whether the send succeeds or not.
pub fn persist_transient(bytes: &[u8], dir: &Path, request_id: Uuid) -> Result<File, RenderError> {
    let id = request_id.simple().to_string();
    let prefix = format!("study_plan_{}_", &id[..8]);
    let mut temp = tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".pdf")
        .tempfile_in(dir)?;

    temp.write_all(bytes)?;
    temp.flush()?;

    let reader = temp.reopen()?;
    temp.close()?;
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::planning::models::{PlanningRequest, TimeSlot};
    use crate::render::font_metrics::{default_page_config, HELVETICA};
    use crate::render::layout::{compose_blocks, layout_document};

    fn sample_layout(plan_text: &str) -> DocumentLayout {
        let request = PlanningRequest {
            goal: "Learn Spanish".into(),
            hours_per_day: "2".into(),
            time_slot: TimeSlot {
                start: "18:00".into(),
                end: "20:00".into(),
            },
        };
        let blocks = compose_blocks(&request, plan_text);
        layout_document(&blocks, &default_page_config(), &HELVETICA)
    }

    #[test]
    fn test_write_pdf_produces_pdf_bytes() {
        let bytes = write_pdf(&sample_layout("Day 1: Mon\nTopics: Greetings"), &default_page_config())
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_write_pdf_header_only_document() {
        let bytes = write_pdf(&sample_layout(""), &default_page_config()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_multi_page_document_is_larger() {
        let cfg = default_page_config();
        let short = write_pdf(&sample_layout("Day 1"), &cfg).unwrap();
        let text: String = (1..=80).map(|i| format!("Day {i}: review\n")).collect();
        let long_layout = sample_layout(&text);
        assert!(long_layout.pages.len() > 1);
        let long = write_pdf(&long_layout, &cfg).unwrap();
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_persist_transient_leaves_no_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = persist_transient(b"%PDF-1.3 test", dir.path(), Uuid::new_v4()).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"%PDF-1.3 test");
    }

    #[test]
    fn test_persist_transient_same_request_id_does_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        let mut first = persist_transient(b"first", dir.path(), id).unwrap();
        let mut second = persist_transient(b"second", dir.path(), id).unwrap();

        let mut contents = Vec::new();
        first.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"first");
        contents.clear();
        second.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_transient_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = persist_transient(b"x", &missing, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }
}
