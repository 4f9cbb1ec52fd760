// Document Renderer: generated plan text -> paginated PDF.
// Layout and serialization are CPU-bound; callers run `render_document` inside
// tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;
pub mod sanitize;

use std::fs::File;
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::planning::models::PlanningRequest;

pub use font_metrics::{default_page_config, PageConfig};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A rendered plan, ready to stream. The backing path is already gone.
#[derive(Debug)]
pub struct RenderedDocument {
    pub file: File,
    pub size_bytes: u64,
    pub page_count: usize,
    pub body_blocks: usize,
}

/// Lays out, serializes and stages one study plan document.
pub fn render_document(
    request: &PlanningRequest,
    plan_text: &str,
    config: &PageConfig,
    output_dir: &Path,
    request_id: Uuid,
) -> Result<RenderedDocument, RenderError> {
    let blocks = layout::compose_blocks(request, plan_text);
    let doc_layout = layout::layout_document(&blocks, config, &font_metrics::HELVETICA);
    let bytes = pdf::write_pdf(&doc_layout, config)?;

    debug!(
        "Rendered {} pages, {} body blocks, {} bytes",
        doc_layout.pages.len(),
        doc_layout.body_block_count(),
        bytes.len()
    );

    let file = pdf::persist_transient(&bytes, output_dir, request_id)?;

    Ok(RenderedDocument {
        file,
        size_bytes: bytes.len() as u64,
        page_count: doc_layout.pages.len(),
        body_blocks: doc_layout.body_block_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::models::TimeSlot;

    #[test]
    fn test_render_document_counts_body_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let request = PlanningRequest {
            goal: "Learn Spanish".into(),
            hours_per_day: "2".into(),
            time_slot: TimeSlot {
                start: "18:00".into(),
                end: "20:00".into(),
            },
        };
        let doc = render_document(
            &request,
            "Day 1: Mon\n\nTopics: Greetings\n```",
            &default_page_config(),
            dir.path(),
            Uuid::new_v4(),
        )
        .unwrap();

        // the fence line is a non-empty line, so the document keeps it
        assert_eq!(doc.body_blocks, 3);
        assert_eq!(doc.page_count, 1);
        assert!(doc.size_bytes > 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
