//! Text-to-page layout for study plan documents.
//!
//! Pure and synchronous: blocks are composed from the request and the generated
//! text, word-wrapped against the Helvetica width table, and placed on pages.
//! Coordinates on [`PlacedLine`] are PDF user space (origin bottom-left, mm).

use std::mem;

use crate::planning::models::PlanningRequest;
use crate::render::font_metrics::{FontMetricTable, PageConfig, MM_PER_PT};
use crate::render::sanitize::sanitize_for_pdf;

pub const DOCUMENT_TITLE: &str = "Structured 5-Day Study Plan";

/// Gap between the title and the metadata lines.
const TITLE_GAP_MM: f32 = 5.0;
/// Gap between the metadata lines and the plan body.
const BODY_GAP_MM: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Layout types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Title,
    Metadata,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    /// Sanitized text of the block before wrapping.
    pub text: String,
    pub space_before_mm: f32,
}

/// A block after wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutBlock {
    pub kind: BlockKind,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x_mm: f32,
    /// Baseline height above the bottom page edge.
    pub baseline_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<PlacedLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub blocks: Vec<LaidOutBlock>,
    /// Always at least one page.
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    pub fn body_block_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
            .count()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the title, the three metadata lines, and one paragraph per trimmed
/// non-empty line of `plan_text`, in source order.
pub fn compose_blocks(request: &PlanningRequest, plan_text: &str) -> Vec<Block> {
    let mut blocks = vec![
        Block {
            kind: BlockKind::Title,
            text: DOCUMENT_TITLE.to_string(),
            space_before_mm: 0.0,
        },
        Block {
            kind: BlockKind::Metadata,
            text: sanitize_for_pdf(&format!("Goal: {}", request.goal.trim())),
            space_before_mm: TITLE_GAP_MM,
        },
        Block {
            kind: BlockKind::Metadata,
            text: sanitize_for_pdf(&format!(
                "Daily Study Time: {} hrs",
                request.hours_per_day.trim()
            )),
            space_before_mm: 0.0,
        },
        Block {
            kind: BlockKind::Metadata,
            text: sanitize_for_pdf(&format!(
                "Time Slot: {} - {}",
                request.time_slot.start.trim(),
                request.time_slot.end.trim()
            )),
            space_before_mm: 0.0,
        },
    ];

    let mut first_paragraph = true;
    for line in plan_text.lines() {
        let text = sanitize_for_pdf(line);
        let text = text.trim();
        if text.is_empty() {
            continue;
        }
        blocks.push(Block {
            kind: BlockKind::Paragraph,
            text: text.to_string(),
            space_before_mm: if first_paragraph { BODY_GAP_MM } else { 0.0 },
        });
        first_paragraph = false;
    }

    blocks
}

// ────────────────────────────────────────────────────────────────────────────
// Wrapping
// ────────────────────────────────────────────────────────────────────────────

/// Greedy word wrap at `max_width_em`. Words wider than a full line are broken
/// by character. Whitespace runs collapse to one space. Empty text yields no lines.
pub fn wrap_text(text: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_oversized(word, metrics, max_width_em) {
            let piece_w = metrics.measure_str(&piece);

            if current.is_empty() {
                current = piece;
                current_width = piece_w;
                continue;
            }

            let candidate = current_width + metrics.space_width + piece_w;
            if candidate > max_width_em {
                lines.push(mem::take(&mut current));
                current = piece;
                current_width = piece_w;
            } else {
                current.push(' ');
                current.push_str(&piece);
                current_width = candidate;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_oversized(word: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    if metrics.measure_str(word) <= max_width_em {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_width(c);
        if !piece.is_empty() && width + w > max_width_em {
            pieces.push(mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Wraps every block and places its lines top to bottom, starting a new page
/// whenever the next line would cross the bottom margin.
pub fn layout_document(
    blocks: &[Block],
    config: &PageConfig,
    metrics: &FontMetricTable,
) -> DocumentLayout {
    let max_width_em = config.text_width_em();
    let page_bottom = config.page_height_mm - config.margin_bottom_mm;
    let font_mm = config.font_size_pt * MM_PER_PT;
    // Baseline sits mid-line, nudged down by a fraction of the font height.
    let baseline_offset = config.line_height_mm / 2.0 + 0.3 * font_mm;

    let mut laid_out = Vec::with_capacity(blocks.len());
    let mut pages = vec![PageLayout::default()];
    let mut cursor = config.margin_top_mm;

    for block in blocks {
        let lines = wrap_text(&block.text, metrics, max_width_em);

        // A gap never carries over to the top of a fresh page.
        if cursor + block.space_before_mm + config.line_height_mm > page_bottom {
            pages.push(PageLayout::default());
            cursor = config.margin_top_mm;
        } else {
            cursor += block.space_before_mm;
        }

        for line in &lines {
            if cursor + config.line_height_mm > page_bottom {
                pages.push(PageLayout::default());
                cursor = config.margin_top_mm;
            }

            let x_mm = match block.kind {
                BlockKind::Title => {
                    let width = metrics.measure_mm(line, config.font_size_pt);
                    config.margin_left_mm + ((config.text_width_mm() - width) / 2.0).max(0.0)
                }
                BlockKind::Metadata | BlockKind::Paragraph => config.margin_left_mm,
            };

            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine {
                    text: line.clone(),
                    x_mm,
                    baseline_mm: config.page_height_mm - (cursor + baseline_offset),
                });
            }
            cursor += config.line_height_mm;
        }

        laid_out.push(LaidOutBlock {
            kind: block.kind,
            lines,
        });
    }

    DocumentLayout {
        blocks: laid_out,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::models::TimeSlot;
    use crate::render::font_metrics::{default_page_config, HELVETICA};

    fn spanish() -> PlanningRequest {
        PlanningRequest {
            goal: "Learn Spanish".into(),
            hours_per_day: "2".into(),
            time_slot: TimeSlot {
                start: "18:00".into(),
                end: "20:00".into(),
            },
        }
    }

    fn layout(plan_text: &str) -> DocumentLayout {
        let blocks = compose_blocks(&spanish(), plan_text);
        layout_document(&blocks, &default_page_config(), &HELVETICA)
    }

    #[test]
    fn test_header_and_metadata_order() {
        let blocks = compose_blocks(&spanish(), "");
        let texts: Vec<&str> = blocks.iter().map(|b| b.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Structured 5-Day Study Plan",
                "Goal: Learn Spanish",
                "Daily Study Time: 2 hrs",
                "Time Slot: 18:00 - 20:00",
            ]
        );
        assert_eq!(blocks[0].kind, BlockKind::Title);
        assert!(blocks[1..].iter().all(|b| b.kind == BlockKind::Metadata));
    }

    #[test]
    fn test_empty_text_has_no_body_blocks() {
        let doc = layout("");
        assert_eq!(doc.blocks.len(), 4);
        assert_eq!(doc.body_block_count(), 0);
        assert_eq!(doc.pages.len(), 1);
        assert_eq!(doc.pages[0].lines.len(), 4);
    }

    #[test]
    fn test_one_paragraph_per_qualifying_line_in_order() {
        let doc = layout("  Day 1: Mon \n\n   \nTopics: Greetings\n\tTime Allotted: 18:00-20:00");
        let body: Vec<&LaidOutBlock> = doc
            .blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Paragraph)
            .collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].lines, vec!["Day 1: Mon"]);
        assert_eq!(body[1].lines, vec!["Topics: Greetings"]);
        assert_eq!(body[2].lines, vec!["Time Allotted: 18:00-20:00"]);
    }

    #[test]
    fn test_title_is_centered_and_metadata_left_aligned() {
        let doc = layout("");
        let cfg = default_page_config();
        let lines = &doc.pages[0].lines;
        assert!(lines[0].x_mm > cfg.margin_left_mm + 10.0);
        for meta in &lines[1..4] {
            assert_eq!(meta.x_mm, cfg.margin_left_mm);
        }
    }

    #[test]
    fn test_gaps_between_sections() {
        let doc = layout("Day 1");
        let cfg = default_page_config();
        let lines = &doc.pages[0].lines;
        // title -> goal: one line plus the title gap
        let title_to_goal = lines[0].baseline_mm - lines[1].baseline_mm;
        assert!((title_to_goal - (cfg.line_height_mm + TITLE_GAP_MM)).abs() < 1e-3);
        // time slot -> first body line: one line plus the body gap
        let meta_to_body = lines[3].baseline_mm - lines[4].baseline_mm;
        assert!((meta_to_body - (cfg.line_height_mm + BODY_GAP_MM)).abs() < 1e-3);
    }

    #[test]
    fn test_long_line_wraps_instead_of_overflowing() {
        let long = "Review irregular preterite verbs with spaced repetition flashcards ".repeat(6);
        let doc = layout(&long);
        let cfg = default_page_config();
        let body = doc.blocks.last().unwrap();
        assert!(body.lines.len() > 1);
        for line in &body.lines {
            assert!(HELVETICA.measure_str(line) <= cfg.text_width_em() + 1e-3);
        }
        // nothing lost in wrapping
        let rejoined = body.lines.join(" ");
        assert_eq!(rejoined, long.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_oversized_word_is_broken() {
        let word = "W".repeat(200);
        let lines = wrap_text(&word, &HELVETICA, 20.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        assert!(lines.iter().all(|l| HELVETICA.measure_str(l) <= 20.0 + 1e-3));
    }

    #[test]
    fn test_many_lines_paginate_within_margins() {
        let text: String = (1..=60).map(|i| format!("Line {i}\n")).collect();
        let doc = layout(&text);
        let cfg = default_page_config();
        assert!(doc.pages.len() >= 3);
        assert_eq!(doc.body_block_count(), 60);
        for page in &doc.pages {
            for line in &page.lines {
                assert!(line.baseline_mm > cfg.margin_bottom_mm);
                assert!(line.baseline_mm < cfg.page_height_mm - cfg.margin_top_mm);
            }
        }
        // source order survives pagination
        let body: Vec<&str> = doc
            .pages
            .iter()
            .flat_map(|p| p.lines.iter())
            .skip(4)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(body.first(), Some(&"Line 1"));
        assert_eq!(body.last(), Some(&"Line 60"));
    }

    #[test]
    fn test_unsupported_glyphs_are_sanitized_in_blocks() {
        let blocks = compose_blocks(&spanish(), "Día 1 \u{2014} “Hola” 📚 日本");
        assert_eq!(blocks.last().unwrap().text, "Día 1 \u{2014} “Hola” ? ??");
    }

    #[test]
    fn test_accented_text_reaches_the_page() {
        let mut request = spanish();
        request.goal = "Aprender español".into();
        let blocks = compose_blocks(&request, "Día 1: verbos, café y más");
        let doc = layout_document(&blocks, &default_page_config(), &HELVETICA);

        let placed: Vec<&str> = doc.pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert!(placed.contains(&"Goal: Aprender español"));
        assert!(placed.contains(&"Día 1: verbos, café y más"));
    }

    #[test]
    fn test_invisible_only_lines_are_not_body_blocks() {
        let doc = layout("\u{200B}\n\u{FEFF}\u{0007}\n \u{200D} \nDay 1");
        assert_eq!(doc.body_block_count(), 1);
        assert!(doc.blocks.iter().all(|b| !b.lines.is_empty()));

        // the body gap lands before the first visible line
        let cfg = default_page_config();
        let lines = &doc.pages[0].lines;
        let meta_to_body = lines[3].baseline_mm - lines[4].baseline_mm;
        assert!((meta_to_body - (cfg.line_height_mm + BODY_GAP_MM)).abs() < 1e-3);
    }
}
