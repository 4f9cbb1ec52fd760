//! List Normalizer — flattens generated plan text into clean lines.

const FENCE_MARKER: &str = "```";

/// Splits `text` on line breaks, trims each line, and drops empty lines and
/// code-fence lines. Order is preserved; no grouping or field extraction.
pub fn normalize_plan_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(FENCE_MARKER))
        .map(str::to_string)
        .collect()
}
