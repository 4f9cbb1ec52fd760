// Prompt templates for the two planning endpoints.
// The document prompt only needs readable prose; the list prompt pins a literal
// per-day line template because the list endpoint splits on lines.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::planning::models::PlanningRequest;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"));

/// Document-variant prompt. Placeholders: `{goal}`, `{hours}`, `{start}`, `{end}`, `{start_date}`.
pub const DOCUMENT_PROMPT_TEMPLATE: &str = "\
Create a detailed 5-day study plan in structured format for the goal: {goal}. \
The user is available {hours} hours per day between {start} and {end}. \
Each day should include: Date, Day, Topics to Study, and Time Allotted. \
Format it as a neat list.
Plan start date: {start_date}";

/// List-variant prompt. Same placeholders as [`DOCUMENT_PROMPT_TEMPLATE`].
pub const LIST_PROMPT_TEMPLATE: &str = "\
Based on the goal: '{goal}'

Create a study plan that fits within these constraints:
- Daily available time: {hours} hours
- Time slot: {start} to {end}
Plan start date: {start_date}

Format each day exactly as follows:
Day [number]: [start date + day number]
Topics: [specific topics related to {goal}]
Time Allotted: [time slots within {start} - {end}]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptVariant {
    /// Prose plan destined for the PDF renderer.
    Document,
    /// Line-templated plan destined for the list normalizer.
    List,
}

/// Renders the instruction string for `variant`. Deterministic for a given date.
pub fn build_prompt(request: &PlanningRequest, variant: PromptVariant, start_date: NaiveDate) -> String {
    let template = match variant {
        PromptVariant::Document => DOCUMENT_PROMPT_TEMPLATE,
        PromptVariant::List => LIST_PROMPT_TEMPLATE,
    };

    let start_date = start_date.format("%Y-%m-%d").to_string();

    // Single pass over the template: substituted values are never rescanned.
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "goal" => request.goal.trim().to_string(),
            "hours" => request.hours_per_day.trim().to_string(),
            "start" => request.time_slot.start.trim().to_string(),
            "end" => request.time_slot.end.trim().to_string(),
            "start_date" => start_date.clone(),
            _ => caps[0].to_string(),
        })
        .into_owned()
}
