use crate::core::models::ContentKind;

/// Instruction placed at the top of every generation prompt
pub const BASE_PROMPT: &str = "Please provide a comprehensive summary of the following content in 5-7 bullet points, highlighting the key insights and main takeaways:";

/// Section label used when the content kind is not recognized
pub const GENERIC_LABEL: &str = "Content";

/// Builds the generation prompt for `content` of the given kind.
///
/// Pure: the same inputs always produce the same prompt.
#[must_use]
pub fn build_prompt(content: &str, kind: ContentKind) -> String {
    format_prompt(kind.label(), content)
}

/// Same as [`build_prompt`] but takes the kind by wire name, falling back to
/// the generic label for anything unrecognized.
#[must_use]
pub fn build_prompt_for_label(content: &str, kind: &str) -> String {
    let label = ContentKind::parse(kind).map_or(GENERIC_LABEL, ContentKind::label);
    format_prompt(label, content)
}

fn format_prompt(label: &str, content: &str) -> String {
    format!("{BASE_PROMPT}\n\n{label}:\n{content}")
}
