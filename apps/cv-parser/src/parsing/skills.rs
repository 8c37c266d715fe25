/// Recognized skills, in output order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "Python",
    "JavaScript",
    "SQL",
    "Комунікативні навички",
    "Управління проектами",
];

/// Returns every vocabulary skill whose lowercase form occurs anywhere in the
/// lowercased text. Order follows `SKILL_VOCABULARY`, not the text.
pub fn match_skills(text: &str) -> Vec<String> {
    let text_lower = text.to_lowercase();
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| text_lower.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect()
}
