use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::EducationEntry;

/// Known institutions tried before the catch-all line.
pub const KNOWN_INSTITUTIONS: &[&str] = &[
    "Національний технічний університет",
    "Київський національний університет",
];

static STUDY: LazyLock<Regex> = LazyLock::new(|| {
    let institutions = KNOWN_INSTITUTIONS
        .iter()
        .map(|i| regex::escape(i))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"({institutions}|.*)\n(.*)\n(\d{{4}})"))
        .expect("education pattern is valid")
});

/// Collects every institution/specialty/year segment in document order.
pub fn extract_education(text: &str) -> Vec<EducationEntry> {
    STUDY
        .captures_iter(text)
        .map(|caps| EducationEntry {
            institution: caps[1].trim().to_string(),
            specialty: caps[2].trim().to_string(),
            graduation_year: caps[3].trim().to_string(),
        })
        .collect()
}
