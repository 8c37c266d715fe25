use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ExperienceEntry;

/// Known job titles tried before the catch-all line.
pub const KNOWN_TITLES: &[&str] = &[
    "Старший розробник",
    "Розробник",
    "Менеджер проектів",
    "Інженер",
];

/// `title \n company \n YYYY-YYYY`. The trailing `.*` alternative makes any
/// line a candidate title; only the year-range line constrains a match.
static JOB: LazyLock<Regex> = LazyLock::new(|| {
    let titles = KNOWN_TITLES
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"({titles}|.*)\n(.*)\n(\d{{4}}[-–—]\d{{4}})"))
        .expect("job pattern is valid")
});

/// Collects every title/company/year-range segment in document order.
/// Segments are not deduplicated or merged.
pub fn extract_experience(text: &str) -> Vec<ExperienceEntry> {
    JOB.captures_iter(text)
        .map(|caps| ExperienceEntry {
            title: caps[1].trim().to_string(),
            company: caps[2].trim().to_string(),
            dates: caps[3].trim().to_string(),
            responsibilities: Vec::new(),
        })
        .collect()
}
