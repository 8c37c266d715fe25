use serde::{Deserialize, Serialize};

/// Phone and email found in a resume. Absent values serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// One work-history segment: title / company / year range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    /// Always empty; responsibility lines are not parsed.
    pub responsibilities: Vec<String>,
}

/// One education segment: institution / specialty / graduation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub specialty: String,
    pub graduation_year: String,
}

/// The structured output for a single resume document.
///
/// Every field is always serialized, even when `null` or empty, so consumers
/// only ever test values, never key presence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub contact_info: ContactInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

/// Envelope written by batch runs: `{"resumes": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeCollection {
    pub resumes: Vec<ResumeRecord>,
}
