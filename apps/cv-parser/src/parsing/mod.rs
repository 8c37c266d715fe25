// Field-extraction pipeline: raw resume text in, `ResumeRecord` out.
// Extractors are pure functions of the same text and never see each other's output.

pub mod contact;
pub mod education;
pub mod experience;
pub mod handlers;
pub mod name;
pub mod recognizer;
pub mod skills;

use std::sync::Arc;

use crate::models::resume::ResumeRecord;
use crate::parsing::name::{NameBlocklist, NameResolver};
use crate::parsing::recognizer::EntityRecognizer;

/// Runs every extractor over one document's text and merges the results.
///
/// Holds only read-only state, so one instance is shared across requests and
/// batch workers behind an `Arc`.
pub struct ResumeParser {
    names: NameResolver,
}

impl ResumeParser {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, blocklist: NameBlocklist) -> Self {
        Self {
            names: NameResolver::new(recognizer, blocklist),
        }
    }

    pub fn parse(&self, text: &str) -> ResumeRecord {
        ResumeRecord {
            name: self.names.resolve(text),
            contact_info: contact::extract_contact_info(text),
            experience: experience::extract_experience(text),
            education: education::extract_education(text),
            skills: skills::match_skills(text),
        }
    }

    pub fn name_resolver(&self) -> &NameResolver {
        &self.names
    }
}
