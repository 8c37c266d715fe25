//! Entity recognition — the pluggable capability behind the first name-resolution step.
//!
//! Default: `LexiconRecognizer` (rule-based, deterministic, loaded once at startup).
//! `NoopRecognizer` disables the step so only the textual patterns run.
//!
//! `AppState` and the batch runner hold an `Arc<dyn EntityRecognizer>`; tests inject stubs.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::info;

/// Kind of span detected by a recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
}

/// A labelled span of the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

impl Entity {
    pub fn person(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: EntityLabel::Person,
        }
    }

    pub fn organization(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: EntityLabel::Organization,
        }
    }
}

#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("Failed to read name lexicon {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Name lexicon {0} contains no names")]
    EmptyLexicon(String),
}

/// Implement this to swap recognition backends without touching the resolver.
/// Implementations must be read-only after construction; one instance is
/// shared across every document.
pub trait EntityRecognizer: Send + Sync {
    /// Returns detected entities in document order.
    fn recognize(&self, text: &str) -> Vec<Entity>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// NoopRecognizer
// ────────────────────────────────────────────────────────────────────────────

pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }

    fn backend(&self) -> &'static str {
        "noop"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LexiconRecognizer
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_GIVEN_NAMES: &[&str] = &[
    "Андрій", "Анна", "Богдан", "Валентина", "Василь", "Вікторія", "Віктор",
    "Володимир", "Галина", "Дарина", "Денис", "Дмитро", "Ірина", "Іван", "Катерина",
    "Марія", "Максим", "Микола", "Михайло", "Наталія", "Олег", "Олександр",
    "Олександра", "Олена", "Оксана", "Ольга", "Павло", "Петро", "Роман", "Сергій",
    "Світлана", "Софія", "Тарас", "Тетяна", "Юлія", "Юрій", "Ярослав", "Яна",
];

/// Extra capitalized words that may follow a given name within one span
/// (surname, patronymic).
const MAX_TRAILING_WORDS: usize = 2;

/// Legal-form tokens that mark a line as a company name.
const LEGAL_FORMS: &[&str] = &["ТОВ", "ПП", "ПАТ", "ПрАТ", "ЛТД", "LLC", "Ltd", "Inc"];

static CAPITALIZED_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Lu}[\p{Ll}'’]+(?:-\p{Lu}[\p{Ll}'’]+)?").expect("word pattern is valid")
});

/// Rule-based person and organization recognizer.
///
/// Algorithm, per line:
/// 1. A line containing a `LEGAL_FORMS` token is one Organization entity.
/// 2. Find capitalized words and group runs separated only by spaces or tabs.
/// 3. Within a run, a word found in the given-name lexicon opens a Person span
///    covering it and up to `MAX_TRAILING_WORDS` following words of the run.
/// 4. Scanning resumes after the span.
pub struct LexiconRecognizer {
    given_names: HashSet<String>,
}

impl LexiconRecognizer {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            given_names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Built-in lexicon of common Ukrainian given names.
    pub fn with_default_lexicon() -> Self {
        Self::new(DEFAULT_GIVEN_NAMES.iter().copied())
    }

    /// Loads a lexicon file: one name per line, blank lines and `#` comments skipped.
    pub fn from_file(path: &Path) -> Result<Self, RecognizerError> {
        let content = std::fs::read_to_string(path).map_err(|source| RecognizerError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let names: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .collect();

        if names.is_empty() {
            return Err(RecognizerError::EmptyLexicon(path.display().to_string()));
        }

        info!("Loaded {} given names from {}", names.len(), path.display());
        Ok(Self::new(names))
    }

    pub fn lexicon_size(&self) -> usize {
        self.given_names.len()
    }

    fn recognize_line(&self, line: &str, out: &mut Vec<Entity>) {
        if has_legal_form(line) {
            out.push(Entity::organization(line.trim()));
        }

        let words: Vec<_> = CAPITALIZED_WORD.find_iter(line).collect();

        let mut i = 0;
        while i < words.len() {
            if !self.given_names.contains(words[i].as_str()) {
                i += 1;
                continue;
            }

            let mut end = i;
            while end + 1 < words.len()
                && end - i < MAX_TRAILING_WORDS
                && is_inline_gap(&line[words[end].end()..words[end + 1].start()])
            {
                end += 1;
            }

            out.push(Entity::person(&line[words[i].start()..words[end].end()]));
            i = end + 1;
        }
    }
}

impl EntityRecognizer for LexiconRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for line in text.lines() {
            self.recognize_line(line, &mut entities);
        }
        entities
    }

    fn backend(&self) -> &'static str {
        "lexicon"
    }
}

fn has_legal_form(line: &str) -> bool {
    line.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .any(|token| LEGAL_FORMS.contains(&token))
}

fn is_inline_gap(gap: &str) -> bool {
    !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t')
}
