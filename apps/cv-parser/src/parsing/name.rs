//! Name resolution — an ordered chain of strategies, first success wins.
//!
//! Chain: entity recognition → `Ім'я:` label → `ПІБ` label → bare two-word line.
//! The most permissive pattern runs last. Every strategy checks its candidate
//! against the same `NameBlocklist`.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::parsing::recognizer::{EntityLabel, EntityRecognizer};

/// Generic technology and role terms that name-shaped matches must not return.
pub const DEFAULT_NAME_BLOCKLIST: &[&str] = &[
    "Java",
    "Python",
    "SQL",
    "JavaScript",
    "Excel",
    "Room",
    "Engineer",
    "Developer",
];

static LABELED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bІм['’]я\s*[:\-]?\s*([А-ЯІЇЄҐ][а-яіїєґ']+\s[А-ЯІЇЄҐ][а-яіїєґ']+)\b")
        .expect("labeled name pattern is valid")
});

static LABELED_FULL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bПІБ\s*[:\-]?\s*([А-ЯІЇЄҐ][а-яіїєґ']+\s[А-ЯІЇЄҐ][а-яіїєґ']+)\b")
        .expect("labeled full name pattern is valid")
});

static LEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*([А-ЯІЇЄҐ][а-яіїєґ']+\s[А-ЯІЇЄҐ][а-яіїєґ']+)")
        .expect("leading line pattern is valid")
});

/// Strings rejected as personal names. Case-sensitive, exact match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameBlocklist(HashSet<String>);

impl NameBlocklist {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, candidate: &str) -> bool {
        self.0.contains(candidate)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for NameBlocklist {
    fn default() -> Self {
        Self::new(DEFAULT_NAME_BLOCKLIST.iter().copied())
    }
}

/// One step of the resolution chain.
pub trait NameStrategy: Send + Sync {
    fn label(&self) -> &'static str;

    fn resolve(&self, text: &str, blocklist: &NameBlocklist) -> Option<String>;
}

/// First Person entity whose surface text is not blocklisted, trimmed.
pub struct EntityStrategy {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl EntityStrategy {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }
}

impl NameStrategy for EntityStrategy {
    fn label(&self) -> &'static str {
        "entity"
    }

    fn resolve(&self, text: &str, blocklist: &NameBlocklist) -> Option<String> {
        self.recognizer
            .recognize(text)
            .into_iter()
            .find(|e| e.label == EntityLabel::Person && !blocklist.contains(&e.text))
            .map(|e| e.text.trim().to_string())
    }
}

/// Capture group 1 of the first match only. A blocklisted capture fails the
/// strategy; later matches of the same pattern are not tried.
pub struct PatternStrategy {
    label: &'static str,
    pattern: &'static Regex,
}

impl PatternStrategy {
    pub fn labeled_name() -> Self {
        Self {
            label: "labeled_name",
            pattern: &LABELED_NAME,
        }
    }

    pub fn labeled_full_name() -> Self {
        Self {
            label: "labeled_full_name",
            pattern: &LABELED_FULL_NAME,
        }
    }

    pub fn leading_line() -> Self {
        Self {
            label: "leading_line",
            pattern: &LEADING_LINE,
        }
    }
}

impl NameStrategy for PatternStrategy {
    fn label(&self) -> &'static str {
        self.label
    }

    fn resolve(&self, text: &str, blocklist: &NameBlocklist) -> Option<String> {
        let candidate = self.pattern.captures(text)?.get(1)?.as_str();
        if blocklist.contains(candidate) {
            return None;
        }
        Some(candidate.trim().to_string())
    }
}

pub struct NameResolver {
    strategies: Vec<Box<dyn NameStrategy>>,
    blocklist: NameBlocklist,
}

impl NameResolver {
    /// Default chain with the given recognizer in first position.
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, blocklist: NameBlocklist) -> Self {
        Self::with_strategies(
            vec![
                Box::new(EntityStrategy::new(recognizer)),
                Box::new(PatternStrategy::labeled_name()),
                Box::new(PatternStrategy::labeled_full_name()),
                Box::new(PatternStrategy::leading_line()),
            ],
            blocklist,
        )
    }

    pub fn with_strategies(
        strategies: Vec<Box<dyn NameStrategy>>,
        blocklist: NameBlocklist,
    ) -> Self {
        Self {
            strategies,
            blocklist,
        }
    }

    pub fn resolve(&self, text: &str) -> Option<String> {
        self.strategies.iter().find_map(|strategy| {
            let name = strategy.resolve(text, &self.blocklist)?;
            debug!("Name resolved by '{}' strategy", strategy.label());
            Some(name)
        })
    }

    pub fn strategy_labels(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.label()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::recognizer::{Entity, LexiconRecognizer, NoopRecognizer};

    /// Returns a fixed entity list regardless of input.
    struct StubRecognizer(Vec<Entity>);

    impl EntityRecognizer for StubRecognizer {
        fn recognize(&self, _text: &str) -> Vec<Entity> {
            self.0.clone()
        }

        fn backend(&self) -> &'static str {
            "stub"
        }
    }

    fn resolver_with(entities: Vec<Entity>) -> NameResolver {
        NameResolver::new(Arc::new(StubRecognizer(entities)), NameBlocklist::default())
    }

    fn patterns_only() -> NameResolver {
        NameResolver::new(Arc::new(NoopRecognizer), NameBlocklist::default())
    }

    #[test]
    fn test_default_chain_order() {
        assert_eq!(
            patterns_only().strategy_labels(),
            vec!["entity", "labeled_name", "labeled_full_name", "leading_line"]
        );
    }

    #[test]
    fn test_entity_wins_over_patterns() {
        let resolver = resolver_with(vec![Entity::person("  Марія Левченко ")]);
        let name = resolver.resolve("Ім'я: Олена Коваль");
        assert_eq!(name.as_deref(), Some("Марія Левченко"));
    }

    #[test]
    fn test_blocklisted_entity_is_skipped() {
        let resolver = resolver_with(vec![Entity::person("Python"), Entity::person("Іван Бойко")]);
        assert_eq!(resolver.resolve("").as_deref(), Some("Іван Бойко"));
    }

    #[test]
    fn test_blocklisted_entity_falls_through_to_patterns() {
        let resolver = resolver_with(vec![Entity::person("Python")]);
        assert_eq!(
            resolver.resolve("ПІБ: Тарас Мельник").as_deref(),
            Some("Тарас Мельник")
        );
    }

    #[test]
    fn test_only_blocklisted_signal_yields_none() {
        let resolver = resolver_with(vec![Entity::person("Python")]);
        assert_eq!(resolver.resolve("Python\nDeveloper"), None);
    }

    #[test]
    fn test_non_person_entities_are_ignored() {
        let resolver = resolver_with(vec![Entity::organization("Акме ЛТД")]);
        assert_eq!(resolver.resolve("акме"), None);
    }

    #[test]
    fn test_lexicon_organization_does_not_become_name() {
        let resolver = NameResolver::new(
            Arc::new(LexiconRecognizer::with_default_lexicon()),
            NameBlocklist::default(),
        );
        let name = resolver.resolve("Директор ТОВ Альфа\nОлена Коваль");
        assert_eq!(name.as_deref(), Some("Олена Коваль"));
    }

    #[test]
    fn test_labeled_name() {
        let name = patterns_only().resolve("Резюме\nІм'я: Олена Коваль\nТел: +380671234567");
        assert_eq!(name.as_deref(), Some("Олена Коваль"));
    }

    #[test]
    fn test_labeled_name_typographic_apostrophe_and_dash() {
        let name = patterns_only().resolve("контакт\nІм’я - Ярослав Гнатюк");
        assert_eq!(name.as_deref(), Some("Ярослав Гнатюк"));
    }

    #[test]
    fn test_labeled_full_name() {
        let name = patterns_only().resolve("анкета\nПІБ: Тарас Мельник");
        assert_eq!(name.as_deref(), Some("Тарас Мельник"));
    }

    #[test]
    fn test_labeled_name_preferred_over_full_name() {
        let name = patterns_only().resolve("ПІБ: Тарас Мельник\nІм'я: Олена Коваль");
        assert_eq!(name.as_deref(), Some("Олена Коваль"));
    }

    #[test]
    fn test_leading_line_fallback() {
        let name = patterns_only().resolve("контакти\n  Богдан Савчук\nРозробник");
        assert_eq!(name.as_deref(), Some("Богдан Савчук"));
    }

    #[test]
    fn test_nothing_matches() {
        assert_eq!(patterns_only().resolve("john doe, python developer"), None);
        assert_eq!(patterns_only().resolve(""), None);
    }

    #[test]
    fn test_blocked_capture_moves_to_next_pattern_only() {
        let resolver = NameResolver::new(
            Arc::new(NoopRecognizer),
            NameBlocklist::new(["Олена Коваль"]),
        );
        assert_eq!(resolver.resolve("Ім'я: Олена Коваль"), None);
        assert_eq!(
            resolver.resolve("Ім'я: Олена Коваль\nПІБ: Олена Іваненко").as_deref(),
            Some("Олена Іваненко")
        );
    }

    #[test]
    fn test_blocklist_is_case_sensitive() {
        let blocklist = NameBlocklist::default();
        assert!(blocklist.contains("Python"));
        assert!(!blocklist.contains("python"));
        assert_eq!(blocklist.len(), DEFAULT_NAME_BLOCKLIST.len());
    }

    #[test]
    fn test_strategy_in_isolation() {
        let blocklist = NameBlocklist::default();
        let strategy = PatternStrategy::leading_line();
        assert_eq!(
            strategy.resolve("Олена Коваль", &blocklist).as_deref(),
            Some("Олена Коваль")
        );
        assert_eq!(PatternStrategy::labeled_full_name().resolve("Олена Коваль", &blocklist), None);
    }
}
