//! Pattern-based named entity extraction

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entity::{Entity, EntityExtractor, EntityLabel};
use crate::domain::DomainError;

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTH_ABBREVIATIONS: &str = "Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

static MONEY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[$€£¥₹]\s?\d(?:[\d,]*\d)?(?:\.\d+)?(?:\s?(?:thousand|million|billion|trillion|[KMB]n?)\b)?)|(?:\b\d(?:[\d,]*\d)?(?:\.\d+)?(?:\s(?:thousand|million|billion|trillion))?\s(?:dollars|euros|pounds|rupees|yen|USD|EUR|GBP|INR)\b)",
    )
    .unwrap()
});

static PERCENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:%|\s?(?:percent|per cent)\b)").unwrap()
});

static DATE_REGEXES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // 4 July 2025
        Regex::new(&format!(
            r"\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS})(?:,?\s+\d{{4}})?\b"
        ))
        .unwrap(),
        // July 4, 2025 / July 2025 / Sept. 3
        Regex::new(&format!(
            r"\b(?:(?:{MONTHS})|(?:{MONTH_ABBREVIATIONS})\.?)(?:\s+\d{{1,2}}(?:st|nd|rd|th)?)?(?:,?\s+\d{{4}})?\b"
        ))
        .unwrap(),
        Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap(),
        Regex::new(&format!(r"\b(?:{WEEKDAYS})\b")).unwrap(),
        // 1990 / 1990s
        Regex::new(r"\b(?:1[5-9]|20)\d{2}s?\b").unwrap(),
    ]
});

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}[\p{L}\p{N}'’&-]*").unwrap());

/// Lower-case words allowed inside a multi-word name
const CONNECTORS: &[&str] = &["of", "and", "for", "the", "de"];

/// Capitalised words that do not start a name on their own
const LEADING_STOPWORDS: &[&str] = &[
    "The", "A", "An", "In", "On", "At", "By", "For", "From", "With", "As", "Of", "To", "It",
    "Its", "This", "That", "These", "Those", "He", "She", "They", "We", "I", "You", "His",
    "Her", "Their", "Our", "My", "Your", "But", "And", "Or", "If", "When", "While", "After",
    "Before", "Since", "Yesterday", "Today", "Tomorrow", "There", "Here", "According", "Is",
    "Are", "Was", "Were", "Did", "Does", "Do", "All", "Some", "Most", "Every", "No", "Not",
];

/// Words marking a name as an organisation
const ORGANIZATION_KEYWORDS: &[&str] = &[
    "Government", "Ministry", "Bank", "University", "Inc", "Corp", "Corporation", "Party",
    "Council", "Court", "Agency", "Department", "Company", "Institute", "Association",
    "Organization", "Organisation", "Committee", "Commission", "Foundation", "Ltd", "LLC",
    "Group", "Union", "Parliament", "Senate", "Congress", "Army", "Police", "Board",
];

/// Nationality and group adjectives
const DEMONYMS: &[&str] = &[
    "Indian", "American", "British", "English", "Scottish", "Welsh", "Irish", "French",
    "German", "Italian", "Spanish", "Portuguese", "Dutch", "Belgian", "Swiss", "Austrian",
    "Swedish", "Norwegian", "Danish", "Finnish", "Polish", "Russian", "Ukrainian", "Greek",
    "Turkish", "Chinese", "Japanese", "Korean", "Vietnamese", "Thai", "Indonesian",
    "Malaysian", "Filipino", "Pakistani", "Bangladeshi", "Nepali", "Afghan", "Iranian",
    "Iraqi", "Israeli", "Palestinian", "Saudi", "Egyptian", "Nigerian", "Kenyan",
    "Ethiopian", "African", "Canadian", "Mexican", "Brazilian", "Argentine", "Argentinian",
    "Chilean", "Colombian", "Peruvian", "Cuban", "Australian", "European", "Asian", "Arab",
    "Christian", "Muslim", "Hindu", "Buddhist", "Jewish", "Sikh", "Catholic", "Protestant",
    "Democrat", "Democratic", "Republican", "Communist", "Socialist",
];

/// Named entity extractor driven by regular expressions and capitalisation.
///
/// Dates, money amounts and percentages are matched first and claim their
/// spans. Remaining runs of capitalised words become `Organization`,
/// `Nationality` or `Name` entities.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedEntityExtractor;

impl RuleBasedEntityExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract entities in order of appearance
    pub fn extract_spans(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        claim_matches(text, &MONEY_REGEX, EntityLabel::Money, &mut entities);
        claim_matches(text, &PERCENT_REGEX, EntityLabel::Percent, &mut entities);
        for regex in DATE_REGEXES.iter() {
            claim_matches(text, regex, EntityLabel::Date, &mut entities);
        }

        let names = find_names(text, &entities);
        entities.extend(names);
        entities.sort_by_key(|e| e.start);
        entities
    }
}

fn overlaps(entities: &[Entity], start: usize, end: usize) -> bool {
    entities.iter().any(|e| start < e.end && e.start < end)
}

fn claim_matches(text: &str, regex: &Regex, label: EntityLabel, entities: &mut Vec<Entity>) {
    for m in regex.find_iter(text) {
        let matched = m.as_str().trim_end();
        if matched.is_empty() || overlaps(entities, m.start(), m.end()) {
            continue;
        }
        entities.push(Entity::new(matched, label, m.start(), m.start() + matched.len()));
    }
}

fn is_capitalized(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

fn find_names(text: &str, claimed: &[Entity]) -> Vec<Entity> {
    let mut names = Vec::new();
    let mut run: Vec<(usize, usize, &str)> = Vec::new();

    for m in WORD_REGEX.find_iter(text) {
        let word = m.as_str();

        if overlaps(claimed, m.start(), m.end()) {
            flush_run(text, &mut run, &mut names);
            continue;
        }

        if let Some(&(_, prev_end, _)) = run.last() {
            if !text[prev_end..m.start()].trim().is_empty() {
                flush_run(text, &mut run, &mut names);
            }
        }

        if is_capitalized(word) {
            if run.is_empty() && LEADING_STOPWORDS.contains(&word) {
                continue;
            }
            run.push((m.start(), m.end(), word));
        } else if !run.is_empty() && CONNECTORS.contains(&word) {
            run.push((m.start(), m.end(), word));
        } else {
            flush_run(text, &mut run, &mut names);
        }
    }

    flush_run(text, &mut run, &mut names);
    names
}

fn flush_run(text: &str, run: &mut Vec<(usize, usize, &str)>, names: &mut Vec<Entity>) {
    while run.last().is_some_and(|(_, _, w)| !is_capitalized(w)) {
        run.pop();
    }

    if let (Some(&(start, _, _)), Some(&(_, end, _))) = (run.first(), run.last()) {
        let span = &text[start..end];
        let span = span
            .strip_suffix("'s")
            .or_else(|| span.strip_suffix("’s"))
            .unwrap_or(span);

        let words: Vec<&str> = run.iter().map(|(_, _, w)| *w).collect();
        let label = if words.iter().any(|w| ORGANIZATION_KEYWORDS.contains(w))
            || (words.len() == 1 && span.len() >= 3 && span.chars().all(|c| c.is_uppercase()))
        {
            EntityLabel::Organization
        } else if words.len() == 1 && DEMONYMS.contains(&span) {
            EntityLabel::Nationality
        } else {
            EntityLabel::Name
        };

        names.push(Entity::new(span, label, start, start + span.len()));
    }

    run.clear();
}

#[async_trait]
impl EntityExtractor for RuleBasedEntityExtractor {
    async fn extract(&self, text: &str) -> Result<Vec<Entity>, DomainError> {
        Ok(self.extract_spans(text))
    }

    fn extractor_name(&self) -> &'static str {
        "rule_based"
    }
}
