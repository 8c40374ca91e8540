use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

pub const MAX_KEYWORDS: usize = 5;
const MAX_KEYWORD_WORDS: usize = 3;

static TAGGED_SECTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<step_5_keywords>(.*?)</step_5_keywords>").expect("tagged section regex")
});

static HEADING_SECTIONS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)Step 5[\s\-:.]+([^#]+)",
        r"(?is)top 5 most relevant keywords[\s\-:.]+([^#]+)",
        r"(?is)final list of.*?keywords[\s\-:.]+([^#]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("heading regex"))
    .collect()
});

static DOT_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("dot numbered regex"));

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s*").expect("numbered regex"));

static LIST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+[.)]\s*(.*?)$").expect("list line regex"));

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]").expect("bracketed regex"));

static WRAPPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^["'`\[]|["'`\]]$"#).expect("wrapping regex"));

// One pattern per quote style; matches of different styles may overlap.
static SHORT_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r#""([^"]{1,30})""#, r"'([^']{1,30})'", r"\[([^\]]{1,30})\]"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("short phrase regex"))
        .collect()
});

/// Which pass of the fallback chain produced the keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    TaggedSection,
    HeadingPhrase,
    NumberedList,
    QuotedPhrase,
    Manual,
}

impl ExtractionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStrategy::TaggedSection => "tagged section",
            ExtractionStrategy::HeadingPhrase => "heading phrase",
            ExtractionStrategy::NumberedList => "numbered list",
            ExtractionStrategy::QuotedPhrase => "quoted phrase",
            ExtractionStrategy::Manual => "manual entry",
        }
    }
}

impl fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub strategy: Option<ExtractionStrategy>,
    pub keywords: Vec<String>,
}

impl Extraction {
    /// No strategy matched; the operator has to enter keywords by hand.
    pub fn needs_manual_entry(&self) -> bool {
        self.keywords.is_empty()
    }
}

type Strategy = fn(&str) -> Vec<String>;

const STRATEGIES: [(ExtractionStrategy, Strategy); 4] = [
    (ExtractionStrategy::TaggedSection, tagged_section),
    (ExtractionStrategy::HeadingPhrase, heading_phrase),
    (ExtractionStrategy::NumberedList, numbered_list),
    (ExtractionStrategy::QuotedPhrase, quoted_phrase),
];

/// Pulls prospecting keywords out of a free-text model completion.
///
/// Strategies run from the strictest to the loosest pattern and the first one
/// that finds anything wins, even when a later one would have done better.
pub struct KeywordExtractor;

impl KeywordExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, response_text: &str) -> Extraction {
        for (strategy, run) in STRATEGIES {
            let mut keywords = run(response_text);
            if keywords.is_empty() {
                log::debug!("Keyword strategy '{}' found nothing", strategy);
                continue;
            }

            keywords.truncate(MAX_KEYWORDS);
            log::info!("Extracted {} keywords using {}", keywords.len(), strategy);
            return Extraction {
                strategy: Some(strategy),
                keywords,
            };
        }

        log::warn!("No keyword strategy matched the model response");
        Extraction {
            strategy: None,
            keywords: Vec::new(),
        }
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses an operator's comma-separated keyword entry.
pub fn parse_manual_entry(input: &str) -> Extraction {
    let keywords: Vec<String> = input
        .split(',')
        .map(|keyword| keyword.trim().to_string())
        .filter(|keyword| !keyword.is_empty())
        .take(MAX_KEYWORDS)
        .collect();

    Extraction {
        strategy: Some(ExtractionStrategy::Manual),
        keywords,
    }
}

fn tagged_section(text: &str) -> Vec<String> {
    let Some(section) = TAGGED_SECTION.captures(text).and_then(|c| c.get(1)) else {
        return Vec::new();
    };

    section
        .as_str()
        .lines()
        .map(str::trim)
        .filter(|line| DOT_NUMBERED.is_match(line))
        .filter_map(|line| match bracketed(line) {
            Some(keyword) => non_empty(keyword),
            None => non_empty(DOT_NUMBERED.replace(line, "").trim()),
        })
        .collect()
}

fn heading_phrase(text: &str) -> Vec<String> {
    for heading in HEADING_SECTIONS.iter() {
        let Some(section) = heading.captures(text).and_then(|c| c.get(1)) else {
            continue;
        };

        let keywords: Vec<String> = section
            .as_str()
            .lines()
            .map(str::trim)
            .filter(|line| NUMBERED.is_match(line))
            .filter_map(|line| match bracketed(line) {
                Some(keyword) => non_empty(keyword),
                None => {
                    let entry = NUMBERED.replace(line, "");
                    non_empty(unwrap_entry(entry.trim()).as_str())
                }
            })
            .collect();

        if !keywords.is_empty() {
            return keywords;
        }
    }

    Vec::new()
}

fn numbered_list(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for captures in LIST_LINE.captures_iter(text) {
        let item = captures.get(1).map_or("", |m| m.as_str()).trim();
        if word_count(item) > MAX_KEYWORD_WORDS {
            continue;
        }

        let keyword = unwrap_entry(item);
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    keywords
}

fn quoted_phrase(text: &str) -> Vec<String> {
    let mut found: Vec<(usize, &str)> = SHORT_PHRASES
        .iter()
        .flat_map(|pattern| pattern.captures_iter(text))
        .filter_map(|captures| captures.get(1))
        .map(|phrase| (phrase.start(), phrase.as_str()))
        .filter(|(_, phrase)| word_count(phrase) <= MAX_KEYWORD_WORDS)
        .collect();
    found.sort_by_key(|(start, _)| *start);

    let mut keywords: Vec<String> = Vec::new();
    for (_, phrase) in found {
        let keyword = phrase.trim().to_string();
        if !keyword.is_empty() && !keywords.contains(&keyword) {
            keywords.push(keyword);
        }
    }

    keywords
}

// Content of the first `[...]`, which may be empty.
fn bracketed(line: &str) -> Option<&str> {
    BRACKETED
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

// Drops one quote, backtick or bracket from each end.
fn unwrap_entry(entry: &str) -> String {
    WRAPPING.replace_all(entry, "").trim().to_string()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
