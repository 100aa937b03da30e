//! Deterministic heuristic summarizer used when the remote model is
//! unavailable or returns an unusable result.
//!
//! The heuristic is total (never fails, never returns an empty string) and
//! deterministic: identical input and kind always produce identical output.

use super::SummaryKind;

/// Verbs that mark a summary as actionable, scanned in this order.
const ACTION_WORDS: [&str; 11] = [
    "create",
    "develop",
    "build",
    "implement",
    "design",
    "research",
    "analyze",
    "write",
    "update",
    "fix",
    "improve",
];

/// Words that mark urgency, any of which adds the emphasis prefix.
const URGENCY_WORDS: [&str; 7] = [
    "important",
    "critical",
    "urgent",
    "required",
    "must",
    "should",
    "need",
];

/// Conjunction boundaries tried, in order, before hard truncation.
const BREAK_POINTS: [&str; 5] = [", and ", ", but ", ", or ", ", which ", ", that "];

/// Inputs at or below this cleaned length are returned verbatim with the
/// summary prefix.
const VERBATIM_LIMIT: usize = 100;

/// A conjunction break must fall strictly after this many characters.
const MIN_BREAK_POSITION: usize = 30;

/// Produces a deterministic summary of `text` without a language model.
#[must_use]
pub fn enhanced_summary(text: &str, kind: SummaryKind) -> String {
    let cleaned = collapse_whitespace(text);
    if cleaned.is_empty() {
        return "No content to summarize.".to_owned();
    }

    if char_len(&cleaned) <= VERBATIM_LIMIT {
        return format!("📝 Summary: {cleaned}");
    }

    let budget = kind.length_budget();
    let words: Vec<String> = cleaned
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect();
    let found_action = ACTION_WORDS
        .iter()
        .find(|verb| words.iter().any(|word| word == *verb));
    let has_urgency = URGENCY_WORDS
        .iter()
        .any(|marker| words.iter().any(|word| word == *marker));

    let Some(candidate) = first_sentence(&cleaned) else {
        return format!("📝 {}...", truncate_chars(&cleaned, budget.saturating_sub(3)));
    };

    let candidate = fit_to_budget(candidate, budget);
    let mut summary = match found_action {
        Some(verb) => format!("🎯 Action: {verb} - {candidate}"),
        None => format!("📋 Task: {candidate}"),
    };
    if has_urgency {
        summary = format!("⚡ {summary}");
    }
    summary
}

/// Trims and collapses all interior whitespace runs to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// First non-empty sentence, split on `.`, `!` and `?`.
fn first_sentence(text: &str) -> Option<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .find(|sentence| !sentence.is_empty())
}

/// Shortens an over-budget sentence, preferring a conjunction boundary
/// that falls strictly between [`MIN_BREAK_POSITION`] and the budget.
fn fit_to_budget(sentence: &str, budget: usize) -> String {
    if char_len(sentence) <= budget {
        return sentence.to_owned();
    }

    for break_point in BREAK_POINTS {
        if let Some(byte_index) = sentence.find(break_point) {
            let char_index = char_len(&sentence[..byte_index]);
            if char_index > MIN_BREAK_POSITION && char_index < budget {
                return sentence[..byte_index].to_owned();
            }
        }
    }

    format!("{}...", truncate_chars(sentence, budget.saturating_sub(3)))
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
