//! Turns pasted or imported text into an ordered participant list.

use crate::domain::model::{Participant, ParticipantId};
use regex::Regex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    // 換行或逗號，沒有跳脫與引號
    DELIMITER.get_or_init(|| Regex::new(r"\n|,").expect("static delimiter pattern"))
}

/// Splits raw text on newlines or commas, trims every token and drops empty ones.
pub fn split_names(raw: &str) -> Vec<String> {
    delimiter()
        .split(raw)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses raw text into participants with fresh identifiers.
pub fn parse(raw: &str) -> Vec<Participant> {
    participants_from_names(&split_names(raw))
}

/// Entry point for any upstream name source (paste, file, sample data).
pub fn participants_from_names<S: AsRef<str>>(names: &[S]) -> Vec<Participant> {
    let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);

    let participants: Vec<Participant> = names
        .iter()
        .map(|name| name.as_ref().trim())
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(index, name)| Participant {
            id: ParticipantId { generation, index },
            name: name.to_string(),
        })
        .collect();

    tracing::debug!(
        "Parsed {} participants (generation {})",
        participants.len(),
        generation
    );
    participants
}

/// Names that occur at least twice, each reported once in order of first repeat.
pub fn find_duplicates<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();

    for name in names {
        let name = name.as_ref();
        if !seen.insert(name) && reported.insert(name) {
            duplicates.push(name.to_string());
        }
    }

    duplicates
}

/// Stable dedup: keeps the first occurrence of each name.
pub fn remove_duplicates<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

pub fn dedupe_participants(participants: &[Participant]) -> Vec<Participant> {
    let mut seen = HashSet::new();
    participants
        .iter()
        .filter(|p| seen.insert(p.name.as_str()))
        .cloned()
        .collect()
}

/// 重複項提示，例如 `陳小明、林美玲...`
pub fn duplicate_preview<S: AsRef<str>>(duplicates: &[S], limit: usize) -> String {
    let shown: Vec<&str> = duplicates
        .iter()
        .take(limit)
        .map(|name| name.as_ref())
        .collect();
    let mut preview = shown.join("、");
    if duplicates.len() > limit {
        preview.push_str("...");
    }
    preview
}

pub fn to_text<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|name| name.as_ref())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn names_of(participants: &[Participant]) -> Vec<String> {
    participants.iter().map(|p| p.name.clone()).collect()
}
