// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ten hard checkers: scripted, deterministic comparisons between an
//! agent's tool-call argument and the oracle's.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Which hard checker to run for a given argument, named exactly after
/// the original's `CheckerType` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckerType {
    Eq,
    UnorderedList,
    ListAttendees,
    Datetime,
    PhoneNumber,
    EqStrStrip,
    Path,
    UnorderedPathList,
    ContainAny,
    ContainAll,
}

fn as_str_vec(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
            .collect()
    })
}

pub fn eq_checker(agent: &Value, oracle: &Value) -> bool {
    agent == oracle
}

pub fn unordered_list_checker(agent: &Value, oracle: &Value) -> bool {
    let agent_list = as_str_vec(agent);
    let oracle_list = as_str_vec(oracle);
    match (agent_list, oracle_list) {
        (None, oracle) => oracle.map(|o| o.is_empty()).unwrap_or(true),
        (agent, None) => agent.map(|a| a.is_empty()).unwrap_or(true),
        (Some(a), Some(o)) => {
            let a: BTreeSet<String> = a.into_iter().collect();
            let o: BTreeSet<String> = o.into_iter().collect();
            a == o
        }
    }
}

/// Like `unordered_list_checker`, but every element is first run through
/// `os.path.normpath`-equivalent normalization (leading slash stripped,
/// `.`/`..` segments resolved) before comparing as sets.
pub fn unordered_path_list_checker(agent: &Value, oracle: &Value) -> bool {
    fn normalize_all(values: Option<Vec<String>>) -> Option<BTreeSet<String>> {
        values.map(|v| v.iter().map(|p| normalize_path(p)).collect())
    }
    let agent_list = normalize_all(as_str_vec(agent));
    let oracle_list = normalize_all(as_str_vec(oracle));
    match (agent_list, oracle_list) {
        (None, oracle) => oracle.map(|o| o.is_empty()).unwrap_or(true),
        (agent, None) => agent.map(|a| a.is_empty()).unwrap_or(true),
        (Some(a), Some(o)) => a == o,
    }
}

pub fn path_checker(agent: &Value, oracle: &Value) -> bool {
    let (Some(agent), Some(oracle)) = (agent.as_str(), oracle.as_str()) else {
        return agent == oracle;
    };
    normalize_path(agent) == normalize_path(oracle)
}

fn normalize_path(path: &str) -> String {
    let stripped = path.trim_start_matches('/');
    let mut out: Vec<&str> = Vec::new();
    for segment in stripped.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            seg => out.push(seg),
        }
    }
    out.join("/")
}

/// Attendee lists tolerate a configured set of names (e.g. the user's own
/// name) being present in the oracle but absent from the agent's call, or
/// vice versa — they're implied rather than explicitly listed.
pub fn list_attendees_checker(agent: &Value, oracle: &Value, tolerance_list: &[String]) -> bool {
    let tolerance: BTreeSet<String> = tolerance_list.iter().map(|s| normalize_str(s)).collect();
    let Some(oracle_list) = as_str_vec(oracle) else {
        return true;
    };
    if oracle_list.is_empty() || oracle_list.iter().all(|a| tolerance.contains(&normalize_str(a))) {
        return true;
    }
    unordered_str_list_with_tolerance_checker(agent, oracle, &tolerance_list.iter().map(|s| normalize_str(s)).collect::<Vec<_>>())
}

pub fn unordered_str_list_with_tolerance_checker(agent: &Value, oracle: &Value, tolerance_list: &[String]) -> bool {
    let tolerance: BTreeSet<String> = tolerance_list.iter().cloned().collect();
    let agent_set: BTreeSet<String> = as_str_vec(agent)
        .unwrap_or_default()
        .into_iter()
        .map(|s| normalize_str(&s))
        .filter(|s| !tolerance.contains(s))
        .collect();
    let oracle_set: BTreeSet<String> = as_str_vec(oracle)
        .unwrap_or_default()
        .into_iter()
        .map(|s| normalize_str(&s))
        .filter(|s| !tolerance.contains(s))
        .collect();
    agent_set == oracle_set
}

fn normalize_str(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Compares `"%Y-%m-%d %H:%M:%S"`-formatted timestamps for equality; any
/// malformed input fails the check rather than panicking.
pub fn datetime_checker(agent: &Value, oracle: &Value) -> bool {
    let (Some(agent), Some(oracle)) = (agent.as_str(), oracle.as_str()) else {
        return agent == oracle;
    };
    parse_datetime(agent).zip(parse_datetime(oracle)).map(|(a, o)| a == o).unwrap_or(false)
}

/// Parses `"%Y-%m-%d %H:%M:%S"` into a sortable/comparable tuple without
/// pulling in a datetime crate the rest of the workspace doesn't need.
fn parse_datetime(s: &str) -> Option<(i32, u32, u32, u32, u32, u32)> {
    let (date, time) = s.split_once(' ')?;
    let mut date_parts = date.split('-');
    let year: i32 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let day: u32 = date_parts.next()?.parse().ok()?;
    let mut time_parts = time.split(':');
    let hour: u32 = time_parts.next()?.parse().ok()?;
    let minute: u32 = time_parts.next()?.parse().ok()?;
    let second: u32 = time_parts.next()?.parse().ok()?;
    Some((year, month, day, hour, minute, second))
}

pub fn eq_str_strip_checker(agent: &Value, oracle: &Value) -> bool {
    let agent_str = agent.as_str().map(str::trim).unwrap_or("");
    let oracle_str = oracle.as_str().map(str::trim).unwrap_or("");
    agent_str == oracle_str
}

pub fn phone_number_checker(agent: &Value, oracle: &Value) -> bool {
    match (agent.as_str(), oracle.as_str()) {
        (None, None) => true,
        (None, Some(_)) | (Some(_), None) => false,
        (Some(agent), Some(oracle)) => digits_only(agent) == digits_only(oracle),
    }
}

fn digits_only(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

pub fn contain_any_checker(agent: &Value, targets: &[String]) -> bool {
    let Some(agent) = agent.as_str() else { return false };
    let agent_lower = agent.to_lowercase();
    targets.iter().any(|t| agent_lower.contains(&t.to_lowercase()))
}

pub fn contain_all_checker(agent: &Value, targets: &[String]) -> bool {
    let Some(agent) = agent.as_str() else { return targets.is_empty() };
    let agent_lower = agent.to_lowercase();
    targets.iter().all(|t| agent_lower.contains(&t.to_lowercase()))
}

#[cfg(test)]
#[path = "checkers_tests.rs"]
mod tests;
