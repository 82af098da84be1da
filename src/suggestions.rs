/// Suggestion filtering for the popup's saved-item dropdown
use regex::{Regex, RegexBuilder};

use crate::log_data::CloudwatchLogItem;

/// Build the fuzzy matcher for an input: every typed character must appear
/// in order, anything may sit in between, case-insensitive. Characters are
/// escaped first so `[` or `.` in the input cannot break the pattern.
fn fuzzy_regex(input: &str) -> Option<Regex> {
    let pattern: String = input
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| regex::escape(&ch.to_string()))
        .collect::<Vec<_>>()
        .join(".*");

    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()
}

/// Filter stored items against the typed input.
///
/// Empty input yields nothing; otherwise an item is kept when any of its
/// populated text fields matches the fuzzy pattern.
pub fn suggestions<'a>(items: &'a [CloudwatchLogItem], input: &str) -> Vec<&'a CloudwatchLogItem> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    let Some(matcher) = fuzzy_regex(input) else {
        return Vec::new();
    };

    items
        .iter()
        .filter(|item| match item {
            CloudwatchLogItem::Lambda { name, lambda } => {
                name.as_deref().is_some_and(|name| matcher.is_match(name))
                    || matcher.is_match(lambda)
            }
            CloudwatchLogItem::Api { api, lambda } => {
                matcher.is_match(api) || matcher.is_match(lambda)
            }
            CloudwatchLogItem::Gateway {
                gateway_name,
                gateway_id,
                ..
            } => matcher.is_match(gateway_name) || matcher.is_match(gateway_id),
        })
        .collect()
}

/// The text shown in the input once a suggestion is picked.
pub fn suggestion_value(item: &CloudwatchLogItem) -> &str {
    match item {
        CloudwatchLogItem::Lambda {
            name: Some(name), ..
        } if !name.is_empty() => name,
        CloudwatchLogItem::Lambda { lambda, .. } => lambda,
        CloudwatchLogItem::Api { api, .. } => api,
        CloudwatchLogItem::Gateway { gateway_name, .. } => gateway_name,
    }
}

/// The labelled lines rendered for one suggestion in the dropdown.
pub fn suggestion_lines(item: &CloudwatchLogItem) -> Vec<(&'static str, &str)> {
    match item {
        CloudwatchLogItem::Lambda { name, lambda } => {
            let mut lines = Vec::new();
            if let Some(name) = name.as_deref().filter(|name| !name.is_empty()) {
                lines.push(("Name", name));
            }
            lines.push(("Lambda", lambda.as_str()));
            lines
        }
        CloudwatchLogItem::Api { api, lambda } => {
            vec![("API", api.as_str()), ("Lambda", lambda.as_str())]
        }
        CloudwatchLogItem::Gateway { gateway_name, .. } => {
            vec![("Gateway", gateway_name.as_str())]
        }
    }
}
