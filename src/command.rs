/// Command-file parsing and processing for the options page
use serde::Deserialize;

use crate::log_data::CloudwatchLogItem;
use crate::storage::StoredItems;

/// A command string split into its `kind:action:detail` segments, e.g.
/// `cloudwatch:import:clean`. Missing segments default to empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandInfo {
    pub kind: String,
    pub action: String,
    pub detail: String,
}

impl CommandInfo {
    pub fn parse(command: &str) -> CommandInfo {
        let mut segments = command.splitn(3, ':');

        CommandInfo {
            kind: segments.next().unwrap_or_default().to_string(),
            action: segments.next().unwrap_or_default().to_string(),
            detail: segments.next().unwrap_or_default().to_string(),
        }
    }
}

/// What the options page shows before the user confirms a command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPreview {
    pub header: String,
    pub description: String,
    pub processable: bool,
}

#[derive(Debug, Deserialize)]
struct CommandFile {
    command: String,
    #[serde(default)]
    data: Vec<CloudwatchLogItem>,
}

/// Parse an uploaded command file.
///
/// Strict: a malformed payload is rejected here, before anything touches
/// storage, so a failed import leaves the stored list exactly as it was.
pub fn parse_command_file(
    content: &str,
) -> Result<(CommandInfo, Vec<CloudwatchLogItem>), serde_json::Error> {
    let file: CommandFile = serde_json::from_str(content)?;

    Ok((CommandInfo::parse(&file.command), file.data))
}

pub fn preview(command: &CommandInfo, item_count: usize) -> CommandPreview {
    if command.kind != "cloudwatch" {
        return CommandPreview {
            header: command.kind.clone(),
            description: "unavailable command".to_string(),
            processable: false,
        };
    }

    let (description, processable) = match (command.action.as_str(), command.detail.as_str()) {
        ("clear", _) => ("clear all items".to_string(), true),
        ("import", "clean") => (format!("clean and import {item_count} items"), true),
        ("import", _) => (format!("append {item_count} items"), true),
        _ => ("unavailable command".to_string(), false),
    };

    CommandPreview {
        header: "cloudwatch".to_string(),
        description,
        processable,
    }
}

/// Run a confirmed command against the stored list. Returns whether anything
/// was applied; an unrecognized command leaves the list untouched.
pub fn apply(command: &CommandInfo, data: Vec<CloudwatchLogItem>, stored: &mut StoredItems) -> bool {
    if command.kind != "cloudwatch" {
        log::warn!("unknown command kind: {}", command.kind);
        return false;
    }

    match (command.action.as_str(), command.detail.as_str()) {
        ("clear", _) => {
            stored.clear();
            true
        }
        ("import", "clean") => {
            stored.clear();
            stored.append(data);
            true
        }
        ("import", _) => {
            stored.append(data);
            true
        }
        _ => {
            log::warn!("unknown command action: {}", command.action);
            false
        }
    }
}
