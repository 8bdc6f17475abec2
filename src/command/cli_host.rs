use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::{NamedGroup, Result, ScoutError, Subject};

use super::orchestrator::Host;

/// The invoker id used when the command is run from a terminal.
pub const CONSOLE_ID: &str = "console";

#[derive(Debug, Deserialize)]
struct RosterEntry {
    display_name: String,
    local_id: String,
    team: String,
    #[serde(default)]
    bot: bool,
}

/// Terminal host adapter: the roster comes from a JSON file, output goes to
/// stdout, and only the console counts as a present, authorized recipient.
#[derive(Debug)]
pub struct CliHost {
    groups: Vec<NamedGroup>,
    bots: Vec<String>,
}

impl CliHost {
    /// Load a roster file: a JSON array of
    /// `{ "display_name", "local_id", "team", "bot"? }` entries. Teams keep
    /// the order of their first appearance; members keep file order.
    pub fn from_roster_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref()).map_err(|e| {
            ScoutError::ConfigError(format!(
                "cannot read roster file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let entries: Vec<RosterEntry> = serde_json::from_str(&raw)?;

        let mut groups: Vec<NamedGroup> = Vec::new();
        let mut bots = Vec::new();
        for entry in entries {
            if entry.bot {
                bots.push(entry.local_id.clone());
            }
            let subject = Subject::new(entry.display_name, entry.local_id);
            match groups.iter_mut().find(|g| g.name == entry.team) {
                Some(group) => group.subjects.push(subject),
                None => groups.push(NamedGroup {
                    name: entry.team,
                    subjects: vec![subject],
                }),
            }
        }
        Ok(Self { groups, bots })
    }

    /// Host over a single in-memory subject, for detail mode.
    pub fn single(subject: Subject) -> Self {
        Self {
            groups: vec![NamedGroup {
                name: "players".to_string(),
                subjects: vec![subject],
            }],
            bots: Vec::new(),
        }
    }
}

impl Host for CliHost {
    fn group_roster(&self) -> Vec<NamedGroup> {
        self.groups.clone()
    }

    fn is_authorized(&self, local_id: &str, _permission: &str) -> bool {
        local_id == CONSOLE_ID
    }

    fn is_bot(&self, local_id: &str) -> bool {
        self.bots.iter().any(|b| b == local_id)
    }

    fn is_present(&self, local_id: &str) -> bool {
        local_id == CONSOLE_ID
    }

    fn deliver_text(&self, _recipient_id: &str, text: &str) {
        println!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_file_groups_by_team_in_first_appearance_order() {
        let raw = r#"[
            {"display_name": "alpha", "local_id": "id1", "team": "t"},
            {"display_name": "bravo", "local_id": "id2", "team": "ct"},
            {"display_name": "charlie", "local_id": "id3", "team": "t"},
            {"display_name": "fred", "local_id": "bot1", "team": "ct", "bot": true}
        ]"#;
        let dir = std::env::temp_dir().join("faceit_scout_roster_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("roster.json");
        std::fs::write(&path, raw).unwrap();

        let host = CliHost::from_roster_file(&path).unwrap();
        let groups = host.group_roster();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "t");
        assert_eq!(groups[0].subjects[1].display_name, "charlie");
        assert_eq!(groups[1].name, "ct");
        assert!(host.is_bot("bot1"));
        assert!(!host.is_bot("id1"));
        assert!(host.is_present(CONSOLE_ID));
        assert!(!host.is_present("id1"));
    }

    #[test]
    fn missing_roster_file_is_a_config_error() {
        let err = CliHost::from_roster_file("/nonexistent/roster.json").unwrap_err();
        assert!(matches!(err, ScoutError::ConfigError(_)));
    }
}
