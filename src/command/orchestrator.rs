use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::aggregate::Aggregator;
use crate::config::{Settings, Visibility};
use crate::faceit::LookupClient;
use crate::format;
use crate::models::{NamedGroup, Subject};

/// Permission token identifying admin recipients under `visibility = admin`.
pub const ADMIN_PERMISSION: &str = "admin";

/// Seam to the hosting environment (game server, terminal, ...). Lookups run
/// on parallel workers; everything touching the host's live state goes
/// through these calls, invoked serially by the orchestrator.
#[cfg_attr(test, mockall::automock)]
pub trait Host: Send + Sync {
    /// The roster split into named, display-ordered groups.
    fn group_roster(&self) -> Vec<NamedGroup>;

    fn is_authorized(&self, local_id: &str, permission: &str) -> bool;

    /// Entrants that should never be queried upstream.
    fn is_bot(&self, local_id: &str) -> bool;

    /// Recipients may vanish while lookups are in flight; checked again
    /// immediately before every delivery.
    fn is_present(&self, local_id: &str) -> bool;

    fn deliver_text(&self, recipient_id: &str, text: &str);
}

/// Entry point around the aggregation core: authorization and configuration
/// gates, roster splitting, and policy-driven delivery of the formatted
/// output.
pub struct CommandOrchestrator {
    host: Arc<dyn Host>,
    aggregator: Aggregator,
    settings: Settings,
}

impl CommandOrchestrator {
    pub fn new(host: Arc<dyn Host>, client: Arc<dyn LookupClient>, settings: Settings) -> Self {
        let aggregator = Aggregator::new(client, settings.stats.clone());
        Self {
            host,
            aggregator,
            settings,
        }
    }

    /// Group mode: rate the whole roster and deliver per the visibility
    /// policy.
    pub async fn run_roster(&self, invoker_id: &str) {
        if !self.invoker_allowed(invoker_id) {
            self.deliver_if_present(
                invoker_id,
                "You don't have permission to use this command!",
            );
            return;
        }
        if !self.settings.api_key_is_valid() {
            warn!("lookup refused: API key missing or placeholder");
            self.deliver_if_present(
                invoker_id,
                "Plugin configuration error! Check the FACEIT API key.",
            );
            return;
        }

        let groups = self.queryable_roster();
        info!(
            groups = groups.len(),
            subjects = groups.iter().map(|g| g.subjects.len()).sum::<usize>(),
            "rating roster"
        );

        let rated = self.aggregator.rate_groups(&groups).await;

        let mut lines = vec![format::format_header()];
        for (name, results) in &rated {
            lines.extend(format::format_group(name, results));
        }

        let recipients = self.recipients(invoker_id, &groups);
        self.deliver_lines(&recipients, &lines);
    }

    /// Detail mode: extended statistics for one subject, delivered to the
    /// invoker only.
    pub async fn run_detail(&self, invoker_id: &str, subject: &Subject) {
        if !self.invoker_allowed(invoker_id) {
            self.deliver_if_present(
                invoker_id,
                "You don't have permission to use this command!",
            );
            return;
        }
        if !self.settings.api_key_is_valid() {
            warn!("lookup refused: API key missing or placeholder");
            self.deliver_if_present(
                invoker_id,
                "Plugin configuration error! Check the FACEIT API key.",
            );
            return;
        }

        let detail = self.aggregator.detail(subject).await;
        let lines = format::format_detail(subject, &detail);
        self.deliver_lines(&[invoker_id.to_string()], &lines);
    }

    /// ANY of the configured permissions suffices; an empty list means the
    /// command is unrestricted.
    fn invoker_allowed(&self, invoker_id: &str) -> bool {
        let required = &self.settings.command.required_permissions;
        required.is_empty()
            || required
                .iter()
                .any(|p| self.host.is_authorized(invoker_id, p))
    }

    /// Host-provided groups with non-queryable entrants (bots) filtered out.
    /// The filter is orchestrator policy; the aggregator only ever sees
    /// subjects it should actually query.
    fn queryable_roster(&self) -> Vec<NamedGroup> {
        self.host
            .group_roster()
            .into_iter()
            .map(|mut group| {
                group.subjects.retain(|s| !self.host.is_bot(&s.local_id));
                group
            })
            .collect()
    }

    fn recipients(&self, invoker_id: &str, groups: &[NamedGroup]) -> Vec<String> {
        let mut recipients = vec![invoker_id.to_string()];
        match self.settings.command.visibility {
            Visibility::SelfOnly => {}
            Visibility::Admin => {
                for subject in groups.iter().flat_map(|g| &g.subjects) {
                    if self.host.is_authorized(&subject.local_id, ADMIN_PERMISSION) {
                        recipients.push(subject.local_id.clone());
                    }
                }
            }
            Visibility::All => {
                for subject in groups.iter().flat_map(|g| &g.subjects) {
                    recipients.push(subject.local_id.clone());
                }
            }
        }
        let mut seen = std::collections::HashSet::new();
        recipients.retain(|r| seen.insert(r.clone()));
        recipients
    }

    /// Serialized delivery boundary: one recipient at a time, presence
    /// re-checked immediately before each send, gone recipients skipped
    /// silently.
    fn deliver_lines(&self, recipients: &[String], lines: &[String]) {
        for recipient in recipients {
            if !self.host.is_present(recipient) {
                debug!(recipient, "recipient gone, dropping delivery");
                continue;
            }
            for line in lines {
                self.host.deliver_text(recipient, line);
            }
        }
    }

    fn deliver_if_present(&self, recipient: &str, text: &str) {
        if self.host.is_present(recipient) {
            self.host.deliver_text(recipient, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LifetimeStats, RecentMatch, UNKNOWN_ELO};
    use async_trait::async_trait;
    use mockall::predicate::eq;
    use std::sync::Mutex;

    struct FixedEloClient(i64);

    #[async_trait]
    impl LookupClient for FixedEloClient {
        async fn fetch_elo(&self, _local_id: &str) -> i64 {
            self.0
        }
        async fn resolve_account_id(&self, _local_id: &str) -> Option<String> {
            None
        }
        async fn fetch_lifetime_stats(&self, _account_id: &str) -> Option<LifetimeStats> {
            None
        }
        async fn fetch_recent_matches(
            &self,
            _account_id: &str,
            _limit: u32,
        ) -> Option<Vec<RecentMatch>> {
            None
        }
    }

    /// Host that records deliveries for order/content assertions.
    struct RecordingHost {
        groups: Vec<NamedGroup>,
        admins: Vec<String>,
        absent: Vec<String>,
        deliveries: Mutex<Vec<(String, String)>>,
    }

    impl RecordingHost {
        fn new(groups: Vec<NamedGroup>) -> Self {
            Self {
                groups,
                admins: Vec::new(),
                absent: Vec::new(),
                deliveries: Mutex::new(Vec::new()),
            }
        }

        fn delivered(&self) -> Vec<(String, String)> {
            self.deliveries.lock().unwrap().clone()
        }
    }

    impl Host for RecordingHost {
        fn group_roster(&self) -> Vec<NamedGroup> {
            self.groups.clone()
        }
        fn is_authorized(&self, local_id: &str, permission: &str) -> bool {
            permission == ADMIN_PERMISSION && self.admins.iter().any(|a| a == local_id)
        }
        fn is_bot(&self, local_id: &str) -> bool {
            local_id.starts_with("bot")
        }
        fn is_present(&self, local_id: &str) -> bool {
            !self.absent.iter().any(|a| a == local_id)
        }
        fn deliver_text(&self, recipient_id: &str, text: &str) {
            self.deliveries
                .lock()
                .unwrap()
                .push((recipient_id.to_string(), text.to_string()));
        }
    }

    fn settings_with_key() -> Settings {
        let mut settings = Settings::default();
        settings.api.key = "real-key".to_string();
        settings.command.required_permissions.clear();
        settings
    }

    fn two_team_roster() -> Vec<NamedGroup> {
        vec![
            NamedGroup {
                name: "terrorists".to_string(),
                subjects: vec![
                    Subject::new("alpha", "id1"),
                    Subject::new("botfred", "bot1"),
                ],
            },
            NamedGroup {
                name: "counter-terrorists".to_string(),
                subjects: vec![Subject::new("bravo", "id2")],
            },
        ]
    }

    #[tokio::test]
    async fn unauthorized_invoker_gets_a_single_denial() {
        let mut settings = settings_with_key();
        settings.command.required_permissions = vec!["faceit".to_string()];

        let mut host = MockHost::new();
        host.expect_is_authorized().return_const(false);
        host.expect_is_present().return_const(true);
        host.expect_deliver_text()
            .with(eq("id1"), eq("You don't have permission to use this command!"))
            .times(1)
            .return_const(());

        let orchestrator = CommandOrchestrator::new(
            Arc::new(host),
            Arc::new(FixedEloClient(2100)),
            settings,
        );
        orchestrator.run_roster("id1").await;
    }

    #[tokio::test]
    async fn placeholder_key_reports_config_error_without_lookups() {
        let mut settings = Settings::default();
        settings.command.required_permissions.clear();

        let mut host = MockHost::new();
        host.expect_is_present().return_const(true);
        host.expect_deliver_text()
            .withf(|_, text| text.contains("configuration error"))
            .times(1)
            .return_const(());
        // No group_roster expectation: lookups must never start.

        let orchestrator = CommandOrchestrator::new(
            Arc::new(host),
            Arc::new(FixedEloClient(2100)),
            settings,
        );
        orchestrator.run_roster("id1").await;
    }

    #[tokio::test]
    async fn bots_are_filtered_and_groups_stay_ordered() {
        colored::control::set_override(false);
        let host = Arc::new(RecordingHost::new(two_team_roster()));
        let orchestrator = CommandOrchestrator::new(
            host.clone(),
            Arc::new(FixedEloClient(2800)),
            settings_with_key(),
        );
        orchestrator.run_roster("id1").await;

        let delivered = host.delivered();
        let texts: Vec<&str> = delivered.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "### FACEIT ELO RATINGS ###",
                "=== TERRORISTS ===",
                "  alpha - 2800",
                "=== COUNTER-TERRORISTS ===",
                "  bravo - 2800",
            ]
        );
        // Everything went to the invoker under the default self policy.
        assert!(delivered.iter().all(|(r, _)| r == "id1"));
    }

    #[tokio::test]
    async fn all_visibility_delivers_to_every_human_once() {
        colored::control::set_override(false);
        let mut settings = settings_with_key();
        settings.command.visibility = Visibility::All;

        let host = Arc::new(RecordingHost::new(two_team_roster()));
        let orchestrator = CommandOrchestrator::new(
            host.clone(),
            Arc::new(FixedEloClient(UNKNOWN_ELO)),
            settings,
        );
        orchestrator.run_roster("id1").await;

        let mut recipients: Vec<String> =
            host.delivered().into_iter().map(|(r, _)| r).collect();
        recipients.dedup();
        assert_eq!(recipients, vec!["id1", "id2"]);
    }

    #[tokio::test]
    async fn gone_recipients_are_skipped_silently() {
        colored::control::set_override(false);
        let mut settings = settings_with_key();
        settings.command.visibility = Visibility::All;

        let mut host = RecordingHost::new(two_team_roster());
        host.absent = vec!["id2".to_string()];
        let host = Arc::new(host);

        let orchestrator = CommandOrchestrator::new(
            host.clone(),
            Arc::new(FixedEloClient(1500)),
            settings,
        );
        orchestrator.run_roster("id1").await;

        assert!(host.delivered().iter().all(|(r, _)| r == "id1"));
    }

    #[tokio::test]
    async fn admin_visibility_adds_admin_roster_members() {
        colored::control::set_override(false);
        let mut settings = settings_with_key();
        settings.command.visibility = Visibility::Admin;

        let mut host = RecordingHost::new(two_team_roster());
        host.admins = vec!["id2".to_string()];
        let host = Arc::new(host);

        let orchestrator = CommandOrchestrator::new(
            host.clone(),
            Arc::new(FixedEloClient(2000)),
            settings,
        );
        orchestrator.run_roster("id1").await;

        let mut recipients: Vec<String> =
            host.delivered().into_iter().map(|(r, _)| r).collect();
        recipients.dedup();
        assert_eq!(recipients, vec!["id1", "id2"]);
    }
}
