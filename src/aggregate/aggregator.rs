use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::config::StatsSettings;
use crate::faceit::LookupClient;
use crate::models::{DetailResult, NamedGroup, RatingResult, RecentMatch, RecentSummary, Subject};

/// Orchestration core: fans lookups out across a cohort of subjects and
/// merges the results back in input order. One subject's failure never
/// cancels or fails the rest of its cohort.
pub struct Aggregator {
    client: Arc<dyn LookupClient>,
    stats: StatsSettings,
}

impl Aggregator {
    pub fn new(client: Arc<dyn LookupClient>, stats: StatsSettings) -> Self {
        Self { client, stats }
    }

    /// Rate every subject of one group concurrently. Results come back in
    /// input order regardless of completion order: handles are awaited in
    /// launch order, and a task that dies (panic included) degrades to an
    /// "N/A" result for that subject alone.
    pub async fn rate_group(&self, subjects: &[Subject]) -> Vec<RatingResult> {
        let mut handles = Vec::with_capacity(subjects.len());
        for subject in subjects {
            let client = Arc::clone(&self.client);
            let subject = subject.clone();
            handles.push(tokio::spawn(async move {
                let elo = client.fetch_elo(&subject.local_id).await;
                RatingResult::from_elo(subject.display_name, elo)
            }));
        }

        let mut results = Vec::with_capacity(subjects.len());
        for (handle, subject) in handles.into_iter().zip(subjects) {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!(subject = %subject.display_name, error = %e, "rating task failed");
                    results.push(RatingResult::unknown(subject.display_name.clone()));
                }
            }
        }
        results
    }

    /// Rate several groups; the groups themselves run concurrently and each
    /// preserves its own internal order.
    pub async fn rate_groups(&self, groups: &[NamedGroup]) -> Vec<(String, Vec<RatingResult>)> {
        let cohorts = join_all(groups.iter().map(|g| self.rate_group(&g.subjects))).await;
        groups
            .iter()
            .map(|g| g.name.clone())
            .zip(cohorts)
            .collect()
    }

    /// Single-subject detail lookup. An unlinked account is a normal,
    /// reportable outcome; when linked, the three upstream fetches run
    /// concurrently and each degrades independently.
    pub async fn detail(&self, subject: &Subject) -> DetailResult {
        let Some(account_id) = self.client.resolve_account_id(&subject.local_id).await else {
            debug!(subject = %subject.display_name, "no linked account");
            return DetailResult {
                rating: RatingResult::unknown(subject.display_name.clone()),
                lifetime: None,
                recent: None,
            };
        };

        let (elo, lifetime, matches) = tokio::join!(
            self.client.fetch_elo(&subject.local_id),
            self.client.fetch_lifetime_stats(&account_id),
            self.client
                .fetch_recent_matches(&account_id, self.stats.recent_window),
        );

        DetailResult {
            rating: RatingResult::from_elo(subject.display_name.clone(), elo),
            lifetime,
            recent: matches.map(|m| self.summarize_recent(&m)),
        }
    }

    /// Win/loss tally and arithmetic means over a recent-match window. The
    /// default policy keeps unparseable samples in the denominator as zero;
    /// `count_unparseable_as_zero = false` excludes them instead.
    pub fn summarize_recent(&self, matches: &[RecentMatch]) -> RecentSummary {
        let wins = matches
            .iter()
            .filter(|m| m.result.as_deref().map(str::trim) == Some("1"))
            .count();
        let total = matches.len();
        let win_rate_pct = if total == 0 {
            0.0
        } else {
            (wins as f64 / total as f64 * 1000.0).round() / 10.0
        };

        RecentSummary {
            matches: total,
            wins,
            losses: total - wins,
            win_rate_pct,
            avg_kd_ratio: self.mean_of(matches, |m| m.kd_ratio.as_deref()),
            avg_headshots_pct: self.mean_of(matches, |m| m.headshots_pct.as_deref()),
            avg_adr: self.mean_of(matches, |m| m.adr.as_deref()),
        }
    }

    fn mean_of<F>(&self, matches: &[RecentMatch], field: F) -> f64
    where
        F: Fn(&RecentMatch) -> Option<&str>,
    {
        let mut sum = 0.0;
        let mut count = 0usize;
        for m in matches {
            match field(m).and_then(|s| s.trim().parse::<f64>().ok()) {
                Some(v) => {
                    sum += v;
                    count += 1;
                }
                None if self.stats.count_unparseable_as_zero => count += 1,
                None => {}
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }
}
