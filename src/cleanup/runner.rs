use crate::cleanup::summary::CleanupSummary;
use crate::console::client::ConsoleClient;
use crate::core::error::CleanupError;
use crate::models::disposition::Disposition;
use crate::models::torrent::TorrentRecord;
use crate::policy::classifier::RetentionPolicy;
use crate::report::parser::parse_report;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Decision taken for one torrent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TorrentOutcome {
    pub name: String,
    pub id: String,
    pub tracker: String,
    pub ratio: f64,
    pub disposition: Disposition,
    /// Both pause and rm succeeded
    pub removed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanupReport {
    pub dry_run: bool,
    pub summary: CleanupSummary,
    pub outcomes: Vec<TorrentOutcome>,
}

/// One pass over the torrents currently listed by the console
pub struct CleanupRunner<C: ConsoleClient> {
    client: C,
    policy: RetentionPolicy,
    dry_run: bool,
}

impl<C: ConsoleClient> CleanupRunner<C> {
    pub fn new(client: C, policy: RetentionPolicy, dry_run: bool) -> Self {
        Self {
            client,
            policy,
            dry_run,
        }
    }

    pub fn run(&self) -> Result<CleanupReport, CleanupError> {
        let dump = self.client.fetch_dump()?;
        let torrents = parse_report(&dump)?;

        let mut report = CleanupReport {
            dry_run: self.dry_run,
            ..Default::default()
        };

        for torrent in &torrents {
            let disposition = self.policy.classify(torrent);
            report.summary.record(disposition);
            log_disposition(torrent, disposition, self.policy.ratio_limit);

            let removed = if disposition == Disposition::Delete {
                self.delete(torrent, &mut report.summary)
            } else {
                false
            };

            report.outcomes.push(TorrentOutcome {
                name: torrent.name.clone(),
                id: torrent.id.clone(),
                tracker: torrent.tracker.clone(),
                ratio: torrent.ratio,
                disposition,
                removed,
            });
        }

        info!(
            total = report.summary.total,
            deleted = report.summary.deleted,
            skipped = report.summary.total_skipped(),
            failed_actions = report.summary.failed_actions,
            dry_run = self.dry_run,
            "Cleanup pass complete"
        );

        Ok(report)
    }

    /// Pause then remove. The remove is attempted even if the pause failed.
    fn delete(&self, torrent: &TorrentRecord, summary: &mut CleanupSummary) -> bool {
        if self.dry_run {
            debug!(name = %torrent.name, id = %torrent.id, "Test mode: torrent not stopped or removed");
            return false;
        }

        debug!(name = %torrent.name, "Stopping torrent");
        let paused = match self.client.pause(&torrent.id) {
            Ok(_) => true,
            Err(e) => {
                warn!(name = %torrent.name, id = %torrent.id, error = %e, "Failed to pause torrent");
                summary.failed_actions += 1;
                false
            }
        };

        debug!(name = %torrent.name, "Removing torrent");
        let removed = match self.client.remove(&torrent.id) {
            Ok(_) => true,
            Err(e) => {
                warn!(name = %torrent.name, id = %torrent.id, error = %e, "Failed to remove torrent");
                summary.failed_actions += 1;
                false
            }
        };

        if paused && removed {
            debug!(name = %torrent.name, id = %torrent.id, "Stopped and removed torrent");
        }

        paused && removed
    }
}

fn log_disposition(torrent: &TorrentRecord, disposition: Disposition, ratio_limit: f64) {
    match disposition {
        Disposition::Delete => debug!(
            name = %torrent.name,
            tracker = %torrent.tracker,
            ratio = torrent.ratio,
            ratio_limit = ratio_limit,
            "Torrent ratio reached limit"
        ),
        Disposition::SkipRatio => debug!(
            name = %torrent.name,
            state = %torrent.state,
            ratio = torrent.ratio,
            tracker = %torrent.tracker,
            "Skipping torrent"
        ),
        Disposition::SkipAllowedTrackerUnderLimit => debug!(
            name = %torrent.name,
            tracker = %torrent.tracker,
            "Ignoring torrent from allowed tracker"
        ),
        Disposition::SkipAllowedTrackerOverLimit => debug!(
            name = %torrent.name,
            tracker = %torrent.tracker,
            ratio = torrent.ratio,
            ratio_limit = ratio_limit,
            "Ignoring torrent from allowed tracker with ratio over limit"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::command::ConsoleCommand;
    use crate::core::error::ConsoleError;
    use std::cell::RefCell;

    const SCENARIO_DUMP: &str = "Name: X\nID: 1\nState: Seeding\nShare Ratio: 0.6\nTracker: t1";

    /// Serves a canned dump and records every command it receives
    struct RecordingConsole {
        dump: Option<String>,
        failing: Vec<ConsoleCommand>,
        issued: RefCell<Vec<ConsoleCommand>>,
    }

    impl RecordingConsole {
        fn with_dump(dump: &str) -> Self {
            Self {
                dump: Some(dump.to_string()),
                failing: Vec::new(),
                issued: RefCell::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                dump: None,
                failing: Vec::new(),
                issued: RefCell::new(Vec::new()),
            }
        }

        fn failing_on(mut self, command: ConsoleCommand) -> Self {
            self.failing.push(command);
            self
        }

        fn issued(&self) -> Vec<String> {
            self.issued.borrow().iter().map(ToString::to_string).collect()
        }

        fn mutating_count(&self) -> usize {
            self.issued.borrow().iter().filter(|c| c.is_mutating()).count()
        }
    }

    impl ConsoleClient for RecordingConsole {
        fn run(&self, command: &ConsoleCommand) -> Result<String, ConsoleError> {
            self.issued.borrow_mut().push(command.clone());

            let fail = || ConsoleError::Spawn {
                program: "deluge-console".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            };

            if self.failing.contains(command) {
                return Err(fail());
            }

            match command {
                ConsoleCommand::Info => self.dump.clone().ok_or_else(fail),
                _ => Ok(String::new()),
            }
        }
    }

    fn no_allowed() -> RetentionPolicy {
        RetentionPolicy::new(0.5, Vec::<String>::new())
    }

    #[test]
    fn test_seeding_over_limit_is_paused_then_removed() {
        let console = RecordingConsole::with_dump(SCENARIO_DUMP);
        let report = CleanupRunner::new(&console, no_allowed(), false).run().unwrap();

        assert_eq!(report.outcomes[0].disposition, Disposition::Delete);
        assert!(report.outcomes[0].removed);
        assert_eq!(report.summary.deleted, 1);
        assert_eq!(console.issued(), vec!["info --detailed", "pause 1", "rm 1"]);
    }

    #[test]
    fn test_allowed_tracker_issues_no_mutation() {
        let console = RecordingConsole::with_dump(SCENARIO_DUMP);
        let policy = RetentionPolicy::new(0.5, ["t1"]);
        let report = CleanupRunner::new(&console, policy, false).run().unwrap();

        assert_eq!(
            report.outcomes[0].disposition,
            Disposition::SkipAllowedTrackerOverLimit
        );
        assert_eq!(report.summary.skipped_tracker_over_limit, 1);
        assert_eq!(console.mutating_count(), 0);
    }

    #[test]
    fn test_paused_torrent_is_skipped_by_ratio() {
        let dump = "Name: X\nID: 1\nState: Paused\nShare Ratio: 0.9\nTracker: t1";
        let console = RecordingConsole::with_dump(dump);
        let policy = RetentionPolicy::new(0.5, ["t2"]);
        let report = CleanupRunner::new(&console, policy, false).run().unwrap();

        assert_eq!(report.outcomes[0].disposition, Disposition::SkipRatio);
        assert_eq!(report.summary.skipped_ratio, 1);
        assert_eq!(console.mutating_count(), 0);
    }

    #[test]
    fn test_dry_run_reports_without_mutating() {
        let console = RecordingConsole::with_dump(SCENARIO_DUMP);
        let report = CleanupRunner::new(&console, no_allowed(), true).run().unwrap();

        assert!(report.dry_run);
        assert_eq!(report.outcomes[0].disposition, Disposition::Delete);
        assert!(!report.outcomes[0].removed);
        assert_eq!(report.summary.deleted, 1);
        assert!(report.summary.render(true).contains("Would be deleted"));
        assert_eq!(console.issued(), vec!["info --detailed"]);
    }

    #[test]
    fn test_remove_is_attempted_when_pause_fails() {
        let console = RecordingConsole::with_dump(SCENARIO_DUMP)
            .failing_on(ConsoleCommand::Pause("1".to_string()));
        let report = CleanupRunner::new(&console, no_allowed(), false).run().unwrap();

        assert_eq!(console.issued(), vec!["info --detailed", "pause 1", "rm 1"]);
        assert_eq!(report.summary.failed_actions, 1);
        assert!(!report.outcomes[0].removed);
    }

    #[test]
    fn test_unreachable_console_is_an_error() {
        let console = RecordingConsole::unreachable();
        let result = CleanupRunner::new(&console, no_allowed(), false).run();

        assert!(matches!(result, Err(CleanupError::Console(_))));
        assert_eq!(console.mutating_count(), 0);
    }

    #[test]
    fn test_empty_dump_processes_nothing() {
        let console = RecordingConsole::with_dump("");
        let report = CleanupRunner::new(&console, no_allowed(), false).run().unwrap();

        assert_eq!(report.summary, CleanupSummary::default());
        assert!(report.outcomes.is_empty());
    }

    #[test]
    fn test_invalid_ratio_aborts_before_any_removal() {
        let dump = format!("{}\n\nName: Y\nID: 2\nShare Ratio: ???", SCENARIO_DUMP);
        let console = RecordingConsole::with_dump(&dump);
        let result = CleanupRunner::new(&console, no_allowed(), false).run();

        assert!(matches!(result, Err(CleanupError::Report(_))));
        assert_eq!(console.mutating_count(), 0);
    }

    #[test]
    fn test_mixed_dump_keeps_order_and_counts() {
        let dump = "\
Name: a\nID: 1\nState: Seeding\nShare Ratio: 2.0\nTracker: public.example\n\n\
Name: b\nID: 2\nState: Seeding\nShare Ratio: 0.1\nTracker: public.example\n\n\
Name: c\nID: 3\nState: Seeding\nShare Ratio: 0.1\nTracker: private.example\n\n\
Name: d\nID: 4\nState: Seeding\nShare Ratio: 5.0\nTracker: private.example";
        let console = RecordingConsole::with_dump(dump);
        let policy = RetentionPolicy::new(1.0, ["private.example"]);
        let report = CleanupRunner::new(&console, policy, false).run().unwrap();

        let ids: Vec<&str> = report.outcomes.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert_eq!(report.summary.deleted, 1);
        assert_eq!(report.summary.skipped_ratio, 1);
        assert_eq!(report.summary.skipped_tracker_under_limit, 1);
        assert_eq!(report.summary.skipped_tracker_over_limit, 1);
        assert_eq!(console.issued(), vec!["info --detailed", "pause 1", "rm 1"]);
    }
}
