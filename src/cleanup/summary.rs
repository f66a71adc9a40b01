use crate::models::disposition::Disposition;
use serde::Serialize;
use std::fmt::Write;

pub const SEPARATOR_WIDTH: usize = 35;

/// Counters accumulated over one cleanup pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupSummary {
    pub total: usize,
    pub deleted: usize,
    pub skipped_ratio: usize,
    pub skipped_tracker_under_limit: usize,
    pub skipped_tracker_over_limit: usize,
    /// Pause or remove commands that failed
    pub failed_actions: usize,
}

impl CleanupSummary {
    pub fn record(&mut self, disposition: Disposition) {
        self.total += 1;
        match disposition {
            Disposition::Delete => self.deleted += 1,
            Disposition::SkipRatio => self.skipped_ratio += 1,
            Disposition::SkipAllowedTrackerUnderLimit => self.skipped_tracker_under_limit += 1,
            Disposition::SkipAllowedTrackerOverLimit => self.skipped_tracker_over_limit += 1,
        }
    }

    pub fn total_skipped(&self) -> usize {
        self.skipped_ratio + self.skipped_tracker_under_limit + self.skipped_tracker_over_limit
    }

    /// Fixed-format table printed at the end of a run
    pub fn render(&self, dry_run: bool) -> String {
        let mut out = String::new();
        let deleted_label = if dry_run { "Would be deleted" } else { "Deleted" };

        stat_line(&mut out, "Total torrents", self.total);
        stat_line(&mut out, deleted_label, self.deleted);
        if self.failed_actions > 0 {
            stat_line(&mut out, "Failed actions", self.failed_actions);
        }
        out.push_str(&separator());
        out.push('\n');
        stat_line(&mut out, "Total skipped", self.total_skipped());
        stat_line(&mut out, "Due to ratio", self.skipped_ratio);
        stat_line(&mut out, "Allowed tracker (under limit)", self.skipped_tracker_under_limit);
        stat_line(&mut out, "Allowed tracker (over limit)", self.skipped_tracker_over_limit);

        out
    }
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

fn stat_line(out: &mut String, name: &str, value: usize) {
    // writing to a String cannot fail
    let _ = writeln!(out, "{:<30}{:>5}", name, value);
}
