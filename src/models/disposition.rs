use serde::Serialize;
use std::fmt;

/// What the cleanup pass decides to do with a torrent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Seeding at or above the ratio limit on a tracker that is not allow-listed
    Delete,
    /// Not seeding, or below the ratio limit
    SkipRatio,
    /// Allow-listed tracker, would not have qualified anyway
    SkipAllowedTrackerUnderLimit,
    /// Allow-listed tracker, would otherwise have been deleted
    SkipAllowedTrackerOverLimit,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Disposition::Delete => "delete",
            Disposition::SkipRatio => "skip_ratio",
            Disposition::SkipAllowedTrackerUnderLimit => "skip_allowed_tracker_under_limit",
            Disposition::SkipAllowedTrackerOverLimit => "skip_allowed_tracker_over_limit",
        };
        f.write_str(label)
    }
}
