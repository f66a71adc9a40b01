use crate::models::disposition::Disposition;
use crate::models::torrent::TorrentRecord;
use std::collections::HashSet;

/// Ratio limit and tracker exemptions for a cleanup pass
#[derive(Clone, Debug, PartialEq)]
pub struct RetentionPolicy {
    pub ratio_limit: f64,
    pub allowed_trackers: HashSet<String>,
}

impl RetentionPolicy {
    pub fn new<I, S>(ratio_limit: f64, allowed_trackers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ratio_limit,
            allowed_trackers: allowed_trackers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classify(&self, torrent: &TorrentRecord) -> Disposition {
        classify(torrent, self.ratio_limit, &self.allowed_trackers)
    }
}

/// Decide what to do with a torrent.
///
/// Only a torrent in the exact "Seeding" state with a ratio at or above the
/// limit qualifies. Allow-listed trackers are never deleted.
pub fn classify(
    torrent: &TorrentRecord,
    ratio_limit: f64,
    allowed_trackers: &HashSet<String>,
) -> Disposition {
    let qualifies = torrent.is_seeding() && torrent.ratio >= ratio_limit;

    match (allowed_trackers.contains(&torrent.tracker), qualifies) {
        (true, true) => Disposition::SkipAllowedTrackerOverLimit,
        (true, false) => Disposition::SkipAllowedTrackerUnderLimit,
        (false, true) => Disposition::Delete,
        (false, false) => Disposition::SkipRatio,
    }
}
