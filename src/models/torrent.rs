use serde::Serialize;

/// State label deluge-console reports for a torrent that is seeding
pub const SEEDING_STATE: &str = "Seeding";

/// One torrent entry from the `info --detailed` report
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TorrentRecord {
    /// Display name
    pub name: String,
    /// Opaque identifier passed back to `pause` and `rm`
    pub id: String,
    /// State label as reported, e.g. "Seeding" or "Paused"
    pub state: String,
    /// Share ratio, 0 when the report omits it
    pub ratio: f64,
    /// Primary tracker host, may be empty
    pub tracker: String,
}

impl TorrentRecord {
    pub fn new(name: String, id: String, state: String, ratio: f64, tracker: String) -> Self {
        Self {
            name,
            id,
            state,
            ratio,
            tracker,
        }
    }

    pub fn is_seeding(&self) -> bool {
        self.state == SEEDING_STATE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding_is_exact_match() {
        let mut torrent = TorrentRecord::new(
            "Ubuntu".to_string(),
            "abc".to_string(),
            "Seeding".to_string(),
            1.0,
            String::new(),
        );
        assert!(torrent.is_seeding());

        torrent.state = "seeding".to_string();
        assert!(!torrent.is_seeding());

        torrent.state = "Seeding ".to_string();
        assert!(!torrent.is_seeding());
    }
}
