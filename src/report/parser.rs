use crate::core::error::ReportError;
use crate::models::torrent::TorrentRecord;
use tracing::{debug, info, trace};

const NAME_LABEL: &str = "Name:";
const ID_LABEL: &str = "ID:";
const STATE_LABEL: &str = "State:";
const SHARE_RATIO_LABEL: &str = "Share Ratio:";
const TRACKER_LABEL: &str = "Tracker:";

/// Parse the output of `info --detailed` into torrent records.
///
/// Records are separated by a blank line. Blocks without both a name and an
/// id are dropped. Output order follows input order.
pub fn parse_report(dump: &str) -> Result<Vec<TorrentRecord>, ReportError> {
    let dump = dump.replace("\r\n", "\n");
    let mut torrents = Vec::new();

    for (index, block) in dump.split("\n\n").enumerate() {
        match parse_block(block)? {
            Some(torrent) => {
                trace!(
                    name = %torrent.name,
                    id = %torrent.id,
                    state = %torrent.state,
                    ratio = torrent.ratio,
                    tracker = %torrent.tracker,
                    "Parsed torrent"
                );
                torrents.push(torrent);
            }
            None if !block.trim().is_empty() => {
                debug!(block = index, "Dropping report block without name or id");
            }
            None => {}
        }
    }

    info!(total = torrents.len(), "Total torrents parsed");

    Ok(torrents)
}

fn parse_block(block: &str) -> Result<Option<TorrentRecord>, ReportError> {
    let mut name = String::new();
    let mut id = String::new();
    let mut state = String::new();
    let mut ratio_text: Option<String> = None;
    let mut tracker = String::new();

    for line in block.lines() {
        if let Some(rest) = line.strip_prefix(NAME_LABEL) {
            name = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(ID_LABEL) {
            id = rest.trim().to_string();
        } else if let Some(rest) = line.strip_prefix(STATE_LABEL) {
            state = rest.trim().to_string();
        } else if let Some((_, rest)) = line.split_once(SHARE_RATIO_LABEL) {
            ratio_text = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix(TRACKER_LABEL) {
            tracker = rest.trim().to_string();
        }
    }

    if name.is_empty() || id.is_empty() {
        return Ok(None);
    }

    let ratio = match ratio_text {
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| ReportError::InvalidShareRatio {
                name: name.clone(),
                value,
            })?,
        None => 0.0,
    };

    Ok(Some(TorrentRecord::new(name, id, state, ratio, tracker)))
}
