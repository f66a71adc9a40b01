pub mod disposition;
pub mod torrent;
