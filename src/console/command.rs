use std::fmt;

/// Subcommands issued to deluge-console after connecting
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Dump every torrent in the detailed record format
    Info,
    Pause(String),
    Remove(String),
}

impl ConsoleCommand {
    /// Whether the command changes state on the daemon
    pub fn is_mutating(&self) -> bool {
        !matches!(self, ConsoleCommand::Info)
    }
}

impl fmt::Display for ConsoleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleCommand::Info => write!(f, "info --detailed"),
            ConsoleCommand::Pause(id) => write!(f, "pause {}", id),
            ConsoleCommand::Remove(id) => write!(f, "rm {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_text() {
        assert_eq!(ConsoleCommand::Info.to_string(), "info --detailed");
        assert_eq!(ConsoleCommand::Pause("1".to_string()).to_string(), "pause 1");
        assert_eq!(ConsoleCommand::Remove("1".to_string()).to_string(), "rm 1");
    }

    #[test]
    fn test_only_info_is_read_only() {
        assert!(!ConsoleCommand::Info.is_mutating());
        assert!(ConsoleCommand::Pause("a".to_string()).is_mutating());
        assert!(ConsoleCommand::Remove("a".to_string()).is_mutating());
    }
}
