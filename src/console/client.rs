use crate::console::command::ConsoleCommand;
use crate::core::config::ConnectionSettings;
use crate::core::error::ConsoleError;
use std::process::Command;
use tracing::{debug, trace};

pub const DEFAULT_CONSOLE_BINARY: &str = "deluge-console";
const CONTAINER_RUNTIME: &str = "docker";

/// Runs a single console command and returns its captured stdout
pub trait ConsoleClient {
    fn run(&self, command: &ConsoleCommand) -> Result<String, ConsoleError>;

    fn fetch_dump(&self) -> Result<String, ConsoleError> {
        self.run(&ConsoleCommand::Info)
    }

    fn pause(&self, id: &str) -> Result<String, ConsoleError> {
        self.run(&ConsoleCommand::Pause(id.to_string()))
    }

    fn remove(&self, id: &str) -> Result<String, ConsoleError> {
        self.run(&ConsoleCommand::Remove(id.to_string()))
    }
}

impl<T: ConsoleClient + ?Sized> ConsoleClient for &T {
    fn run(&self, command: &ConsoleCommand) -> Result<String, ConsoleError> {
        (**self).run(command)
    }
}

/// Drives deluge-console as a subprocess, optionally inside a container.
///
/// Every call connects, authenticates and exits on its own.
pub struct DelugeConsole {
    settings: ConnectionSettings,
    binary: String,
}

impl DelugeConsole {
    pub fn new(settings: ConnectionSettings) -> Self {
        Self {
            settings,
            binary: DEFAULT_CONSOLE_BINARY.to_string(),
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    fn script(&self, command: &ConsoleCommand, password: &str) -> String {
        format!(
            "connect {}:{} {} {}; {}",
            self.settings.host, self.settings.port, self.settings.user, password, command
        )
    }

    /// Program and arguments for a command. The script is passed as one
    /// argument, so no shell is involved.
    pub fn invocation(&self, command: &ConsoleCommand) -> (String, Vec<String>) {
        let script = self.script(command, &self.settings.password);

        match &self.settings.container {
            Some(container) => (
                CONTAINER_RUNTIME.to_string(),
                vec![
                    "exec".to_string(),
                    container.clone(),
                    self.binary.clone(),
                    script,
                ],
            ),
            None => (self.binary.clone(), vec![script]),
        }
    }
}

impl ConsoleClient for DelugeConsole {
    fn run(&self, command: &ConsoleCommand) -> Result<String, ConsoleError> {
        let (program, args) = self.invocation(command);

        debug!(
            program = %program,
            container = ?self.settings.container,
            script = %self.script(command, "****"),
            "Running console command"
        );

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|source| ConsoleError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConsoleError::CommandFailed {
                command: command.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = decode_output(&output.stdout);
        trace!(command = %command, output = %stdout, "Console command output");

        Ok(stdout)
    }
}

/// Torrent names are not guaranteed to be UTF-8; invalid bytes become U+FFFD
/// so the rest of the report stays usable.
fn decode_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}
