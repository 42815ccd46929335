use crate::{Config, Error, LineTransport, Result};
use std::{io, process::ExitStatus};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

pub type ChildTransport = LineTransport<ChildStdout, ChildStdin>;

/// The server under test.
///
/// Stdin and stdout are piped, stderr is passed through to ours. The child is
/// killed on drop so an unwinding run never leaks it.
#[derive(Debug)]
pub struct ServerProcess {
    child: Child,
    terminated: bool,
}

impl ServerProcess {
    pub fn spawn(config: &Config) -> Result<Self> {
        if !config.executable.exists() {
            return Err(Error::ExecutableNotFound(config.executable.clone()));
        }

        let child = Command::new(&config.executable)
            .args(&config.args)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()?;

        tracing::info!(pid = ?child.id(), executable = %config.executable.display(), "spawned server");

        Ok(Self {
            child,
            terminated: false,
        })
    }

    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Takes the child's stdio pipes. Can only be done once.
    pub fn transport(&mut self) -> Result<ChildTransport> {
        let stdin = self.child.stdin.take();
        let stdout = self.child.stdout.take();
        match (stdout, stdin) {
            (Some(stdout), Some(stdin)) => Ok(LineTransport::new(stdout, stdin)),
            _ => Err(io::Error::new(io::ErrorKind::BrokenPipe, "server stdio already taken").into()),
        }
    }

    /// Stops the server and reaps it.
    ///
    /// Returns the exit status the first time and `None` on every later call.
    pub async fn terminate(&mut self) -> Result<Option<ExitStatus>> {
        if self.terminated {
            return Ok(None);
        }
        self.terminated = true;

        // close our end of its stdin first in case the transport was never taken
        drop(self.child.stdin.take());

        let status = match self.child.try_wait()? {
            Some(status) => status,
            None => {
                self.child.start_kill()?;
                self.child.wait().await?
            }
        };

        tracing::info!(%status, "server terminated");
        Ok(Some(status))
    }
}
