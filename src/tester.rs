use crate::{
    Config, Error, LineTransport, Result, ServerProcess, Stage,
    types::{
        EmptyParams, INITIALIZE, INITIALIZED, Implementation, InitializeParams, Notification,
        RESOURCES_LIST, Request, ResourceEntry, Response,
    },
};
use std::io::Write;
use tokio::io::{AsyncRead, AsyncWrite};

/// How a smoke test run ended
#[derive(Debug)]
pub enum Outcome {
    /// The executable does not exist; nothing was spawned
    NotFound,
    /// The server listed its resources
    Listed(Vec<ResourceEntry>),
    /// The `resources/list` response had no `result.resources`
    NoResources,
    /// The run stopped early; the error was reported
    Failed(Error),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Listed(_))
    }
}

/// Scripted `initialize` then `resources/list` exchange against one server
pub struct SmokeTest {
    config: Config,
}

impl SmokeTest {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Spawns the server, runs the exchange and reports to `out`.
    ///
    /// Never fails: every error is written to `out` and returned as
    /// [`Outcome::Failed`]. The server is terminated before returning.
    pub async fn run<O: Write>(&self, out: &mut O) -> Outcome {
        let _ = writeln!(
            out,
            "Testing MCP server at: {}",
            self.config.executable.display()
        );

        let mut server = match ServerProcess::spawn(&self.config) {
            Ok(server) => server,
            Err(err @ Error::ExecutableNotFound(_)) => {
                tracing::warn!("{err}");
                let _ = writeln!(out, "{}", err.report_line());
                return Outcome::NotFound;
            }
            Err(err) => return self.fail(out, err),
        };

        let outcome = match server.transport() {
            Ok(mut transport) => self.exchange(&mut transport, out).await,
            Err(err) => Err(err),
        };

        if let Err(err) = server.terminate().await {
            tracing::warn!("failed to terminate server: {err}");
        }

        match outcome {
            Ok(outcome) => outcome,
            Err(err) => self.fail(out, err),
        }
    }

    /// The protocol exchange over an already connected transport
    pub async fn exchange<R, W, O>(
        &self,
        transport: &mut LineTransport<R, W>,
        out: &mut O,
    ) -> Result<Outcome>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        O: Write,
    {
        let initialize = Request::new(
            1,
            INITIALIZE,
            InitializeParams {
                protocol_version: self.config.protocol_version.clone(),
                capabilities: EmptyParams::new(),
                client_info: Implementation {
                    name: self.config.client_name.clone(),
                    version: self.config.client_version.clone(),
                },
            },
        );

        writeln!(out, "Sending initialize request...")?;
        transport.send(&initialize).await?;

        writeln!(out, "Waiting for initialize response...")?;
        let line = transport
            .recv_line()
            .await?
            .ok_or(Error::EndOfStream(Stage::Initialize))?;
        writeln!(
            out,
            "Received: {}...",
            preview(&line, self.config.initialize_preview)
        )?;

        let response: Response = serde_json::from_str(&line)?;
        if let Some(error) = response.error() {
            return Err(Error::Protocol {
                stage: Stage::Initialize,
                error: error.clone(),
            });
        }
        tracing::info!("server initialized");

        transport
            .send(&Notification::new(INITIALIZED, EmptyParams::new()))
            .await?;

        writeln!(out, "Sending resources/list request...")?;
        transport
            .send(&Request::new(2, RESOURCES_LIST, EmptyParams::new()))
            .await?;

        writeln!(out, "Waiting for resources/list response...")?;
        let line = transport
            .recv_line()
            .await?
            .ok_or(Error::EndOfStream(Stage::ResourcesList))?;
        writeln!(
            out,
            "Received Resources: {}...",
            preview(&line, self.config.resources_preview)
        )?;

        let response: Response = serde_json::from_str(&line)?;
        let Some(resources) = response.resources() else {
            writeln!(out, "No resources found or unexpected format.")?;
            return Ok(Outcome::NoResources);
        };

        let resources: Vec<ResourceEntry> = serde_json::from_value(resources.clone())?;
        writeln!(out, "\nSUCCESS! Found {} notebooks.", resources.len())?;
        for resource in &resources {
            writeln!(out, "{resource}")?;
        }

        Ok(Outcome::Listed(resources))
    }

    fn fail<O: Write>(&self, out: &mut O, err: Error) -> Outcome {
        tracing::warn!("smoke test failed: {err}");
        let _ = writeln!(out, "{}", err.report_line());
        Outcome::Failed(err)
    }
}

/// At most `max` characters of the trimmed line
fn preview(line: &str, max: usize) -> &str {
    let line = line.trim();
    match line.char_indices().nth(max) {
        Some((end, _)) => &line[..end],
        None => line,
    }
}
