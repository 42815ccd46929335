use std::path::PathBuf;

/// Protocol revision announced in the `initialize` request when none is configured
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the MCP server executable under test
    pub executable: PathBuf,

    /// Extra arguments passed to the server executable
    pub args: Vec<String>,

    /// `protocolVersion` sent during initialization
    pub protocol_version: String,

    /// `clientInfo.name` sent during initialization
    pub client_name: String,

    /// `clientInfo.version` sent during initialization
    pub client_version: String,

    /// Maximum characters of the initialize response echoed to the report
    pub initialize_preview: usize,

    /// Maximum characters of the resources/list response echoed to the report
    pub resources_preview: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // No sensible default exists; callers must point this at a server
            executable: PathBuf::new(),
            args: Vec::new(),
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            client_name: "test-client".to_string(),
            client_version: "1.0".to_string(),
            initialize_preview: 200,
            resources_preview: 500,
        }
    }
}

impl Config {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            ..Self::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    pub fn with_client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.client_name = name.into();
        self.client_version = version.into();
        self
    }
}
