mod config;
mod error;
mod process;
mod tester;
#[cfg(test)]
mod tests;
mod transport;
mod types;

pub use config::{Config, DEFAULT_PROTOCOL_VERSION};
pub use error::{Error, Result, Stage};
pub use process::{ChildTransport, ServerProcess};
pub use tester::{Outcome, SmokeTest};
pub use transport::LineTransport;
pub use types::*;
