use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub const JSONRPC_VERSION: &str = "2.0";

pub const INITIALIZE: &str = "initialize";
pub const INITIALIZED: &str = "notifications/initialized";
pub const RESOURCES_LIST: &str = "resources/list";

/// Parameters that serialize as `{}`
pub type EmptyParams = Map<String, Value>;

/// A call that expects a response correlated by `id`
#[derive(Debug, Clone, Serialize)]
pub struct Request<P = EmptyParams> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: P,
}

impl<P> Request<P> {
    pub fn new(id: u64, method: &'static str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method,
            params,
        }
    }
}

/// A fire-and-forget message with no `id`
#[derive(Debug, Clone, Serialize)]
pub struct Notification<P = EmptyParams> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
}

impl<P> Notification<P> {
    pub fn new(method: &'static str, params: P) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    pub capabilities: EmptyParams,
    pub client_info: Implementation,
}

#[derive(Debug, Clone, Serialize)]
pub struct Implementation {
    pub name: String,
    pub version: String,
}

/// A response line as read off the wire.
///
/// Kept as raw JSON so that a server returning an unexpected shape is
/// reported rather than rejected.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct Response(pub Value);

impl Response {
    /// The `error` member, if the server sent one (even `null`)
    pub fn error(&self) -> Option<&Value> {
        self.0.as_object()?.get("error")
    }

    /// `result.resources`, when present
    pub fn resources(&self) -> Option<&Value> {
        self.0.as_object()?.get("result")?.as_object()?.get("resources")
    }
}

/// One entry of a `resources/list` result.
///
/// Fields hold whatever the server sent; `None` only when the key is absent,
/// so an explicit `null` is kept as `Some(Value::Null)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResourceEntry {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub uri: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl fmt::Display for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("- ")?;
        write_field(f, self.name.as_ref(), "Unknown")?;
        f.write_str(" (")?;
        write_field(f, self.uri.as_ref(), "No URI")?;
        f.write_str(")")
    }
}

/// Strings print bare, anything else as its JSON text
fn write_field(f: &mut fmt::Formatter<'_>, value: Option<&Value>, missing: &str) -> fmt::Result {
    match value {
        None => f.write_str(missing),
        Some(Value::String(text)) => f.write_str(text),
        Some(other) => write!(f, "{other}"),
    }
}
