//! Transport layer for the MCP server.
//!
//! The server speaks MCP over standard input/output. Framing and the JSON-RPC
//! session are handled by `rmcp`; this module owns the serving lifecycle and
//! its errors.

mod error;

pub mod stdio;

pub use error::{TransportError, TransportResult};
pub use stdio::StdioTransport;
