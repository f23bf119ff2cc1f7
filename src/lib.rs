//! HS Code MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server that looks up
//! Indonesian commodity (HS) codes and customs tariff details through the
//! INSW web API.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the MCP server handler and the
//!   stdio transport
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: `get_hscode_detail` and `search_commodity_description`
//!
//! # Example
//!
//! ```rust,no_run
//! use hscode_mcp_server::core::{Config, McpServer, StdioTransport};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config);
//!     StdioTransport::run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
