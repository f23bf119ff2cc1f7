//! HS code tools module.
//!
//! Tools backed by the Indonesia National Single Window (INSW) commodity API:
//! - `detail`: tariff record for one HS code
//! - `search`: free-text search over commodity descriptions
//!
//! Both share the request executor in `client` and the helpers in `common`.

pub mod client;
pub mod common;
pub mod detail;
pub mod search;

pub use client::{CommodityClient, UpstreamError};
pub use detail::{HsCodeDetailParams, HsCodeDetailTool};
pub use search::{CommoditySearchParams, CommoditySearchTool};
