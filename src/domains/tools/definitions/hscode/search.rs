//! Commodity description search tool.
//!
//! Searches the INSW HS code catalogue by free text and returns the result
//! list of the best-matching bucket.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use super::client::CommodityClient;
use super::common::{success_result, take_field, to_pretty_json, unavailable_result};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

/// Parameters for commodity search operations.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CommoditySearchParams {
    /// Free-text query (goods name or partial code).
    #[schemars(
        description = "Goods or commodity query to search for its commodity code and custom tariff"
    )]
    pub query: String,
}

/// Commodity search tool implementation.
#[derive(Debug, Clone)]
pub struct CommoditySearchTool;

impl CommoditySearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "search_commodity_description";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get list of all possible Indonesia commodity codes by commodity name or code. \
        Returns the first page (up to 10) of matching HS code entries as JSON.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(query = %params.query))]
    pub async fn execute(
        params: &CommoditySearchParams,
        client: &CommodityClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("Commodity search tool called");

        let url = match client.search_url(&params.query) {
            Ok(url) => url,
            Err(e) => return Ok(unavailable_result(&e)),
        };

        let body = match client.execute(url).await {
            Ok(body) => body,
            Err(e) => return Ok(unavailable_result(&e)),
        };

        let result = first_bucket_result(body)?;
        Ok(success_result(to_pretty_json(&result)?))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<CommoditySearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the MCP tool router.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = CommodityClient::from_config(&config);
            async move {
                let params: CommoditySearchParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::execute(&params, &client).await.map_err(McpError::from)
            }
            .boxed()
        })
    }
}

/// Extract `data[0].result` from a search response.
fn first_bucket_result(mut body: Value) -> Result<Value, ToolError> {
    let data = take_field(&mut body, "data")?;

    let mut buckets = match data {
        Value::Array(buckets) => buckets,
        other => {
            return Err(ToolError::unexpected_response(format!(
                "`data` is not an array (got {})",
                json_type(&other)
            )));
        }
    };

    if buckets.is_empty() {
        return Err(ToolError::unexpected_response("`data` contains no result buckets"));
    }

    take_field(&mut buckets.swap_remove(0), "result")
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
