//! HS code detail tool.
//!
//! Looks up the customs tariff record for a single commodity code through
//! the INSW `komoditas` endpoint and returns the record's `data` field as
//! indented JSON.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::client::CommodityClient;
use super::common::{success_result, take_field, to_pretty_json, unavailable_result, validate_hscode};
use crate::core::config::Config;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the HS code detail tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct HsCodeDetailParams {
    /// Commodity (HS) code to look up.
    #[schemars(
        description = "Commodity code or harmonized system code for import product categorization. \
                       Must be a plain string of letters and digits: no dots, spaces or other special characters \
                       (e.g. 01019000)."
    )]
    pub hscode: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// HS code detail tool - fetches the tariff record for one commodity code.
pub struct HsCodeDetailTool;

impl HsCodeDetailTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_hscode_detail";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detail of commodity code in Indonesia. \
        Returns the customs tariff and classification record for the given HS code as JSON.";

    /// Execute the tool logic.
    ///
    /// Upstream failures become the fixed "unable to fetch" result. A response
    /// without a `data` field is an error for this call only.
    #[instrument(skip_all, fields(hscode = %params.hscode))]
    pub async fn execute(
        params: &HsCodeDetailParams,
        client: &CommodityClient,
    ) -> Result<CallToolResult, ToolError> {
        info!("HS code detail tool called");

        validate_hscode(&params.hscode)?;

        let url = match client.detail_url(&params.hscode) {
            Ok(url) => url,
            Err(e) => return Ok(unavailable_result(&e)),
        };

        let mut body = match client.execute(url).await {
            Ok(body) => body,
            Err(e) => return Ok(unavailable_result(&e)),
        };

        let data = take_field(&mut body, "data")?;
        Ok(success_result(to_pretty_json(&data)?))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<HsCodeDetailParams>(),
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
                let params: HsCodeDetailParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Self::execute(&params, &client).await.map_err(McpError::from)
            }
            .boxed()
        })
    }
}
