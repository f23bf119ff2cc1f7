//! Common utilities shared across the HS code tools.
//!
//! Argument validation, pretty rendering of upstream JSON and the shared
//! result constructors live here.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::{Value, ser::PrettyFormatter};
use tracing::warn;

use super::client::UpstreamError;
use crate::domains::tools::ToolError;

/// Message returned for every upstream failure, whatever its cause.
pub const UNAVAILABLE_MESSAGE: &str = "Unable to fetch commodity data for this location.";

/// Check that `hscode` is a raw code token: ASCII letters and digits only.
pub fn validate_hscode(hscode: &str) -> Result<(), ToolError> {
    if hscode.is_empty() {
        return Err(ToolError::invalid_arguments("hscode must not be empty"));
    }

    if let Some(c) = hscode.chars().find(|c| !c.is_ascii_alphanumeric()) {
        return Err(ToolError::invalid_arguments(format!(
            "hscode must contain only letters and digits (found {c:?}); \
             pass codes like 01019000, not 0101.90.00"
        )));
    }

    Ok(())
}

/// Render `value` as JSON indented with four spaces.
///
/// Non-ASCII text is written as raw UTF-8, not as `\uXXXX` escapes.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ToolError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| ToolError::internal(format!("failed to render JSON: {e}")))?;
    String::from_utf8(buf).map_err(|e| ToolError::internal(format!("rendered JSON is not UTF-8: {e}")))
}

/// Take field `key` out of a JSON object, failing on any other shape.
pub fn take_field(value: &mut Value, key: &str) -> Result<Value, ToolError> {
    value
        .as_object_mut()
        .and_then(|obj| obj.remove(key))
        .ok_or_else(|| ToolError::unexpected_response(format!("missing field `{key}`")))
}

/// Tool result for an upstream failure.
pub fn unavailable_result(err: &UpstreamError) -> CallToolResult {
    warn!(kind = err.kind(), "Commodity API request failed: {}", err);
    CallToolResult::error(vec![Content::text(UNAVAILABLE_MESSAGE)])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Text of the first content item, for assertions.
#[cfg(test)]
pub fn result_text(result: &CallToolResult) -> String {
    use rmcp::model::RawContent;

    match &result.content[0].raw {
        RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {other:?}"),
    }
}
