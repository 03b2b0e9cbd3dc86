//! Mapping from notepad errors to MCP protocol errors

use notepad_core::Error;
use rmcp::model::{ErrorCode, ErrorData};

/// Convert a dispatcher error into the JSON-RPC error returned to the client
///
/// | Error            | Code                      |
/// |------------------|---------------------------|
/// | `UnknownTool`    | -32601 method not found   |
/// | `InvalidArgument`| -32602 invalid params     |
/// | `NotFound`       | -32002 resource not found |
/// | anything else    | -32603 internal error     |
pub fn to_error_data(err: &Error) -> ErrorData {
    match err {
        Error::UnknownTool(_) => ErrorData::new(ErrorCode::METHOD_NOT_FOUND, err.to_string(), None),
        Error::InvalidArgument(msg) => ErrorData::invalid_params(msg.clone(), None),
        Error::NotFound(msg) => ErrorData::resource_not_found(msg.clone(), None),
        Error::Storage(msg) => ErrorData::internal_error(msg.clone(), None),
        other => ErrorData::internal_error(other.to_string(), None),
    }
}
