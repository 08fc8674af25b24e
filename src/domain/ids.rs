use crate::error::{GatewayError, Result};

/// Checks an identifier that is about to be interpolated into a request path.
///
/// Separators, dot segments and percent escapes are refused outright so the
/// id can only ever name a single path segment.
pub fn checked_id<'a>(kind: &str, id: &'a str) -> Result<&'a str> {
    let is_dot_segment = id == "." || id == "..";
    if id.is_empty() || is_dot_segment || id.contains(['/', '\\', '?', '#', '%']) {
        return Err(GatewayError::ValidationError(format!(
            "invalid {kind} id {id:?}"
        )));
    }
    Ok(id)
}
