//! Reading the bootstrap snapshot embedded in the index page.

use tasklist_store::TaskRecord;

use crate::error::{TaskClientError, TaskClientResult};

/// `id` of the script element holding the snapshot.
pub const BOOTSTRAP_ELEMENT_ID: &str = "bootstrap";

/// Parse a snapshot: a JSON array of task records.
pub fn parse_snapshot(json: &str) -> TaskClientResult<Vec<TaskRecord>> {
    serde_json::from_str(json)
        .map_err(|err| TaskClientError::Bootstrap(format!("invalid snapshot: {}", err)))
}

/// Find the snapshot script element in `page` and parse its contents.
pub fn extract_from_page(page: &str) -> TaskClientResult<Vec<TaskRecord>> {
    let marker = format!(r#"id="{}""#, BOOTSTRAP_ELEMENT_ID);
    let start = page
        .find(&marker)
        .ok_or_else(|| TaskClientError::Bootstrap("no bootstrap element on page".to_string()))?;

    let after_tag = &page[start..];
    let body_start = after_tag
        .find('>')
        .ok_or_else(|| TaskClientError::Bootstrap("unterminated bootstrap tag".to_string()))?
        + 1;
    let body = &after_tag[body_start..];
    let body_end = body
        .find("</script>")
        .ok_or_else(|| TaskClientError::Bootstrap("unterminated bootstrap element".to_string()))?;

    parse_snapshot(body[..body_end].trim())
}
