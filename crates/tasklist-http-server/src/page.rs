//! Index page with the bootstrap snapshot.
//!
//! The page carries the current task list as JSON inside
//! `<script id="bootstrap" type="application/json">` so a client can seed its
//! collection without an extra round trip.

use tasklist_store::TaskRecord;

/// `id` of the script element holding the bootstrap snapshot.
pub const BOOTSTRAP_ELEMENT_ID: &str = "bootstrap";

/// Render the index page for `tasks`.
pub fn render_index(title: &str, tasks: &[TaskRecord]) -> Result<String, serde_json::Error> {
    let snapshot = bootstrap_json(tasks)?;
    let title = escape_text(title);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{title}</h1>
<form id="task-form">
<textarea name="comment"></textarea>
<button type="submit">Add task</button>
</form>
<ul id="task-list"></ul>
<script id="{id}" type="application/json">{snapshot}</script>
</body>
</html>
"#,
        title = title,
        id = BOOTSTRAP_ELEMENT_ID,
        snapshot = snapshot,
    ))
}

/// Serialize `tasks` so the JSON can sit inside a `<script>` element.
///
/// `<`, `>` and `&` only appear inside JSON strings, where the `\u` escapes
/// decode to the same text.
pub fn bootstrap_json(tasks: &[TaskRecord]) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(tasks)?;
    Ok(json
        .replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e"))
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tasklist_store::TaskFields;

    fn record(id: u64, comment: &str) -> TaskRecord {
        let mut fields = TaskFields::new();
        fields.insert("comment".to_string(), json!(comment));
        TaskRecord::new(id, fields, 1_700_000_000)
    }

    #[test]
    fn test_bootstrap_json_cannot_close_script() {
        let tasks = vec![record(1, "</script><script>alert(1)</script>")];
        let json = bootstrap_json(&tasks).unwrap();

        assert!(!json.contains("</script>"));
        let decoded: Vec<TaskRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded[0].comment(), Some("</script><script>alert(1)</script>"));
    }

    #[test]
    fn test_render_index_embeds_snapshot() {
        let tasks = vec![record(1, "buy milk"), record(2, "walk dog")];
        let page = render_index("Tasks & <Things>", &tasks).unwrap();

        assert!(page.contains("<title>Tasks &amp; &lt;Things&gt;</title>"));
        assert!(page.contains(r#"<ul id="task-list"></ul>"#));
        assert!(page.contains(r#"<form id="task-form">"#));
        assert!(page.contains(r#"<script id="bootstrap" type="application/json">["#));
        assert!(page.contains("buy milk"));
        assert!(page.contains("walk dog"));
    }

    #[test]
    fn test_render_index_empty_snapshot() {
        let page = render_index("Tasks", &[]).unwrap();
        assert!(page.contains(r#"type="application/json">[]</script>"#));
    }
}
