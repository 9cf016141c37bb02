//! Path routing for the task API.

use hyper::Method;

/// A resolved API path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`: the HTML page with the bootstrap snapshot
    Index,
    /// `/tasks`
    Tasks,
    /// `/tasks/:id`, holding the coerced id (0 when the segment is not numeric)
    Task(i64),
}

impl Route {
    /// Resolve `path` against the configured tasks path. Unknown paths yield `None`.
    pub fn parse(path: &str, tasks_path: &str) -> Option<Route> {
        if path == "/" {
            return Some(Route::Index);
        }
        if path == tasks_path {
            return Some(Route::Tasks);
        }

        let segment = path.strip_prefix(tasks_path)?.strip_prefix('/')?;
        if segment.is_empty() || segment.contains('/') {
            return None;
        }
        Some(Route::Task(parse_task_id(segment)))
    }

    /// Methods served on this route, formatted for the `Allow` header.
    pub fn allowed_methods(&self) -> &'static str {
        match self {
            Route::Index => "GET, OPTIONS",
            Route::Tasks => "GET, POST, OPTIONS",
            Route::Task(_) => "GET, PUT, DELETE, OPTIONS",
        }
    }

    /// Whether `method` is served on this route.
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            Route::Index => method == Method::GET,
            Route::Tasks => method == Method::GET || method == Method::POST,
            Route::Task(_) => {
                method == Method::GET || method == Method::PUT || method == Method::DELETE
            }
        }
    }
}

/// Coerce a path segment to an id the way lenient integer conversion does:
/// leading whitespace and an optional sign, then as many decimal digits as
/// follow. Anything without leading digits is 0.
pub fn parse_task_id(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return 0;
    }

    // Overflow is still "some huge id", which resolves to nothing
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative { -value } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/", "/tasks"), Some(Route::Index));
        assert_eq!(Route::parse("/tasks", "/tasks"), Some(Route::Tasks));
        assert_eq!(Route::parse("/tasks/7", "/tasks"), Some(Route::Task(7)));
        assert_eq!(Route::parse("/tasks/abc", "/tasks"), Some(Route::Task(0)));
        assert_eq!(Route::parse("/tasks/", "/tasks"), None);
        assert_eq!(Route::parse("/tasks/1/extra", "/tasks"), None);
        assert_eq!(Route::parse("/tasksx", "/tasks"), None);
        assert_eq!(Route::parse("/other", "/tasks"), None);
    }

    #[test]
    fn test_custom_tasks_path() {
        assert_eq!(Route::parse("/api/todo", "/api/todo"), Some(Route::Tasks));
        assert_eq!(Route::parse("/api/todo/3", "/api/todo"), Some(Route::Task(3)));
        assert_eq!(Route::parse("/tasks", "/api/todo"), None);
    }

    #[test]
    fn test_parse_task_id_coercion() {
        assert_eq!(parse_task_id("42"), 42);
        assert_eq!(parse_task_id("12abc"), 12);
        assert_eq!(parse_task_id("abc"), 0);
        assert_eq!(parse_task_id(""), 0);
        assert_eq!(parse_task_id("-3"), -3);
        assert_eq!(parse_task_id("+5"), 5);
        assert_eq!(parse_task_id("  9"), 9);
        assert_eq!(parse_task_id("1.5"), 1);
        assert_eq!(parse_task_id("99999999999999999999999"), i64::MAX);
    }

    #[test]
    fn test_allowed_methods() {
        assert!(Route::Tasks.allows(&Method::POST));
        assert!(!Route::Tasks.allows(&Method::DELETE));
        assert!(Route::Task(1).allows(&Method::PUT));
        assert!(!Route::Task(1).allows(&Method::POST));
        assert!(!Route::Index.allows(&Method::POST));
        assert_eq!(Route::Task(1).allowed_methods(), "GET, PUT, DELETE, OPTIONS");
    }
}
