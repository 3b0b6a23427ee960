//! Dashboard routes
//!
//! Maps dashboard URLs to the page that renders them, and back. Tables link
//! rows to detail pages through [`Route::path`].

/// A page of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    JobDashboard,
    JobDetail(String),
    TaskDashboard,
    TaskDetail(String),
    NotFound(String),
}

impl Route {
    /// Resolve a path or full URL
    ///
    /// Scheme, host, query string and fragment are ignored, as are repeated
    /// and trailing slashes.
    pub fn parse(input: &str) -> Self {
        let path = strip_origin(input.trim());
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Landing,
            ["jobs"] => Route::JobDashboard,
            ["jobs", id] => Route::JobDetail((*id).to_string()),
            ["tasks"] => Route::TaskDashboard,
            ["tasks", id] => Route::TaskDetail((*id).to_string()),
            _ => Route::NotFound(format!("/{}", segments.join("/"))),
        }
    }

    /// Canonical path for this page
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::JobDashboard => "/jobs".to_string(),
            Route::JobDetail(id) => format!("/jobs/{}", id),
            Route::TaskDashboard => "/tasks".to_string(),
            Route::TaskDetail(id) => format!("/tasks/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

fn strip_origin(input: &str) -> &str {
    match input.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |idx| &rest[idx..]),
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_pages() {
        assert_eq!(Route::parse("/"), Route::Landing);
        assert_eq!(Route::parse(""), Route::Landing);
        assert_eq!(Route::parse("/jobs/"), Route::JobDashboard);
        assert_eq!(
            Route::parse("/jobs/01J0ABC"),
            Route::JobDetail("01J0ABC".to_string())
        );
        assert_eq!(
            Route::parse("tasks//42"),
            Route::TaskDetail("42".to_string())
        );
        assert_eq!(Route::parse("/tasks"), Route::TaskDashboard);
    }

    #[test]
    fn test_ignores_origin_query_and_fragment() {
        assert_eq!(
            Route::parse("http://localhost:5173/jobs/01J0ABC?tab=history#top"),
            Route::JobDetail("01J0ABC".to_string())
        );
        assert_eq!(Route::parse("https://dash.example.com"), Route::Landing);
    }

    #[test]
    fn test_unknown_paths() {
        assert_eq!(
            Route::parse("/jobs/1/logs"),
            Route::NotFound("/jobs/1/logs".to_string())
        );
        assert_eq!(
            Route::parse("/settings"),
            Route::NotFound("/settings".to_string())
        );
    }

    #[test]
    fn test_canonical_paths() {
        assert_eq!(Route::JobDetail("abc".to_string()).path(), "/jobs/abc");
        assert_eq!(Route::parse("/jobs/abc/").to_string(), "/jobs/abc");
        assert_eq!(Route::Landing.path(), "/");
    }
}
