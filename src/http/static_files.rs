//! Static file serving.
//!
//! Maps request paths directly to files under the served root. Directory
//! requests resolve to their `index.html`, absent paths produce a 404, and
//! content types are inferred from file extensions by the service.

use std::path::Path;

use tower_http::services::ServeDir;

/// Create a static file service rooted at `root`.
pub fn create_static_service(root: &Path) -> ServeDir {
    ServeDir::new(root).append_index_html_on_directories(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_static_service() {
        // Just verify construction - actual file serving tested in integration
        let _service = create_static_service(Path::new("."));
    }
}
