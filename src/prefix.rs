//! Deployment prefix type for qualifying frontend asset references.
//!
//! The prefix is the storage location the built frontend is published under
//! (e.g. `s3://frontend/deploy`). Relative references found in the document
//! are joined under its path to form absolute, deployable URIs.

use url::Url;

use crate::error::TemplateError;

/// A validated deployment prefix.
///
/// Invariants:
/// - Parses as an absolute URI
/// - Can carry a path (not a cannot-be-a-base URL like `mailto:`)
#[derive(Debug, Clone)]
pub struct DeployPrefix {
    url: Url,
}

impl DeployPrefix {
    /// Validate a raw prefix string. Fails before any document scanning.
    pub fn parse(raw: &str) -> Result<Self, TemplateError> {
        let url = Url::parse(raw).map_err(|e| TemplateError::Configuration {
            prefix: raw.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(TemplateError::Configuration {
                prefix: raw.to_string(),
                reason: "prefix cannot carry a path".to_string(),
            });
        }
        Ok(Self { url })
    }

    /// Join a reference found in the document under the prefix path and
    /// return the absolute URI.
    ///
    /// `s3://frontend/deploy` + `/mypath` -> `s3://frontend/deploy/mypath`
    pub fn join(&self, reference: &str) -> String {
        let mut url = self.url.clone();
        url.set_path(&join_path(url.path(), reference));
        url.to_string()
    }

}

impl std::fmt::Display for DeployPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// POSIX-style path join: segments of `reference` are appended under `base`,
/// duplicate slashes collapse, `.` segments drop, `..` segments pop.
fn join_path(base: &str, reference: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in base.split('/').chain(reference.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    let mut joined = String::with_capacity(base.len() + reference.len() + 1);
    joined.push('/');
    joined.push_str(&segments.join("/"));
    if reference.ends_with('/') && !joined.ends_with('/') {
        joined.push('/');
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(prefix.to_string(), "s3://frontend/deploy");
    }

    #[test]
    fn test_parse_empty() {
        let err = DeployPrefix::parse("").unwrap_err();
        assert!(matches!(err, TemplateError::Configuration { .. }));
    }

    #[test]
    fn test_parse_relative() {
        let err = DeployPrefix::parse("frontend/deploy").unwrap_err();
        assert!(matches!(err, TemplateError::Configuration { .. }));
    }

    #[test]
    fn test_parse_cannot_be_a_base() {
        let err = DeployPrefix::parse("mailto:user@example.com").unwrap_err();
        assert!(matches!(err, TemplateError::Configuration { .. }));
    }

    #[test]
    fn test_join_absolute_reference() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(prefix.join("/mypath"), "s3://frontend/deploy/mypath");
    }

    #[test]
    fn test_join_relative_reference() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(
            prefix.join("static/js/main.js"),
            "s3://frontend/deploy/static/js/main.js"
        );
    }

    #[test]
    fn test_join_no_double_slash() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy/").unwrap();
        assert_eq!(prefix.join("/mypath"), "s3://frontend/deploy/mypath");
        assert_eq!(prefix.join("//mypath"), "s3://frontend/deploy/mypath");
    }

    #[test]
    fn test_join_dot_segments() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(prefix.join("./a/./b"), "s3://frontend/deploy/a/b");
        assert_eq!(prefix.join("a/../b"), "s3://frontend/deploy/b");
    }

    #[test]
    fn test_join_empty_reference() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(prefix.join(""), "s3://frontend/deploy");
    }

    #[test]
    fn test_join_preserves_trailing_slash() {
        let prefix = DeployPrefix::parse("s3://frontend/deploy").unwrap();
        assert_eq!(prefix.join("sub/"), "s3://frontend/deploy/sub/");
    }

    #[test]
    fn test_join_path_root_base() {
        assert_eq!(join_path("/", "mypath"), "/mypath");
        assert_eq!(join_path("/", "/mypath"), "/mypath");
    }
}
