//! Project-related API endpoints

use serde::Deserialize;

use crate::GitLabClient;
use crate::error::Result;

/// A project as returned by the GitLab API
#[derive(Debug, Clone, Deserialize)]
pub struct GitLabProject {
    pub id: i64,
    pub name: String,
    pub path_with_namespace: String,
    pub web_url: String,
    pub visibility: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
}

impl GitLabClient {
    // =============================================================================
    // Project Lookup
    // =============================================================================

    /// Retrieve a project by its path with namespace (e.g., "sg1/alpha")
    ///
    /// # Arguments
    /// * `path` - Project path in the format `group/project`
    pub async fn get_project(&self, path: &str) -> Result<GitLabProject> {
        tracing::debug!("Fetching GitLab project with path: {}", path);

        let url = format!("{}/api/v4/projects/{}", self.base_url(), encode_path(path));
        self.get_json(url).await
    }

    /// Search projects by name
    ///
    /// Returns every project the token can see whose attributes match the
    /// search string; callers narrow the result further.
    ///
    /// # Arguments
    /// * `pattern` - The search string forwarded to GitLab
    pub async fn search_projects(&self, pattern: &str) -> Result<Vec<GitLabProject>> {
        tracing::debug!("Searching GitLab projects matching: {}", pattern);

        let url = format!(
            "{}/api/v4/projects?search={}&simple=true",
            self.base_url(),
            pattern
        );
        self.get_json(url).await
    }
}

/// Percent-encode a `group/project` path for use as a path parameter.
///
/// GitLab requires the namespace separator itself to be encoded.
fn encode_path(path: &str) -> String {
    path.replace('/', "%2F")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("sg1/alpha"), "sg1%2Falpha");
        assert_eq!(encode_path("group/sub/project"), "group%2Fsub%2Fproject");
        assert_eq!(encode_path("flat"), "flat");
    }

    #[test]
    fn test_deserialize_project() {
        let body = r#"{
            "id": 200,
            "name": "alpha",
            "path_with_namespace": "sg1/alpha",
            "web_url": "https://gitlab.example.com/sg1/alpha",
            "visibility": "private",
            "default_branch": "main",
            "description": null,
            "star_count": 3
        }"#;

        let project: GitLabProject = serde_json::from_str(body).unwrap();
        assert_eq!(project.id, 200);
        assert_eq!(project.path_with_namespace, "sg1/alpha");
        assert_eq!(project.default_branch.as_deref(), Some("main"));
        assert!(project.description.is_none());
    }
}
