//! GitLab Lookup Service
//!
//! Read-only lookups against the GitLab API for the dashboard's onboarding
//! screens. Unrelated to webhook ingestion: nothing here is consulted when an
//! event is reconciled.

use pulse_core::dto::gitlab::{BranchSummary, GitLabProjectSummary};
use pulse_gitlab::{Branch, ClientError, GitLabClient, GitLabProject};

/// Service error type
#[derive(Debug)]
pub enum GitLabError {
    /// The project or resource does not exist upstream
    NotFound(String),
    /// The configured token is missing or lacks access
    Forbidden,
    /// Any other upstream failure
    Upstream(ClientError),
}

impl From<ClientError> for GitLabError {
    fn from(err: ClientError) -> Self {
        if err.is_not_found() {
            return GitLabError::NotFound(err.to_string());
        }
        if err.is_forbidden() {
            return GitLabError::Forbidden;
        }
        GitLabError::Upstream(err)
    }
}

pub type Result<T> = std::result::Result<T, GitLabError>;

/// Retrieve a GitLab project by its path with namespace (e.g., "sg1/alpha")
pub async fn get_project(client: &GitLabClient, path: &str) -> Result<GitLabProjectSummary> {
    let project = client.get_project(path).await?;
    Ok(map_project(project))
}

/// Retrieve all branches of a GitLab project
pub async fn get_project_branches(
    client: &GitLabClient,
    repository_id: i64,
) -> Result<Vec<BranchSummary>> {
    let branches = client.get_branches(repository_id).await?;
    Ok(branches.into_iter().map(map_branch).collect())
}

/// Search for GitLab projects whose name or path starts with the pattern
pub async fn search_projects_by_name(
    client: &GitLabClient,
    pattern: &str,
) -> Result<Vec<GitLabProjectSummary>> {
    let projects = client.search_projects(pattern).await?;

    // GitLab matches the pattern anywhere; the dashboard only wants prefixes
    Ok(projects
        .into_iter()
        .filter(|p| p.name.starts_with(pattern) || p.path_with_namespace.starts_with(pattern))
        .map(map_project)
        .collect())
}

fn map_project(project: GitLabProject) -> GitLabProjectSummary {
    GitLabProjectSummary {
        id: project.id,
        name: project.name,
        path_with_namespace: project.path_with_namespace,
        repository_url: project.web_url,
        visibility: project.visibility,
        default_branch: project.default_branch,
        description: project.description,
    }
}

fn map_branch(branch: Branch) -> BranchSummary {
    BranchSummary {
        name: branch.name,
        commit: branch.commit.map(|c| c.id),
        is_default: branch.default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_gitlab::BranchCommit;

    fn upstream_project(name: &str, path: &str) -> GitLabProject {
        GitLabProject {
            id: 200,
            name: name.to_string(),
            path_with_namespace: path.to_string(),
            web_url: format!("https://gitlab.example.com/{path}"),
            visibility: Some("private".to_string()),
            default_branch: Some("main".to_string()),
            description: None,
        }
    }

    #[test]
    fn test_map_project() {
        let summary = map_project(upstream_project("alpha", "sg1/alpha"));

        assert_eq!(summary.id, 200);
        assert_eq!(summary.name, "alpha");
        assert_eq!(summary.repository_url, "https://gitlab.example.com/sg1/alpha");
        assert_eq!(summary.default_branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_map_branch() {
        let branch = Branch {
            name: "main".to_string(),
            commit: Some(BranchCommit {
                id: "abc123".to_string(),
            }),
            default: true,
        };

        let summary = map_branch(branch);
        assert_eq!(summary.name, "main");
        assert_eq!(summary.commit.as_deref(), Some("abc123"));
        assert!(summary.is_default);
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            GitLabError::from(ClientError::api_error(404, "not found")),
            GitLabError::NotFound(_)
        ));
        assert!(matches!(
            GitLabError::from(ClientError::api_error(401, "unauthorized")),
            GitLabError::Forbidden
        ));
        assert!(matches!(
            GitLabError::from(ClientError::api_error(500, "boom")),
            GitLabError::Upstream(_)
        ));
    }
}
