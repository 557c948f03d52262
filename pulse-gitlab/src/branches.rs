//! Branch-related API endpoints

use serde::Deserialize;

use crate::GitLabClient;
use crate::error::Result;

/// A repository branch as returned by the GitLab API
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: Option<BranchCommit>,
    #[serde(default)]
    pub default: bool,
}

/// The head commit of a branch
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    pub id: String,
}

impl GitLabClient {
    // =============================================================================
    // Branch Listing
    // =============================================================================

    /// Retrieve all branches of a project
    ///
    /// # Arguments
    /// * `project_id` - The numeric project id
    pub async fn get_branches(&self, project_id: i64) -> Result<Vec<Branch>> {
        tracing::debug!("Fetching branches for GitLab project: {}", project_id);

        let url = format!(
            "{}/api/v4/projects/{}/repository/branches",
            self.base_url(),
            project_id
        );
        self.get_json(url).await
    }
}
