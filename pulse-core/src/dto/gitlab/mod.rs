//! DTOs for GitLab read-API lookups
//!
//! Trimmed projections of what the GitLab REST API returns, shaped for the
//! dashboard's project-onboarding screens.

use serde::{Deserialize, Serialize};

/// A GitLab project as surfaced to the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabProjectSummary {
    pub id: i64,
    pub name: String,
    pub path_with_namespace: String,
    pub repository_url: String,
    pub visibility: Option<String>,
    pub default_branch: Option<String>,
    pub description: Option<String>,
}

/// A branch of a GitLab project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchSummary {
    pub name: String,
    /// Sha of the branch head, when the API reported one.
    pub commit: Option<String>,
    pub is_default: bool,
}
