//! Project registration DTOs

use serde::{Deserialize, Serialize};

/// Request to register a project with the dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub repository_url: Option<String>,
    /// Repository id assigned by the CI provider; webhook events are
    /// attributed through it.
    pub repository_id: i64,
    pub versions: Vec<CreateProjectVersion>,
}

/// A tracked branch line declared at registration time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProjectVersion {
    pub version: i32,
    pub branch_id: String,
}
