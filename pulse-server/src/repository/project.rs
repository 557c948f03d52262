//! Project Repository
//!
//! Handles all database operations related to projects and their versions.

use pulse_core::domain::project::{Project, ProjectVersion};
use pulse_core::dto::project::CreateProject;
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new project with its declared versions
pub async fn create(pool: &PgPool, req: &CreateProject) -> Result<Project, sqlx::Error> {
    let project_id = Uuid::new_v4();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO projects (id, name, repository_url, repository_id)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(project_id)
    .bind(&req.name)
    .bind(&req.repository_url)
    .bind(req.repository_id)
    .execute(&mut *tx)
    .await?;

    let mut versions = Vec::with_capacity(req.versions.len());
    for version in &req.versions {
        let version_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO project_versions (id, version, branch_id, project_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(version_id)
        .bind(version.version)
        .bind(&version.branch_id)
        .bind(project_id)
        .execute(&mut *tx)
        .await?;

        versions.push(ProjectVersion {
            id: version_id,
            version: version.version,
            branch_id: version.branch_id.clone(),
            project_id,
        });
    }

    tx.commit().await?;

    versions.sort_by(|a, b| b.version.cmp(&a.version));

    Ok(Project {
        id: project_id,
        name: req.name.clone(),
        repository_url: req.repository_url.clone(),
        repository_id: req.repository_id,
        versions,
    })
}

/// Find a project by the repository id the CI provider assigned to it
pub async fn find_by_repository_id(
    pool: &PgPool,
    repository_id: i64,
) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, name, repository_url, repository_id
        FROM projects
        WHERE repository_id = $1
        "#,
    )
    .bind(repository_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(load_with_versions(pool, row).await?)),
        None => Ok(None),
    }
}

/// Find a project by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    let row = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, name, repository_url, repository_id
        FROM projects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(load_with_versions(pool, row).await?)),
        None => Ok(None),
    }
}

/// List all projects
pub async fn list_all(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT id, name, repository_url, repository_id
        FROM projects
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let mut projects = Vec::with_capacity(rows.len());
    for row in rows {
        projects.push(load_with_versions(pool, row).await?);
    }

    Ok(projects)
}

async fn load_with_versions(pool: &PgPool, row: ProjectRow) -> Result<Project, sqlx::Error> {
    let versions = sqlx::query_as::<_, VersionRow>(
        r#"
        SELECT id, version, branch_id, project_id
        FROM project_versions
        WHERE project_id = $1
        ORDER BY version DESC
        "#,
    )
    .bind(row.id)
    .fetch_all(pool)
    .await?;

    Ok(Project {
        id: row.id,
        name: row.name,
        repository_url: row.repository_url,
        repository_id: row.repository_id,
        versions: versions.into_iter().map(|v| v.into()).collect(),
    })
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    name: String,
    repository_url: Option<String>,
    repository_id: i64,
}

#[derive(sqlx::FromRow)]
struct VersionRow {
    id: Uuid,
    version: i32,
    branch_id: String,
    project_id: Uuid,
}

impl From<VersionRow> for ProjectVersion {
    fn from(row: VersionRow) -> Self {
        ProjectVersion {
            id: row.id,
            version: row.version,
            branch_id: row.branch_id,
            project_id: row.project_id,
        }
    }
}
