use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create projects table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id UUID PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            repository_url TEXT,
            repository_id BIGINT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create project versions table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS project_versions (
            id UUID PRIMARY KEY,
            version INTEGER NOT NULL,
            branch_id VARCHAR(255) NOT NULL,
            project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create pipelines table. The UNIQUE constraint on ci_id is what makes
    // concurrent create deliveries for the same pipeline collapse into one row.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS pipelines (
            id UUID PRIMARY KEY,
            ci_id BIGINT NOT NULL UNIQUE,
            sha VARCHAR(64),
            previous_sha VARCHAR(64),
            changes_url TEXT,
            status VARCHAR(20) NOT NULL,
            url TEXT,
            created_date TIMESTAMPTZ,
            end_date TIMESTAMPTZ,
            project_version_id UUID NOT NULL REFERENCES project_versions(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create jobs table, ci_id unique for the same reason
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id UUID PRIMARY KEY,
            ci_id BIGINT NOT NULL UNIQUE,
            name VARCHAR(255),
            status VARCHAR(20) NOT NULL,
            start_date TIMESTAMPTZ,
            end_date TIMESTAMPTZ,
            logs_url TEXT,
            pipeline_id UUID NOT NULL REFERENCES pipelines(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for better query performance
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_project_versions_project_id ON project_versions(project_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_pipelines_project_version_id ON pipelines(project_version_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_pipelines_created_date ON pipelines(created_date DESC)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_jobs_pipeline_id ON jobs(pipeline_id)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
