/// Project model and database operations
///
/// Projects group tasks and are optionally owned by a manager. A project
/// created by an Admin has no manager (`manager_id IS NULL`); a project
/// created by a Manager is owned by its creator.
///
/// Deleting a project cascades to its tasks at the storage level; tasks
/// without a project are unaffected.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(140) NOT NULL,
///     description VARCHAR(500),
///     manager_id UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::ProjectScope;

/// Project model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name, required, at most 140 characters
    pub name: String,

    /// Optional free-form description, at most 500 characters
    pub description: Option<String>,

    /// Owning manager (NULL for admin-created projects)
    pub manager_id: Option<Uuid>,

    /// When the project was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning manager, per the authorization policy's
    /// `manager_on_create` decision
    pub manager_id: Option<Uuid>,
}

impl Project {
    /// Creates a new project
    ///
    /// # Errors
    ///
    /// Returns an error if `manager_id` references a missing user
    /// (foreign key violation) or the database connection fails.
    pub async fn create(pool: &PgPool, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, manager_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, manager_id, created_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.manager_id)
        .fetch_one(pool)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, manager_id, created_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists the projects visible under the given scope
    ///
    /// - `All`: every project (Admin)
    /// - `ManagedBy(id)`: projects whose `manager_id` equals `id` (Manager)
    /// - `None`: empty list (Employee; no query issued)
    pub async fn list_in_scope(
        pool: &PgPool,
        scope: ProjectScope,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match scope {
            ProjectScope::All => {
                sqlx::query_as::<_, Project>(
                    r#"
                    SELECT id, name, description, manager_id, created_at
                    FROM projects
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            ProjectScope::ManagedBy(manager_id) => {
                sqlx::query_as::<_, Project>(
                    r#"
                    SELECT id, name, description, manager_id, created_at
                    FROM projects
                    WHERE manager_id = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(manager_id)
                .fetch_all(pool)
                .await
            }
            ProjectScope::None => Ok(Vec::new()),
        }
    }

    /// Counts total number of projects
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Deletes a project by ID
    ///
    /// The `tasks.project_id` foreign key carries `ON DELETE CASCADE`, so
    /// every task of this project is removed in the same statement. Tasks
    /// with `project_id IS NULL` are untouched.
    ///
    /// # Returns
    ///
    /// True if the project existed and was deleted, false otherwise
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_project_without_manager() {
        let data = CreateProject {
            name: "Launch".to_string(),
            description: None,
            manager_id: None,
        };

        assert_eq!(data.name, "Launch");
        assert!(data.manager_id.is_none());
    }

    #[test]
    fn test_project_serializes_null_manager() {
        let project = Project {
            id: Uuid::new_v4(),
            name: "Launch".to_string(),
            description: Some("Q3 release".to_string()),
            manager_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&project).unwrap();
        assert!(json["manager_id"].is_null());
        assert_eq!(json["name"], "Launch");
    }

    // Cascade-delete behavior is covered in tests/store_db_tests.rs
}
