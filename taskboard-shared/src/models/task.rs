/// Task model, lifecycle enums, and in-memory aggregates
///
/// Tasks are the central entity of Taskboard. A task may belong to a
/// project (deleted with it, cascade) and may be assigned to a user
/// (detached if the user is deleted).
///
/// # Lifecycle
///
/// ```text
/// pending → in_progress → completed
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(140) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'pending',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     due_date DATE,
///     project_id UUID REFERENCES projects(id) ON DELETE CASCADE,
///     assigned_to UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::policy::TaskScope;

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started yet (default)
    Pending,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Human-readable label, as shown in notifications
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    /// Human-readable label, as shown in notifications
    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task model
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title, required, at most 140 characters
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Optional due date; past dates are not rejected
    pub due_date: Option<NaiveDate>,

    /// Project this task belongs to, if any
    pub project_id: Option<Uuid>,

    /// User this task is assigned to, if any
    pub assigned_to: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last mutated (refreshed by a trigger)
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `project_id` and `assigned_to` must already be normalized: the
/// sentinel nil UUID used by selection inputs is converted to `None`
/// before this struct is built (see [`normalize_selection`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to Pending)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to Medium)
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional due date
    pub due_date: Option<NaiveDate>,

    /// Project to attach to, if any
    pub project_id: Option<Uuid>,

    /// Assignee, if any
    pub assigned_to: Option<Uuid>,
}

/// Normalizes a selection-input reference
///
/// Selection widgets submit the nil UUID to mean "no selection". That
/// sentinel must never be persisted; it becomes `None` here.
pub fn normalize_selection(value: Option<Uuid>) -> Option<Uuid> {
    match value {
        Some(id) if id.is_nil() => None,
        other => other,
    }
}

impl Task {
    /// Creates a new task
    ///
    /// # Errors
    ///
    /// Returns an error if `project_id` or `assigned_to` reference a
    /// missing row (foreign key violation) or the connection fails.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, due_date, project_id, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, title, description, status, priority, due_date,
                      project_id, assigned_to, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.due_date)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, due_date,
                   project_id, assigned_to, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists the tasks visible under the given scope
    ///
    /// - `All`: every task (Admin)
    /// - `ManagedBy(id)`: tasks whose project is managed by `id` (Manager)
    /// - `AssignedTo(id)`: tasks assigned to `id` (Employee)
    pub async fn list_in_scope(pool: &PgPool, scope: TaskScope) -> Result<Vec<Self>, sqlx::Error> {
        match scope {
            TaskScope::All => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, status, priority, due_date,
                           project_id, assigned_to, created_at, updated_at
                    FROM tasks
                    ORDER BY created_at ASC
                    "#,
                )
                .fetch_all(pool)
                .await
            }
            TaskScope::ManagedBy(manager_id) => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date,
                           t.project_id, t.assigned_to, t.created_at, t.updated_at
                    FROM tasks t
                    JOIN projects p ON t.project_id = p.id
                    WHERE p.manager_id = $1
                    ORDER BY t.created_at ASC
                    "#,
                )
                .bind(manager_id)
                .fetch_all(pool)
                .await
            }
            TaskScope::AssignedTo(user_id) => {
                sqlx::query_as::<_, Task>(
                    r#"
                    SELECT id, title, description, status, priority, due_date,
                           project_id, assigned_to, created_at, updated_at
                    FROM tasks
                    WHERE assigned_to = $1
                    ORDER BY created_at ASC
                    "#,
                )
                .bind(user_id)
                .fetch_all(pool)
                .await
            }
        }
    }

    /// Counts total number of tasks
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

/// Per-status counts over a visible task set
///
/// Keys match the wire format of `GET /api/task-stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Tallies a task slice by status
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.status {
                TaskStatus::Pending => counts.pending += 1,
                TaskStatus::InProgress => counts.in_progress += 1,
                TaskStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Total number of tasks counted
    pub fn total(&self) -> usize {
        self.pending + self.in_progress + self.completed
    }
}

/// Per-priority counts over a visible task set
///
/// Keys match the wire format of `GET /api/priority-stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    /// Tallies a task slice by priority
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            match task.priority {
                TaskPriority::Low => counts.low += 1,
                TaskPriority::Medium => counts.medium += 1,
                TaskPriority::High => counts.high += 1,
            }
        }
        counts
    }
}
