use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "task_assignee", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TaskAssignee {
    #[default]
    #[sqlx(rename = "self")]
    #[serde(rename = "self")]
    #[strum(serialize = "self")]
    Myself,
    Partner,
    Planner,
}

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "planning_task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlanningTaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Done,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct PlanningTask {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub category: String,
    pub due_date: String,
    pub assignee: TaskAssignee,
    pub status: PlanningTaskStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanningTask {
    pub name: String,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub assignee: Option<TaskAssignee>,
    pub status: Option<PlanningTaskStatus>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanningTask {
    pub name: Option<String>,
    pub category: Option<String>,
    pub due_date: Option<String>,
    pub assignee: Option<TaskAssignee>,
    pub status: Option<PlanningTaskStatus>,
}

impl PlanningTask {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlanningTask>(
            "SELECT * FROM planning_tasks WHERE user_id = $1 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PlanningTask>(
            "SELECT * FROM planning_tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreatePlanningTask,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, PlanningTask>(
            r#"INSERT INTO planning_tasks (id, user_id, name, category, due_date, assignee, status, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.name)
        .bind(data.category.as_deref().unwrap_or(""))
        .bind(data.due_date.as_deref().unwrap_or(""))
        .bind(data.assignee.clone().unwrap_or_default())
        .bind(data.status.clone().unwrap_or_default())
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdatePlanningTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, PlanningTask>(
            r#"UPDATE planning_tasks
               SET name = $3, category = $4, due_date = $5, assignee = $6, status = $7
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.name.as_ref().unwrap_or(&existing.name))
        .bind(data.category.as_ref().unwrap_or(&existing.category))
        .bind(data.due_date.as_ref().unwrap_or(&existing.due_date))
        .bind(data.assignee.clone().unwrap_or(existing.assignee))
        .bind(data.status.clone().unwrap_or(existing.status))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM planning_tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
