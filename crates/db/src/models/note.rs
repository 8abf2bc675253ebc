use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, types::Json};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    /// Stored as a JSON text column.
    #[sqlx(json)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateNote {
    pub title: String,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    /// When absent the update stamps a fresh time itself.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE user_id = $1 ORDER BY created_at ASC")
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateNote,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let tags = data.tags.clone().unwrap_or_default();
        sqlx::query_as::<_, Note>(
            r#"INSERT INTO notes (id, user_id, title, content, tags, created_at, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.title)
        .bind(data.content.as_deref().unwrap_or(""))
        .bind(Json(&tags))
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateNote,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        let tags = data.tags.clone().unwrap_or(existing.tags);
        sqlx::query_as::<_, Note>(
            r#"UPDATE notes
               SET title = $3, content = $4, tags = $5, updated_at = $6
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.title.as_ref().unwrap_or(&existing.title))
        .bind(data.content.as_ref().unwrap_or(&existing.content))
        .bind(Json(&tags))
        .bind(data.updated_at.unwrap_or_else(Utc::now))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
