use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use ts_rs::TS;
use uuid::Uuid;

/// Checklist entry bucketed by timeframe ("12+ months", "6-9 months", ...)
/// and ordered within its bucket by `sort_order`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: Uuid,
    pub user_id: Uuid,
    pub label: String,
    pub timeframe: String,
    pub done: bool,
    pub target_date: Option<String>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateMilestone {
    pub label: String,
    pub timeframe: Option<String>,
    pub done: Option<bool>,
    pub target_date: Option<String>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMilestone {
    pub label: Option<String>,
    pub timeframe: Option<String>,
    pub done: Option<bool>,
    /// Double option so a payload can clear the date (`"targetDate": null`)
    /// as well as leave it untouched (field absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "serde_with::rust::double_option")]
    #[ts(as = "Option<Option<String>>")]
    pub target_date: Option<Option<String>>,
    pub sort_order: Option<i64>,
}

impl Milestone {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            "SELECT * FROM milestones WHERE user_id = $1 ORDER BY sort_order ASC, created_at ASC",
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
        sqlx::query_as::<_, Milestone>("SELECT * FROM milestones WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateMilestone,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut next_sort = Self::next_sort_order(&mut tx, user_id).await?;
        let record = Self::insert(&mut tx, user_id, data, &mut next_sort).await?;
        tx.commit().await?;
        Ok(record)
    }

    /// Seed several milestones in one call. Elements without an explicit
    /// `sortOrder` are numbered onward from the current maximum, preserving
    /// input order.
    pub async fn create_many(
        pool: &SqlitePool,
        user_id: Uuid,
        items: &[CreateMilestone],
    ) -> Result<Vec<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut next_sort = Self::next_sort_order(&mut tx, user_id).await?;
        let mut created = Vec::with_capacity(items.len());
        for data in items {
            created.push(Self::insert(&mut tx, user_id, data, &mut next_sort).await?);
        }
        tx.commit().await?;
        Ok(created)
    }

    async fn next_sort_order(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM milestones WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: Uuid,
        data: &CreateMilestone,
        next_sort: &mut i64,
    ) -> Result<Self, sqlx::Error> {
        let sort_order = match data.sort_order {
            Some(explicit) => explicit,
            None => {
                let allocated = *next_sort;
                *next_sort += 1;
                allocated
            }
        };
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Milestone>(
            r#"INSERT INTO milestones (id, user_id, label, timeframe, done, target_date, sort_order, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.label)
        .bind(data.timeframe.as_deref().unwrap_or(""))
        .bind(data.done.unwrap_or(false))
        .bind(&data.target_date)
        .bind(sort_order)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateMilestone,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        let target_date = match &data.target_date {
            Some(value) => value.clone(),
            None => existing.target_date,
        };
        sqlx::query_as::<_, Milestone>(
            r#"UPDATE milestones
               SET label = $3, timeframe = $4, done = $5, target_date = $6, sort_order = $7
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.label.as_ref().unwrap_or(&existing.label))
        .bind(data.timeframe.as_ref().unwrap_or(&existing.timeframe))
        .bind(data.done.unwrap_or(existing.done))
        .bind(target_date)
        .bind(data.sort_order.unwrap_or(existing.sort_order))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM milestones WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
