use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use ts_rs::TS;
use uuid::Uuid;

/// Payment schedule row. Listed by `sort_order` with creation time breaking
/// ties, so seeded schedules keep their order even when rows share a slot.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: String,
    pub label: String,
    pub amount: String,
    pub paid: bool,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub date: Option<String>,
    pub label: String,
    pub amount: Option<String>,
    pub paid: Option<bool>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayment {
    pub date: Option<String>,
    pub label: Option<String>,
    pub amount: Option<String>,
    pub paid: Option<bool>,
    pub sort_order: Option<i64>,
}

impl Payment {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE user_id = $1 ORDER BY sort_order ASC, created_at ASC",
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
        sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreatePayment,
    ) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut next_sort = Self::next_sort_order(&mut tx, user_id).await?;
        let record = Self::insert(&mut tx, user_id, data, &mut next_sort).await?;
        tx.commit().await?;
        Ok(record)
    }

    pub async fn create_many(
        pool: &SqlitePool,
        user_id: Uuid,
        items: &[CreatePayment],
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
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM payments WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: Uuid,
        data: &CreatePayment,
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
        sqlx::query_as::<_, Payment>(
            r#"INSERT INTO payments (id, user_id, date, label, amount, paid, sort_order, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.date.as_deref().unwrap_or(""))
        .bind(&data.label)
        .bind(data.amount.as_deref().unwrap_or(""))
        .bind(data.paid.unwrap_or(false))
        .bind(sort_order)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdatePayment,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, Payment>(
            r#"UPDATE payments
               SET date = $3, label = $4, amount = $5, paid = $6, sort_order = $7
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.date.as_ref().unwrap_or(&existing.date))
        .bind(data.label.as_ref().unwrap_or(&existing.label))
        .bind(data.amount.as_ref().unwrap_or(&existing.amount))
        .bind(data.paid.unwrap_or(existing.paid))
        .bind(data.sort_order.unwrap_or(existing.sort_order))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
