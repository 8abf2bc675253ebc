use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use ts_rs::TS;
use uuid::Uuid;

/// What the budget page shows before the couple has saved anything.
pub const DEFAULT_TOTAL_BUDGET: i64 = 65_000;

/// One row per user; `PUT /budget` upserts it in place.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub total_budget: i64,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpsertBudget {
    pub total_budget: i64,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub target: i64,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetCategory {
    pub name: String,
    pub target: Option<i64>,
    pub sort_order: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetCategory {
    pub name: Option<String>,
    pub target: Option<i64>,
    pub sort_order: Option<i64>,
}

/// Line item under a category. The schema cascades these away when their
/// category goes, so deletion is one atomic statement.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    pub id: Uuid,
    pub category_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cost: i64,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetItem {
    pub category_id: Uuid,
    pub name: String,
    pub cost: Option<i64>,
    pub paid: Option<bool>,
}

/// Items don't move between categories; `categoryId` is create-only.
#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetItem {
    pub name: Option<String>,
    pub cost: Option<i64>,
    pub paid: Option<bool>,
}

impl Budget {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Budget>("SELECT * FROM budgets WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Creates on first call, updates in place after; the row id is stable
    /// across upserts.
    pub async fn upsert(
        pool: &SqlitePool,
        user_id: Uuid,
        total_budget: i64,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Budget>(
            r#"INSERT INTO budgets (id, user_id, total_budget, updated_at)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT(user_id) DO UPDATE SET
                   total_budget = excluded.total_budget,
                   updated_at = excluded.updated_at
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(total_budget)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }
}

impl BudgetCategory {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BudgetCategory>(
            "SELECT * FROM budget_categories WHERE user_id = $1 ORDER BY sort_order ASC, created_at ASC",
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
        sqlx::query_as::<_, BudgetCategory>(
            "SELECT * FROM budget_categories WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateBudgetCategory,
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
        items: &[CreateBudgetCategory],
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
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM budget_categories WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
    }

    async fn insert(
        tx: &mut Transaction<'_, Sqlite>,
        user_id: Uuid,
        data: &CreateBudgetCategory,
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
        sqlx::query_as::<_, BudgetCategory>(
            r#"INSERT INTO budget_categories (id, user_id, name, target, sort_order, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.name)
        .bind(data.target.unwrap_or(0))
        .bind(sort_order)
        .bind(Utc::now())
        .fetch_one(&mut **tx)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateBudgetCategory,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, BudgetCategory>(
            r#"UPDATE budget_categories
               SET name = $3, target = $4, sort_order = $5
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.name.as_ref().unwrap_or(&existing.name))
        .bind(data.target.unwrap_or(existing.target))
        .bind(data.sort_order.unwrap_or(existing.sort_order))
        .fetch_optional(pool)
        .await
    }

    /// The items FK carries ON DELETE CASCADE, so this one statement removes
    /// the category and every item under it.
    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM budget_categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

impl BudgetItem {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, BudgetItem>(
            "SELECT * FROM budget_items WHERE user_id = $1 ORDER BY created_at ASC",
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
        sqlx::query_as::<_, BudgetItem>("SELECT * FROM budget_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// `Ok(None)` when the referenced category does not exist for this user.
    /// The check and the insert share a transaction so the category can't
    /// vanish between them.
    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateBudgetItem,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let owned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM budget_categories WHERE id = $1 AND user_id = $2",
        )
        .bind(data.category_id)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;
        if owned == 0 {
            return Ok(None);
        }
        let id = Uuid::new_v4();
        let item = sqlx::query_as::<_, BudgetItem>(
            r#"INSERT INTO budget_items (id, category_id, user_id, name, cost, paid, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING *"#,
        )
        .bind(id)
        .bind(data.category_id)
        .bind(user_id)
        .bind(&data.name)
        .bind(data.cost.unwrap_or(0))
        .bind(data.paid.unwrap_or(false))
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(Some(item))
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateBudgetItem,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, BudgetItem>(
            r#"UPDATE budget_items
               SET name = $3, cost = $4, paid = $5
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.name.as_ref().unwrap_or(&existing.name))
        .bind(data.cost.unwrap_or(existing.cost))
        .bind(data.paid.unwrap_or(existing.paid))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM budget_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count_by_category_id(
        pool: &SqlitePool,
        category_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM budget_items WHERE category_id = $1")
            .bind(category_id)
            .fetch_one(pool)
            .await
    }
}
