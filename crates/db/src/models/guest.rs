use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "rsvp_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RsvpStatus {
    #[default]
    Pending,
    Attending,
    Declined,
}

/// Which side of the couple a guest belongs to.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "guest_side", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GuestSide {
    Partner1,
    Partner2,
    #[default]
    Both,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub plus_one: bool,
    pub rsvp_status: RsvpStatus,
    pub dietary_restrictions: String,
    pub table_assignment: String,
    pub side: GuestSide,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuest {
    pub name: String,
    pub plus_one: Option<bool>,
    pub rsvp_status: Option<RsvpStatus>,
    pub dietary_restrictions: Option<String>,
    pub table_assignment: Option<String>,
    pub side: Option<GuestSide>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuest {
    pub name: Option<String>,
    pub plus_one: Option<bool>,
    pub rsvp_status: Option<RsvpStatus>,
    pub dietary_restrictions: Option<String>,
    pub table_assignment: Option<String>,
    pub side: Option<GuestSide>,
    pub notes: Option<String>,
}

impl Guest {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Guest>(
            "SELECT * FROM guests WHERE user_id = $1 ORDER BY created_at ASC",
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
        sqlx::query_as::<_, Guest>("SELECT * FROM guests WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateGuest,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Guest>(
            r#"INSERT INTO guests (id, user_id, name, plus_one, rsvp_status, dietary_restrictions, table_assignment, side, notes, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.name)
        .bind(data.plus_one.unwrap_or(false))
        .bind(data.rsvp_status.clone().unwrap_or_default())
        .bind(data.dietary_restrictions.as_deref().unwrap_or(""))
        .bind(data.table_assignment.as_deref().unwrap_or(""))
        .bind(data.side.clone().unwrap_or_default())
        .bind(data.notes.as_deref().unwrap_or(""))
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    /// Field-level merge; `Ok(None)` when no guest matches `(id, user_id)`.
    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateGuest,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, Guest>(
            r#"UPDATE guests
               SET name = $3, plus_one = $4, rsvp_status = $5, dietary_restrictions = $6, table_assignment = $7, side = $8, notes = $9
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.name.as_ref().unwrap_or(&existing.name))
        .bind(data.plus_one.unwrap_or(existing.plus_one))
        .bind(data.rsvp_status.clone().unwrap_or(existing.rsvp_status))
        .bind(
            data.dietary_restrictions
                .as_ref()
                .unwrap_or(&existing.dietary_restrictions),
        )
        .bind(
            data.table_assignment
                .as_ref()
                .unwrap_or(&existing.table_assignment),
        )
        .bind(data.side.clone().unwrap_or(existing.side))
        .bind(data.notes.as_ref().unwrap_or(&existing.notes))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
