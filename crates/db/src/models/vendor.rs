use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool, Type};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

/// Where the couple stands with a vendor.
#[derive(
    Debug, Clone, Type, Serialize, Deserialize, PartialEq, TS, EnumString, Display, Default,
)]
#[sqlx(type_name = "vendor_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VendorStatus {
    #[default]
    Searching,
    Contacted,
    Quoted,
    Booked,
}

/// Amounts and due dates stay free text; the product lets users write
/// things like "$1,200 + tax" or "two weeks before".
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category: String,
    pub vendor_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: String,
    pub status: VendorStatus,
    pub deposit_amount: String,
    pub deposit_due: String,
    pub final_amount: String,
    pub final_due: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct CreateVendor {
    pub category: String,
    pub vendor_name: String,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<VendorStatus>,
    pub deposit_amount: Option<String>,
    pub deposit_due: Option<String>,
    pub final_amount: Option<String>,
    pub final_due: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVendor {
    pub category: Option<String>,
    pub vendor_name: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<VendorStatus>,
    pub deposit_amount: Option<String>,
    pub deposit_due: Option<String>,
    pub final_amount: Option<String>,
    pub final_due: Option<String>,
    pub notes: Option<String>,
}

impl Vendor {
    pub async fn find_by_user_id(
        pool: &SqlitePool,
        user_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Vendor>(
            "SELECT * FROM vendors WHERE user_id = $1 ORDER BY created_at ASC",
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
        sqlx::query_as::<_, Vendor>("SELECT * FROM vendors WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &SqlitePool,
        user_id: Uuid,
        data: &CreateVendor,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query_as::<_, Vendor>(
            r#"INSERT INTO vendors (id, user_id, category, vendor_name, contact_name, phone, email, status, deposit_amount, deposit_due, final_amount, final_due, notes, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&data.category)
        .bind(&data.vendor_name)
        .bind(data.contact_name.as_deref().unwrap_or(""))
        .bind(data.phone.as_deref().unwrap_or(""))
        .bind(data.email.as_deref().unwrap_or(""))
        .bind(data.status.clone().unwrap_or_default())
        .bind(data.deposit_amount.as_deref().unwrap_or(""))
        .bind(data.deposit_due.as_deref().unwrap_or(""))
        .bind(data.final_amount.as_deref().unwrap_or(""))
        .bind(data.final_due.as_deref().unwrap_or(""))
        .bind(data.notes.as_deref().unwrap_or(""))
        .bind(Utc::now())
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &SqlitePool,
        id: Uuid,
        user_id: Uuid,
        data: &UpdateVendor,
    ) -> Result<Option<Self>, sqlx::Error> {
        let Some(existing) = Self::find_by_id(pool, id, user_id).await? else {
            return Ok(None);
        };
        sqlx::query_as::<_, Vendor>(
            r#"UPDATE vendors
               SET category = $3, vendor_name = $4, contact_name = $5, phone = $6, email = $7, status = $8, deposit_amount = $9, deposit_due = $10, final_amount = $11, final_due = $12, notes = $13
               WHERE id = $1 AND user_id = $2
               RETURNING *"#,
        )
        .bind(id)
        .bind(user_id)
        .bind(data.category.as_ref().unwrap_or(&existing.category))
        .bind(data.vendor_name.as_ref().unwrap_or(&existing.vendor_name))
        .bind(data.contact_name.as_ref().unwrap_or(&existing.contact_name))
        .bind(data.phone.as_ref().unwrap_or(&existing.phone))
        .bind(data.email.as_ref().unwrap_or(&existing.email))
        .bind(data.status.clone().unwrap_or(existing.status))
        .bind(
            data.deposit_amount
                .as_ref()
                .unwrap_or(&existing.deposit_amount),
        )
        .bind(data.deposit_due.as_ref().unwrap_or(&existing.deposit_due))
        .bind(data.final_amount.as_ref().unwrap_or(&existing.final_amount))
        .bind(data.final_due.as_ref().unwrap_or(&existing.final_due))
        .bind(data.notes.as_ref().unwrap_or(&existing.notes))
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &SqlitePool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vendors WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
