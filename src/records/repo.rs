use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// A scheduled-dose reminder. No update operation; rows are created and
/// deleted whole.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Medicine {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub dosage: String,
    pub dose_time: String,
    pub created_at: OffsetDateTime,
}

/// A point-in-time vitals snapshot. Fields are free-form strings; they are
/// only parsed as integers when a recommendation is computed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HealthRecord {
    pub id: i64,
    pub user_id: i64,
    pub bp: Option<String>,
    pub sugar: Option<String>,
    pub heart_rate: Option<String>,
    pub weight: Option<String>,
    pub recorded_at: OffsetDateTime,
}

impl Medicine {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        name: &str,
        dosage: &str,
        dose_time: &str,
    ) -> anyhow::Result<Medicine> {
        let row = sqlx::query_as::<_, Medicine>(
            r#"
            INSERT INTO medicines (user_id, name, dosage, dose_time)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, dosage, dose_time, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(dosage)
        .bind(dose_time)
        .fetch_one(db)
        .await
        .context("create medicine")?;
        Ok(row)
    }

    /// All medicines owned by the user, in insertion order.
    pub async fn list_by_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Medicine>> {
        let rows = sqlx::query_as::<_, Medicine>(
            r#"
            SELECT id, user_id, name, dosage, dose_time, created_at
            FROM medicines
            WHERE user_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list medicines")?;
        Ok(rows)
    }

    /// Delete one of the user's medicines. Returns false when the id is
    /// absent or owned by someone else; the two cases are not
    /// distinguished.
    pub async fn delete_for_user(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM medicines
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete medicine")?;
        Ok(result.rows_affected() > 0)
    }
}

impl HealthRecord {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        bp: Option<&str>,
        sugar: Option<&str>,
        heart_rate: Option<&str>,
        weight: Option<&str>,
    ) -> anyhow::Result<HealthRecord> {
        let row = sqlx::query_as::<_, HealthRecord>(
            r#"
            INSERT INTO health_records (user_id, bp, sugar, heart_rate, weight)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, bp, sugar, heart_rate, weight, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(bp)
        .bind(sugar)
        .bind(heart_rate)
        .bind(weight)
        .fetch_one(db)
        .await
        .context("create health record")?;
        Ok(row)
    }

    /// All health records owned by the user, most recent first.
    pub async fn list_by_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<HealthRecord>> {
        let rows = sqlx::query_as::<_, HealthRecord>(
            r#"
            SELECT id, user_id, bp, sugar, heart_rate, weight, recorded_at
            FROM health_records
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .context("list health records")?;
        Ok(rows)
    }

    pub async fn delete_for_user(db: &PgPool, user_id: i64, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM health_records
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await
        .context("delete health record")?;
        Ok(result.rows_affected() > 0)
    }
}
