use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .context("find user by email")?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
        .context("find user by id")?;
        Ok(user)
    }

    /// Create a new user with a hashed password.
    pub async fn create(db: &PgPool, email: &str, password_hash: &str) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .context("create user")?;
        Ok(user)
    }

    /// Replace the stored password hash.
    pub async fn update_password(db: &PgPool, id: i64, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET password_hash = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await
        .context("update password")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            email: "user@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("user@example.com"));
    }
}
