use anyhow::Context;
use sqlx::{FromRow, PgPool};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// A server-side session row. The row existing and being unexpired is what
/// makes a request Authenticated; deleting it is logout.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

/// Identity resolved from a session token.
#[derive(Debug, Clone, FromRow)]
pub struct SessionUser {
    pub user_id: i64,
    pub email: String,
}

pub fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

impl Session {
    /// Open a session for a user. The token is opaque; nothing about the
    /// user is recoverable from it without the sessions table.
    pub async fn create(db: &PgPool, user_id: i64, ttl_minutes: i64) -> anyhow::Result<Session> {
        let expires_at = OffsetDateTime::now_utc() + Duration::minutes(ttl_minutes);
        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(new_token())
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(db)
        .await
        .context("create session")?;
        Ok(session)
    }

    /// Resolve a token to its user. Expired sessions read as absent.
    pub async fn find_user(db: &PgPool, token: &str) -> anyhow::Result<Option<SessionUser>> {
        let row = sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT u.id AS user_id, u.email
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > now()
            "#,
        )
        .bind(token)
        .fetch_optional(db)
        .await
        .context("resolve session token")?;
        Ok(row)
    }

    /// Tear down a session. Deleting an already-absent token is a no-op.
    pub async fn delete(db: &PgPool, token: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM sessions
            WHERE token = $1
            "#,
        )
        .bind(token)
        .execute(db)
        .await
        .context("delete session")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_opaque_hex() {
        let token = new_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(new_token(), new_token());
    }
}
