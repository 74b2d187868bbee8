//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `chatstore-core` using sqlx with split
//! read/write pools: raw queries, a private row struct, reader for SELECTs and
//! writer for everything else.

use chatstore_core::repository::session::SessionRepository;
use chatstore_types::error::RepositoryError;
use chatstore_types::session::{Session, SessionFilter};
use sqlx::Row;
use tracing::debug;
use uuid::Uuid;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_error};

/// SQLite-backed implementation of `SessionRepository`.
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Session.
struct SessionRow {
    id: String,
    owner_id: String,
    title: String,
    is_favorite: bool,
    created_at: String,
    updated_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner_id: row.try_get("owner_id")?,
            title: row.try_get("title")?,
            is_favorite: row.try_get("is_favorite")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| RepositoryError::Query(format!("invalid session id: {e}")))?;

        Ok(Session {
            id,
            owner_id: self.owner_id,
            title: self.title,
            is_favorite: self.is_favorite,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

const SESSION_COLUMNS: &str = "id, owner_id, title, is_favorite, created_at, updated_at";

impl SessionRepository for SqliteSessionRepository {
    async fn create(&self, session: &Session) -> Result<Session, RepositoryError> {
        sqlx::query(
            r#"INSERT INTO sessions (id, owner_id, title, is_favorite, created_at, updated_at)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(session.id.to_string())
        .bind(&session.owner_id)
        .bind(&session.title)
        .bind(session.is_favorite)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        Ok(session.clone())
    }

    async fn get_by_id(&self, id: &Uuid) -> Result<Option<Session>, RepositoryError> {
        let sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_error)?;

        match row {
            Some(row) => {
                let session_row = SessionRow::from_row(&row).map_err(query_error)?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: &SessionFilter) -> Result<Vec<Session>, RepositoryError> {
        let mut sql = format!("SELECT {SESSION_COLUMNS} FROM sessions WHERE owner_id = ?");
        if filter.is_favorite.is_some() {
            sql.push_str(" AND is_favorite = ?");
        }
        sql.push_str(" ORDER BY updated_at DESC, id DESC");

        let mut query = sqlx::query(&sql).bind(&filter.owner_id);
        if let Some(is_favorite) = filter.is_favorite {
            query = query.bind(is_favorite);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_error)?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row = SessionRow::from_row(row).map_err(query_error)?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn update(&self, session: &Session) -> Result<Session, RepositoryError> {
        let result = sqlx::query(
            r#"UPDATE sessions
               SET title = ?, is_favorite = ?, updated_at = ?
               WHERE id = ?"#,
        )
        .bind(&session.title)
        .bind(session.is_favorite)
        .bind(format_datetime(&session.updated_at))
        .bind(session.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(query_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(session.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), RepositoryError> {
        let id = id.to_string();
        let mut tx = self.pool.writer.begin().await.map_err(query_error)?;

        let messages = sqlx::query("DELETE FROM messages WHERE session_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        let result = sqlx::query("DELETE FROM sessions WHERE id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(query_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await.map_err(query_error)?;
        debug!(session_id = %id, messages = messages.rows_affected(), "session rows deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::test_support::test_pool;
    use chatstore_core::service::now;

    fn make_session(owner: &str, title: &str) -> Session {
        let now = now();
        Session {
            id: Uuid::now_v7(),
            owner_id: owner.to_string(),
            title: title.to_string(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn filter(owner: &str, is_favorite: Option<bool>) -> SessionFilter {
        SessionFilter {
            owner_id: owner.to_string(),
            is_favorite,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);

        let session = make_session("u1", "First");
        let created = repo.create(&session).await.unwrap();
        assert_eq!(created, session);

        let found = repo.get_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn test_get_missing_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        assert!(repo.get_by_id(&Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);

        let mut session = make_session("u1", "Before");
        repo.create(&session).await.unwrap();

        session.title = "After".to_string();
        session.is_favorite = true;
        session.updated_at = now() + chrono::Duration::seconds(1);
        repo.update(&session).await.unwrap();

        let found = repo.get_by_id(&session.id).await.unwrap().unwrap();
        assert_eq!(found.title, "After");
        assert!(found.is_favorite);
        assert_eq!(found.updated_at, session.updated_at);
        assert_eq!(found.created_at, session.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let err = repo.update(&make_session("u1", "ghost")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_orders_by_updated_at_desc() {
        let repo = SqliteSessionRepository::new(test_pool().await);

        let base = now();
        let mut ids = Vec::new();
        for (i, title) in ["oldest", "middle", "newest"].iter().enumerate() {
            let mut s = make_session("u1", title);
            s.updated_at = base + chrono::Duration::seconds(i as i64);
            repo.create(&s).await.unwrap();
            ids.push(s.id);
        }
        repo.create(&make_session("u2", "other owner")).await.unwrap();

        let listed = repo.list(&filter("u1", None)).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn test_list_favorites_only() {
        let repo = SqliteSessionRepository::new(test_pool().await);

        let base = now();
        let mut fav_old = make_session("u1", "fav old");
        fav_old.is_favorite = true;
        fav_old.updated_at = base;
        let mut fav_new = make_session("u1", "fav new");
        fav_new.is_favorite = true;
        fav_new.updated_at = base + chrono::Duration::seconds(5);
        let plain = make_session("u1", "plain");
        let mut other = make_session("u2", "someone else's favorite");
        other.is_favorite = true;

        for s in [&fav_old, &fav_new, &plain, &other] {
            repo.create(s).await.unwrap();
        }

        let favorites = repo.list(&filter("u1", Some(true))).await.unwrap();
        let titles: Vec<&str> = favorites.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["fav new", "fav old"]);

        let others = repo.list(&filter("u1", Some(false))).await.unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].id, plain.id);
    }

    #[tokio::test]
    async fn test_delete_session_cascades_messages() {
        let pool = test_pool().await;
        let repo = SqliteSessionRepository::new(pool.clone());

        let session = make_session("u1", "doomed");
        repo.create(&session).await.unwrap();
        let keeper = make_session("u1", "keeper");
        repo.create(&keeper).await.unwrap();

        for (sid, content) in [(session.id, "a"), (session.id, "b"), (keeper.id, "c")] {
            sqlx::query(
                "INSERT INTO messages (id, session_id, role, content, created_at) VALUES (?, ?, 'user', ?, ?)",
            )
            .bind(Uuid::now_v7().to_string())
            .bind(sid.to_string())
            .bind(content)
            .bind(format_datetime(&now()))
            .execute(&pool.writer)
            .await
            .unwrap();
        }

        repo.delete(&session.id).await.unwrap();
        assert!(repo.get_by_id(&session.id).await.unwrap().is_none());

        let (orphans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM messages WHERE session_id = ?")
                .bind(session.id.to_string())
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        assert_eq!(orphans, 0);

        let (kept,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&pool.reader)
            .await
            .unwrap();
        assert_eq!(kept, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_session() {
        let repo = SqliteSessionRepository::new(test_pool().await);
        let err = repo.delete(&Uuid::now_v7()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
