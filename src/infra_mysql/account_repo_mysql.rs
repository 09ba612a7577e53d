use super::util::{downcast, is_dup_key};
use crate::application_port::AuthError;
use crate::domain_model::{AccountRecord, UserId};
use crate::domain_port::{AccountRepo, StorageTx};
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

pub struct MySqlAccountRepo {
    pool: MySqlPool,
}

impl MySqlAccountRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlAccountRepo { pool }
    }

    #[inline]
    fn uid_as_bytes(id: &UserId) -> &[u8] {
        id.0.as_bytes()
    }

    fn uid_from_bytes(id: &[u8]) -> Result<UserId, AuthError> {
        Ok(UserId(
            Uuid::from_slice(id).map_err(|e| AuthError::Store(e.to_string()))?,
        ))
    }

    fn row_to_record(row: MySqlRow) -> Result<AccountRecord, AuthError> {
        let store = |e: sqlx::Error| AuthError::Store(e.to_string());

        let user_id_bytes: Vec<u8> = row.try_get("user_id").map_err(store)?;
        let user_id = Self::uid_from_bytes(&user_id_bytes)?;
        let role_label: String = row.try_get("role").map_err(store)?;

        Ok(AccountRecord {
            user_id,
            username: row.try_get("username").map_err(store)?,
            password_hash: row.try_get("password_hash").map_err(store)?,
            role: role_label
                .parse()
                .map_err(|e: crate::domain_model::UnknownLabel| AuthError::Store(e.to_string()))?,
            rep_scope: row.try_get("rep_scope").map_err(store)?,
            is_active: row.try_get("is_active").map_err(store)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(store)?,
            last_login: row
                .try_get::<Option<DateTime<Utc>>, _>("last_login")
                .map_err(store)?,
        })
    }
}

const COLUMNS: &str =
    "user_id, username, password_hash, role, rep_scope, is_active, created_at, last_login";

#[async_trait::async_trait]
impl AccountRepo for MySqlAccountRepo {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &AccountRecord,
    ) -> Result<(), AuthError> {
        let tx = downcast(tx);

        sqlx::query(
            r#"
INSERT INTO account (user_id, username, password_hash, role, rep_scope, is_active, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(Self::uid_as_bytes(&record.user_id))
        .bind(&record.username)
        .bind(&record.password_hash)
        .bind(record.role.to_string())
        .bind(&record.rep_scope)
        .bind(record.is_active)
        .bind(record.created_at)
        .execute(tx.conn())
        .await
        .map_err(|e| {
            if is_dup_key(&e) {
                AuthError::UserExists
            } else {
                AuthError::Store(e.to_string())
            }
        })?;

        Ok(())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AuthError> {
        let sql = format!("SELECT {COLUMNS} FROM account WHERE username = ?");
        let row_opt = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn get_by_id(&self, user_id: UserId) -> Result<Option<AccountRecord>, AuthError> {
        let sql = format!("SELECT {COLUMNS} FROM account WHERE user_id = ?");
        let row_opt = sqlx::query(&sql)
            .bind(Self::uid_as_bytes(&user_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM account WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(count > 0)
    }

    async fn touch_last_login(&self, user_id: UserId) -> Result<(), AuthError> {
        sqlx::query("UPDATE account SET last_login = ? WHERE user_id = ?")
            .bind(Utc::now())
            .bind(Self::uid_as_bytes(&user_id))
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<AccountRecord>, AuthError> {
        let sql = format!("SELECT {COLUMNS} FROM account ORDER BY username");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        rows.into_iter().map(Self::row_to_record).collect()
    }

    async fn count(&self) -> Result<i64, AuthError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM account")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))
    }
}
