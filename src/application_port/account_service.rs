use super::AuthError;
use crate::domain_model::{AccountRecord, CurrentUser, Role, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct NewAccountInput {
    pub username: String,
    pub password: String,
    pub role: Role,
    /// Required iff `role` is representative.
    pub rep_scope: Option<String>,
}

/// Account row as exposed to the admin screen. Never carries the hash.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub rep_scope: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<AccountRecord> for AccountView {
    fn from(rec: AccountRecord) -> Self {
        AccountView {
            user_id: rec.user_id,
            username: rec.username,
            role: rec.role,
            rep_scope: rec.rep_scope,
            created_at: rec.created_at,
            last_login: rec.last_login,
        }
    }
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    /// Administrator only.
    async fn create_account(
        &self,
        actor: &CurrentUser,
        input: NewAccountInput,
    ) -> Result<UserId, AuthError>;
    /// Administrator only.
    async fn list_accounts(&self, actor: &CurrentUser) -> Result<Vec<AccountView>, AuthError>;
}
