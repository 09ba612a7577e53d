use crate::application_port::AuthError;
use crate::domain_model::{AccountRecord, UserId};
use crate::domain_port::repo_tx::StorageTx;

#[async_trait::async_trait]
pub trait AccountRepo: Send + Sync {
    async fn insert_in_tx<'t>(
        &self,
        tx: &mut dyn StorageTx<'t>,
        record: &AccountRecord,
    ) -> Result<(), AuthError>;

    /// Fetch by username (for login).
    async fn get_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AuthError>;

    /// Fetch by id (for token verification).
    async fn get_by_id(&self, user_id: UserId) -> Result<Option<AccountRecord>, AuthError>;

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError>;

    async fn touch_last_login(&self, user_id: UserId) -> Result<(), AuthError>;

    async fn list(&self) -> Result<Vec<AccountRecord>, AuthError>;

    async fn count(&self) -> Result<i64, AuthError>;
}
