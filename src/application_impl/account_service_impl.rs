use crate::application_port::{
    AccountService, AccountView, AuthError, CredentialHasher, NewAccountInput,
};
use crate::domain_model::{AccountRecord, CurrentUser, Role, UserId};
use crate::domain_port::{AccountRepo, TxManager};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 6;

pub struct RealAccountService {
    account_repo: Arc<dyn AccountRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    tx_manager: Arc<dyn TxManager>,
}

impl RealAccountService {
    pub fn new(
        account_repo: Arc<dyn AccountRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        tx_manager: Arc<dyn TxManager>,
    ) -> Self {
        Self {
            account_repo,
            credential_hasher,
            tx_manager,
        }
    }

    fn validate(input: &NewAccountInput) -> Result<(), AuthError> {
        if input.username.trim().len() < MIN_USERNAME_LEN {
            return Err(AuthError::Validation("username too short".to_string()));
        }
        if input.password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation("password too short".to_string()));
        }
        match (&input.role, &input.rep_scope) {
            (Role::Representative, Some(scope)) if !scope.trim().is_empty() => Ok(()),
            (Role::Representative, _) => Err(AuthError::Validation(
                "representative accounts need a portfolio scope".to_string(),
            )),
            (_, Some(_)) => Err(AuthError::Validation(
                "only representative accounts carry a scope".to_string(),
            )),
            _ => Ok(()),
        }
    }

    async fn insert_account(&self, input: NewAccountInput) -> Result<UserId, AuthError> {
        if self.account_repo.username_exists(&input.username).await? {
            return Err(AuthError::UserExists);
        }

        let password_hash = self.credential_hasher.hash_password(&input.password).await?;
        let record = AccountRecord {
            user_id: UserId(Uuid::new_v4()),
            username: input.username,
            password_hash,
            role: input.role,
            rep_scope: input.rep_scope,
            is_active: true,
            created_at: Utc::now(),
            last_login: None,
        };

        let mut tx = self
            .tx_manager
            .begin()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        self.account_repo.insert_in_tx(tx.as_mut(), &record).await?;
        tx.commit()
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(record.user_id)
    }

    /// Seed an administrator when the account table is empty, so a fresh
    /// deployment can be logged into at all. No-op otherwise.
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> anyhow::Result<()> {
        if self.account_repo.count().await? > 0 {
            return Ok(());
        }

        let input = NewAccountInput {
            username: username.to_string(),
            password: password.to_string(),
            role: Role::Administrator,
            rep_scope: None,
        };
        Self::validate(&input)?;
        self.insert_account(input).await?;
        tracing::info!(username, "bootstrapped administrator account");
        Ok(())
    }
}

#[async_trait::async_trait]
impl AccountService for RealAccountService {
    async fn create_account(
        &self,
        actor: &CurrentUser,
        input: NewAccountInput,
    ) -> Result<UserId, AuthError> {
        if !actor.is_admin() {
            return Err(AuthError::NotPermitted);
        }
        Self::validate(&input)?;
        self.insert_account(input).await
    }

    async fn list_accounts(&self, actor: &CurrentUser) -> Result<Vec<AccountView>, AuthError> {
        if !actor.is_admin() {
            return Err(AuthError::NotPermitted);
        }
        let records = self.account_repo.list().await?;
        Ok(records.into_iter().map(AccountView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(role: Role, rep_scope: Option<&str>) -> NewAccountInput {
        NewAccountInput {
            username: "dembele".to_string(),
            password: "motdepasse".to_string(),
            role,
            rep_scope: rep_scope.map(str::to_string),
        }
    }

    #[test]
    fn representative_accounts_require_a_scope() {
        assert!(RealAccountService::validate(&input(Role::Representative, None)).is_err());
        assert!(
            RealAccountService::validate(&input(Role::Representative, Some("DIDIER DEMBELE")))
                .is_ok()
        );
    }

    #[test]
    fn non_representative_accounts_refuse_a_scope() {
        assert!(RealAccountService::validate(&input(Role::Viewer, Some("X"))).is_err());
        assert!(RealAccountService::validate(&input(Role::Administrator, None)).is_ok());
    }

    #[test]
    fn short_credentials_are_rejected() {
        let mut bad = input(Role::Viewer, None);
        bad.password = "abc".to_string();
        assert!(matches!(
            RealAccountService::validate(&bad),
            Err(AuthError::Validation(_))
        ));
    }
}
