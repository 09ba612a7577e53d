use crate::application_port::{
    AccessToken, AuthError, AuthService, AuthTokens, LoginInput, LoginResult, RefreshToken,
};
use crate::domain_model::{CurrentUser, Role, Scope, UserId};
use chrono::{Duration, Utc};

#[derive(Debug)]
pub struct FakeAuthService;

impl FakeAuthService {
    pub fn new() -> Self {
        Self
    }
}

// Minimal fake implementation for local development: any password works and
// every caller is an administrator. Never wire this in release settings.
#[async_trait::async_trait]
impl AuthService for FakeAuthService {
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        Ok(LoginResult {
            user: fake_user(&request.username),
            tokens: fake_tokens(&request.username),
        })
    }

    async fn verify_token(&self, token: &str) -> Result<CurrentUser, AuthError> {
        if let Some(username) = token.strip_prefix("fake-access-token:") {
            Ok(fake_user(username))
        } else {
            Err(AuthError::TokenInvalid)
        }
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        if let Some(username) = refresh_token.strip_prefix("fake-refresh-token:") {
            Ok(fake_tokens(username))
        } else {
            Err(AuthError::TokenInvalid)
        }
    }
}

fn fake_user(username: &str) -> CurrentUser {
    CurrentUser {
        user_id: UserId(uuid::Uuid::new_v5(
            &uuid::Uuid::NAMESPACE_OID,
            username.as_bytes(),
        )),
        username: username.to_string(),
        role: Role::Administrator,
        scope: Scope::All,
    }
}

fn fake_tokens(username: &str) -> AuthTokens {
    let now = Utc::now();
    AuthTokens {
        access_token: AccessToken(format!("fake-access-token:{}", username)),
        access_token_expires_at: now + Duration::days(1),
        refresh_token: RefreshToken(format!("fake-refresh-token:{}", username)),
        refresh_token_expires_at: now + Duration::days(7),
    }
}
