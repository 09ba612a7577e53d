use crate::application_port::{
    AccessToken, AuthError, AuthService, AuthTokens, CredentialHasher, LoginInput, LoginResult,
    RefreshToken, TokenCodec, TokenVerifyResult,
};
use crate::domain_model::{CurrentUser, UserId};
use crate::domain_port::{AccountRepo, AuthSessionStore};
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub struct Argon2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Argon2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = argon2::password_hash::SaltString::generate(&mut OsRng);
        let argon2 = argon2::Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::InternalError(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::InternalError(format!("invalid PHC hash: {e}")))?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::InternalError(format!("verify error: {e}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user id as string
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
    jti: String,
}

fn encode_with_ttl(
    uid: UserId,
    jti: String,
    ttl: Duration,
    cfg: &JwtConfig,
) -> Result<(String, DateTime<Utc>), AuthError> {
    let iat_dt = Utc::now();
    let exp_dt = iat_dt + ttl;
    let claims = Claims {
        sub: uid.0.to_string(),
        exp: exp_dt.timestamp(),
        iat: iat_dt.timestamp(),
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        jti,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&cfg.signing_key),
    )
    .map_err(|e| AuthError::InternalError(e.to_string()))?;
    Ok((token, exp_dt))
}

fn decode_claims(token: &str, cfg: &JwtConfig) -> Result<Claims, AuthError> {
    let mut v = Validation::new(Algorithm::HS256);
    v.validate_exp = true;
    v.set_audience(&[cfg.audience.clone()]);
    v.set_issuer(&[cfg.issuer.clone()]);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(&cfg.signing_key), &v).map_err(
        |e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid,
        },
    )?;
    Ok(data.claims)
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Codec { cfg }
    }

    #[inline]
    fn gen_jti() -> String {
        Uuid::new_v4().to_string()
    }

    #[inline]
    fn parse_user_id(sub: &str) -> Result<UserId, AuthError> {
        sub.parse::<UserId>().map_err(|_| AuthError::TokenInvalid)
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs256Codec {
    async fn issue_access_token(
        &self,
        user: UserId,
        jti: Option<String>,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let jti = jti.unwrap_or_else(Self::gen_jti);
        let (token, exp_dt) = encode_with_ttl(user, jti, self.cfg.access_ttl, &self.cfg)?;
        Ok((AccessToken(token), exp_dt))
    }

    async fn issue_refresh_token(
        &self,
        user: UserId,
        jti: String,
    ) -> Result<(RefreshToken, DateTime<Utc>), AuthError> {
        let (token, exp_dt) = encode_with_ttl(user, jti, self.cfg.refresh_ttl, &self.cfg)?;
        Ok((RefreshToken(token), exp_dt))
    }

    async fn verify_access_token(
        &self,
        token: &AccessToken,
    ) -> Result<TokenVerifyResult, AuthError> {
        let claims = decode_claims(&token.0, &self.cfg)?;
        let user_id = Self::parse_user_id(&claims.sub)?;
        Ok(TokenVerifyResult {
            user_id,
            jti: Some(claims.jti),
        })
    }

    async fn verify_refresh_token(
        &self,
        token: &RefreshToken,
    ) -> Result<TokenVerifyResult, AuthError> {
        let claims = decode_claims(&token.0, &self.cfg)?;
        let user_id = Self::parse_user_id(&claims.sub)?;
        Ok(TokenVerifyResult {
            user_id,
            jti: Some(claims.jti),
        })
    }
}

pub struct RealAuthService {
    account_repo: Arc<dyn AccountRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
    session_store: Arc<dyn AuthSessionStore>,
}

impl RealAuthService {
    pub fn new(
        account_repo: Arc<dyn AccountRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
        session_store: Arc<dyn AuthSessionStore>,
    ) -> Self {
        Self {
            account_repo,
            credential_hasher,
            token_codec,
            session_store,
        }
    }

    #[inline]
    fn new_jti() -> String {
        Uuid::new_v4().to_string()
    }

    fn ttl_secs(until: DateTime<Utc>) -> u64 {
        let now = Utc::now();
        let secs = (until - now).num_seconds();
        if secs <= 0 { 1 } else { secs as u64 }
    }

    async fn issue_pair(&self, user_id: UserId) -> Result<AuthTokens, AuthError> {
        let jti = Self::new_jti();

        let (access_token, access_exp) = self
            .token_codec
            .issue_access_token(user_id, Some(jti.clone()))
            .await?;
        let (refresh_token, refresh_exp) = self
            .token_codec
            .issue_refresh_token(user_id, jti.clone())
            .await?;

        let ttl_secs = Self::ttl_secs(refresh_exp);
        self.session_store
            .save_refresh_jti(user_id, &jti, ttl_secs)
            .await?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            access_token_expires_at: access_exp,
            refresh_token_expires_at: refresh_exp,
        })
    }
}

#[async_trait::async_trait]
impl AuthService for RealAuthService {
    async fn login(&self, request: LoginInput) -> Result<LoginResult, AuthError> {
        let LoginInput { username, password } = request;

        let rec = self
            .account_repo
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !rec.is_active {
            return Err(AuthError::InvalidCredentials);
        }

        let ok = self
            .credential_hasher
            .verify_password(&password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        self.account_repo.touch_last_login(rec.user_id).await?;

        let tokens = self.issue_pair(rec.user_id).await?;

        Ok(LoginResult {
            user: rec.current_user(),
            tokens,
        })
    }

    async fn verify_token(&self, token: &str) -> Result<CurrentUser, AuthError> {
        let verify_result = self
            .token_codec
            .verify_access_token(&AccessToken(token.to_string()))
            .await?;

        let rec = self
            .account_repo
            .get_by_id(verify_result.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if !rec.is_active {
            return Err(AuthError::UserNotFound);
        }

        Ok(rec.current_user())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let verify_result = self
            .token_codec
            .verify_refresh_token(&RefreshToken(refresh_token.to_string()))
            .await?;

        let user_id = verify_result.user_id;
        if self.account_repo.get_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }

        let jti = verify_result.jti.ok_or(AuthError::TokenInvalid)?;

        // Rotation: check-and-consume, then issue a fresh pair under a new jti.
        match self
            .session_store
            .check_refresh_jti(user_id, &jti, true)
            .await?
        {
            Some(found_user_id) if found_user_id == user_id => {}
            _ => return Err(AuthError::TokenInvalid),
        }

        self.issue_pair(user_id).await
    }
}
