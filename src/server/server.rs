use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use nanoid::nanoid;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::{MySql, Pool};
use std::sync::Arc;
use std::time::Duration;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub debt_service: Arc<dyn DebtService>,
    pub report_service: Arc<dyn ReportService>,
    pub account_service: Arc<dyn AccountService>,
    pool: Pool<MySql>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let alphabet: [char; 16] = [
            '1', '2', '3', '4', '5', '6', '7', '8', '9', '0', 'a', 'b', 'c', 'd', 'e', 'f',
        ];
        let run_id = nanoid!(10, &alphabet);

        let redis_client = redis::Client::open(settings.redis.dsn.as_str())?;
        let redis_manager = redis_client.get_connection_manager().await?;

        let pool = MySqlPoolOptions::new()
            .max_connections(settings.database.max_connections)
            .connect(&settings.database.dsn)
            .await?;
        let tx_manager: Arc<dyn TxManager> = Arc::new(MySqlTxManager::new(pool.clone()));

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher {});
        let key = std::env::var("JWT_SIGNING_KEY")
            .unwrap_or_else(|_| "my-dev-secret-key".to_string())
            .into_bytes();
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtHs256Codec::new(JwtConfig {
            issuer: settings.auth.issuer.clone(),
            audience: settings.auth.audience.clone(),
            access_ttl: Duration::from_secs(settings.auth.access_ttl_secs),
            refresh_ttl: Duration::from_secs(settings.auth.refresh_ttl_secs),
            signing_key: key,
        }));

        let session_store: Arc<dyn AuthSessionStore> = Arc::new(RedisAuthSessionStore::new(
            redis_manager.clone(),
            format!("auth:{}", run_id),
        ));

        let account_repo: Arc<dyn AccountRepo> = Arc::new(MySqlAccountRepo::new(pool.clone()));
        let debt_repo: Arc<dyn DebtRepo> = Arc::new(MySqlDebtRepo::new(pool.clone()));

        let auth_service: Arc<dyn AuthService> = match settings.auth.backend.as_str() {
            "fake" => Arc::new(FakeAuthService::new()),
            "real" => Arc::new(RealAuthService::new(
                account_repo.clone(),
                credential_hasher.clone(),
                token_codec,
                session_store,
            )),
            other => return Err(anyhow::anyhow!("Unknown auth backend: {}", other)),
        };

        let account_service = Arc::new(RealAccountService::new(
            account_repo.clone(),
            credential_hasher,
            tx_manager.clone(),
        ));

        if let (Some(username), Some(password)) = (
            &settings.auth.bootstrap_admin_username,
            &settings.auth.bootstrap_admin_password,
        ) {
            account_service.bootstrap_admin(username, password).await?;
        }

        let debt_service: Arc<dyn DebtService> = Arc::new(RealDebtService::new(
            debt_repo.clone(),
            tx_manager.clone(),
        ));
        let report_service: Arc<dyn ReportService> = Arc::new(RealReportService::new(debt_repo));

        info!("server started");

        Ok(Self {
            auth_service,
            debt_service,
            report_service,
            account_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        self.pool.close().await;
    }
}
