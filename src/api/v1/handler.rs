use super::error::*;
use crate::application_port::{
    AccountService, AuthService, AuthTokens, DebtFilter, DebtService, DebtUpdateInput, LoginInput,
    NewAccountInput, NewDebtInput, ReportService,
};
use crate::domain_model::{CurrentUser, DebtId, Role, Scope, roster};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::{self, reject};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(code: ApiErrorCode, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
    pub rep_scope: Option<String>,
    pub auth_tokens: AuthTokens,
}

pub async fn login(
    body: LoginRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let login_input = LoginInput {
        username: body.username,
        password: body.password,
    };
    let login_result = auth_service
        .login(login_input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    let rep_scope = match &login_result.user.scope {
        Scope::Representative(rep) => Some(rep.clone()),
        Scope::All => None,
    };
    let response = LoginResponse {
        username: login_result.user.username,
        role: login_result.user.role,
        rep_scope,
        auth_tokens: login_result.tokens,
    };
    Ok(warp::reply::json(&ApiResponse::ok(response)))
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

pub async fn refresh(
    body: RefreshRequest,
    auth_service: Arc<dyn AuthService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let tokens = auth_service
        .refresh_token(&body.refresh_token)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(tokens)))
}

pub async fn dashboard(
    user: CurrentUser,
    report_service: Arc<dyn ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let dashboard = report_service
        .dashboard(&user)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(dashboard)))
}

#[derive(Debug, Deserialize)]
pub struct DebtListQuery {
    pub representative: Option<String>,
    pub client: Option<String>,
    pub status: Option<String>,
}

pub async fn list_debts(
    query: DebtListQuery,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let status = query
        .status
        .map(|s| {
            s.parse()
                .map_err(|e: crate::domain_model::UnknownLabel| {
                    ApiErrorCode::Validation(e.to_string())
                })
        })
        .transpose()
        .map_err(reject::custom)?;

    let filter = DebtFilter {
        representative: query.representative,
        client: query.client,
        status,
    };
    let records = debt_service
        .list(&user, filter)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(records)))
}

pub async fn get_debt(
    id: uuid::Uuid,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let record = debt_service
        .get(&user, DebtId(id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(record)))
}

#[derive(Debug, Deserialize)]
pub struct CreateDebtRequest {
    pub representative: String,
    pub client: String,
    pub market: Option<String>,
    pub principal: i64,
    #[serde(default)]
    pub payment: i64,
    pub invoice_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

pub async fn create_debt(
    body: CreateDebtRequest,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = NewDebtInput {
        representative: body.representative,
        client: body.client,
        market: body.market,
        principal: body.principal,
        payment: body.payment,
        invoice_date: body.invoice_date,
        due_date: body.due_date,
        comment: body.comment,
    };
    let record = debt_service
        .create(&user, input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(record)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateDebtRequest {
    pub payment: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub comment: Option<String>,
}

pub async fn update_debt(
    id: uuid::Uuid,
    body: UpdateDebtRequest,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = DebtUpdateInput {
        payment: body.payment,
        due_date: body.due_date,
        comment: body.comment,
    };
    let record = debt_service
        .update(&user, DebtId(id), input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(record)))
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse;

pub async fn delete_debt(
    id: uuid::Uuid,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    debt_service
        .delete(&user, DebtId(id))
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(DeletedResponse)))
}

pub async fn report_by_representative(
    user: CurrentUser,
    report_service: Arc<dyn ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let summary = report_service
        .by_representative(&user)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(summary)))
}

#[derive(Debug, Deserialize)]
pub struct ClientReportQuery {
    pub representative: Option<String>,
}

pub async fn report_by_client(
    query: ClientReportQuery,
    user: CurrentUser,
    report_service: Arc<dyn ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let rows = report_service
        .by_client(&user, query.representative)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(rows)))
}

#[derive(Debug, Deserialize)]
pub struct ClientDetailQuery {
    pub client: String,
}

pub async fn client_detail(
    query: ClientDetailQuery,
    user: CurrentUser,
    report_service: Arc<dyn ReportService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let detail = report_service
        .client_detail(&user, &query.client)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(detail)))
}

#[derive(Debug, Serialize)]
struct RosterEntry {
    representative: &'static str,
    clients: &'static [roster::RosterClient],
}

pub async fn get_roster(_user: CurrentUser) -> Result<impl warp::Reply, warp::Rejection> {
    let entries: Vec<RosterEntry> = roster::ROSTER
        .iter()
        .map(|&(representative, clients)| RosterEntry {
            representative,
            clients,
        })
        .collect();
    Ok(warp::reply::json(&ApiResponse::ok(entries)))
}

pub async fn export_csv(
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let body = debt_service
        .export_csv(&user)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    warp::http::Response::builder()
        .header("content-type", "text/csv; charset=utf-8")
        .header("content-disposition", "attachment; filename=\"creances.csv\"")
        .body(body)
        .map_err(|e| reject::custom(ApiErrorCode::internal(e)))
}

pub async fn import_csv(
    body: warp::hyper::body::Bytes,
    user: CurrentUser,
    debt_service: Arc<dyn DebtService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let outcome = debt_service
        .import_csv(&user, &body)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(outcome)))
}

pub async fn list_accounts(
    user: CurrentUser,
    account_service: Arc<dyn AccountService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let accounts = account_service
        .list_accounts(&user)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(accounts)))
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub rep_scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateAccountResponse {
    pub user_id: crate::domain_model::UserId,
}

pub async fn create_account(
    body: CreateAccountRequest,
    user: CurrentUser,
    account_service: Arc<dyn AccountService>,
) -> Result<impl warp::Reply, warp::Rejection> {
    let input = NewAccountInput {
        username: body.username,
        password: body.password,
        role: body.role,
        rep_scope: body.rep_scope,
    };
    let user_id = account_service
        .create_account(&user, input)
        .await
        .map_err(ApiErrorCode::from)
        .map_err(reject::custom)?;

    Ok(warp::reply::json(&ApiResponse::ok(CreateAccountResponse {
        user_id,
    })))
}
