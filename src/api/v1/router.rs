use super::error::*;
use super::handler;
use crate::application_port::AuthService;
use crate::domain_model::CurrentUser;
use crate::server::Server;
use std::convert::Infallible;
use std::sync::Arc;
use warp::{Filter, reject};

pub fn routes(
    server: Arc<Server>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let login = warp::post()
        .and(warp::path("login"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::login);

    let refresh = warp::post()
        .and(warp::path("refresh"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with(server.auth_service.clone()))
        .and_then(handler::refresh);

    let dashboard = warp::get()
        .and(warp::path("dashboard"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.report_service.clone()))
        .and_then(handler::dashboard);

    let list_debts = warp::get()
        .and(warp::path("debts"))
        .and(warp::path::end())
        .and(warp::query::<handler::DebtListQuery>())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::list_debts);

    let get_debt = warp::get()
        .and(warp::path("debts"))
        .and(warp::path::param::<uuid::Uuid>())
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::get_debt);

    let create_debt = warp::post()
        .and(warp::path("debts"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::create_debt);

    let update_debt = warp::put()
        .and(warp::path("debts"))
        .and(warp::path::param::<uuid::Uuid>())
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::update_debt);

    let delete_debt = warp::delete()
        .and(warp::path("debts"))
        .and(warp::path::param::<uuid::Uuid>())
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::delete_debt);

    let report_by_representative = warp::get()
        .and(warp::path("reports"))
        .and(warp::path("representatives"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.report_service.clone()))
        .and_then(handler::report_by_representative);

    let report_by_client = warp::get()
        .and(warp::path("reports"))
        .and(warp::path("clients"))
        .and(warp::path::end())
        .and(warp::query::<handler::ClientReportQuery>())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.report_service.clone()))
        .and_then(handler::report_by_client);

    let client_detail = warp::get()
        .and(warp::path("client_detail"))
        .and(warp::path::end())
        .and(warp::query::<handler::ClientDetailQuery>())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.report_service.clone()))
        .and_then(handler::client_detail);

    let roster = warp::get()
        .and(warp::path("roster"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and_then(handler::get_roster);

    let export = warp::get()
        .and(warp::path("export"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::export_csv);

    let import = warp::post()
        .and(warp::path("import"))
        .and(warp::path::end())
        .and(warp::body::bytes())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.debt_service.clone()))
        .and_then(handler::import_csv);

    let list_accounts = warp::get()
        .and(warp::path("accounts"))
        .and(warp::path::end())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.account_service.clone()))
        .and_then(handler::list_accounts);

    let create_account = warp::post()
        .and(warp::path("accounts"))
        .and(warp::path::end())
        .and(warp::body::json())
        .and(with_verification(server.auth_service.clone()))
        .and(with(server.account_service.clone()))
        .and_then(handler::create_account);

    login
        .or(refresh)
        .or(dashboard)
        .or(list_debts)
        .or(get_debt)
        .or(create_debt)
        .or(update_debt)
        .or(delete_debt)
        .or(report_by_representative)
        .or(report_by_client)
        .or(client_detail)
        .or(roster)
        .or(export)
        .or(import)
        .or(list_accounts)
        .or(create_account)
}

fn with<ServiceType>(
    service: Arc<ServiceType>,
) -> impl Filter<Extract = (Arc<ServiceType>,), Error = Infallible> + Clone
where
    ServiceType: Send + Sync + ?Sized,
{
    warp::any().map(move || service.clone())
}

fn with_verification(
    auth_service: Arc<dyn AuthService>,
) -> impl Filter<Extract = (CurrentUser,), Error = warp::Rejection> + Clone {
    warp::header::<String>("authorization").and_then(move |token: String| {
        let auth_service = auth_service.clone();
        async move {
            if let Some(token) = token.strip_prefix("Bearer ") {
                let user = auth_service
                    .verify_token(token)
                    .await
                    .map_err(ApiErrorCode::from)
                    .map_err(reject::custom)?;
                Ok(user)
            } else {
                Err(reject::custom(ApiErrorCode::InvalidToken))
            }
        }
    })
}
