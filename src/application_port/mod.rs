mod account_service;
mod auth_service;
mod debt_service;
mod report_service;

pub use account_service::*;
pub use auth_service::*;
pub use debt_service::*;
pub use report_service::*;
