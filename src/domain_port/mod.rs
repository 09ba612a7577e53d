// store

mod auth_session_store;

pub use auth_session_store::*;

// repo

mod account_repo;
mod debt_repo;

mod repo_tx;

pub use account_repo::*;
pub use debt_repo::*;

pub use repo_tx::*;
