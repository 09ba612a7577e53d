mod account_repo_mysql;
mod debt_repo_mysql;

pub use account_repo_mysql::*;
pub use debt_repo_mysql::*;

mod repo_tx_mysql;

pub use repo_tx_mysql::*;

mod util;
