mod account;
pub mod classify;
mod debt;
pub mod report;
pub mod roster;
mod status;

pub use account::*;
pub use classify::*;
pub use debt::*;
pub use report::*;
pub use status::*;
