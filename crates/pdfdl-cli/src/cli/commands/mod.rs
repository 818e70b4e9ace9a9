//! CLI command handlers.

mod extract;
mod run;
mod tasks;

pub use extract::run_extract;
pub use run::run_fetch;
pub use tasks::run_list_tasks;
