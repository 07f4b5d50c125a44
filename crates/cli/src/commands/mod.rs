//! Command implementations.

mod analyze;
mod info;
mod run;
mod validate;

pub use analyze::run_analyze;
pub use info::run_info;
pub use run::run_collection;
pub use validate::run_validate;
