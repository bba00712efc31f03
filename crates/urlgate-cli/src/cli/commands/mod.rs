//! CLI command handlers, one per file.

mod check;
mod get;
mod list;
mod remove;
mod screen;

pub use check::{run_check, CheckInput};
pub use get::run_get;
pub use list::run_list;
pub use remove::run_remove;
pub use screen::run_screen;
