mod check;
mod search;

pub use check::cmd_check;
pub use search::cmd_search;
