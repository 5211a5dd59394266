mod import;
mod info;
mod init;
mod list;
mod search;

pub use import::cmd_import;
pub use info::cmd_info;
pub use init::cmd_init;
pub use list::cmd_list;
pub use search::cmd_search;
