mod create;
mod destroy;
mod list;

pub use create::cmd_create;
pub use destroy::cmd_destroy;
pub use list::cmd_list;
