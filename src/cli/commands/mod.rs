//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod category;
pub mod change_password;
pub mod copy;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod show;
