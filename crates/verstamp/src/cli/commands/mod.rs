//! CLI commands

mod init;
mod stamp;
mod validate;

pub use init::InitCommand;
pub use stamp::StampCommand;
pub use validate::ValidateCommand;
