mod commands;
pub mod error;
pub mod exit_codes;
pub mod output;

pub use commands::{Cli, Commands, ConfigCommands, RewriteArgs};
pub use error::CommandError;

pub fn run(cli: Cli) -> Result<(), CommandError> {
    commands::execute(cli)
}
