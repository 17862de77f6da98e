//! Command-line interface module.

mod args;
pub mod common;
pub mod compile;
pub mod init;
pub mod list;
pub mod meta;
pub mod new;
pub mod watch;

pub use args::{Cli, Commands, CompileArgs, ListArgs, MetaArgs, NewArgs};
