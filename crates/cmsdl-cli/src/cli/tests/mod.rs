//! CLI parsing and batch selection tests.

use super::*;


pub(super) fn parse(args: &[&str]) -> CliCommand {
    Cli::try_parse_from(args).unwrap().command
}
