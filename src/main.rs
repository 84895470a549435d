//! tsrc - Command-line tool for resolving design-token variable aliases

use std::process::ExitCode;

use tokensrc::cli;

fn main() -> ExitCode {
    cli::run()
}
