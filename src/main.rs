use anyhow::Result;
use std::process::ExitCode;

mod cli;

use cli::CliApp;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    CliApp::run().await
}
