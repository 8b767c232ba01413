//! msibench CLI entry point.

use clap::Parser;

use msibench::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = msibench::cli::run(cli).await {
        msibench::cli::handle_error(&err);
    }
}
