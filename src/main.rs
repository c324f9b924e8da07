// o365cli - Microsoft 365 command line interface
use clap::Parser;
use o365cli::cli::args::Args;
use o365cli::cli::commands::execute_command;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = execute_command(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
