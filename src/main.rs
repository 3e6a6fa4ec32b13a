use clap::Parser;
use colored::Colorize;
use minic::cli::{self, Cli};
use minic::exit;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(error) = cli::run(cli) {
        eprintln!("{} {}", "error:".red().bold(), error);
        exit::exit(error.exit_code());
    }
}
