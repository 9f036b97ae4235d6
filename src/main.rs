use clap::Parser;
use tally::cli::commands::Cli;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = tally::session::run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
