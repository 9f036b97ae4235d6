use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "tally",
    about = concat!("[>] tally v", env!("CARGO_PKG_VERSION"), " - two lists, one commit"),
    version
)]
pub struct Cli {
    /// Keep todo files in the current directory
    #[arg(long, conflicts_with_all = ["global", "dir"])]
    pub local: bool,

    /// Keep todo files in ~/Documents/todo (created on demand)
    #[arg(long, conflicts_with = "dir")]
    pub global: bool,

    /// Keep todo files in an explicit directory
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_args_means_interactive_choice() {
        let cli = Cli::parse_from(["tally"]);
        assert!(!cli.local && !cli.global && cli.dir.is_none());
    }

    #[test]
    fn location_flags() {
        let cli = Cli::parse_from(["tally", "--local", "--no-color"]);
        assert!(cli.local);
        assert!(cli.no_color);

        let cli = Cli::parse_from(["tally", "--dir", "/tmp/todo"]);
        assert_eq!(cli.dir.as_deref(), Some(std::path::Path::new("/tmp/todo")));
    }

    #[test]
    fn local_and_global_conflict() {
        assert!(Cli::try_parse_from(["tally", "--local", "--global"]).is_err());
    }
}
