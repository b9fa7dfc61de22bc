//! focusread command-line entry point

use clap::Parser;
use focusread_cli::commands::Commands;
use focusread_cli::CliResult;

/// Bionic reading and sentence highlighting for plain text
#[derive(Debug, Parser)]
#[command(name = "focusread", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_flags() {
        let cli = Cli::try_parse_from([
            "focusread",
            "render",
            "-i",
            "a.txt",
            "--enable",
            "beeline,spacing",
            "--disable",
            "bionic",
            "-f",
            "json",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.input, vec!["a.txt"]);
                assert_eq!(args.enable, vec!["beeline", "spacing"]);
                assert_eq!(args.disable, vec!["bionic"]);
                assert_eq!(args.verbose, 2);
            }
            other => panic!("expected render, got {other:?}"),
        }
    }

    #[test]
    fn test_render_requires_input() {
        assert!(Cli::try_parse_from(["focusread", "render"]).is_err());
    }
}
