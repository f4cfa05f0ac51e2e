use clap::{Parser, Subcommand};

use self::{show_shapes::ShowShapesArg, simulate::SimulateArg};

mod show_shapes;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play games headlessly with a random player and report the results
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the spawn shape of every piece in all four rotations
    ShowShapes(#[clap(flatten)] ShowShapesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::ShowShapes(arg) => show_shapes::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_simulate_defaults() {
        let args = CommandArgs::try_parse_from(["blockfall", "simulate"]).unwrap();
        let Mode::Simulate(arg) = args.mode else {
            panic!("expected simulate mode");
        };
        assert_eq!(arg.games, 1);
        assert_eq!(arg.max_pieces, 500);
        assert_eq!(arg.frame_ms, 16);
        assert!(arg.seed.is_none());
        assert!(arg.output.is_none());
    }

    #[test]
    fn test_invalid_seed_is_rejected() {
        let result = CommandArgs::try_parse_from(["blockfall", "simulate", "--seed", "xyz"]);
        assert!(result.is_err());
    }
}
