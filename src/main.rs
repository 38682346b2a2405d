use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use the_game_sim::{FaultPolicy, GameConfig, RunConfig, TieBreak, TrialRunner};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TieBreakArg {
    /// Lowest score, then lowest card, then lowest stack
    Ordered,
    /// Random among equally scored options, from the trial seed
    Seeded,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Ordered => TieBreak::Ordered,
            TieBreakArg::Seeded => TieBreak::Seeded,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "the-game-sim", about = "Simulate many games of The Game with a greedy policy")]
struct Args {
    /// Number of games to simulate
    #[arg(long, default_value_t = 1000)]
    trials: u64,

    /// Root seed; trial i always plays the same shuffled deck for a given seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Load the game configuration from a JSON file (flags below override it)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of players
    #[arg(long)]
    players: Option<usize>,

    /// Starting and refill hand size
    #[arg(long)]
    hand_size: Option<usize>,

    /// Keep playing extra cards while the best play scores at or below this
    #[arg(long, allow_hyphen_values = true)]
    threshold: Option<i32>,

    /// Only ever play the mandatory minimum
    #[arg(long)]
    no_extra_plays: bool,

    /// Rule for breaking ties between equally scored plays
    #[arg(long, value_enum)]
    tie_break: Option<TieBreakArg>,

    /// Spread trials over all cores
    #[arg(long)]
    parallel: bool,

    /// Log and skip trials that hit an engine fault instead of stopping
    #[arg(long)]
    skip_faults: bool,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Increase log output (-v final states, -vv every play)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Hide the per-trial outcome lines and print only the summary
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let mut game = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str::<GameConfig>(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => GameConfig::default(),
        };

        if let Some(players) = self.players {
            game = game.with_player_count(players);
        }
        if let Some(size) = self.hand_size {
            game = game.with_hand_size(size);
        }
        if let Some(threshold) = self.threshold {
            game = game.with_keep_playing_threshold(Some(threshold));
        }
        if self.no_extra_plays {
            game = game.with_keep_playing_threshold(None);
        }
        if let Some(tie_break) = self.tie_break {
            game = game.with_tie_break(tie_break.into());
        }
        Ok(game)
    }
}

/// Outcome lines are logged at info, so that is the default level.
fn log_level(verbose: u8, quiet: bool) -> log::LevelFilter {
    if quiet {
        return log::LevelFilter::Warn;
    }
    match verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

fn init_logging(level: log::LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(log_level(args.verbose, args.quiet));

    let fault_policy = if args.skip_faults {
        FaultPolicy::SkipTrial
    } else {
        FaultPolicy::AbortRun
    };
    let config = RunConfig::new(args.game_config()?)
        .with_trials(args.trials)
        .with_seed(args.seed)
        .with_parallel(args.parallel)
        .with_fault_policy(fault_policy);

    let runner = TrialRunner::new(config)?;
    let stats = runner.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{stats}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_lines_shown_by_default() {
        assert_eq!(log_level(0, false), log::LevelFilter::Info);
        assert_eq!(log_level(1, false), log::LevelFilter::Debug);
        assert_eq!(log_level(3, false), log::LevelFilter::Trace);
        assert_eq!(log_level(0, true), log::LevelFilter::Warn);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["the-game-sim", "-q", "-v"]).is_err());

        let args = Args::try_parse_from(["the-game-sim", "--threshold", "-5", "-q"]).unwrap();
        assert!(args.quiet);
        assert_eq!(args.game_config().unwrap().keep_playing_threshold, Some(-5));
    }
}
