use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Select};
use log::LevelFilter;
use matches_game::analysis::{analyse, MAX_ANALYSED_PILE};
use matches_game::{logging, Session, Side, Turn, MAX_TAKE};
use std::path::PathBuf;

/// Take 1 to 4 matches in turn with the robot; whoever takes the last match wins.
#[derive(Parser, Debug)]
#[command(name = "matches")]
struct Args {
    /// Terminal log level.
    #[arg(long, global = true, env = "MATCHES_LOG", default_value = "warn")]
    log_level: LevelFilter,
    /// Also write a debug log to this file.
    #[arg(long, global = true, env = "MATCHES_LOG_FILE")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Play a game against the robot.
    Play {
        /// Initial number of matches; asked for when omitted.
        #[arg(short, long)]
        matches: Option<u32>,
    },
    /// Print who wins from each pile size and what the robot would take.
    Analyse {
        /// Largest pile size to report.
        #[arg(long, default_value_t = 30,
              value_parser = clap::value_parser!(u32).range(0..=MAX_ANALYSED_PILE as i64))]
        max: u32,
        #[arg(long)]
        json: bool,
    },
}

fn print_turn(turn: &Turn) {
    let narration = turn.to_string();
    match turn.winner {
        Some(Side::Player) => println!("{}", narration.green().bold()),
        Some(Side::Robot) => println!("{}", narration.red().bold()),
        None => println!("{}", narration),
    }
}

fn play(matches: Option<u32>) -> anyhow::Result<()> {
    let count = match matches {
        Some(count) => count,
        None => Input::<u32>::new()
            .with_prompt("Matches")
            .interact_text()
            .context("read the initial number of matches")?,
    };
    let mut session = Session::new(count);
    if session.is_over() {
        println!("No matches on the table, nothing to play.");
        return Ok(());
    }

    let choices: Vec<String> = (1..=MAX_TAKE)
        .map(|n| match n {
            1 => "User takes 1 match".to_string(),
            _ => format!("User takes {} matches", n),
        })
        .collect();

    while session.winner().is_none() {
        let selection = Select::new()
            .with_prompt(format!("{} left", session.pile().remaining()))
            .items(&choices)
            .default(0)
            .interact()
            .context("read the player's move")?;
        match session.play_turn(selection as u32 + 1) {
            Ok(turn) => print_turn(&turn),
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }
    Ok(())
}

fn print_analysis(max: u32, json: bool) -> anyhow::Result<()> {
    let reports = analyse(0..=max).context("analysis was cancelled")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }
    let header = format!("{:>6} {:>6} {:>8} {:>6}", "pile", "nimber", "outcome", "robot");
    println!("{}", header.bold());
    for report in reports {
        println!("{}", report);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.log_level, args.log_file.as_deref())?;
    match args.command {
        Command::Play { matches } => play(matches),
        Command::Analyse { max, json } => print_analysis(max, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_with_pile() {
        let args = Args::try_parse_from(["matches", "play", "--matches", "21"]).unwrap();
        assert_eq!(args.command, Command::Play { matches: Some(21) });
    }

    #[test]
    fn test_play_asks_for_pile() {
        let args = Args::try_parse_from(["matches", "play"]).unwrap();
        assert_eq!(args.command, Command::Play { matches: None });
    }

    #[test]
    fn test_negative_pile() {
        let result = Args::try_parse_from(["matches", "play", "-m", "-3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_analyse_defaults() {
        let args = Args::try_parse_from(["matches", "analyse"]).unwrap();
        assert_eq!(
            args.command,
            Command::Analyse {
                max: 30,
                json: false
            }
        );
    }

    #[test]
    fn test_analyse_limit() {
        let result = Args::try_parse_from(["matches", "analyse", "--max", "1001"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level_after_subcommand() {
        let args =
            Args::try_parse_from(["matches", "analyse", "--json", "--log-level", "debug"]).unwrap();
        assert_eq!(args.log_level, LevelFilter::Debug);
    }
}
