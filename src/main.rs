#[macro_use]
extern crate log;

use std::fs;
use std::io::{stdin, Read};
use std::process;
use std::str::FromStr;

use clap::{value_t, App, Arg, ArgMatches};

use magicblock::moves::translate_move_seq;
use magicblock::parser::{ParseError, Puzzle};
use magicblock::render::{render_board, render_move_list, render_target};
use magicblock::solver::{self, SearchOptions};

// exit codes: 0 = solved, 1 = no solution within the depth caps, 2 = bad input
const EXIT_NO_SOLUTION: i32 = 1;
const EXIT_BAD_INPUT: i32 = 2;

fn main() {
    #[cfg(feature = "env_logger")]
    env_logger::init();

    let matches = App::new("magicblock")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Bidirectional BFS solver for the Magic Block sliding puzzle")
        .arg(
            Arg::with_name("INPUT")
                .help("The puzzle file to solve. When no input is present, read from the stdin.")
                .index(1),
        )
        .arg(
            Arg::with_name("no-rotate")
                .help("Match the target only in its original orientation")
                .short("n")
                .long("no-rotate"),
        )
        .args_from_usage(
            "-f, --forward-depth=[DEPTH] 'Cap the forward search depth'
             -b, --backward-depth=[DEPTH] 'Cap the backward search depth'",
        )
        .get_matches();

    let content = match content_from_args(&matches) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_BAD_INPUT);
        }
    };

    let puzzle = match Puzzle::from_content(&content) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(EXIT_BAD_INPUT);
        }
    };

    let options = search_options_from_args(&matches);

    println!("Target board:");
    println!("{}", render_target(&puzzle.target));
    println!();
    println!("Player board:");
    println!("{}", render_board(&puzzle.player));
    println!();

    #[cfg(feature = "std_time")]
    let start = std::time::Instant::now();

    let solution = solver::run(&puzzle.player, &puzzle.target, options);

    #[cfg(feature = "std_time")]
    {
        let total_time = start.elapsed();
        println!(
            "Total elapsed time: {}.{:06} sec",
            total_time.as_secs(),
            total_time.subsec_micros()
        );
        println!();
    }

    let solution = match solution {
        Some(solution) => solution,
        None => {
            println!("No solution within the depth caps.");
            process::exit(EXIT_NO_SOLUTION);
        }
    };

    match translate_move_seq(&puzzle.player, &solution.moves) {
        Some(moves) if !moves.is_empty() => {
            println!("Move list:");
            println!("{}", render_move_list(&moves));
            println!();
        }
        Some(_) => {
            println!("The player board already matches the target.");
            println!();
        }
        None => {
            // the driver replays every answer before returning it
            warn!("the answer does not replay on the player board");
        }
    }

    println!("Min steps: {}", solution.len());
    println!("Map used: {}", solution.states_visited);
    if solution.rotation != 0 {
        println!("Target rotation: {} degrees", u32::from(solution.rotation) * 90);
    }
}

fn content_from_args(matches: &ArgMatches) -> Result<String, ParseError> {
    if let Some(input_file) = matches.value_of("INPUT") {
        return Ok(fs::read_to_string(input_file)?);
    }
    warn!("Reading from stdin...");
    let mut buffer = String::new();
    let _ = stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

fn search_options_from_args(matches: &ArgMatches) -> SearchOptions {
    let mut options = SearchOptions::new(!matches.is_present("no-rotate"));
    if let Some(depth) = parse_arg::<usize>(matches, "forward-depth") {
        options.max_forward_depth = depth;
    }
    if let Some(depth) = parse_arg::<usize>(matches, "backward-depth") {
        options.max_backward_depth = depth;
    }
    options
}

fn parse_arg<T>(matches: &ArgMatches, name: &str) -> Option<T>
where
    T: FromStr,
{
    if matches.is_present(name) {
        let value = value_t!(matches, name, T).unwrap_or_else(|e| e.exit());
        return Some(value);
    }

    None
}
