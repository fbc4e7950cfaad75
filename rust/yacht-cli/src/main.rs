//! yacht: CLI binary for the yacht scoring engine.
//!
//! Subcommands:
//! - score
//! - board
//! - roll

use std::env;
use std::process;

use yacht_core::{
    scores_for_combination, Category, ChanceKind, Combination, Config, ScoreBoard,
    ScoreBoardError,
};
use yacht_logging::{BoardEventV1, MarkEventV1, NdjsonWriter};

/// Parse dice given either as separate args (`1 2 3 4 5`) or comma lists (`1,2,3,4,5`).
fn parse_dice<S: AsRef<str>>(tokens: &[S]) -> Result<Combination, String> {
    let mut dice = Vec::with_capacity(5);
    for tok in tokens {
        for part in tok.as_ref().split(',').filter(|p| !p.trim().is_empty()) {
            let d: u8 = part
                .trim()
                .parse()
                .map_err(|_| format!("Invalid die value: {part}"))?;
            dice.push(d);
        }
    }
    Combination::try_from(dice.as_slice()).map_err(|e| e.to_string())
}

/// Parse `CATEGORY=d1,d2,d3,d4,d5`.
fn parse_mark(s: &str) -> Result<(Category, Combination), String> {
    let (cat, dice) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid --mark (expected CATEGORY=d1,d2,d3,d4,d5): {s}"))?;
    let category = cat.parse::<Category>().map_err(|e| format!("{e}"))?;
    let combination = parse_dice(&[dice])?;
    Ok((category, combination))
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    if i + 1 >= args.len() {
        eprintln!("Missing value for {flag}");
        process::exit(1);
    }
    &args[i + 1]
}

fn load_config(path: Option<&str>) -> Config {
    match path {
        Some(p) => Config::load(p).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            process::exit(1);
        }),
        None => Config::default(),
    }
}

fn cmd_score(args: &[String]) {
    let mut category: Option<Category> = None;
    let mut dice_tokens: Vec<&str> = Vec::new();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yacht score

USAGE:
    yacht score <d1> <d2> <d3> <d4> <d5> [--category NAME]
    yacht score <d1,d2,d3,d4,d5> [--category NAME]

OPTIONS:
    --category NAME    Print only this category's score (e.g. FullHouse, full_house)
"#
                );
                return;
            }
            "--category" => {
                let v = value_of(args, i, "--category");
                category = Some(v.parse::<Category>().unwrap_or_else(|e| {
                    eprintln!("{e}");
                    process::exit(1);
                }));
                i += 2;
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown option for `yacht score`: {}", other);
                eprintln!("Run `yacht score --help` for usage.");
                process::exit(1);
            }
            other => {
                dice_tokens.push(other);
                i += 1;
            }
        }
    }

    let combination = parse_dice(&dice_tokens).unwrap_or_else(|e| {
        eprintln!("Invalid combination: {e}");
        process::exit(1);
    });

    match category {
        Some(cat) => println!("{}", cat.measure(&combination)),
        None => {
            let scores = scores_for_combination(&combination);
            println!("Combination: {combination}");
            for cat in Category::ALL {
                let flag = if cat.matches(&combination) { "" } else { " (no match)" };
                println!("  {:<14} {:>3}{}", cat.label(), scores[cat.index()], flag);
            }
        }
    }
}

fn cmd_board(args: &[String]) {
    let mut marks: Vec<(Category, Combination)> = Vec::new();
    let mut config_path: Option<&str> = None;
    let mut events_path: Option<String> = None;
    let mut game_id: u64 = 0;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yacht board

USAGE:
    yacht board --mark CATEGORY=d1,d2,d3,d4,d5 [--mark ...] [OPTIONS]

Marks are committed in order. A mark for an already-filled category is
rejected and reported; the first entry is kept.

OPTIONS:
    --mark SPEC        Commit a combination to a category (repeatable)
    --events PATH      Append NDJSON mark/board events to PATH
    --game-id N        Game id stamped into events (default: 0)
    --config PATH      YAML config (logging.events_path, logging.flush_every_lines)
"#
                );
                return;
            }
            "--mark" => {
                let v = value_of(args, i, "--mark");
                marks.push(parse_mark(v).unwrap_or_else(|e| {
                    eprintln!("{e}");
                    process::exit(1);
                }));
                i += 2;
            }
            "--events" => {
                events_path = Some(value_of(args, i, "--events").to_string());
                i += 2;
            }
            "--game-id" => {
                let v = value_of(args, i, "--game-id");
                game_id = v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --game-id value: {v}");
                    process::exit(1);
                });
                i += 2;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yacht board`: {}", other);
                eprintln!("Run `yacht board --help` for usage.");
                process::exit(1);
            }
        }
    }

    let config = load_config(config_path);
    let events_path = events_path.or(config.logging.events_path);
    let mut events = events_path.map(|p| {
        NdjsonWriter::open_append_with_flush(&p, config.logging.flush_every_lines)
            .unwrap_or_else(|e| {
                eprintln!("Failed to open event log {p}: {e}");
                process::exit(1);
            })
    });

    let mut board = ScoreBoard::new();
    for (category, combination) in marks {
        match board.add(combination, category) {
            Ok(entry) => {
                if let Some(w) = events.as_mut() {
                    if let Err(e) = w.write_event(&MarkEventV1::from_entry(game_id, entry)) {
                        eprintln!("Failed to write mark event: {e}");
                        process::exit(1);
                    }
                }
            }
            Err(ScoreBoardError::DuplicateCategory { category }) => {
                eprintln!("Rejected: {category} is already filled (kept first entry)");
            }
            Err(e) => {
                eprintln!("Rejected: {e}");
                process::exit(1);
            }
        }
    }

    if let Some(w) = events.as_mut() {
        let res = w
            .write_event(&BoardEventV1::from_board(game_id, &board))
            .and_then(|_| w.flush());
        if let Err(e) = res {
            eprintln!("Failed to write board event: {e}");
            process::exit(1);
        }
    }

    println!("{}", board.summary());
}

fn cmd_roll(args: &[String]) {
    let mut count: usize = 1;
    let mut seed: Option<u64> = None;
    let mut mode: Option<ChanceKind> = None;
    let mut config_path: Option<&str> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                println!(
                    r#"yacht roll

USAGE:
    yacht roll [--count N] [--seed S] [--chance deterministic|rng] [--config PATH]

OPTIONS:
    --count N          Number of combinations to print (default: 1)
    --seed S           Seed (default: chance.seed from config, else 0)
    --chance MODE      deterministic | rng (default: chance.mode from config)
    --config PATH      YAML config
"#
                );
                return;
            }
            "--count" => {
                let v = value_of(args, i, "--count");
                count = v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --count value: {v}");
                    process::exit(1);
                });
                i += 2;
            }
            "--seed" => {
                let v = value_of(args, i, "--seed");
                seed = Some(v.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid --seed value: {v}");
                    process::exit(1);
                }));
                i += 2;
            }
            "--chance" => {
                mode = Some(match value_of(args, i, "--chance") {
                    "deterministic" => ChanceKind::Deterministic,
                    "rng" => ChanceKind::Rng,
                    other => {
                        eprintln!("invalid --chance: {other} (expected deterministic|rng)");
                        process::exit(1);
                    }
                });
                i += 2;
            }
            "--config" => {
                config_path = Some(value_of(args, i, "--config"));
                i += 2;
            }
            other => {
                eprintln!("Unknown option for `yacht roll`: {}", other);
                eprintln!("Run `yacht roll --help` for usage.");
                process::exit(1);
            }
        }
    }

    let mut chance = load_config(config_path).chance;
    if let Some(s) = seed {
        chance.seed = s;
    }
    if let Some(m) = mode {
        chance.mode = m;
    }
    tracing::debug!(mode = ?chance.mode, seed = chance.seed, count, "rolling");

    for combination in chance.roller().take(count) {
        let d = combination.dice();
        println!("{} {} {} {} {}", d[0], d[1], d[2], d[3], d[4]);
    }
}

fn print_help() {
    eprintln!(
        r#"yacht - Yacht dice scoring CLI

USAGE:
    yacht <COMMAND> [OPTIONS]

COMMANDS:
    score       Score a combination in every category (or one)
    board       Build a scoreboard from marks and print its summary
    roll        Print random combinations

OPTIONS:
    -h, --help          Print this help message
    -V, --version       Print version

Set RUST_LOG=debug to trace commits. Run `yacht <COMMAND> --help` for details.
"#
    );
}

fn print_version() {
    println!("yacht {}", env!("CARGO_PKG_VERSION"));
}

fn main() {
    yacht_logging::init_tracing();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_help();
        process::exit(0);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => {
            print_help();
        }
        "-V" | "--version" => {
            print_version();
        }
        "score" => {
            cmd_score(&args[2..]);
        }
        "board" => {
            cmd_board(&args[2..]);
        }
        "roll" => {
            cmd_roll(&args[2..]);
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            eprintln!("Run `yacht --help` for usage.");
            process::exit(1);
        }
    }
}
