//! Command line front end for the rules engine.
//!
//! Renders positions as text or JSON and applies moves given as coordinate
//! pairs ("e2e4"). All notation handling lives here; the engine itself only
//! ever sees [`Move`] values.

use chess_model::{Move, Square};
use chess_rules::{Game, MoveError};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "chess-cli")]
#[command(about = "Chess rules engine front end")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the standard starting position
    Board {
        /// Emit the piece snapshot as JSON instead of a text board
        #[arg(long)]
        json: bool,
    },
    /// Apply a sequence of coordinate-pair moves (e.g. e2e4 e7e5)
    Play {
        /// Moves as source/target square pairs
        moves: Vec<String>,
        /// Emit the final position as JSON instead of a text board
        #[arg(long)]
        json: bool,
    },
    /// List the legal target squares for the piece on a square
    Targets {
        /// The square to enumerate, e.g. e2
        square: String,
        /// Moves to apply before enumerating
        #[arg(short, long)]
        moves: Vec<String>,
    },
}

/// JSON representation of one piece on the board.
#[derive(Serialize)]
struct PieceJson {
    kind: &'static str,
    colour: String,
    square: String,
}

/// JSON representation of a whole position with its status flags.
#[derive(Serialize)]
struct GameJson {
    in_turn: String,
    check: bool,
    checkmate: bool,
    stalemate: bool,
    pieces: Vec<PieceJson>,
}

impl GameJson {
    fn from_game(game: &Game) -> Self {
        GameJson {
            in_turn: game.side_to_move().to_string(),
            check: game.is_in_check(game.side_to_move()),
            checkmate: game.is_checkmate(),
            stalemate: game.is_stalemate(),
            pieces: game
                .board()
                .snapshot()
                .into_iter()
                .map(|(role, color, square)| PieceJson {
                    kind: role.name(),
                    colour: color.to_string(),
                    square: square.to_string(),
                })
                .collect(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Board { json } => {
            print_position(&Game::new(), json);
            ExitCode::SUCCESS
        }
        Commands::Play { moves, json } => match play(&moves) {
            Ok(game) => {
                print_position(&game, json);
                print_status(&game);
                ExitCode::SUCCESS
            }
            Err(message) => {
                eprintln!("{message}");
                ExitCode::FAILURE
            }
        },
        Commands::Targets { square, moves } => {
            let Some(square) = Square::from_algebraic(&square) else {
                eprintln!("not a square: {square}");
                return ExitCode::FAILURE;
            };
            match play(&moves) {
                Ok(game) => {
                    for target in game.legal_targets(square) {
                        println!("{target}");
                    }
                    ExitCode::SUCCESS
                }
                Err(message) => {
                    eprintln!("{message}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

/// Applies the given coordinate-pair moves to a fresh game.
fn play(moves: &[String]) -> Result<Game, String> {
    let mut game = Game::new();
    for text in moves {
        let m = parse_move(text).ok_or_else(|| format!("not a move: {text}"))?;
        game.make_move(m)
            .map_err(|error: MoveError| format!("{text} rejected: {error}"))?;
    }
    Ok(game)
}

/// Parses a move given as two concatenated squares, e.g. "e2e4".
fn parse_move(text: &str) -> Option<Move> {
    if text.len() != 4 {
        return None;
    }
    let from = Square::from_algebraic(&text[..2])?;
    let to = Square::from_algebraic(&text[2..])?;
    Some(Move::new(from, to))
}

fn print_position(game: &Game, json: bool) {
    if json {
        let rendered = serde_json::to_string_pretty(&GameJson::from_game(game))
            .expect("snapshot serializes");
        println!("{rendered}");
    } else {
        println!("{}", game.board());
    }
}

fn print_status(game: &Game) {
    if game.is_checkmate() {
        println!("{} is checkmated", game.side_to_move());
    } else if game.is_stalemate() {
        println!("{} is stalemated", game.side_to_move());
    } else if game.is_in_check(game.side_to_move()) {
        println!("{} is in check", game.side_to_move());
    } else {
        println!("{} to move", game.side_to_move());
    }
}
