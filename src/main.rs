//! Hot-seat terminal host.
//!
//! Runs each game on a session worker thread and feeds it commands typed on
//! stdin. Logging goes to stderr and is controlled with `RUST_LOG`.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::thread;

use aula_chess::chess_errors::ChessError;
use aula_chess::game::config::GameConfig;
use aula_chess::game::game::InputOutcome;
use aula_chess::game::game_view::GameView;
use aula_chess::game::session::{spawn_session, GameEvent, SessionHandle};
use aula_chess::game_state::chess_types::PieceKind;
use aula_chess::utils::algebraic::algebraic_to_square;
use aula_chess::utils::render_game_state::render_view;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
commands:
  e2e4     move a piece (append q/r/b/n to promote, e.g. e7e8q)
  e2       click a square (select, or move the selection there)
  q r b n  choose a promotion piece
  undo     take back the last move
  show     redraw the board
  quit     abandon the game";

#[derive(Parser, Debug)]
#[command(about = "Two-player chess in the terminal", author, version)]
struct CmdArgs {
    /// Minutes on each clock
    #[arg(long, default_value_t = 10)]
    minutes: i64,

    /// Seconds credited to a player after each move
    #[arg(long, default_value_t = 0)]
    increment: i64,

    /// Number of recent moves listed under the board
    #[arg(long, default_value_t = 8)]
    history_lines: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostCommand {
    Events(Vec<GameEvent>),
    Show,
    Help,
}

fn parse_command(line: &str) -> Result<HostCommand, ChessError> {
    let line = line.trim().to_ascii_lowercase();
    let events = match line.as_str() {
        "" | "show" => return Ok(HostCommand::Show),
        "help" | "?" => return Ok(HostCommand::Help),
        "undo" | "u" => vec![GameEvent::Undo],
        "quit" | "exit" | "resign" => vec![GameEvent::Quit],
        "q" | "r" | "b" | "n" => {
            let kind = line
                .chars()
                .next()
                .and_then(PieceKind::from_letter)
                .ok_or_else(|| ChessError::InvalidSquareName(line.clone()))?;
            vec![GameEvent::ChoosePromotion(kind)]
        }
        text if !text.is_ascii() => return Err(ChessError::InvalidSquareName(text.to_owned())),
        text if text.len() == 2 => vec![GameEvent::Click(algebraic_to_square(text)?)],
        text if text.len() == 4 || text.len() == 5 => {
            let from = algebraic_to_square(&text[0..2])?;
            let to = algebraic_to_square(&text[2..4])?;
            let mut events = vec![GameEvent::SelectSquare(from), GameEvent::AttemptMove(to)];
            if let Some(letter) = text[4..].chars().next() {
                let kind = PieceKind::from_letter(letter)
                    .ok_or_else(|| ChessError::InvalidSquareName(text.to_owned()))?;
                events.push(GameEvent::ChoosePromotion(kind));
            }
            events
        }
        text => return Err(ChessError::InvalidSquareName(text.to_owned())),
    };
    Ok(HostCommand::Events(events))
}

/// Wait for the worker's answer to the last batch and return the newest view.
fn collect_view(
    handle: &SessionHandle,
    config: &GameConfig,
) -> Result<Option<GameView>, ChessError> {
    let Some(first) = handle.recv_update(config.frame_interval * 60)? else {
        return Ok(None);
    };
    thread::sleep(config.frame_interval * 2);

    let mut latest = first;
    for update in handle.pending_updates() {
        latest = update;
    }
    for outcome in &latest.outcomes {
        if let InputOutcome::Ignored(reason) = outcome {
            println!("ignored: {reason:?}");
        }
    }
    Ok(Some(latest.view))
}

fn play_one_game(config: GameConfig) -> Result<(), Box<dyn Error>> {
    let handle = spawn_session(config)?;
    handle.refresh()?;
    if let Some(view) = collect_view(&handle, &config)? {
        println!("{}", render_view(&view));
    }

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let events = match parse_command(&input) {
            Ok(HostCommand::Help) => {
                println!("{HELP}");
                continue;
            }
            Ok(HostCommand::Show) => Vec::new(),
            Ok(HostCommand::Events(events)) => events,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        if handle.is_finished() {
            break;
        }
        let sent = events
            .into_iter()
            .try_for_each(|event| handle.send(event))
            .and_then(|()| handle.refresh());
        if sent.is_err() {
            break;
        }

        match collect_view(&handle, &config) {
            Ok(Some(view)) => {
                println!("{}", render_view(&view));
                if view.result.is_some() {
                    break;
                }
            }
            Ok(None) => {}
            Err(_) => break,
        }
    }

    let last = handle.join()?;
    match last.result {
        Some(result) => println!("{result}"),
        None => println!("game left unfinished"),
    }
    Ok(())
}

fn ask_replay() -> io::Result<bool> {
    print!("play again? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cmd_args = CmdArgs::parse();
    let config =
        GameConfig::new(cmd_args.minutes, cmd_args.increment)?.with_history_lines(cmd_args.history_lines);
    config.validate()?;

    println!("{HELP}\n");
    loop {
        play_one_game(config)?;
        if !ask_replay()? {
            break;
        }
    }
    Ok(())
}
