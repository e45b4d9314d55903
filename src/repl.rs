//! Interactive REPL.

use crate::commands;
use crate::render::Renderer;
use colored::Colorize;
use liftdfa_core::Elevator;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

const HELP_TEXT: &str = r#"
Available commands:
  help                          Show this help
  status                        Show the building and the car
  floors                        Show the served floors and the current floor

  go <floor>                    Travel to a floor
  up <floor>                    Travel up to a floor
  down <floor>                  Travel down to a floor

  encode <from> <to>            Show the bitstring for a trip
  run <bits>                    Execute a bitstring on the automaton
  states                        List automaton states and transitions

  quit, exit                    Exit the REPL
"#;

/// Result of a single REPL line.
#[derive(Debug, PartialEq)]
enum Outcome {
    Print(String),
    Exit,
}

pub fn run(elevator: &mut Elevator, renderer: &Renderer) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "liftdfa".bold().cyan());
    println!(
        "Serving {} to {}.",
        crate::render::floor_label(0),
        crate::render::floor_label(elevator.floors())
    );

    // Create readline editor
    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    // Load history
    let history_path = home::home_dir()
        .map(|h| h.join(".liftdfa_history"))
        .unwrap_or_else(|| ".liftdfa_history".into());
    let _ = rl.load_history(&history_path);

    println!("Type 'help' for available commands.\n");

    loop {
        let prompt = format!("{} ", format!("floor {}>", elevator.current_floor()).cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_repl_command(elevator, renderer, line) {
                    Ok(Outcome::Print(output)) => println!("{}\n", output),
                    Ok(Outcome::Exit) => break,
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);

    Ok(())
}

fn execute_repl_command(
    elevator: &mut Elevator,
    renderer: &Renderer,
    line: &str,
) -> Result<Outcome, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Ok(Outcome::Print(String::new()));
    }

    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    match cmd.as_str() {
        "help" | "?" => Ok(Outcome::Print(HELP_TEXT.to_string())),

        "quit" | "exit" | "q" => Ok(Outcome::Exit),

        "status" | "s" => Ok(Outcome::Print(commands::status(elevator, renderer))),

        "floors" => Ok(Outcome::Print(format!(
            "Floors 0..={} ({} to {}), currently at {}",
            elevator.floors(),
            crate::render::floor_label(0),
            crate::render::floor_label(elevator.floors()),
            crate::render::floor_label(elevator.current_floor())
        ))),

        "go" | "g" | "up" | "u" | "down" | "d" => {
            let Some(arg) = args.first() else {
                return Ok(Outcome::Print(format!("Usage: {} <floor>", cmd)));
            };
            let to: i64 = arg.parse()?;

            let result = match cmd.as_str() {
                "up" | "u" => elevator.floor_up(to),
                "down" | "d" => elevator.floor_down(to),
                _ => elevator.go_to(to),
            };
            let movement = result.map_err(|e| {
                tracing::warn!("Request for floor {} failed: {}", to, e);
                e
            })?;

            let mut stdout = std::io::stdout();
            renderer.play(&movement, &mut stdout)?;
            Ok(Outcome::Print(String::new()))
        }

        "encode" | "e" => {
            if args.len() < 2 {
                return Ok(Outcome::Print("Usage: encode <from> <to>".to_string()));
            }
            let from: u32 = args[0].parse()?;
            let to: u32 = args[1].parse()?;
            Ok(Outcome::Print(commands::encode(elevator, from, to)?))
        }

        "run" | "r" => {
            if args.is_empty() {
                return Ok(Outcome::Print("Usage: run <bits>".to_string()));
            }
            Ok(Outcome::Print(commands::run(elevator, args[0])))
        }

        "states" => {
            let dfa = elevator.automaton();
            let mut output = String::new();
            for (_, state) in dfa.states() {
                let mut flags = Vec::new();
                if state.is_start() {
                    flags.push("start");
                }
                if state.is_final() {
                    flags.push("final");
                }
                output.push_str(&format!("  {}", state.name().cyan()));
                if !flags.is_empty() {
                    output.push_str(&format!(" ({})", flags.join(", ")));
                }
                output.push('\n');
                for symbol in state.symbols() {
                    if let Ok(to) = state.transition(symbol) {
                        output.push_str(&format!(
                            "    --{}--> {}\n",
                            symbol,
                            dfa.state(to).name()
                        ));
                    }
                }
            }
            Ok(Outcome::Print(output))
        }

        _ => Ok(Outcome::Print(format!(
            "Unknown command: {}. Type 'help' for help.",
            cmd
        ))),
    }
}
