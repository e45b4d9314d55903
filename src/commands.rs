//! Command execution.

use crate::render::Renderer;
use crate::Commands;
use colored::Colorize;
use liftdfa_core::{encode_travel, Direction, Elevator, ElevatorError};
use std::cmp::Ordering;

/// Executes a one-shot command and returns the formatted output.
pub fn execute(
    elevator: &mut Elevator,
    renderer: &Renderer,
    cmd: Commands,
) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Repl | Commands::InitConfig { .. } => unreachable!(),

        Commands::Go { floors } => {
            let mut stdout = std::io::stdout();
            for to in floors {
                let movement = elevator.go_to(to).map_err(|e| {
                    tracing::warn!("Request for floor {} failed: {}", to, e);
                    e
                })?;
                renderer.play(&movement, &mut stdout)?;
            }
            Ok(renderer.shaft(&elevator.status()))
        }

        Commands::Encode { from, to } => Ok(encode(elevator, from, to)?),

        Commands::Run { input } => Ok(run(elevator, &input)),

        Commands::Status { json } => {
            if json {
                Ok(serde_json::to_string_pretty(&elevator.status())?)
            } else {
                Ok(status(elevator, renderer))
            }
        }
    }
}

/// Formats the bitstring for a trip between two floors.
pub fn encode(elevator: &Elevator, from: u32, to: u32) -> Result<String, ElevatorError> {
    for floor in [from, to] {
        if floor > elevator.floors() {
            return Err(ElevatorError::OutOfRange {
                requested: i64::from(floor),
                floors: elevator.floors(),
            });
        }
    }

    let direction = match to.cmp(&from) {
        Ordering::Greater => Direction::Up,
        Ordering::Less => Direction::Down,
        Ordering::Equal => return Ok(format!("{} (no trip)", "ε".dimmed())),
    };
    let distance = from.abs_diff(to);
    let bits = encode_travel(direction, distance)?;
    Ok(format!(
        "{} ({} {} {})",
        bits.cyan(),
        direction,
        distance,
        if distance == 1 { "floor" } else { "floors" }
    ))
}

/// Executes a raw bitstring and reports acceptance.
pub fn run(elevator: &Elevator, input: &str) -> String {
    match elevator.automaton().execute(input) {
        Ok(steps) => format!("{} after {} steps", "Accepted".green(), steps),
        Err(e) => format!("{} [{}]: {}", "Rejected".red(), e.error_code(), e),
    }
}

pub fn status(elevator: &Elevator, renderer: &Renderer) -> String {
    format!(
        "{}\n{}  Trips run: {}",
        format!(
            "Elevator at {}",
            crate::render::floor_label(elevator.current_floor())
        )
        .bold(),
        renderer.shaft(&elevator.status()),
        elevator.executions()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;

    fn setup() -> (Elevator, Renderer) {
        colored::control::set_override(false);
        let renderer = Renderer::new(&DisplayConfig {
            animate: false,
            frame_delay_ms: 0,
            color: false,
        });
        (Elevator::new(5), renderer)
    }

    #[test]
    fn test_encode() {
        let (elevator, _) = setup();
        assert_eq!(encode(&elevator, 0, 3).unwrap(), "1001 (up 3 floors)");
        assert_eq!(encode(&elevator, 4, 3).unwrap(), "01 (down 1 floor)");
        assert_eq!(encode(&elevator, 2, 2).unwrap(), "ε (no trip)");
        assert!(matches!(
            encode(&elevator, 0, 6),
            Err(ElevatorError::OutOfRange { requested: 6, .. })
        ));
    }

    #[test]
    fn test_run() {
        let (elevator, _) = setup();
        assert_eq!(run(&elevator, "10001"), "Accepted after 5 steps");
        assert!(run(&elevator, "100").starts_with("Rejected [INVALID_STRING]"));
        assert!(run(&elevator, "").starts_with("Rejected [INVALID_STRING]"));
    }

    #[test]
    fn test_go_sequence() {
        let (mut elevator, renderer) = setup();
        let output = execute(
            &mut elevator,
            &renderer,
            Commands::Go {
                floors: vec![4, 1, 1],
            },
        )
        .unwrap();
        assert_eq!(elevator.current_floor(), 1);
        assert_eq!(elevator.executions(), 2);
        assert!(output.contains("[#] Floor 1"));
    }

    #[test]
    fn test_go_stops_at_first_failure() {
        let (mut elevator, renderer) = setup();
        let result = execute(
            &mut elevator,
            &renderer,
            Commands::Go {
                floors: vec![2, 9, 4],
            },
        );
        assert!(result.is_err());
        assert_eq!(elevator.current_floor(), 2);
    }

    #[test]
    fn test_status_json() {
        let (mut elevator, renderer) = setup();
        elevator.floor_up(3).unwrap();
        let output = execute(&mut elevator, &renderer, Commands::Status { json: true }).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["current_floor"], 3);
        assert_eq!(value["floors"], 5);
    }
}
