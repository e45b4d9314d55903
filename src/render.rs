//! Terminal rendering of elevator state and movements.

use crate::config::DisplayConfig;
use colored::Colorize;
use liftdfa_core::{Direction, ElevatorStatus, Movement};
use std::io::{self, Write};
use std::time::Duration;

const ARROW_UP: [&str; 5] = [
    "    ^    ",
    "   / \\   ",
    "  /   \\  ",
    "    |    ",
    "    |    ",
];

const ARROW_DOWN: [&str; 5] = [
    "    |    ",
    "    |    ",
    "  \\   /  ",
    "   \\ /   ",
    "    v    ",
];

/// Returns the arrow glyph for a direction.
pub fn arrow(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::Up => &ARROW_UP,
        Direction::Down => &ARROW_DOWN,
    }
}

/// Human-readable floor name; floor 0 is the ground floor.
pub fn floor_label(floor: u32) -> String {
    if floor == 0 {
        "Ground floor".to_string()
    } else {
        format!("Floor {}", floor)
    }
}

/// Floors displayed while travelling, including both ends.
pub fn path(movement: &Movement) -> Vec<u32> {
    match movement.direction {
        Some(Direction::Up) => (movement.from..=movement.to).collect(),
        Some(Direction::Down) => (movement.to..=movement.from).rev().collect(),
        None => vec![movement.to],
    }
}

/// Renders movements and status for the console.
pub struct Renderer {
    animate: bool,
    frame_delay: Duration,
}

impl Renderer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            animate: display.animate,
            frame_delay: display.frame_delay(),
        }
    }

    /// One-line summary of a completed request.
    pub fn summary(&self, movement: &Movement) -> String {
        match movement.direction {
            None => format!(
                "{} already at {}",
                "Stay".yellow(),
                floor_label(movement.to).cyan()
            ),
            Some(direction) => format!(
                "{} {} -> {} ({} {})",
                format!("Going {}", direction).green(),
                floor_label(movement.from),
                floor_label(movement.to).cyan(),
                movement.steps,
                if movement.steps == 1 { "step" } else { "steps" }
            ),
        }
    }

    /// Draws the building top-down with the car on the current floor.
    pub fn shaft(&self, status: &ElevatorStatus) -> String {
        let width = status.floors.to_string().len();
        let mut out = String::new();
        for floor in (0..=status.floors).rev() {
            let car = if floor == status.current_floor {
                "[#]".bold().green().to_string()
            } else {
                "[ ]".dimmed().to_string()
            };
            out.push_str(&format!("  {:>width$} {} {}\n", floor, car, floor_label(floor)));
        }
        out
    }

    /// Writes the trip frame by frame.
    pub fn play(&self, movement: &Movement, out: &mut impl Write) -> io::Result<()> {
        let Some(direction) = movement.direction else {
            return writeln!(out, "{}", self.summary(movement));
        };

        if self.animate {
            for floor in path(movement) {
                writeln!(out, "{} {}", arrow_head(direction), floor_label(floor).bold())?;
                out.flush()?;
                std::thread::sleep(self.frame_delay);
            }
        } else {
            for line in arrow(direction) {
                writeln!(out, "{}", line.cyan())?;
            }
        }

        writeln!(out, "{}", self.summary(movement))
    }
}

fn arrow_head(direction: Direction) -> colored::ColoredString {
    match direction {
        Direction::Up => "▲".green(),
        Direction::Down => "▼".yellow(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Renderer {
        colored::control::set_override(false);
        Renderer::new(&DisplayConfig {
            animate: true,
            frame_delay_ms: 0,
            color: false,
        })
    }

    fn movement(from: u32, to: u32, direction: Option<Direction>) -> Movement {
        Movement {
            from,
            to,
            steps: from.abs_diff(to) as usize,
            direction,
        }
    }

    #[test]
    fn test_floor_label() {
        assert_eq!(floor_label(0), "Ground floor");
        assert_eq!(floor_label(3), "Floor 3");
    }

    #[test]
    fn test_path() {
        assert_eq!(path(&movement(1, 4, Some(Direction::Up))), vec![1, 2, 3, 4]);
        assert_eq!(path(&movement(3, 0, Some(Direction::Down))), vec![3, 2, 1, 0]);
        assert_eq!(path(&movement(2, 2, None)), vec![2]);
    }

    #[test]
    fn test_arrow_shapes() {
        assert_eq!(arrow(Direction::Up).len(), arrow(Direction::Down).len());
        assert!(arrow(Direction::Up)[0].contains('^'));
        assert!(arrow(Direction::Down)[4].contains('v'));
    }

    #[test]
    fn test_summary() {
        let renderer = quiet();
        assert_eq!(
            renderer.summary(&movement(0, 3, Some(Direction::Up))),
            "Going up Ground floor -> Floor 3 (3 steps)"
        );
        assert_eq!(
            renderer.summary(&movement(2, 1, Some(Direction::Down))),
            "Going down Floor 2 -> Floor 1 (1 step)"
        );
        assert_eq!(
            renderer.summary(&movement(2, 2, None)),
            "Stay already at Floor 2"
        );
    }

    #[test]
    fn test_shaft_marks_current_floor() {
        let renderer = quiet();
        let shaft = renderer.shaft(&ElevatorStatus {
            floors: 2,
            current_floor: 1,
            executions: 0,
        });
        let lines: Vec<&str> = shaft.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "  2 [ ] Floor 2");
        assert_eq!(lines[1], "  1 [#] Floor 1");
        assert_eq!(lines[2], "  0 [ ] Ground floor");
    }

    #[test]
    fn test_play_writes_one_frame_per_floor() {
        let renderer = quiet();
        let mut out = Vec::new();
        renderer
            .play(&movement(0, 2, Some(Direction::Up)), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "▲ Ground floor");
        assert_eq!(lines[2], "▲ Floor 2");
    }
}
