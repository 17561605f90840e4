//! Gesture scripts: drive a feed from text instead of a touchscreen
//!
//! One command per line:
//! ```text
//! down X Y            pointer down
//! move X Y            pointer move
//! up                  pointer up
//! complete            finish the pending animation
//! load                fetch another batch of posts
//! swipe DX DY [N]     down at origin, N moves (default 10), up
//! circle CX CY R [N]  closed loop around (CX, CY), N moves (default 32), up
//! tick MS             advance the clock by MS for animation timeouts
//! # comment
//! ```

use std::time::{Duration, Instant};

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::FeedController;
use crate::error::{FeedError, Result};
use crate::types::{LifecycleOutput, PointSample};

const DEFAULT_SWIPE_STEPS: usize = 10;
const DEFAULT_CIRCLE_STEPS: usize = 32;

lazy_static! {
    static ref RE_POINTER: Regex = Regex::new(
        r"(?i)^(down|move)\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)$"
    ).unwrap();

    static ref RE_BARE: Regex = Regex::new(r"(?i)^(up|complete|load)$").unwrap();

    static ref RE_SWIPE: Regex = Regex::new(
        r"(?i)^swipe\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)(?:\s+(\d+))?$"
    ).unwrap();

    static ref RE_CIRCLE: Regex = Regex::new(
        r"(?i)^circle\s+(-?\d+(?:\.\d+)?)\s+(-?\d+(?:\.\d+)?)\s+(\d+(?:\.\d+)?)(?:\s+(\d+))?$"
    ).unwrap();

    static ref RE_TICK: Regex = Regex::new(r"(?i)^tick\s+(\d+)$").unwrap();
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    Down(PointSample),
    Move(PointSample),
    Up,
    Complete,
    Load,
    Swipe { dx: f64, dy: f64, steps: usize },
    Circle { cx: f64, cy: f64, radius: f64, steps: usize },
    Tick(u64),
}

impl ScriptCommand {
    /// Pointer samples a composite command produces, down point first
    pub fn samples(&self) -> Vec<PointSample> {
        match *self {
            ScriptCommand::Swipe { dx, dy, steps } => (0..=steps)
                .map(|i| {
                    let t = i as f64 / steps as f64;
                    PointSample::new(dx * t, dy * t)
                })
                .collect(),
            ScriptCommand::Circle {
                cx,
                cy,
                radius,
                steps,
            } => (0..=steps)
                .map(|i| {
                    let a = std::f64::consts::TAU * i as f64 / steps as f64;
                    PointSample::new(cx + radius * a.cos(), cy + radius * a.sin())
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Parse one line; `Ok(None)` for blanks and comments
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some(caps) = RE_POINTER.captures(line) {
        let point = PointSample::new(number(&caps[2], line_no)?, number(&caps[3], line_no)?);
        return Ok(Some(if caps[1].eq_ignore_ascii_case("down") {
            ScriptCommand::Down(point)
        } else {
            ScriptCommand::Move(point)
        }));
    }

    if let Some(caps) = RE_BARE.captures(line) {
        let word = caps[1].to_ascii_lowercase();
        return Ok(Some(match word.as_str() {
            "up" => ScriptCommand::Up,
            "load" => ScriptCommand::Load,
            _ => ScriptCommand::Complete,
        }));
    }

    if let Some(caps) = RE_SWIPE.captures(line) {
        return Ok(Some(ScriptCommand::Swipe {
            dx: number(&caps[1], line_no)?,
            dy: number(&caps[2], line_no)?,
            steps: steps(caps.get(3).map(|m| m.as_str()), DEFAULT_SWIPE_STEPS, line_no)?,
        }));
    }

    if let Some(caps) = RE_CIRCLE.captures(line) {
        return Ok(Some(ScriptCommand::Circle {
            cx: number(&caps[1], line_no)?,
            cy: number(&caps[2], line_no)?,
            radius: number(&caps[3], line_no)?,
            steps: steps(caps.get(4).map(|m| m.as_str()), DEFAULT_CIRCLE_STEPS, line_no)?,
        }));
    }

    if let Some(caps) = RE_TICK.captures(line) {
        let ms = caps[1].parse::<u64>().map_err(|e| FeedError::Script {
            line: line_no,
            message: e.to_string(),
        })?;
        return Ok(Some(ScriptCommand::Tick(ms)));
    }

    Err(FeedError::Script {
        line: line_no,
        message: format!("unrecognized command: {}", line),
    })
}

/// Parse a whole script; line numbers are 1-based
pub fn parse_script(text: &str) -> Result<Vec<ScriptCommand>> {
    let mut commands = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(cmd) = parse_line(line, i + 1)? {
            commands.push(cmd);
        }
    }
    Ok(commands)
}

/// Apply one command to a feed, returning every lifecycle output it produced
pub fn run_command(feed: &mut FeedController, command: &ScriptCommand) -> Result<Vec<LifecycleOutput>> {
    match command {
        ScriptCommand::Down(p) => Ok(vec![feed.pointer_down(*p)?]),
        ScriptCommand::Move(p) => Ok(vec![feed.pointer_move(*p)?]),
        ScriptCommand::Up => Ok(vec![feed.pointer_up()?]),
        ScriptCommand::Complete => Ok(vec![feed.complete_pending()?]),
        ScriptCommand::Load => {
            feed.load_more()?;
            Ok(Vec::new())
        }
        ScriptCommand::Swipe { .. } | ScriptCommand::Circle { .. } => {
            let samples = command.samples();
            let mut outputs = Vec::with_capacity(samples.len() + 1);
            let mut iter = samples.into_iter();
            if let Some(first) = iter.next() {
                outputs.push(feed.pointer_down(first)?);
            }
            for p in iter {
                outputs.push(feed.pointer_move(p)?);
            }
            outputs.push(feed.pointer_up()?);
            Ok(outputs)
        }
        ScriptCommand::Tick(ms) => {
            let now = Instant::now() + Duration::from_millis(*ms);
            Ok(feed.tick(now).into_iter().collect())
        }
    }
}

fn number(raw: &str, line_no: usize) -> Result<f64> {
    raw.parse::<f64>().map_err(|e| FeedError::Script {
        line: line_no,
        message: format!("bad number {:?}: {}", raw, e),
    })
}

fn steps(raw: Option<&str>, default: usize, line_no: usize) -> Result<usize> {
    let steps = match raw {
        Some(s) => s.parse::<usize>().map_err(|e| FeedError::Script {
            line: line_no,
            message: e.to_string(),
        })?,
        None => default,
    };
    if steps == 0 {
        return Err(FeedError::Script {
            line: line_no,
            message: "step count must be at least 1".to_string(),
        });
    }
    Ok(steps)
}

// =============================================================================
// TESTS
// =============================================================================
