// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text protocol for driving a session without a window system.
//!
//! One event per line; blank lines and `#` comments are ignored:
//!
//! ```text
//! move 400          # pointer moved to x = 400
//! wheel up 400      # zoom in anchored at x = 400
//! wheel down 120    # zoom out anchored at x = 120
//! press 300         # start a drag at x = 300
//! drag 250          # drag moved to x = 250
//! release           # drag finished
//! pan -40           # pan by -40 pixels
//! info              # report the zoom state
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of one wheel step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Towards the user's screen: zoom in.
    Up,
    /// Away from the screen: zoom out.
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Move(i64),
    Wheel(WheelDirection, i64),
    Press(i64),
    Drag(i64),
    Release,
    Pan(i64),
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventParseError {
    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("event '{event}' expects {expected}")]
    MissingArgument { event: String, expected: &'static str },

    #[error("'{0}' is not a pixel offset")]
    InvalidNumber(String),

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<EventParseError>,
    },
}

fn parse_pixel(token: Option<&str>, event: &str) -> Result<i64, EventParseError> {
    let token = token.ok_or_else(|| EventParseError::MissingArgument {
        event: event.to_string(),
        expected: "a pixel",
    })?;
    token
        .parse::<i64>()
        .map_err(|_| EventParseError::InvalidNumber(token.to_string()))
}

impl FromStr for Event {
    type Err = EventParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut tokens = text.split_whitespace();
        let name = tokens.next().unwrap_or("");
        let event = match name {
            "move" => Event::Move(parse_pixel(tokens.next(), name)?),
            "press" => Event::Press(parse_pixel(tokens.next(), name)?),
            "drag" => Event::Drag(parse_pixel(tokens.next(), name)?),
            "pan" => Event::Pan(parse_pixel(tokens.next(), name)?),
            "release" => Event::Release,
            "info" => Event::Info,
            "wheel" => {
                let direction = match tokens.next() {
                    Some("up") => WheelDirection::Up,
                    Some("down") => WheelDirection::Down,
                    _ => {
                        return Err(EventParseError::MissingArgument {
                            event: name.to_string(),
                            expected: "'up' or 'down' and a pixel",
                        })
                    }
                };
                Event::Wheel(direction, parse_pixel(tokens.next(), name)?)
            }
            _ => return Err(EventParseError::UnknownEvent(text.trim().to_string())),
        };
        Ok(event)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Move(x) => write!(f, "move {}", x),
            Event::Wheel(WheelDirection::Up, x) => write!(f, "wheel up {}", x),
            Event::Wheel(WheelDirection::Down, x) => write!(f, "wheel down {}", x),
            Event::Press(x) => write!(f, "press {}", x),
            Event::Drag(x) => write!(f, "drag {}", x),
            Event::Release => write!(f, "release"),
            Event::Pan(dx) => write!(f, "pan {}", dx),
            Event::Info => write!(f, "info"),
        }
    }
}

/// Parse a whole event script.
pub fn parse_script(text: &str) -> Result<Vec<Event>, EventParseError> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let event = line.parse::<Event>().map_err(|source| EventParseError::AtLine {
            line: index + 1,
            source: Box::new(source),
        })?;
        events.push(event);
    }
    Ok(events)
}
