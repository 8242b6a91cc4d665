//! Line-based S-Pen event scripts.
//!
//! ```text
//! # comment
//! tool stylus
//! hover 100 100 0.2
//! wait 10
//! contact 104 103 0.6
//! button barrel down
//! pointer pressed
//! lightgun trigger
//! query 1 0
//! state
//! ```

use spen_adapter::{ids, ToolType};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Hover { x: f32, y: f32, pressure: f32 },
    Contact { x: f32, y: f32, pressure: f32 },
    Button { index: u32, pressed: bool },
    Tool(ToolType),
    /// Advance the clock by this many milliseconds.
    Wait(u64),
    /// `emit_pointer` against any device class.
    Query { device: u32, id: u32 },
    /// `mapped_button` against any device class.
    Mapped { device: u32, id: u32 },
    State,
}

fn number<T: std::str::FromStr>(word: Option<&str>, what: &str) -> Result<T, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    word.parse()
        .map_err(|_| format!("invalid {} '{}'", what, word))
}

fn position<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<(f32, f32, f32), String> {
    let x = number(words.next(), "x")?;
    let y = number(words.next(), "y")?;
    let pressure = match words.next() {
        Some(p) => number(Some(p), "pressure")?,
        None => 0.0,
    };
    Ok((x, y, pressure))
}

fn button_index(word: Option<&str>) -> Result<u32, String> {
    let word = word.ok_or("missing button")?;
    match word.parse::<u32>() {
        Ok(index) => Ok(index),
        Err(_) => word.parse::<spen_adapter::Button>().map(u32::from),
    }
}

fn named_id(word: Option<&str>, names: &[(&str, u32)], what: &str) -> Result<u32, String> {
    let word = word.ok_or_else(|| format!("missing {}", what))?;
    if let Some(&(_, id)) = names.iter().find(|(name, _)| *name == word) {
        return Ok(id);
    }
    word.parse()
        .map_err(|_| format!("invalid {} '{}'", what, word))
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Step>, String> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let step = match command {
        "hover" => {
            let (x, y, pressure) = position(&mut words)?;
            Step::Hover { x, y, pressure }
        }
        "contact" => {
            let (x, y, pressure) = position(&mut words)?;
            Step::Contact { x, y, pressure }
        }
        "button" => {
            let index = button_index(words.next())?;
            let pressed = match words.next() {
                Some("down") | Some("press") => true,
                Some("up") | Some("release") => false,
                other => return Err(format!("expected down/up, got {:?}", other)),
            };
            Step::Button { index, pressed }
        }
        "tool" => Step::Tool(words.next().ok_or("missing tool type")?.parse()?),
        "wait" => Step::Wait(number(words.next(), "wait time")?),
        "pointer" => Step::Query {
            device: ids::DEVICE_POINTER,
            id: named_id(
                words.next(),
                &[
                    ("x", ids::POINTER_X),
                    ("y", ids::POINTER_Y),
                    ("pressed", ids::POINTER_PRESSED),
                    ("count", ids::POINTER_COUNT),
                ],
                "pointer id",
            )?,
        },
        "query" => Step::Query {
            device: number(words.next(), "device")?,
            id: number(words.next(), "id")?,
        },
        "mouse" => Step::Mapped {
            device: ids::DEVICE_MOUSE,
            id: named_id(
                words.next(),
                &[
                    ("left", ids::MOUSE_LEFT),
                    ("right", ids::MOUSE_RIGHT),
                    ("middle", ids::MOUSE_MIDDLE),
                ],
                "mouse button",
            )?,
        },
        "lightgun" => Step::Mapped {
            device: ids::DEVICE_LIGHTGUN,
            id: named_id(
                words.next(),
                &[
                    ("trigger", ids::LIGHTGUN_TRIGGER),
                    ("reload", ids::LIGHTGUN_RELOAD),
                    ("cursor", ids::LIGHTGUN_CURSOR),
                ],
                "lightgun button",
            )?,
        },
        "mapped" => Step::Mapped {
            device: number(words.next(), "device")?,
            id: number(words.next(), "id")?,
        },
        "state" => Step::State,
        other => return Err(format!("unknown command '{}'", other)),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected '{}' after {}", extra, command));
    }
    Ok(Some(step))
}

/// Parse a whole script; errors carry the 1-based line number.
pub fn parse_script(source: &str) -> Result<Vec<Step>, String> {
    let mut steps = Vec::new();
    for (n, line) in source.lines().enumerate() {
        match parse_line(line) {
            Ok(Some(step)) => steps.push(step),
            Ok(None) => {}
            Err(e) => return Err(format!("line {}: {}", n + 1, e)),
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events() {
        assert_eq!(
            parse_line("hover 100 200.5 0.3").unwrap(),
            Some(Step::Hover {
                x: 100.0,
                y: 200.5,
                pressure: 0.3
            })
        );
        assert_eq!(
            parse_line("  contact -5 7  ").unwrap(),
            Some(Step::Contact {
                x: -5.0,
                y: 7.0,
                pressure: 0.0
            })
        );
        assert_eq!(
            parse_line("button barrel down").unwrap(),
            Some(Step::Button {
                index: 1,
                pressed: true
            })
        );
        assert_eq!(
            parse_line("button 40 up").unwrap(),
            Some(Step::Button {
                index: 40,
                pressed: false
            })
        );
        assert_eq!(parse_line("tool finger").unwrap(), Some(Step::Tool(ToolType::Finger)));
        assert_eq!(parse_line("wait 120").unwrap(), Some(Step::Wait(120)));
    }

    #[test]
    fn test_queries() {
        assert_eq!(
            parse_line("pointer pressed").unwrap(),
            Some(Step::Query { device: 6, id: 2 })
        );
        assert_eq!(parse_line("pointer 9").unwrap(), Some(Step::Query { device: 6, id: 9 }));
        assert_eq!(parse_line("query 1 4").unwrap(), Some(Step::Query { device: 1, id: 4 }));
        assert_eq!(parse_line("mouse right").unwrap(), Some(Step::Mapped { device: 1, id: 1 }));
        assert_eq!(
            parse_line("lightgun reload").unwrap(),
            Some(Step::Mapped { device: 6, id: 16 })
        );
        assert_eq!(parse_line("state").unwrap(), Some(Step::State));
    }

    #[test]
    fn test_comments_and_blanks() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   # just a note").unwrap(), None);
        assert_eq!(parse_line("wait 5 # settle").unwrap(), Some(Step::Wait(5)));
    }

    #[test]
    fn test_errors() {
        assert!(parse_line("hover 1").is_err());
        assert!(parse_line("hover a b").is_err());
        assert!(parse_line("button barrel sideways").is_err());
        assert!(parse_line("button grip down").is_err());
        assert!(parse_line("tool wand").is_err());
        assert!(parse_line("wait -3").is_err());
        assert!(parse_line("state now").is_err());
        assert!(parse_line("teleport").is_err());

        let err = parse_script("hover 1 1\n\nbogus").unwrap_err();
        assert!(err.starts_with("line 3:"), "{}", err);
    }
}
