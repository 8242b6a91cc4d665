//! Drive a stylus engine from a parsed event script.

use std::io::{self, Write};

use spen_adapter::{InputQuery, ManualClock, StylusEngine};

use crate::script::Step;

/// Run `steps` against `engine`, writing one line per query to `out`.
/// `clock` must be the clock the engine was built with. Queries the engine
/// passes through are answered with `fallback_value`.
pub fn run(
    engine: &mut StylusEngine<ManualClock>,
    clock: &ManualClock,
    steps: &[Step],
    fallback_value: i16,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut input_api = |query: InputQuery| {
        log::debug!("fallback query {:?}", query);
        fallback_value
    };

    for step in steps {
        match *step {
            Step::Hover { x, y, pressure } => engine.on_hover(x, y, pressure),
            Step::Contact { x, y, pressure } => engine.on_contact(x, y, pressure),
            Step::Button { index, pressed } => engine.on_button(index, pressed),
            Step::Tool(tool_type) => engine.on_tool_type(tool_type),
            Step::Wait(ms) => clock.advance(ms),
            Step::Query { device, id } => {
                let value = engine.emit_pointer(Some(&mut input_api), InputQuery::new(0, device, 0, id));
                writeln!(out, "query device={} id={} -> {}", device, id, value)?;
            }
            Step::Mapped { device, id } => {
                let pressed = engine.mapped_button(device, id);
                writeln!(out, "mapped device={} id={} -> {}", device, id, pressed)?;
            }
            Step::State => {
                let s = engine.state();
                writeln!(
                    out,
                    "state x={} y={} pressure={} contact={} hover={} tool={} buttons={:#x} t={}ms",
                    s.x, s.y, s.pressure, s.contact, s.hover, s.tool_type, s.buttons, s.timestamp_ms
                )?;
            }
        }

        match engine.contact_edge() {
            Some(true) => log::info!("tip down at ({}, {})", engine.state().x, engine.state().y),
            Some(false) => log::info!("tip up at ({}, {})", engine.state().x, engine.state().y),
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_script;

    fn replay(source: &str, fallback_value: i16) -> String {
        let clock = ManualClock::new();
        let mut engine = StylusEngine::with_clock(clock.clone());
        let steps = parse_script(source).unwrap();
        let mut out = Vec::new();
        run(&mut engine, &clock, &steps, fallback_value, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_phantom_touch_window() {
        let out = replay(
            "hover 100 100 0.2\n\
             contact 104 103 0.6\n\
             query 1 0\n\
             hover 100 100 0.2\n\
             wait 20\n\
             query 1 0\n\
             wait 100\n\
             query 1 0\n",
            1,
        );
        // contact disarms, hover re-arms, expiry releases
        assert_eq!(
            out,
            "query device=1 id=0 -> 1\n\
             query device=1 id=0 -> 0\n\
             query device=1 id=0 -> 1\n"
        );
    }

    #[test]
    fn test_pointer_and_mapping() {
        let out = replay(
            "tool stylus\n\
             wait 3\n\
             contact 1000 2000 0.5\n\
             pointer x\n\
             pointer pressed\n\
             mouse left\n\
             button barrel down\n\
             mouse right\n\
             lightgun trigger\n\
             state\n",
            0,
        );
        assert_eq!(
            out,
            "query device=6 id=0 -> 1000\n\
             query device=6 id=2 -> 1\n\
             mapped device=1 id=0 -> true\n\
             mapped device=1 id=1 -> true\n\
             mapped device=6 id=2 -> false\n\
             state x=1000 y=2000 pressure=0.5 contact=true hover=false tool=stylus buttons=0x2 t=3ms\n"
        );
    }
}
