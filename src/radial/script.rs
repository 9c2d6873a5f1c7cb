//! Gesture scripts, e.g. `press:0 move:220,100 release`.

use super::{PointerEvent, RadialControl, WeightChange};
use crate::error::{RadarError, Result};
use crate::geometry::Point;
use crate::types::weights::Axis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScriptStep {
    Event(PointerEvent),
    PressAt(Point),
}

pub fn parse(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<ScriptStep> {
    let (verb, arg) = match token.split_once(':') {
        Some((verb, arg)) => (verb, Some(arg)),
        None => (token, None),
    };
    match (verb.to_ascii_lowercase().as_str(), arg) {
        ("press", Some(arg)) if arg.contains(',') => Ok(ScriptStep::PressAt(parse_point(arg)?)),
        ("press", Some(arg)) => {
            let axis = arg
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(Axis::from_index)
                .ok_or_else(|| RadarError::Validation(format!("unknown axis in '{token}'")))?;
            Ok(ScriptStep::Event(PointerEvent::Press(axis)))
        }
        ("move", Some(arg)) => Ok(ScriptStep::Event(PointerEvent::Move(parse_point(arg)?))),
        ("release", None) => Ok(ScriptStep::Event(PointerEvent::Release)),
        ("abandon", None) => Ok(ScriptStep::Event(PointerEvent::Abandon)),
        _ => Err(RadarError::Validation(format!(
            "unrecognized gesture step: '{token}'"
        ))),
    }
}

fn parse_point(arg: &str) -> Result<Point> {
    let invalid = || RadarError::Validation(format!("invalid point: '{arg}'"));
    let (x, y) = arg.split_once(',').ok_or_else(invalid)?;
    let x = x.trim().parse::<f64>().map_err(|_| invalid())?;
    let y = y.trim().parse::<f64>().map_err(|_| invalid())?;
    Ok(Point::new(x, y))
}

pub fn replay(control: &mut RadialControl, steps: &[ScriptStep]) -> Vec<WeightChange> {
    let mut changes = Vec::new();
    let mut rest = steps;
    while let Some((step, tail)) = rest.split_first() {
        rest = tail;
        let axis = match *step {
            ScriptStep::Event(PointerEvent::Press(axis)) => Some(axis),
            ScriptStep::PressAt(point) => control.hit_test(point),
            ScriptStep::Event(event) => {
                control.handle(event);
                None
            }
        };
        let Some(axis) = axis else {
            continue;
        };
        let Some(mut gesture) = control.gesture(axis) else {
            continue;
        };
        while let Some((step, tail)) = rest.split_first() {
            rest = tail;
            match *step {
                ScriptStep::Event(PointerEvent::Move(point)) => {
                    changes.extend(gesture.move_to(point));
                }
                ScriptStep::Event(PointerEvent::Release | PointerEvent::Abandon) => break,
                ScriptStep::Event(PointerEvent::Press(_)) | ScriptStep::PressAt(_) => {}
            }
        }
    }
    changes
}
