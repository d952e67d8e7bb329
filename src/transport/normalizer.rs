//! Conversion of upstream step and segment lists into [`PathStep`]s

use crate::backend::amap::types::{BusLine, Segment, Step, Stop};
use crate::transport::models::{PathStep, StepMode};
use crate::transport::polyline::{self, PolylineError};

/// Line names containing this are metro lines
pub const SUBWAY_MARKER: &str = "地铁";

pub fn is_subway_line(name: &str) -> bool {
    name.contains(SUBWAY_MARKER)
}

/// Remove the bold tags the directions API puts around road names
pub fn strip_markup(instruction: &str) -> String {
    instruction.replace("<b>", "").replace("</b>", "")
}

/// Normalize driving or walking steps, one [`PathStep`] per step
pub fn normalize_steps(steps: &[Step], mode: StepMode) -> Result<Vec<PathStep>, PolylineError> {
    steps
        .iter()
        .map(|step| {
            Ok(PathStep {
                mode,
                instruction: strip_markup(&step.instruction),
                coordinates: polyline::decode(&step.polyline)?,
            })
        })
        .collect()
}

/// Normalize transit segments in order, walking legs before bus legs
pub fn normalize_segments(segments: &[Segment]) -> Result<Vec<PathStep>, PolylineError> {
    let mut path = Vec::new();

    for segment in segments {
        if let Some(walking) = &segment.walking {
            let walked = walking.distance.as_deref().map_or(false, |d| d != "0");
            if walked {
                path.extend(normalize_steps(&walking.steps, StepMode::Walking)?);
            }
        }

        if let Some(bus) = &segment.bus {
            for line in &bus.buslines {
                path.push(busline_step(line)?);
            }
        }
    }

    Ok(path)
}

fn stop_name(stop: &Option<Stop>) -> &str {
    stop.as_ref().map_or("", |s| s.name.as_str())
}

fn busline_step(line: &BusLine) -> Result<PathStep, PolylineError> {
    let mode = if is_subway_line(&line.name) {
        StepMode::Subway
    } else {
        StepMode::Bus
    };

    Ok(PathStep {
        mode,
        instruction: format!(
            "乘坐{}，从{}到{}",
            line.name,
            stop_name(&line.departure_stop),
            stop_name(&line.arrival_stop)
        ),
        coordinates: polyline::decode(&line.polyline)?,
    })
}
