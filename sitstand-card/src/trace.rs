//! Height trace files for the simulator
//!
//! One sample per line: `<t_ms> <height> [moving]`, where `moving` is `on`
//! or `off`. Blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;

use crate::error::CardError;

/// One recorded sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSample {
    /// Milliseconds since the start of the trace
    pub at_ms: u64,
    /// Raw height reading
    pub height: f64,
    /// Motion sensor state, if recorded
    pub moving: Option<bool>,
}

/// Parse a trace
///
/// Timestamps must not go backwards.
pub fn parse_trace(input: &str) -> Result<Vec<TraceSample>, CardError> {
    let mut samples: Vec<TraceSample> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let err = |reason| CardError::Trace {
            line: line_no,
            reason,
        };

        let mut fields = line.split_whitespace();
        let at_ms = fields
            .next()
            .ok_or_else(|| err("missing timestamp"))?
            .parse::<u64>()
            .map_err(|_| err("invalid timestamp"))?;
        let height = fields
            .next()
            .ok_or_else(|| err("missing height"))?
            .parse::<f64>()
            .map_err(|_| err("invalid height"))?;
        let moving = match fields.next() {
            None => None,
            Some("on") => Some(true),
            Some("off") => Some(false),
            Some(_) => return Err(err("moving must be on or off")),
        };
        if fields.next().is_some() {
            return Err(err("unexpected trailing field"));
        }

        if samples.last().is_some_and(|prev| at_ms < prev.at_ms) {
            return Err(err("timestamp goes backwards"));
        }

        samples.push(TraceSample {
            at_ms,
            height,
            moving,
        });
    }

    Ok(samples)
}

/// Load a trace from disk
pub fn load_trace(path: &Path) -> Result<Vec<TraceSample>, CardError> {
    let input = fs::read_to_string(path).map_err(|source| CardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_trace(&input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trace() {
        let samples = parse_trace(
            "# rising to stand\n\
             0 78.0\n\
             \n\
             500 85.5 on\n\
             1000 92.0 off # settling\n",
        )
        .unwrap();

        assert_eq!(samples.len(), 3);
        assert_eq!(
            samples[0],
            TraceSample {
                at_ms: 0,
                height: 78.0,
                moving: None
            }
        );
        assert_eq!(samples[1].moving, Some(true));
        assert_eq!(samples[2].moving, Some(false));
        assert_eq!(samples[2].height, 92.0);
    }

    #[test]
    fn test_rejects_bad_lines() {
        let err = parse_trace("0 78\nabc 80\n").unwrap_err();
        assert!(matches!(err, CardError::Trace { line: 2, .. }));

        let err = parse_trace("0\n").unwrap_err();
        assert!(matches!(err, CardError::Trace { line: 1, .. }));

        let err = parse_trace("0 78 maybe\n").unwrap_err();
        assert!(matches!(err, CardError::Trace { line: 1, .. }));
    }

    #[test]
    fn test_rejects_time_travel() {
        let err = parse_trace("100 78\n50 80\n").unwrap_err();
        assert!(matches!(
            err,
            CardError::Trace {
                line: 2,
                reason: "timestamp goes backwards"
            }
        ));
    }
}
