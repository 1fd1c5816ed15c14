//! Knob interpolation across animation frames.
//!
//! Animation is prepared in two passes over the operation list before any
//! frame is drawn:
//!
//! 1. [`first_pass`] reads `frames` and `basename` and validates that every
//!    `vary` comes after a frame count.
//! 2. [`second_pass`] turns every `vary` ramp into a per-frame table of knob
//!    values.
//!
//! A ramp from `start_value` at `start_frame` to `end_value` at `end_frame`
//! sets, for each frame `k`:
//!
//! ```text
//! k == start_frame              → start_value
//! start_frame < k <= end_frame  → start_value + (k − start_frame) · delta
//! otherwise                     → unchanged (0 if no ramp ever touched it)
//! ```
//!
//! with `delta = (end_value − start_value) / (end_frame − start_frame)`.
//! Ramps are applied in script order, so where two ramps on the same knob
//! overlap the later one wins.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::script::Operation;

/// Basename used when a script animates without naming its frames.
pub const DEFAULT_BASENAME: &str = "frame";

/// Frame count and output name of an animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationSettings {
    pub num_frames: usize,
    pub basename: String,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            num_frames: 1,
            basename: DEFAULT_BASENAME.to_string(),
        }
    }
}

impl AnimationSettings {
    pub fn is_animated(&self) -> bool {
        self.num_frames > 1
    }
}

/// Find the frame count and basename, rejecting a `vary` that precedes any
/// `frames`.
pub fn first_pass(operations: &[Operation]) -> Result<AnimationSettings> {
    let mut settings = AnimationSettings::default();
    let mut frames_seen = false;
    let mut basename_seen = false;
    let mut vary_seen = false;

    for op in operations {
        match op {
            Operation::Frames(n) => {
                settings.num_frames = *n;
                frames_seen = true;
            }
            Operation::Basename(name) => {
                settings.basename = name.clone();
                basename_seen = true;
            }
            Operation::Vary { knob, .. } => {
                if !frames_seen {
                    return Err(Error::VaryWithoutFrames { knob: knob.clone() });
                }
                vary_seen = true;
            }
            _ => {}
        }
    }

    if uses_default_basename(&settings, vary_seen, basename_seen) {
        warn!(
            "animation code present but basename not set, using \"{}\" as basename",
            DEFAULT_BASENAME
        );
    }

    Ok(settings)
}

/// An animation that never named its frames falls back to
/// [`DEFAULT_BASENAME`].
fn uses_default_basename(
    settings: &AnimationSettings,
    vary_seen: bool,
    basename_seen: bool,
) -> bool {
    !basename_seen && (settings.is_animated() || vary_seen)
}

/// Knob values for every frame of an animation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameKnobs {
    frames: Vec<HashMap<String, f64>>,
}

impl FrameKnobs {
    /// A table of `num_frames` empty frames.
    pub fn new(num_frames: usize) -> Self {
        Self {
            frames: vec![HashMap::new(); num_frames],
        }
    }

    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Every knob a ramp assigned in frame `frame`.
    pub fn frame(&self, frame: usize) -> Option<&HashMap<String, f64>> {
        self.frames.get(frame)
    }

    pub fn value(&self, frame: usize, knob: &str) -> Option<f64> {
        self.frames.get(frame)?.get(knob).copied()
    }

    /// Apply one ramp to every frame.
    fn apply_ramp(
        &mut self,
        knob: &str,
        start_frame: usize,
        end_frame: usize,
        start_value: f64,
        end_value: f64,
    ) {
        let span = end_frame - start_frame;
        let delta = if span > 0 {
            (end_value - start_value) / span as f64
        } else {
            0.0
        };

        for (k, table) in self.frames.iter_mut().enumerate() {
            let value = table.entry(knob.to_string()).or_insert(0.0);
            if k == start_frame {
                *value = start_value;
            } else if k > start_frame && k <= end_frame {
                *value = start_value + (k - start_frame) as f64 * delta;
            }
            debug!("frame {k}: knob {knob} = {value}");
        }
    }
}

/// Resolve every `vary` into per-frame knob values.
pub fn second_pass(operations: &[Operation], num_frames: usize) -> Result<FrameKnobs> {
    let mut knobs = FrameKnobs::new(num_frames);

    for op in operations {
        if let Operation::Vary {
            knob,
            start_frame,
            end_frame,
            start_value,
            end_value,
        } = op
        {
            if end_frame < start_frame {
                return Err(Error::InvertedVary {
                    knob: knob.clone(),
                    start_frame: *start_frame,
                    end_frame: *end_frame,
                });
            }
            knobs.apply_ramp(knob, *start_frame, *end_frame, *start_value, *end_value);
        }
    }

    Ok(knobs)
}
