// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic trigger holdoff ramp.
//!
//! Produces a slow triangle of holdoff delays, sweeping the motor speed
//! back and forth over its full range. This stands in for a real speed
//! command source such as a setpoint potentiometer.

use crate::mains::MAINS_HALFWAVE_US;

/// Hardware minimum conduction angle latency.
pub const RAMP_MIN_US: u32 = 200;
/// Upper holdoff bound. Leaves margin before the next zero crossing.
pub const RAMP_MAX_US: u32 = MAINS_HALFWAVE_US - 1000;
/// Per half-wave ramp increment.
const RAMP_STEP_US: i32 = 17;

/// Triangular holdoff delay generator.
///
/// A larger holdoff triggers the triac later in the half-wave, which
/// shortens conduction and slows the motor down.
pub struct Ramp {
    holdoff: i32,
    step: i32,
}

impl Ramp {
    pub const fn new() -> Self {
        Self {
            holdoff: MAINS_HALFWAVE_US as i32,
            step: -RAMP_STEP_US,
        }
    }

    /// Advance the ramp and return the next holdoff delay in microseconds.
    pub fn next(&mut self) -> u32 {
        let mut holdoff = self.holdoff + self.step;
        if holdoff <= RAMP_MIN_US as i32 {
            holdoff = RAMP_MIN_US as i32;
            self.step = -self.step;
        } else if holdoff >= RAMP_MAX_US as i32 {
            holdoff = RAMP_MAX_US as i32;
            self.step = -self.step;
        }
        self.holdoff = holdoff;
        holdoff as u32
    }

    /// Restart from minimum conduction after a mains interruption.
    ///
    /// The step is kept, so the ramp resumes from the slow end in
    /// whatever direction it was sweeping.
    pub fn soft_start(&mut self) {
        self.holdoff = MAINS_HALFWAVE_US as i32;
    }

    pub fn holdoff_us(&self) -> u32 {
        self.holdoff as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    #[test]
    fn clamps_at_the_upper_bound_and_turns_around() {
        let mut ramp = Ramp::new();
        // Starts above the upper bound, so the first two steps pin it there.
        assert_eq!(ramp.next(), 9000);
        assert_eq!(ramp.next(), 9000);
        assert_eq!(ramp.next(), 8983);
        assert_eq!(ramp.next(), 8966);
    }

    #[test]
    fn sweeps_the_full_range() {
        let mut ramp = Ramp::new();
        let values: Vec<u32> = (0..3000).map(|_| ramp.next()).collect();

        assert!(values.iter().all(|&v| (RAMP_MIN_US..=RAMP_MAX_US).contains(&v)));
        assert!(values.contains(&RAMP_MIN_US));
        assert!(values.contains(&RAMP_MAX_US));
    }

    #[test]
    fn soft_start_resets_holdoff_only() {
        let mut ramp = Ramp::new();
        for _ in 0..100 {
            ramp.next();
        }
        ramp.soft_start();
        assert_eq!(ramp.holdoff_us(), MAINS_HALFWAVE_US);

        // The next delay re-enters the range at the slow end.
        assert_eq!(ramp.next(), RAMP_MAX_US);
    }

    proptest! {
        #[test]
        fn holdoff_never_leaves_the_range(ops in proptest::collection::vec(any::<bool>(), 0..2000)) {
            let mut ramp = Ramp::new();
            for soft_start in ops {
                if soft_start {
                    ramp.soft_start();
                }
                let holdoff = ramp.next();
                prop_assert!((RAMP_MIN_US..=RAMP_MAX_US).contains(&holdoff));
            }
        }
    }
}

// vim: ts=4 sw=4 expandtab
