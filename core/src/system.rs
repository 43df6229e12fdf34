// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Top level engine tying the tracker, the ramp and the scheduler together.

use crate::{
    mains::{EdgeDir, Mains, ZcUpdate},
    ramp::Ramp,
    time::Stamp,
    trigger::{Trigger, TriggerHw},
};

/// The phase-control engine.
///
/// Owns all state that the interrupt handlers share. The two public
/// mutation entry points correspond to the two interrupt sources: the
/// vsense edge detector and the countdown compare match. Both run with
/// interrupts disabled, so no access can be torn by the other.
pub struct System {
    mains: Mains,
    ramp: Ramp,
    trigger: Trigger,
}

impl System {
    pub const fn new() -> Self {
        Self {
            mains: Mains::new(),
            ramp: Ramp::new(),
            trigger: Trigger::new(),
        }
    }

    /// A vsense threshold transition happened at `stamp`.
    ///
    /// A rising edge schedules the next gate pulse. An over long gap
    /// soft-starts the ramp instead, so the motor resumes from minimum
    /// conduction after a mains interruption.
    pub fn on_edge<H: TriggerHw>(&mut self, hw: &mut H, dir: EdgeDir, stamp: Stamp) {
        match self.mains.on_edge(dir, stamp) {
            ZcUpdate::Measured => (),
            ZcUpdate::PowerRestored => self.ramp.soft_start(),
            ZcUpdate::ZeroCross { since_us } => {
                let delay_us = self.ramp.next();
                self.trigger.schedule(hw, since_us, delay_us);
            }
        }
    }

    /// The trigger countdown expired.
    pub fn on_trigger_timeout<H: TriggerHw>(&mut self, hw: &mut H) {
        self.trigger.fire(hw);
    }

    pub fn mains(&self) -> &Mains {
        &self.mains
    }

    pub fn ramp(&self) -> &Ramp {
        &self.ramp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        mains::MAINS_HALFWAVE_US,
        testutil::{HwOp, MockHw},
        trigger::GATE_PULSE_US,
    };
    use std::vec::Vec;

    fn stamp(us: u32) -> Stamp {
        Stamp::from_micros(us)
    }

    /// Feed `cycles` ideal 50 Hz half-waves: rising edges every 10 ms,
    /// falling edges 9.6 ms after each rising edge.
    fn feed_ideal_mains<H: TriggerHw>(system: &mut System, hw: &mut H, t0: u32, cycles: u32) -> u32 {
        let mut t = t0;
        for _ in 0..cycles {
            system.on_edge(hw, EdgeDir::Rising, stamp(t));
            system.on_edge(hw, EdgeDir::Falling, stamp(t + 9600));
            t += 10_000;
        }
        t
    }

    #[test]
    fn ideal_mains_traces_the_triangular_ramp() {
        let mut system = System::new();
        let mut hw = MockHw::new();

        feed_ideal_mains(&mut system, &mut hw, 0, 2200);

        // One trigger per zero-cross cycle, none skipped.
        let ticks = hw.armed_ticks();
        assert_eq!(ticks.len(), 2200);

        assert_eq!(system.mains().avg_above_us(), 9600);
        assert_eq!(system.mains().avg_below_us(), 400);

        assert!(ticks.iter().all(|&t| (4..=2250).contains(&t)));

        // After convergence the zero-cross offset is a constant 200 us
        // and the tick counts trace the holdoff triangle: the slowest
        // point programs (9000 - 200) / 4 ticks, the fastest clamps at
        // the minimum tick count.
        let converged = &ticks[1100..];
        assert!(converged.iter().all(|&t| (4..=2200).contains(&t)));
        assert!(converged.contains(&2200));
        assert!(converged.contains(&4));
        assert!(
            converged
                .windows(2)
                .all(|w| (w[1] as i32 - w[0] as i32).abs() <= 5)
        );
    }

    #[test]
    fn mains_interruption_soft_starts_the_ramp() {
        let mut system = System::new();
        let mut hw = MockHw::new();

        let t = feed_ideal_mains(&mut system, &mut hw, 0, 100);
        assert_eq!(hw.armed_ticks().len(), 100);

        // 25 ms of darkness between the last falling edge and the next
        // rising edge.
        let t = t - 10_000 + 9600 + 25_000;
        system.on_edge(&mut hw, EdgeDir::Rising, stamp(t));

        // No trigger on the restoring edge, holdoff back at maximum.
        assert_eq!(hw.armed_ticks().len(), 100);
        assert_eq!(system.ramp().holdoff_us(), MAINS_HALFWAVE_US);

        // The following cycle triggers again, from the slow end.
        system.on_edge(&mut hw, EdgeDir::Falling, stamp(t + 9600));
        system.on_edge(&mut hw, EdgeDir::Rising, stamp(t + 10_000));

        let ticks = hw.armed_ticks();
        assert_eq!(ticks.len(), 101);
        let since_us = (system.mains().avg_below_us() + 1) / 2;
        let expected = (9000 - since_us).div_ceil(4) as u16;
        assert_eq!(*ticks.last().unwrap(), expected);
    }

    #[test]
    fn expiry_emits_one_bounded_gate_pulse() {
        let mut system = System::new();
        let mut hw = MockHw::new();

        feed_ideal_mains(&mut system, &mut hw, 0, 2);
        hw.log.clear();

        system.on_trigger_timeout(&mut hw);
        assert_eq!(
            hw.log,
            [
                HwOp::Gate(true),
                HwOp::Disarm,
                HwOp::Spin(GATE_PULSE_US),
                HwOp::Gate(false),
            ]
        );

        // A second expiry without a new arm must not pulse again.
        hw.log.clear();
        system.on_trigger_timeout(&mut hw);
        assert_eq!(hw.log, [HwOp::Disarm]);
    }

    #[test]
    fn falling_edges_never_schedule() {
        let mut system = System::new();
        let mut hw = MockHw::new();

        system.on_edge(&mut hw, EdgeDir::Rising, stamp(0));
        let arms_after_rising = hw.armed_ticks().len();
        system.on_edge(&mut hw, EdgeDir::Falling, stamp(9600));
        assert_eq!(hw.armed_ticks().len(), arms_after_rising);
    }

    #[test]
    fn holdoff_delays_stay_clamped_end_to_end() {
        let mut system = System::new();
        let mut hw = MockHw::new();

        feed_ideal_mains(&mut system, &mut hw, 0, 1500);

        // Reconstructed delays (ticks * 4 + 200 in the converged part)
        // never leave the configured holdoff window.
        let delays: Vec<u32> = hw.armed_ticks()[1100..]
            .iter()
            .map(|&t| t as u32 * 4 + 200)
            .collect();
        assert!(delays.iter().all(|&d| (200..=9004).contains(&d)));
    }
}

// vim: ts=4 sw=4 expandtab
