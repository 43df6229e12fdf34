// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trigger pulse scheduling on the hardware countdown timer.

use crate::mains::MAINS_HALFWAVE_US;

/// Countdown granularity: 16 MHz with a 64x prescale.
pub const TIMER_TICK_US: u32 = 4;
/// Minimum programmed tick count. Guarantees that the compare match
/// fires even for near zero requested delays.
pub const MIN_TRIGGER_TICKS: u16 = 4;
/// Minimum gate pulse width the triac needs.
pub const GATE_PULSE_US: u32 = 40;
/// Requests later than this are dropped. They would race the next
/// zero crossing.
const SKIP_THRESHOLD_US: u32 = MAINS_HALFWAVE_US * 31 / 32;

/// The hardware needed to place a gate pulse: a one-shot countdown
/// timer and the gate output.
///
/// `gate(true)` means triggering. The electrical polarity at the gate
/// pin is the implementer's business.
pub trait TriggerHw {
    /// Program the countdown and start it.
    /// Fully rewrites any previous program.
    fn arm(&mut self, ticks: u16);
    /// Stop the countdown and clear its program.
    fn disarm(&mut self);
    /// Drive the gate output.
    fn gate(&mut self, on: bool);
    /// Bounded busy-wait.
    fn spin(&mut self, us: u32);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TriggerState {
    Idle,
    Armed,
}

/// One-shot gate pulse scheduler.
pub struct Trigger {
    state: TriggerState,
}

impl Trigger {
    pub const fn new() -> Self {
        Self {
            state: TriggerState::Idle,
        }
    }

    /// Arm the countdown to fire `delay_us` after the zero crossing
    /// that happened `since_us` ago.
    ///
    /// Returns whether a trigger was placed. A call while armed
    /// replaces the previous program.
    pub fn schedule<H: TriggerHw>(&mut self, hw: &mut H, since_us: u32, delay_us: u32) -> bool {
        if delay_us > SKIP_THRESHOLD_US {
            return false;
        }

        let ticks = delay_us
            .saturating_sub(since_us)
            .div_ceil(TIMER_TICK_US)
            .max(MIN_TRIGGER_TICKS as u32);
        hw.arm(ticks as u16);
        self.state = TriggerState::Armed;

        true
    }

    /// The countdown expired: emit the gate pulse.
    ///
    /// Runs inside the compare match interrupt, so the whole sequence
    /// is atomic with respect to this scheduler's state.
    pub fn fire<H: TriggerHw>(&mut self, hw: &mut H) {
        if self.state != TriggerState::Armed {
            // Stale compare match. Make sure the timer is down.
            hw.disarm();
            return;
        }

        hw.gate(true);
        hw.disarm();
        hw.spin(GATE_PULSE_US);
        hw.gate(false);

        self.state = TriggerState::Idle;
    }

    pub fn is_armed(&self) -> bool {
        self.state == TriggerState::Armed
    }
}


// vim: ts=4 sw=4 expandtab
