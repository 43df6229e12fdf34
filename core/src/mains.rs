// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mains zero crossing detection and half-wave interval tracking.
//!
//! The vsense comparator produces two edges per half-wave: a falling
//! edge when the rectified voltage drops below the detection threshold
//! and a rising edge when it comes back up. The true zero crossing sits
//! roughly midway through the below-threshold dead zone between them.
//! Only the rising edge is used as the trigger reference, because it is
//! the most recent reliable marker before the conduction window.

use crate::{
    filter::Average,
    time::{RelStamp, Stamp},
};

/// Mains sine wave period (50 Hz).
pub const MAINS_PERIOD_US: u32 = 20_000;
/// Mains sine wave half-wave length.
pub const MAINS_HALFWAVE_US: u32 = MAINS_PERIOD_US / 2;

const MAINS_HALFWAVE: RelStamp = RelStamp::from_micros(MAINS_HALFWAVE_US as i32);

/// Direction of a vsense threshold transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeDir {
    /// The voltage has just risen above the detection threshold.
    Rising,
    /// The voltage has just dropped below the detection threshold.
    Falling,
}

/// Result of feeding one edge into the tracker.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ZcUpdate {
    /// Falling edge measured. Nothing to schedule.
    Measured,
    /// The gap since the opposite edge spans more than a half-wave:
    /// mains power was lost and has come back.
    PowerRestored,
    /// Rising edge after the dead zone. The new half-wave has begun.
    /// `since_us` estimates the time that already elapsed since the
    /// true zero crossing in the middle of the dead zone.
    ZeroCross { since_us: u32 },
}

pub struct Mains {
    last_rising: Stamp,
    last_falling: Stamp,
    avg_above: Average,
    avg_below: Average,
}

impl Mains {
    pub const fn new() -> Self {
        Self {
            last_rising: Stamp::new(),
            last_falling: Stamp::new(),
            avg_above: Average::new(),
            avg_below: Average::new(),
        }
    }

    /// Feed one vsense comparator transition.
    ///
    /// Exactly one of the two interval averages updates per edge.
    pub fn on_edge(&mut self, dir: EdgeDir, stamp: Stamp) -> ZcUpdate {
        match dir {
            EdgeDir::Rising => {
                let delta = stamp - self.last_falling;
                self.last_rising = stamp;

                if Self::halfwave_elapsed(delta) {
                    ZcUpdate::PowerRestored
                } else {
                    let below = self.avg_below.update(delta.as_micros());
                    ZcUpdate::ZeroCross {
                        since_us: ((below + 1) / 2) as u32,
                    }
                }
            }
            EdgeDir::Falling => {
                let delta = stamp - self.last_rising;
                self.last_falling = stamp;

                if Self::halfwave_elapsed(delta) {
                    ZcUpdate::PowerRestored
                } else {
                    self.avg_above.update(delta.as_micros());
                    ZcUpdate::Measured
                }
            }
        }
    }

    /// A full half-wave without the opposite edge means mains power is
    /// absent. Negative deltas are stamps that wrapped past the signed
    /// range and count as absent mains as well.
    fn halfwave_elapsed(delta: RelStamp) -> bool {
        delta < RelStamp::new() || delta > MAINS_HALFWAVE
    }

    /// Smoothed above-threshold interval length in microseconds.
    pub fn avg_above_us(&self) -> u32 {
        self.avg_above.get() as u32
    }

    /// Smoothed below-threshold (dead zone) interval length in microseconds.
    pub fn avg_below_us(&self) -> u32 {
        self.avg_below.get() as u32
    }
}


// vim: ts=4 sw=4 expandtab
