// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase-control engine for triac based AC motor speed control.
//!
//! The engine consumes the edge events of a mains voltage threshold
//! comparator, tracks the length of the above-threshold and
//! below-threshold intervals of each half-wave, and places a gate pulse
//! on the triac at a varying holdoff delay after each zero crossing.
//!
//! All hardware access goes through the [trigger::TriggerHw] trait, so
//! this crate is target independent and fully testable on the host.
//! The firmware crate provides the AVR implementation and calls the two
//! entry points of [system::System] from its interrupt handlers.

#![no_std]

#[cfg(test)]
extern crate std;

mod filter;
pub mod mains;
pub mod ramp;
pub mod system;
pub mod time;
pub mod trigger;

pub use crate::{
    mains::{EdgeDir, Mains, ZcUpdate},
    ramp::Ramp,
    system::System,
    time::{RelStamp, Stamp},
    trigger::{Trigger, TriggerHw},
};

#[cfg(test)]
mod testutil;

// vim: ts=4 sw=4 expandtab
