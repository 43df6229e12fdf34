// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test double for the trigger hardware.

use crate::trigger::TriggerHw;
use std::vec::Vec;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum HwOp {
    Arm(u16),
    Disarm,
    Gate(bool),
    Spin(u32),
}

/// Records every hardware operation in order.
pub(crate) struct MockHw {
    pub log: Vec<HwOp>,
}

impl MockHw {
    pub fn new() -> Self {
        Self { log: Vec::new() }
    }

    /// All programmed tick counts, in order.
    pub fn armed_ticks(&self) -> Vec<u16> {
        self.log
            .iter()
            .filter_map(|op| match op {
                HwOp::Arm(ticks) => Some(*ticks),
                _ => None,
            })
            .collect()
    }
}

impl TriggerHw for MockHw {
    fn arm(&mut self, ticks: u16) {
        self.log.push(HwOp::Arm(ticks));
    }

    fn disarm(&mut self) {
        self.log.push(HwOp::Disarm);
    }

    fn gate(&mut self, on: bool) {
        self.log.push(HwOp::Gate(on));
    }

    fn spin(&mut self, us: u32) {
        self.log.push(HwOp::Spin(us));
    }
}

// vim: ts=4 sw=4 expandtab
