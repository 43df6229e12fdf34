// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    mutex::{CriticalSection, IrqCtx},
    ports::{self, PIN_GATE},
    timer,
};
use phasectl_core::TriggerHw;

/// The trigger hardware: the timer 1 countdown and the gate pin.
pub struct TriacHw<'cs> {
    cs: CriticalSection<'cs>,
}

impl<'cs> TriacHw<'cs> {
    pub fn new(cs: CriticalSection<'cs>) -> Self {
        Self { cs }
    }
}

impl TriggerHw for TriacHw<'_> {
    fn arm(&mut self, ticks: u16) {
        timer::trigger_arm_cs(self.cs, ticks);
    }

    fn disarm(&mut self) {
        timer::trigger_disarm_cs(self.cs);
    }

    fn gate(&mut self, on: bool) {
        let gate = !on; // negative logic at the triac gate.
        ports::PORTD.deref_cs(self.cs).set(PIN_GATE, gate);
    }

    fn spin(&mut self, us: u32) {
        timer::spin_cs(self.cs, us);
    }
}

/// Trigger countdown compare match interrupt.
pub fn irq_handler_timer1_compa(c: &IrqCtx) {
    let cs = c.cs();
    let mut hw = TriacHw::new(cs);
    crate::SYSTEM.borrow(cs).borrow_mut().on_trigger_timeout(&mut hw);
}

// vim: ts=4 sw=4 expandtab
