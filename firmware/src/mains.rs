// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    mutex::IrqCtx,
    ports::{self, PIN_VSENSE},
    timer,
    triac::TriacHw,
};
use phasectl_core::EdgeDir;

/// Mains vsense edge interrupt.
///
/// Fires on every transition of the vsense threshold comparator:
/// rising when the mains voltage comes up above the detection
/// threshold, falling when it drops below it.
pub fn irq_handler_int0(c: &IrqCtx) {
    let cs = c.cs();

    let now = timer::now_cs(cs);
    let portd = ports::PORTD.deref_cs(cs);

    let vsense = portd.get(PIN_VSENSE);
    #[cfg(feature = "debug")]
    portd.set(ports::PIN_MIRROR, vsense);

    let dir = if vsense {
        EdgeDir::Rising
    } else {
        EdgeDir::Falling
    };

    let mut hw = TriacHw::new(cs);
    crate::SYSTEM.borrow(cs).borrow_mut().on_edge(&mut hw, dir, now);
}

// vim: ts=4 sw=4 expandtab
