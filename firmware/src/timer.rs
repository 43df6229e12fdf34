// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    hw::{Mutex, mcu},
    mutex::{CriticalSection, IrqCtx, LazyMainInit, MainCtx},
};
use core::cell::Cell;
use phasectl_core::{RelStamp, Stamp, trigger::TIMER_TICK_US};

#[allow(non_snake_case)]
pub struct Dp {
    pub TC0: mcu::TC0,
    pub TC1: mcu::TC1,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static DP: LazyMainInit<Dp> = unsafe { LazyMainInit::uninit() };

/// Software extension of the 8 bit timebase counter.
/// One overflow spans 256 ticks.
static TIMEBASE_OVF: Mutex<Cell<u32>> = Mutex::new(Cell::new(0));

#[rustfmt::skip]
pub fn timer_init(m: &MainCtx) {
    let dp = DP.deref(m);

    // Timer 0 configuration: free running timebase.
    // CS: 64 -> 4 us per timer tick, 1024 us per overflow.
    dp.TC0.tccr0a().write(|w| w);
    dp.TC0.tcnt0().write(|w| w);
    dp.TC0.tifr0().write(|w| w.tov0().set_bit());
    dp.TC0.timsk0().write(|w| w.toie0().set_bit());
    dp.TC0.tccr0b().write(|w| w.cs0().prescale_64());

    // Timer 1 configuration: trigger countdown.
    // Stopped. Armed on demand with a full register rewrite.
    dp.TC1.tccr1a().write(|w| w);
    dp.TC1.tccr1b().write(|w| w);
    dp.TC1.tcnt1().write(|w| w);
    dp.TC1.timsk1().write(|w| w);
}

/// Timebase overflow interrupt.
pub fn irq_handler_timer0_ovf(c: &IrqCtx) {
    let ovf = TIMEBASE_OVF.borrow(c.cs());
    ovf.set(ovf.get().wrapping_add(1));
}

/// Read the monotonic microsecond timebase.
#[inline(never)]
pub fn now_cs(cs: CriticalSection<'_>) -> Stamp {
    let dp = DP.deref_cs(cs);

    let mut ovf = TIMEBASE_OVF.borrow(cs).get();
    let mut count = dp.TC0.tcnt0().read().bits();

    // Account for an overflow whose interrupt has not been serviced yet.
    if dp.TC0.tifr0().read().tov0().bit() {
        count = dp.TC0.tcnt0().read().bits();
        ovf = ovf.wrapping_add(1);
    }

    let ticks = (ovf << 8) | count as u32;
    Stamp::from_micros(ticks.wrapping_mul(TIMER_TICK_US))
}

/// Busy-wait for the given number of microseconds.
///
/// Only for short, bounded waits below the timebase overflow period.
pub fn spin_cs(cs: CriticalSection<'_>, us: u32) {
    let end = now_cs(cs) + RelStamp::from_micros(us as i32);
    while now_cs(cs) < end {}
}

/// Program the trigger countdown and start it.
#[rustfmt::skip]
pub fn trigger_arm_cs(cs: CriticalSection<'_>, ticks: u16) {
    let dp = DP.deref_cs(cs);

    dp.TC1.tccr1b().write(|w| w); // stop counting
    dp.TC1.tcnt1().write(|w| w);
    dp.TC1.ocr1a().write(|w| w.set(ticks));
    dp.TC1.tifr1().write(|w| w.ocf1a().set_bit());
    dp.TC1.timsk1().write(|w| w.ocie1a().set_bit());
    dp.TC1.tccr1b().write(|w| {
        w.wgm1().set(0x1) // CTC, TOP = OCR1A
         .cs1().prescale_64()
    });
}

/// Stop the trigger countdown and clear its program.
#[rustfmt::skip]
pub fn trigger_disarm_cs(cs: CriticalSection<'_>) {
    let dp = DP.deref_cs(cs);

    dp.TC1.tccr1b().write(|w| w); // stop counting, clear mode bits
    dp.TC1.timsk1().write(|w| w);
    dp.TC1.tifr1().write(|w| w.ocf1a().set_bit());
}

// vim: ts=4 sw=4 expandtab
