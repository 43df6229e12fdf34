// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]

mod exint;
mod hw;
mod mains;
mod mutex;
mod ports;
mod timer;
mod triac;
#[cfg(feature = "debug")]
mod uart;

use crate::{
    exint::ExInt,
    hw::{Mutex, Peripherals, interrupt, mcu},
    mutex::{MainCtx, unwrap_option},
    ports::PortD,
};
use core::cell::RefCell;
use phasectl_core::System;

/// The phase-control engine.
/// Only ever touched from the two interrupt handlers.
static SYSTEM: Mutex<RefCell<System>> = Mutex::new(RefCell::new(System::new()));

#[rustfmt::skip]
fn wdt_init(wp: &mcu::WDT) {
    // Enable the watchdog with a 32 ms timeout.
    // Timed sequence: WDCE+WDE first, then the final configuration
    // with WDE=1, WDP0=1.
    wp.wdtcsr().write(|w| w.set(0x18));
    wp.wdtcsr().write(|w| w.set(0x09));
}

fn wdt_poke(_wp: &mcu::WDT) {
    avr_device::asm::wdr();
}

#[avr_device::entry]
fn main() -> ! {
    let dp = unwrap_option(Peripherals::take());

    wdt_init(&dp.WDT);

    // # SAFETY
    //
    // This is the context handle for the main() function.
    // Holding a reference to this object proves that the holder
    // is running in main() context.
    let m = unsafe {
        MainCtx::new_with_init(|ctx| {
            ports::PORTD.init(ctx, PortD { PORTD: dp.PORTD });
            exint::EXINT.init(ctx, ExInt { EXINT: dp.EXINT });
            timer::DP.init(ctx, timer::Dp { TC0: dp.TC0, TC1: dp.TC1 });
            #[cfg(feature = "debug")]
            uart::DP.init(ctx, uart::Dp { USART0: dp.USART0 });
        })
    };

    ports::PORTD.deref(&m).setup();
    timer::timer_init(&m);
    exint::EXINT.deref(&m).setup();

    #[cfg(feature = "debug")]
    {
        uart::uart_init(&m);
        uart::tx_str(&m, concat!("phasectl ", env!("CARGO_PKG_VERSION"), "\r\n"));
    }

    // SAFETY: This must be after construction of MainCtx
    //         and after initialization of static MainInit variables.
    unsafe { interrupt::enable() };

    loop {
        wdt_poke(&dp.WDT);
    }
}

// vim: ts=4 sw=4 expandtab
