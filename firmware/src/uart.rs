// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    hw::mcu,
    mutex::{LazyMainInit, MainCtx},
};

const FCPU: u32 = 16_000_000;
const BAUD: u32 = 19_200;
const UBRR: u16 = (FCPU / (16 * BAUD) - 1) as u16;

#[allow(non_snake_case)]
pub struct Dp {
    pub USART0: mcu::USART0,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static DP: LazyMainInit<Dp> = unsafe { LazyMainInit::uninit() };

#[rustfmt::skip]
pub fn uart_init(m: &MainCtx) {
    let dp = DP.deref(m);

    // Transmit only. 8N1 is the hardware reset default.
    dp.USART0.ubrr0().write(|w| w.set(UBRR));
    dp.USART0.ucsr0b().write(|w| w.txen0().set_bit());
}

fn tx_byte(dp: &Dp, data: u8) {
    while dp.USART0.ucsr0a().read().udre0().bit_is_clear() {}
    dp.USART0.udr0().write(|w| w.set(data));
}

/// Blocking transmit. Only used during startup.
pub fn tx_str(m: &MainCtx, s: &str) {
    let dp = DP.deref(m);
    for b in s.bytes() {
        tx_byte(dp, b);
    }
}

// vim: ts=4 sw=4 expandtab
