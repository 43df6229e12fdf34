// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{hw::mcu, mutex::LazyMainInit};

/// PD2 (INT0): mains vsense comparator input.
pub const PIN_VSENSE: usize = 2;
/// PD3: triac gate output, active low.
pub const PIN_GATE: usize = 3;
/// PD4: vsense mirror for external instrumentation.
#[allow(dead_code)]
pub const PIN_MIRROR: usize = 4;

#[rustfmt::skip]
macro_rules! impl_port {
    (
        $struct:ident,
        $name:ident,
        $port:ident,
        $pin:ident,
        $ddr:ident,
        $bit0:ident,
        $bit1:ident,
        $bit2:ident,
        $bit3:ident,
        $bit4:ident,
        $bit5:ident,
        $bit6:ident,
        $bit7:ident
    ) => {
        #[allow(non_snake_case)]
        pub struct $struct {
            pub $name: mcu::$name,
        }

        // SAFETY: Is initialized when constructing the MainCtx.
        pub static $name: LazyMainInit<$struct> = unsafe { LazyMainInit::uninit() };

        impl $struct {
            #[inline(always)]
            #[allow(dead_code)]
            pub fn get(&self, bit: usize) -> bool {
                match bit {
                    0 => self.$name.$pin().read().$bit0().bit(),
                    1 => self.$name.$pin().read().$bit1().bit(),
                    2 => self.$name.$pin().read().$bit2().bit(),
                    3 => self.$name.$pin().read().$bit3().bit(),
                    4 => self.$name.$pin().read().$bit4().bit(),
                    5 => self.$name.$pin().read().$bit5().bit(),
                    6 => self.$name.$pin().read().$bit6().bit(),
                    7 => self.$name.$pin().read().$bit7().bit(),
                    _ => unreachable!(),
                }
            }

            #[inline(always)]
            #[allow(dead_code)]
            pub fn set(&self, bit: usize, value: bool) {
                match bit {
                    0 => self.$name.$port().modify(|_, w| w.$bit0().bit(value)),
                    1 => self.$name.$port().modify(|_, w| w.$bit1().bit(value)),
                    2 => self.$name.$port().modify(|_, w| w.$bit2().bit(value)),
                    3 => self.$name.$port().modify(|_, w| w.$bit3().bit(value)),
                    4 => self.$name.$port().modify(|_, w| w.$bit4().bit(value)),
                    5 => self.$name.$port().modify(|_, w| w.$bit5().bit(value)),
                    6 => self.$name.$port().modify(|_, w| w.$bit6().bit(value)),
                    7 => self.$name.$port().modify(|_, w| w.$bit7().bit(value)),
                    _ => unreachable!(),
                };
            }
        }
    };
}

impl_port!(
    PortD, PORTD, portd, pind, ddrd, pd0, pd1, pd2, pd3, pd4, pd5, pd6, pd7
);

fn pin_input(_bit: usize) -> u8 {
    0
}
fn pin_output(bit: usize) -> u8 {
    1 << bit
}
fn pin_low(_bit: usize) -> u8 {
    0
}
fn pin_high(bit: usize) -> u8 {
    1 << bit
}
fn pin_floating(_bit: usize) -> u8 {
    0
}

impl PortD {
    pub fn setup(&self) {
        // SAFETY: Called with interrupts disabled during system startup.
        unsafe {
            self.PORTD.portd().write(|w| {
                w.set(
                    pin_floating(0) | // RXD
                    pin_high(1) | // TXD
                    pin_floating(2) | // vsense, INT0
                    pin_high(3) | // trig, active low
                    pin_low(4) | // vsense mirror
                    pin_low(5) | // DNC
                    pin_low(6) | // DNC
                    pin_low(7), // DNC
                )
            });
            self.PORTD.ddrd().write(|w| {
                w.set(
                    pin_input(0) | // RXD
                    pin_output(1) | // TXD
                    pin_input(2) | // vsense, INT0
                    pin_output(3) | // trig, active low
                    pin_output(4) | // vsense mirror
                    pin_output(5) | // DNC
                    pin_output(6) | // DNC
                    pin_output(7), // DNC
                )
            });
        }
    }
}

// vim: ts=4 sw=4 expandtab
