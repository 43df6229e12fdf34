// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{hw::mcu, mutex::LazyMainInit};

#[allow(non_snake_case)]
pub struct ExInt {
    pub EXINT: mcu::EXINT,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static EXINT: LazyMainInit<ExInt> = unsafe { LazyMainInit::uninit() };

impl ExInt {
    pub fn setup(&self) {
        // INT0: interrupt on any logical change of the vsense pin.
        self.EXINT.eicra().write(|w| w.isc0().set(0x1));
        self.EXINT.eifr().write(|w| w.intf0().set_bit());
        self.EXINT.eimsk().write(|w| w.int0().set_bit());
    }
}

// vim: ts=4 sw=4 expandtab
