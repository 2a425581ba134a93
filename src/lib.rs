// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Instruction-execution core of a 6502-class CPU. The crate fetches opcodes
//! from a flat 64kB address space, resolves operands for the thirteen
//! addressing modes and executes the documented instruction set. Video,
//! audio, cartridge mapping and timing are left to whoever embeds the core.

extern crate byteorder;
extern crate chrono;
#[macro_use]
extern crate enum_primitive;
#[macro_use]
extern crate lazy_static;

pub mod io;
pub mod nes;
pub mod utils;

pub use nes::cpu::CPU;
pub use nes::error::Error;
pub use nes::memory::Memory;
pub use nes::RuntimeOptions;
