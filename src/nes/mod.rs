// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

pub mod addressing;
pub mod cpu;
pub mod error;
pub mod instruction;
pub mod memory;
pub mod opcode;
pub mod registers;

/// Options passed from the command-line that influence how the CPU and the
/// logger behave. Library users that don't care about logging can use the
/// default, which keeps everything quiet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuntimeOptions {
    // Print a timestamped trace line for every executed instruction.
    pub verbose: bool,
}
