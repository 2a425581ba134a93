// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nes::error::Error;

// Exit codes used throughout the application. These exit codes has specific
// meanings and are used when no OS error codes are available.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1; // Generic error ¯\_(ツ)_/¯.
pub const EXIT_INVALID_IMAGE: i32 = 2; // Program image couldn't be read.
pub const EXIT_CPU_LOG_NOT_FOUND: i32 = 3;
pub const EXIT_INVALID_OPCODE: i32 = 4;
pub const EXIT_TRACE_MISMATCH: i32 = 5;
pub const EXIT_RUNTIME_FAILURE: i32 = 101;

/// Picks the exit code the emulator should stop with after a CPU error.
pub fn exit_code(err: &Error) -> i32 {
    match *err {
        Error::UnknownOpcode { .. } => EXIT_INVALID_OPCODE,
        Error::TraceMismatch { .. } => EXIT_TRACE_MISMATCH,
        Error::MissingOperand { .. } | Error::Io(_) => EXIT_RUNTIME_FAILURE,
    }
}
