// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nes::opcode::{AddressingMode, Mnemonic};
use std::error;
use std::fmt;
use std::io;

/// Conditions that stop the CPU. None of these can be recovered from by the
/// CPU itself; the host decides whether to bail out or inspect the state.
#[derive(Debug)]
pub enum Error {
    // The byte at `pc` isn't a documented opcode. Either the program image is
    // corrupt or control flow went somewhere it shouldn't have.
    UnknownOpcode { opcode: u8, pc: u16 },

    // The opcode table paired a mnemonic with an addressing mode it can't use.
    MissingOperand { mnemonic: Mnemonic, mode: AddressingMode },

    // A reference trace disagreed with the emulator about CPU state.
    TraceMismatch { expected: String, actual: String },

    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnknownOpcode { opcode, pc } =>
                write!(f, "unknown opcode {:#04X} at {:#06X}", opcode, pc),
            Error::MissingOperand { mnemonic, mode } =>
                write!(f, "{} can't be used with {:?} addressing", mnemonic, mode),
            Error::TraceMismatch { ref expected, ref actual } =>
                write!(f, "mismatched CPU frames\n    expected: {}\n    actual:   {}",
                       expected, actual),
            Error::Io(ref err) => write!(f, "{}", err),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
