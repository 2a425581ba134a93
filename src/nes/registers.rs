// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::utils::arithmetic;

// Flag constants that allow easy bitwise getting and setting of flag values.
pub const CARRY_FLAG       : u8 = 0x1;
pub const ZERO_FLAG        : u8 = 0x2;
pub const INTERRUPT_DISABLE: u8 = 0x4;
pub const DECIMAL_MODE     : u8 = 0x8;
pub const BREAK_COMMAND    : u8 = 0x10;
pub const UNUSED_FLAG      : u8 = 0x20;
pub const OVERFLOW_FLAG    : u8 = 0x40;
pub const NEGATIVE_FLAG    : u8 = 0x80;

// Register values after power-on.
pub const POWER_ON_SP    : u8 = 0xFD;
pub const POWER_ON_STATUS: u8 = UNUSED_FLAG | INTERRUPT_DISABLE;

/// The Processor Status register contains a list of flags that are set and
/// cleared by instructions to record the results of operations. Each flag has
/// a special bit within the register (8 bits). Instructions exist to set,
/// clear, and read the various flags. One even allows pushing or pulling the
/// flags to the stack, which is why the whole byte is also available through
/// `bits` and `set_bits`. Both views share the same storage.
///
/// Carry Flag:
///
/// The carry flag is set if the last operation caused an overflow from bit 7
/// of the result or an underflow from bit 0. This condition is set during
/// arithmetic, comparison and during logical shifts.
///
/// Zero Flag:
///
/// The zero flag is set if the result of the last operation as was zero.
///
/// Interrupt Disable:
///
/// While this flag is set the processor will not respond to interrupts from
/// devices until it is cleared by a 'Clear Interrupt Disable' (CLI)
/// instruction.
///
/// Decimal Mode:
///
/// Exists so SED/CLD/PHP/PLP behave, but has no effect on arithmetic. The 2A03
/// has no binary-coded decimal circuitry.
///
/// Break Command:
///
/// The break command bit is set when a BRK instruction has been executed and
/// an interrupt has been generated to process it.
///
/// Overflow Flag:
///
/// The overflow flag is set during arithmetic operations if the result has
/// yielded an invalid 2's complement result (e.g. adding to positive numbers
/// and ending up with a negative result: 64 + 64 => -128).
///
/// Negative Flag:
///
/// The negative flag is set if the result of the last operation had bit 7 set
/// to a one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u8);

impl Status {
    pub fn new(bits: u8) -> Status {
        Status(bits)
    }

    /// Raw byte view used by PHP, PLP, BRK and RTI.
    #[inline(always)]
    pub fn bits(&self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn set_bits(&mut self, bits: u8) {
        self.0 = bits;
    }

    #[inline(always)]
    fn is_set(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }

    #[inline(always)]
    fn toggle(&mut self, flag: u8, value: bool) {
        if value {
            self.0 |= flag;
        } else {
            self.0 &= !flag;
        }
    }

    #[inline(always)]
    pub fn carry(&self) -> bool {
        self.is_set(CARRY_FLAG)
    }

    #[inline(always)]
    pub fn set_carry(&mut self, value: bool) {
        self.toggle(CARRY_FLAG, value);
    }

    #[inline(always)]
    pub fn zero(&self) -> bool {
        self.is_set(ZERO_FLAG)
    }

    #[inline(always)]
    pub fn set_zero(&mut self, value: bool) {
        self.toggle(ZERO_FLAG, value);
    }

    #[inline(always)]
    pub fn interrupt_disable(&self) -> bool {
        self.is_set(INTERRUPT_DISABLE)
    }

    #[inline(always)]
    pub fn set_interrupt_disable(&mut self, value: bool) {
        self.toggle(INTERRUPT_DISABLE, value);
    }

    #[inline(always)]
    pub fn decimal_mode(&self) -> bool {
        self.is_set(DECIMAL_MODE)
    }

    #[inline(always)]
    pub fn set_decimal_mode(&mut self, value: bool) {
        self.toggle(DECIMAL_MODE, value);
    }

    #[inline(always)]
    pub fn break_command(&self) -> bool {
        self.is_set(BREAK_COMMAND)
    }

    #[inline(always)]
    pub fn set_break_command(&mut self, value: bool) {
        self.toggle(BREAK_COMMAND, value);
    }

    #[inline(always)]
    pub fn overflow(&self) -> bool {
        self.is_set(OVERFLOW_FLAG)
    }

    #[inline(always)]
    pub fn set_overflow(&mut self, value: bool) {
        self.toggle(OVERFLOW_FLAG, value);
    }

    #[inline(always)]
    pub fn negative(&self) -> bool {
        self.is_set(NEGATIVE_FLAG)
    }

    #[inline(always)]
    pub fn set_negative(&mut self, value: bool) {
        self.toggle(NEGATIVE_FLAG, value);
    }
}

impl Default for Status {
    fn default() -> Status {
        Status(POWER_ON_STATUS)
    }
}

/// Register file of the 2A03. Much of the information in these comments is
/// due credit to www.obelisk.me.uk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    // The program counter is a 16-bit register which points to the next
    // instruction to be executed. The value of program counter is modified
    // automatically as instructions are executed.
    pub pc: u16,

    // The processor supports a 256 byte stack located between $0100 and $01FF.
    // The stack pointer is an 8-bit register and holds the next free location
    // on the stack. The location of the stack is fixed and cannot be moved and
    // grows downwards.
    pub sp: u8,

    // The 8-bit accumulator is used all arithmetic and logical operations (with
    // the exception of increments and decrements).
    pub a: u8,

    // The X register can be used to get a copy of the stack pointer or change
    // its value.
    pub x: u8,

    pub y: u8,

    pub p: Status,
}

impl Registers {
    pub fn new() -> Registers {
        Registers {
            pc: 0,
            sp: POWER_ON_SP,
            a: 0,
            x: 0,
            y: 0,
            p: Status::default(),
        }
    }

    /// Sets the zero and negative flags from a freshly produced value. Every
    /// instruction that loads or computes a register or memory value calls
    /// this; all other flags are left alone.
    #[inline(always)]
    pub fn set_default_flags(&mut self, value: u8) {
        self.p.set_zero(value == 0);
        self.p.set_negative(arithmetic::is_negative(value));
    }
}

impl Default for Registers {
    fn default() -> Registers {
        Registers::new()
    }
}
