// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use byteorder::{ByteOrder, LittleEndian};
use crate::nes::registers::Registers;

// The whole 16-bit address space is backed by plain RAM. Memory mapped devices
// and mirroring are left to whoever embeds the CPU.
pub const MEMORY_SIZE: usize = 0x10000;

// Location of the first byte on the bottom of the stack. The stack lives on
// memory page 2 (0x100) and the stack pointer only ever indexes into it.
pub const STACK_OFFSET: u16 = 0x100;

// Where BRK fetches the address of the interrupt handler from (low byte first).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Flat 64kB address space of the CPU. Every 16-bit value is a valid address,
/// so reads and writes can never go out of bounds.
///
/// The backing buffer is boxed so a CPU can live on small stacks.
pub struct Memory {
    data: Box<[u8]>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            data: vec![0; MEMORY_SIZE].into_boxed_slice(),
        }
    }

    /// Reads an unsigned 8-bit byte value located at the given address.
    #[inline(always)]
    pub fn read_u8(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Writes an unsigned 8-bit byte value to the given address.
    #[inline(always)]
    pub fn write_u8(&mut self, addr: u16, val: u8) {
        self.data[addr as usize] = val;
    }

    /// Reads an unsigned 16-bit value starting at the given address
    /// (little-endian). The high byte wraps around to 0x0000 when the low byte
    /// sits at 0xFFFF.
    #[inline(always)]
    pub fn read_u16(&self, addr: u16) -> u16 {
        let buf = [self.read_u8(addr), self.read_u8(addr.wrapping_add(1))];
        LittleEndian::read_u16(&buf)
    }

    /// Reads an unsigned 16-bit pointer stored in the zero page. The high byte
    /// is fetched with 8-bit wraparound, so a pointer at 0xFF takes its high
    /// byte from 0x00 rather than escaping into page 1.
    #[inline(always)]
    pub fn read_u16_zero_page(&self, addr: u8) -> u16 {
        let buf = [
            self.read_u8(addr as u16),
            self.read_u8(addr.wrapping_add(1) as u16),
        ];
        LittleEndian::read_u16(&buf)
    }

    /// Writes an unsigned 16-bit value to the given address (little-endian).
    #[inline(always)]
    pub fn write_u16(&mut self, addr: u16, val: u16) {
        let mut buf = [0; 2];
        LittleEndian::write_u16(&mut buf, val);
        self.write_u8(addr, buf[0]);
        self.write_u8(addr.wrapping_add(1), buf[1]);
    }

    /// Dumps the contents of a slice starting at a given address. Writes past
    /// 0xFFFF continue at 0x0000.
    pub fn memdump(&mut self, addr: u16, buf: &[u8]) {
        let mut dest = addr;
        for byte in buf {
            self.write_u8(dest, *byte);
            dest = dest.wrapping_add(1);
        }
    }

    // Utility functions for managing the stack.

    /// Pushes an 8-bit number onto the stack.
    pub fn stack_push_u8(&mut self, regs: &mut Registers, value: u8) {
        self.write_u8(STACK_OFFSET | regs.sp as u16, value);
        regs.sp = regs.sp.wrapping_sub(1);
    }

    /// Pops an 8-bit number off the stack.
    pub fn stack_pop_u8(&mut self, regs: &mut Registers) -> u8 {
        regs.sp = regs.sp.wrapping_add(1);
        self.read_u8(STACK_OFFSET | regs.sp as u16)
    }

    /// Pushes a 16-bit number (usually an address) onto the stack. The high
    /// byte goes first so the value sits little-endian in memory.
    pub fn stack_push_u16(&mut self, regs: &mut Registers, value: u16) {
        self.stack_push_u8(regs, (value >> 8) as u8);
        self.stack_push_u8(regs, value as u8);
    }

    /// Pops a 16-bit number (usually an address) off the stack.
    pub fn stack_pop_u16(&mut self, regs: &mut Registers) -> u16 {
        let lo = self.stack_pop_u8(regs);
        let hi = self.stack_pop_u8(regs);
        LittleEndian::read_u16(&[lo, hi])
    }
}

impl Default for Memory {
    fn default() -> Memory {
        Memory::new()
    }
}
