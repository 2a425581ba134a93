// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nes::memory::Memory;
use crate::nes::opcode::AddressingMode;
use crate::nes::registers::Registers;
use crate::utils::arithmetic;

/// Where an instruction reads its operand from and writes its result to.
/// Instructions with an implied operand get `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Accumulator,
    Memory(u16),
}

impl Operand {
    /// Reads the byte the operand refers to.
    #[inline(always)]
    pub fn read(&self, regs: &Registers, memory: &Memory) -> Option<u8> {
        match *self {
            Operand::None => None,
            Operand::Accumulator => Some(regs.a),
            Operand::Memory(addr) => Some(memory.read_u8(addr)),
        }
    }

    /// Writes a byte to wherever the operand refers to. Returns false when
    /// there is nowhere to write to.
    #[inline(always)]
    pub fn write(&self, regs: &mut Registers, memory: &mut Memory, value: u8) -> bool {
        match *self {
            Operand::None => return false,
            Operand::Accumulator => regs.a = value,
            Operand::Memory(addr) => memory.write_u8(addr, value),
        }
        true
    }

    /// Effective address of a memory operand. Jumps and branches use this
    /// rather than the byte stored there.
    #[inline(always)]
    pub fn address(&self) -> Option<u16> {
        match *self {
            Operand::Memory(addr) => Some(addr),
            _ => None,
        }
    }
}

/// Reads the byte at the program counter and steps past it.
#[inline(always)]
pub fn fetch_u8(regs: &mut Registers, memory: &Memory) -> u8 {
    let value = memory.read_u8(regs.pc);
    regs.pc = regs.pc.wrapping_add(1);
    value
}

/// Reads the little-endian word at the program counter and steps past it.
#[inline(always)]
pub fn fetch_u16(regs: &mut Registers, memory: &Memory) -> u16 {
    let value = memory.read_u16(regs.pc);
    regs.pc = regs.pc.wrapping_add(2);
    value
}

/// Consumes the operand bytes of an instruction and works out where its
/// operand lives. On return the program counter points at the next
/// instruction.
///
/// Zero page indexing stays inside the zero page, as does the pointer fetch of
/// both zero page indirect modes. Everything else wraps at 64kB.
pub fn resolve(mode: AddressingMode, regs: &mut Registers, memory: &Memory) -> Operand {
    match mode {
        AddressingMode::Implicit => Operand::None,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => {
            let addr = regs.pc;
            regs.pc = regs.pc.wrapping_add(1);
            Operand::Memory(addr)
        },
        AddressingMode::ZeroPage => {
            let addr = fetch_u8(regs, memory);
            Operand::Memory(addr as u16)
        },
        AddressingMode::ZeroPageX => {
            let addr = fetch_u8(regs, memory).wrapping_add(regs.x);
            Operand::Memory(addr as u16)
        },
        AddressingMode::ZeroPageY => {
            let addr = fetch_u8(regs, memory).wrapping_add(regs.y);
            Operand::Memory(addr as u16)
        },
        AddressingMode::Relative => {
            // The displacement counts from the byte after the branch.
            let displacement = fetch_u8(regs, memory) as i8;
            Operand::Memory(arithmetic::add_relative(regs.pc, displacement))
        },
        AddressingMode::Absolute => {
            Operand::Memory(fetch_u16(regs, memory))
        },
        AddressingMode::AbsoluteX => {
            let base = fetch_u16(regs, memory);
            Operand::Memory(base.wrapping_add(regs.x as u16))
        },
        AddressingMode::AbsoluteY => {
            let base = fetch_u16(regs, memory);
            Operand::Memory(base.wrapping_add(regs.y as u16))
        },
        AddressingMode::Indirect => {
            let pointer = fetch_u16(regs, memory);
            Operand::Memory(memory.read_u16(pointer))
        },
        AddressingMode::IndexedIndirect => {
            let pointer = fetch_u8(regs, memory).wrapping_add(regs.x);
            Operand::Memory(memory.read_u16_zero_page(pointer))
        },
        AddressingMode::IndirectIndexed => {
            let pointer = fetch_u8(regs, memory);
            let base = memory.read_u16_zero_page(pointer);
            Operand::Memory(base.wrapping_add(regs.y as u16))
        },
    }
}
