// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::nes::addressing::{self, Operand};
use crate::nes::error::Error;
use crate::nes::memory::{Memory, IRQ_VECTOR};
use crate::nes::opcode::{self, AddressingMode, InstructionInfo, Mnemonic};
use crate::nes::registers::Registers;
use crate::utils::arithmetic;

/// All 6502 instructions are a maximum size of 3 bytes. The first byte is the
/// opcode which determines the action of the instruction. The following 2
/// bytes are the arguments and are present depending on the addressing mode.
///
/// An instruction is decoded right before it runs and thrown away afterwards,
/// so the operand it carries always refers to the current machine state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    // Address the opcode was fetched from.
    pub addr: u16,
    pub info: InstructionInfo,
    pub operand: Operand,
    bytes: [u8; 3],
}

impl Instruction {
    /// Fetches the opcode at the program counter, looks it up and resolves its
    /// operand. The program counter ends up at the following instruction.
    pub fn decode(regs: &mut Registers, memory: &Memory) -> Result<Instruction, Error> {
        let addr = regs.pc;
        let byte = addressing::fetch_u8(regs, memory);
        let info = match opcode::lookup(byte) {
            Some(info) => info,
            None => return Err(Error::UnknownOpcode { opcode: byte, pc: addr }),
        };

        // Keep a copy of the raw bytes around for disassembly and tracing.
        let mut bytes = [byte, 0, 0];
        for i in 1..info.len() as usize {
            bytes[i] = memory.read_u8(addr.wrapping_add(i as u16));
        }

        let operand = addressing::resolve(info.mode, regs, memory);

        Ok(Instruction {
            addr: addr,
            info: info,
            operand: operand,
            bytes: bytes,
        })
    }

    #[inline(always)]
    pub fn mnemonic(&self) -> Mnemonic {
        self.info.mnemonic
    }

    #[inline(always)]
    pub fn mode(&self) -> AddressingMode {
        self.info.mode
    }

    /// Raw bytes of the instruction, opcode first.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..self.info.len() as usize]
    }

    /// Renders the instruction in assembler syntax. Branch targets are shown
    /// as absolute addresses.
    pub fn disassemble(&self) -> String {
        let lo = self.bytes[1];
        let word = (self.bytes[2] as u16) << 8 | lo as u16;
        let mnemonic = self.mnemonic();

        match self.mode() {
            AddressingMode::Implicit        => format!("{}", mnemonic),
            AddressingMode::Accumulator     => format!("{} A", mnemonic),
            AddressingMode::Immediate       => format!("{} #${:02X}", mnemonic, lo),
            AddressingMode::ZeroPage        => format!("{} ${:02X}", mnemonic, lo),
            AddressingMode::ZeroPageX       => format!("{} ${:02X},X", mnemonic, lo),
            AddressingMode::ZeroPageY       => format!("{} ${:02X},Y", mnemonic, lo),
            AddressingMode::Relative        => {
                let target = arithmetic::add_relative(self.addr.wrapping_add(2), lo as i8);
                format!("{} ${:04X}", mnemonic, target)
            },
            AddressingMode::Absolute        => format!("{} ${:04X}", mnemonic, word),
            AddressingMode::AbsoluteX       => format!("{} ${:04X},X", mnemonic, word),
            AddressingMode::AbsoluteY       => format!("{} ${:04X},Y", mnemonic, word),
            AddressingMode::Indirect        => format!("{} (${:04X})", mnemonic, word),
            AddressingMode::IndexedIndirect => format!("{} (${:02X},X)", mnemonic, lo),
            AddressingMode::IndirectIndexed => format!("{} (${:02X}),Y", mnemonic, lo),
        }
    }

    /// Executes the instruction against the register file and memory. The
    /// program counter is expected to already point past the instruction.
    pub fn execute(&self, regs: &mut Registers, memory: &mut Memory) -> Result<(), Error> {
        use crate::nes::opcode::Mnemonic::*;

        match self.mnemonic() {
            // Load/store operations.
            LDA => {
                regs.a = self.load(regs, memory)?;
                regs.set_default_flags(regs.a);
            },
            LDX => {
                regs.x = self.load(regs, memory)?;
                regs.set_default_flags(regs.x);
            },
            LDY => {
                regs.y = self.load(regs, memory)?;
                regs.set_default_flags(regs.y);
            },
            STA => {
                let value = regs.a;
                self.store(regs, memory, value)?;
            },
            STX => {
                let value = regs.x;
                self.store(regs, memory, value)?;
            },
            STY => {
                let value = regs.y;
                self.store(regs, memory, value)?;
            },

            // Register transfers. TXS is the only one that leaves the flags
            // alone.
            TAX => {
                regs.x = regs.a;
                regs.set_default_flags(regs.x);
            },
            TAY => {
                regs.y = regs.a;
                regs.set_default_flags(regs.y);
            },
            TXA => {
                regs.a = regs.x;
                regs.set_default_flags(regs.a);
            },
            TYA => {
                regs.a = regs.y;
                regs.set_default_flags(regs.a);
            },
            TSX => {
                regs.x = regs.sp;
                regs.set_default_flags(regs.x);
            },
            TXS => regs.sp = regs.x,

            // Stack operations.
            PHA => {
                let value = regs.a;
                memory.stack_push_u8(regs, value);
            },
            PHP => {
                let value = regs.p.bits();
                memory.stack_push_u8(regs, value);
            },
            PLA => {
                regs.a = memory.stack_pop_u8(regs);
                regs.set_default_flags(regs.a);
            },
            PLP => {
                let value = memory.stack_pop_u8(regs);
                regs.p.set_bits(value);
            },

            // Logical operations.
            AND => {
                let operand = self.load(regs, memory)?;
                regs.a &= operand;
                regs.set_default_flags(regs.a);
            },
            EOR => {
                let operand = self.load(regs, memory)?;
                regs.a ^= operand;
                regs.set_default_flags(regs.a);
            },
            ORA => {
                let operand = self.load(regs, memory)?;
                regs.a |= operand;
                regs.set_default_flags(regs.a);
            },
            BIT => {
                let operand = self.load(regs, memory)?;
                regs.set_default_flags(regs.a & operand);
                regs.p.set_overflow(operand & 0x40 != 0);
            },

            // Arithmetic operations. Subtraction is addition of the ones'
            // complement, the borrow being the inverted carry.
            ADC => {
                let operand = self.load(regs, memory)?;
                add_with_carry(regs, operand);
            },
            SBC => {
                let operand = self.load(regs, memory)?;
                add_with_carry(regs, !operand);
            },
            CMP => {
                let operand = self.load(regs, memory)?;
                let register = regs.a;
                compare(regs, register, operand);
            },
            CPX => {
                let operand = self.load(regs, memory)?;
                let register = regs.x;
                compare(regs, register, operand);
            },
            CPY => {
                let operand = self.load(regs, memory)?;
                let register = regs.y;
                compare(regs, register, operand);
            },

            // Increments and decrements.
            INC => self.modify(regs, memory, |_, value| value.wrapping_add(1))?,
            DEC => self.modify(regs, memory, |_, value| value.wrapping_sub(1))?,
            INX => {
                regs.x = regs.x.wrapping_add(1);
                regs.set_default_flags(regs.x);
            },
            INY => {
                regs.y = regs.y.wrapping_add(1);
                regs.set_default_flags(regs.y);
            },
            DEX => {
                regs.x = regs.x.wrapping_sub(1);
                regs.set_default_flags(regs.x);
            },
            DEY => {
                regs.y = regs.y.wrapping_sub(1);
                regs.set_default_flags(regs.y);
            },

            // Shifts.
            ASL => self.modify(regs, memory, |regs, value| {
                regs.p.set_carry(arithmetic::is_negative(value));
                value << 1
            })?,
            LSR => self.modify(regs, memory, |regs, value| {
                regs.p.set_carry(value & 0x1 != 0);
                value >> 1
            })?,
            ROL => self.modify(regs, memory, |regs, value| {
                let carry_in = regs.p.carry() as u8;
                regs.p.set_carry(arithmetic::is_negative(value));
                value << 1 | carry_in
            })?,
            ROR => self.modify(regs, memory, |regs, value| {
                let carry_in = regs.p.carry() as u8;
                regs.p.set_carry(value & 0x1 != 0);
                value >> 1 | carry_in << 7
            })?,

            // Jumps and calls. JSR pushes the address of its own last byte,
            // which is why RTS adds one to what it pops.
            JMP => regs.pc = self.target()?,
            JSR => {
                let target = self.target()?;
                let ret = regs.pc.wrapping_sub(1);
                memory.stack_push_u16(regs, ret);
                regs.pc = target;
            },
            RTS => {
                regs.pc = memory.stack_pop_u16(regs).wrapping_add(1);
            },

            // Branches. The offset byte has already been consumed, so a branch
            // that isn't taken simply falls through.
            BCC | BCS | BEQ | BMI | BNE | BPL | BVC | BVS => {
                let condition = match self.mnemonic() {
                    BCC => !regs.p.carry(),
                    BCS => regs.p.carry(),
                    BEQ => regs.p.zero(),
                    BMI => regs.p.negative(),
                    BNE => !regs.p.zero(),
                    BPL => !regs.p.negative(),
                    BVC => !regs.p.overflow(),
                    _ => regs.p.overflow(),
                };
                self.branch(regs, condition)?;
            },

            // Status flag changes.
            CLC => regs.p.set_carry(false),
            CLD => regs.p.set_decimal_mode(false),
            CLI => regs.p.set_interrupt_disable(false),
            CLV => regs.p.set_overflow(false),
            SEC => regs.p.set_carry(true),
            SED => regs.p.set_decimal_mode(true),
            SEI => regs.p.set_interrupt_disable(true),

            // System functions.
            BRK => {
                regs.p.set_break_command(true);
                let pc = regs.pc;
                memory.stack_push_u16(regs, pc);
                let status = regs.p.bits();
                memory.stack_push_u8(regs, status);
                regs.pc = memory.read_u16(IRQ_VECTOR);
            },
            NOP => {},
            RTI => {
                let status = memory.stack_pop_u8(regs);
                regs.p.set_bits(status);
                regs.p.set_break_command(false);
                regs.pc = memory.stack_pop_u16(regs).wrapping_add(1);
            },
        }

        Ok(())
    }

    fn missing_operand(&self) -> Error {
        Error::MissingOperand {
            mnemonic: self.mnemonic(),
            mode: self.mode(),
        }
    }

    /// Reads the operand byte.
    #[inline(always)]
    fn load(&self, regs: &Registers, memory: &Memory) -> Result<u8, Error> {
        self.operand.read(regs, memory).ok_or_else(|| self.missing_operand())
    }

    /// Writes a byte back through the operand.
    #[inline(always)]
    fn store(&self, regs: &mut Registers, memory: &mut Memory, value: u8) -> Result<(), Error> {
        if self.operand.write(regs, memory, value) {
            Ok(())
        } else {
            Err(self.missing_operand())
        }
    }

    /// Effective address of the operand, for jumps and branches.
    #[inline(always)]
    fn target(&self) -> Result<u16, Error> {
        self.operand.address().ok_or_else(|| self.missing_operand())
    }

    /// Read-modify-write helper shared by increments, decrements and shifts.
    /// The closure may change the carry flag; zero and negative are set from
    /// the value it returns.
    fn modify<F>(&self, regs: &mut Registers, memory: &mut Memory, f: F) -> Result<(), Error>
        where F: FnOnce(&mut Registers, u8) -> u8
    {
        let value = self.load(regs, memory)?;
        let result = f(regs, value);
        self.store(regs, memory, result)?;
        regs.set_default_flags(result);
        Ok(())
    }

    fn branch(&self, regs: &mut Registers, condition: bool) -> Result<(), Error> {
        let target = self.target()?;
        if condition {
            regs.pc = target;
        }
        Ok(())
    }
}

/// Adds the operand and the carry to the accumulator. Decimal mode is ignored.
fn add_with_carry(regs: &mut Registers, operand: u8) {
    let result = regs.a as u16 + operand as u16 + regs.p.carry() as u16;
    regs.p.set_carry(result & 0x100 != 0);
    regs.p.set_overflow(arithmetic::signed_overflow(regs.a, operand, result as u8));
    regs.a = result as u8;
    regs.set_default_flags(regs.a);
}

fn compare(regs: &mut Registers, register: u8, operand: u8) {
    regs.set_default_flags(register.wrapping_sub(operand));
    regs.p.set_carry(register >= operand);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nes::registers::{BREAK_COMMAND, CARRY_FLAG, NEGATIVE_FLAG, UNUSED_FLAG};

    const ORIGIN: u16 = 0x0600;

    fn setup(program: &[u8]) -> (Registers, Memory) {
        let mut regs = Registers::new();
        let mut memory = Memory::new();
        regs.pc = ORIGIN;
        memory.memdump(ORIGIN, program);
        (regs, memory)
    }

    fn step(regs: &mut Registers, memory: &mut Memory) -> Instruction {
        let instr = Instruction::decode(regs, memory).unwrap();
        instr.execute(regs, memory).unwrap();
        instr
    }

    fn run(program: &[u8], steps: usize) -> (Registers, Memory) {
        let (mut regs, mut memory) = setup(program);
        for _ in 0..steps {
            step(&mut regs, &mut memory);
        }
        (regs, memory)
    }

    fn adc(a: u8, operand: u8, carry: bool) -> Registers {
        let (mut regs, mut memory) = setup(&[0x69, operand]);
        regs.a = a;
        regs.p.set_carry(carry);
        step(&mut regs, &mut memory);
        regs
    }

    fn sbc(a: u8, operand: u8, carry: bool) -> Registers {
        let (mut regs, mut memory) = setup(&[0xE9, operand]);
        regs.a = a;
        regs.p.set_carry(carry);
        step(&mut regs, &mut memory);
        regs
    }

    #[test]
    fn decode_rejects_illegal_opcode() {
        let (mut regs, memory) = setup(&[0x02]);
        match Instruction::decode(&mut regs, &memory) {
            Err(Error::UnknownOpcode { opcode, pc }) => {
                assert_eq!(opcode, 0x02);
                assert_eq!(pc, ORIGIN);
            },
            other => panic!("expected unknown opcode, got {:?}", other),
        }
    }

    #[test]
    fn decode_keeps_raw_bytes() {
        let (mut regs, memory) = setup(&[0x8D, 0x00, 0x02]);
        let instr = Instruction::decode(&mut regs, &memory).unwrap();
        assert_eq!(instr.bytes(), &[0x8D, 0x00, 0x02]);
        assert_eq!(instr.mnemonic(), Mnemonic::STA);
        assert_eq!(instr.operand, Operand::Memory(0x0200));
        assert_eq!(regs.pc, ORIGIN + 3);
    }

    #[test]
    fn executor_reports_missing_operand() {
        let (mut regs, mut memory) = setup(&[]);
        let instr = Instruction {
            addr: ORIGIN,
            info: opcode::lookup(0xA9).unwrap(),
            operand: Operand::None,
            bytes: [0xA9, 0, 0],
        };
        match instr.execute(&mut regs, &mut memory) {
            Err(Error::MissingOperand { mnemonic, .. }) => assert_eq!(mnemonic, Mnemonic::LDA),
            other => panic!("expected missing operand, got {:?}", other),
        }
    }

    #[test]
    fn disassembly() {
        let cases: &[(&[u8], &str)] = &[
            (&[0xAA], "TAX"),
            (&[0x0A], "ASL A"),
            (&[0xA9, 0x05], "LDA #$05"),
            (&[0xA5, 0x44], "LDA $44"),
            (&[0xB5, 0x44], "LDA $44,X"),
            (&[0xB6, 0x44], "LDX $44,Y"),
            (&[0xD0, 0xFE], "BNE $0600"),
            (&[0x8D, 0x34, 0x12], "STA $1234"),
            (&[0x9D, 0x34, 0x12], "STA $1234,X"),
            (&[0x99, 0x34, 0x12], "STA $1234,Y"),
            (&[0x6C, 0xFC, 0xFF], "JMP ($FFFC)"),
            (&[0xA1, 0x20], "LDA ($20,X)"),
            (&[0xB1, 0x20], "LDA ($20),Y"),
        ];

        for &(program, expected) in cases {
            let (mut regs, memory) = setup(program);
            let instr = Instruction::decode(&mut regs, &memory).unwrap();
            assert_eq!(instr.disassemble(), expected);
        }
    }

    #[test]
    fn loads_set_flags_stores_do_not() {
        let (regs, memory) = run(&[0xA9, 0x00, 0x85, 0x10, 0xA2, 0x80, 0xA0, 0x01], 2);
        assert_eq!(regs.a, 0);
        assert!(regs.p.zero());
        assert_eq!(memory.read_u8(0x10), 0);

        let (regs, _) = run(&[0xA9, 0x00, 0xA2, 0x80], 2);
        assert_eq!(regs.x, 0x80);
        assert!(regs.p.negative());
        assert!(!regs.p.zero());

        // STX after LDY #1 keeps the flags LDY produced.
        let (regs, memory) = run(&[0xA2, 0x00, 0xA0, 0x01, 0x86, 0x20], 3);
        assert!(!regs.p.zero());
        assert_eq!(memory.read_u8(0x20), 0);
    }

    #[test]
    fn transfers() {
        let (regs, _) = run(&[0xA9, 0x80, 0xAA, 0xA8], 3);
        assert_eq!(regs.x, 0x80);
        assert_eq!(regs.y, 0x80);
        assert!(regs.p.negative());

        let (regs, _) = run(&[0xA2, 0x00, 0x9A], 2);
        assert_eq!(regs.sp, 0x00);
        assert!(regs.p.zero());

        // TXS leaves the flags alone.
        let (regs, _) = run(&[0xA2, 0x00, 0xA9, 0x01, 0x9A], 3);
        assert_eq!(regs.sp, 0x00);
        assert!(!regs.p.zero());

        let (regs, _) = run(&[0xBA], 1);
        assert_eq!(regs.x, 0xFD);
        assert!(regs.p.negative());

        let (regs, _) = run(&[0xA0, 0x07, 0x98, 0xA2, 0x00, 0x8A], 2);
        assert_eq!(regs.a, 0x07);
    }

    #[test]
    fn stack_push_and_pull() {
        let (regs, memory) = run(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68], 4);
        assert_eq!(regs.a, 0x42);
        assert!(!regs.p.zero());
        assert_eq!(regs.sp, 0xFD);
        assert_eq!(memory.read_u8(0x01FD), 0x42);
    }

    #[test]
    fn php_plp_move_the_whole_status_byte() {
        let (regs, memory) = run(&[0x38, 0x08, 0x18, 0x28], 2);
        assert_eq!(memory.read_u8(0x01FD), regs.p.bits());
        assert_eq!(memory.read_u8(0x01FD) & UNUSED_FLAG, UNUSED_FLAG);

        let (regs, _) = run(&[0x38, 0x08, 0x18, 0x28], 4);
        assert!(regs.p.carry());
        assert_eq!(regs.sp, 0xFD);
    }

    #[test]
    fn logical_operations() {
        let (regs, _) = run(&[0xA9, 0xF0, 0x29, 0x0F], 2);
        assert_eq!(regs.a, 0x00);
        assert!(regs.p.zero());

        let (regs, _) = run(&[0xA9, 0xF0, 0x49, 0xFF], 2);
        assert_eq!(regs.a, 0x0F);

        let (regs, _) = run(&[0xA9, 0x80, 0x09, 0x01], 2);
        assert_eq!(regs.a, 0x81);
        assert!(regs.p.negative());
    }

    #[test]
    fn bit_leaves_accumulator_alone() {
        let (mut regs, mut memory) = setup(&[0x24, 0x10]);
        memory.write_u8(0x10, 0x40);
        regs.a = 0x0F;
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x0F);
        assert!(regs.p.zero());
        assert!(regs.p.overflow());
        assert!(!regs.p.negative());

        let (mut regs, mut memory) = setup(&[0x2C, 0x00, 0x30]);
        memory.write_u8(0x3000, 0x81);
        regs.a = 0x80;
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x80);
        assert!(!regs.p.zero());
        assert!(!regs.p.overflow());
        assert!(regs.p.negative());
    }

    #[test]
    fn adc_vectors() {
        let regs = adc(0x50, 0x50, false);
        assert_eq!(regs.a, 0xA0);
        assert!(regs.p.overflow());
        assert!(!regs.p.carry());
        assert!(regs.p.negative());

        let regs = adc(0xD0, 0x90, false);
        assert_eq!(regs.a, 0x60);
        assert!(regs.p.overflow());
        assert!(regs.p.carry());

        let regs = adc(0x50, 0xD0, false);
        assert_eq!(regs.a, 0x20);
        assert!(!regs.p.overflow());
        assert!(regs.p.carry());

        let regs = adc(0xFF, 0x00, true);
        assert_eq!(regs.a, 0x00);
        assert!(regs.p.zero());
        assert!(regs.p.carry());
    }

    #[test]
    fn adc_overflow_matches_signed_arithmetic() {
        for a in 0..=255u8 {
            for operand in 0..=255u8 {
                for &carry in &[false, true] {
                    let regs = adc(a, operand, carry);
                    let signed = a as i8 as i16 + operand as i8 as i16 + carry as i16;
                    let unsigned = a as u16 + operand as u16 + carry as u16;
                    assert_eq!(regs.a, unsigned as u8);
                    assert_eq!(regs.p.carry(), unsigned > 0xFF);
                    assert_eq!(regs.p.overflow(), signed < -128 || signed > 127,
                               "{:#04X} + {:#04X} + {}", a, operand, carry);
                }
            }
        }
    }

    #[test]
    fn sbc_overflow_matches_signed_arithmetic() {
        for a in 0..=255u8 {
            for operand in 0..=255u8 {
                for &carry in &[false, true] {
                    let regs = sbc(a, operand, carry);
                    let borrow = !carry as i16;
                    let signed = a as i8 as i16 - operand as i8 as i16 - borrow;
                    let unsigned = a as i16 - operand as i16 - borrow;
                    assert_eq!(regs.a, unsigned as u8);
                    assert_eq!(regs.p.carry(), unsigned >= 0);
                    assert_eq!(regs.p.overflow(), signed < -128 || signed > 127,
                               "{:#04X} - {:#04X} - {}", a, operand, borrow);
                }
            }
        }
    }

    #[test]
    fn sbc_is_addition_of_complement() {
        // 5 - 3 with no borrow pending.
        let (mut regs, mut memory) = setup(&[0x38, 0xE9, 0x03]);
        regs.a = 0x05;
        step(&mut regs, &mut memory);
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x02);
        assert!(regs.p.carry());
        assert!(!regs.p.overflow());

        // 3 - 5 borrows.
        let (mut regs, mut memory) = setup(&[0x38, 0xE9, 0x05]);
        regs.a = 0x03;
        step(&mut regs, &mut memory);
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0xFE);
        assert!(!regs.p.carry());
        assert!(regs.p.negative());

        // -128 - 1 overflows.
        let (mut regs, mut memory) = setup(&[0x38, 0xE9, 0x01]);
        regs.a = 0x80;
        step(&mut regs, &mut memory);
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x7F);
        assert!(regs.p.overflow());
    }

    #[test]
    fn decimal_mode_is_ignored() {
        let (mut regs, mut memory) = setup(&[0xF8, 0x18, 0x69, 0x01]);
        regs.a = 0x09;
        for _ in 0..3 {
            step(&mut regs, &mut memory);
        }
        assert!(regs.p.decimal_mode());
        assert_eq!(regs.a, 0x0A);
    }

    #[test]
    fn compare_only_touches_flags() {
        let cases = [
            (0xC9u8, 0x10u8, 0x10u8, true, true, false),
            (0xC9, 0x10, 0x20, false, false, true),
            (0xC9, 0x20, 0x10, false, true, false),
            (0xC9, 0x00, 0x01, false, false, true),
        ];

        for &(op, register, operand, zero, carry, negative) in cases.iter() {
            let (mut regs, mut memory) = setup(&[op, operand]);
            regs.a = register;
            step(&mut regs, &mut memory);
            assert_eq!(regs.a, register);
            assert_eq!(regs.p.zero(), zero);
            assert_eq!(regs.p.carry(), carry);
            assert_eq!(regs.p.negative(), negative);
        }

        let (mut regs, mut memory) = setup(&[0xE0, 0x05, 0xC0, 0x09]);
        regs.x = 0x05;
        regs.y = 0x05;
        step(&mut regs, &mut memory);
        assert_eq!(regs.x, 0x05);
        assert!(regs.p.zero());
        assert!(regs.p.carry());
        step(&mut regs, &mut memory);
        assert_eq!(regs.y, 0x05);
        assert!(!regs.p.zero());
        assert!(!regs.p.carry());
        assert!(regs.p.negative());
    }

    #[test]
    fn increments_wrap() {
        let (mut regs, mut memory) = setup(&[0xE6, 0x10, 0xC6, 0x11, 0xC8, 0x88, 0x88]);
        memory.write_u8(0x10, 0xFF);
        memory.write_u8(0x11, 0x00);
        step(&mut regs, &mut memory);
        assert_eq!(memory.read_u8(0x10), 0x00);
        assert!(regs.p.zero());
        step(&mut regs, &mut memory);
        assert_eq!(memory.read_u8(0x11), 0xFF);
        assert!(regs.p.negative());
        step(&mut regs, &mut memory);
        assert_eq!(regs.y, 0x01);
        step(&mut regs, &mut memory);
        assert_eq!(regs.y, 0x00);
        assert!(regs.p.zero());
        step(&mut regs, &mut memory);
        assert_eq!(regs.y, 0xFF);
        assert!(regs.p.negative());

        let (regs, _) = run(&[0xCA], 1);
        assert_eq!(regs.x, 0xFF);
    }

    #[test]
    fn shifts_on_accumulator() {
        let (mut regs, mut memory) = setup(&[0x0A]);
        regs.a = 0x81;
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x02);
        assert!(regs.p.carry());

        let (mut regs, mut memory) = setup(&[0x4A]);
        regs.a = 0x81;
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x40);
        assert!(regs.p.carry());
        assert!(!regs.p.negative());

        let (mut regs, mut memory) = setup(&[0x2A]);
        regs.a = 0x80;
        regs.p.set_carry(true);
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x01);
        assert!(regs.p.carry());

        let (mut regs, mut memory) = setup(&[0x6A]);
        regs.a = 0x01;
        regs.p.set_carry(true);
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x80);
        assert!(regs.p.carry());
        assert!(regs.p.negative());

        let (mut regs, mut memory) = setup(&[0x6A]);
        regs.a = 0x01;
        step(&mut regs, &mut memory);
        assert_eq!(regs.a, 0x00);
        assert!(regs.p.zero());
        assert!(regs.p.carry());
    }

    #[test]
    fn shifts_on_memory() {
        let (mut regs, mut memory) = setup(&[0x06, 0x10, 0x2E, 0x00, 0x30, 0x56, 0x0F]);
        memory.write_u8(0x10, 0x40);
        memory.write_u8(0x3000, 0x80);
        regs.x = 0x01;
        step(&mut regs, &mut memory);
        assert_eq!(memory.read_u8(0x10), 0x80);
        assert!(!regs.p.carry());
        assert!(regs.p.negative());
        step(&mut regs, &mut memory);
        assert_eq!(memory.read_u8(0x3000), 0x00);
        assert!(regs.p.carry());
        assert!(regs.p.zero());
        step(&mut regs, &mut memory);
        assert_eq!(memory.read_u8(0x10), 0x40);
        assert!(!regs.p.carry());
        assert_eq!(regs.a, 0);
    }

    #[test]
    fn jmp_absolute_and_indirect() {
        let (regs, _) = run(&[0x4C, 0x00, 0xC0], 1);
        assert_eq!(regs.pc, 0xC000);

        let (mut regs, mut memory) = setup(&[0x6C, 0x00, 0x30]);
        memory.write_u16(0x3000, 0x8123);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, 0x8123);

        // High byte of the target comes from the next page, not the start of
        // the pointer's page.
        let (mut regs, mut memory) = setup(&[0x6C, 0xFF, 0x30]);
        memory.write_u8(0x30FF, 0x00);
        memory.write_u8(0x3100, 0x90);
        memory.write_u8(0x3000, 0x40);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, 0x9000);
    }

    #[test]
    fn jsr_pushes_last_byte_of_call() {
        let (mut regs, mut memory) = setup(&[0x20, 0x00, 0x07]);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, 0x0700);
        assert_eq!(regs.sp, 0xFB);
        assert_eq!(memory.read_u8(0x01FD), 0x06);
        assert_eq!(memory.read_u8(0x01FC), 0x02);

        memory.write_u8(0x0700, 0x60);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, ORIGIN + 3);
        assert_eq!(regs.sp, 0xFD);
    }

    #[test]
    fn branches_taken_and_not_taken() {
        // BEQ +4 with zero clear falls through.
        let (mut regs, mut memory) = setup(&[0xF0, 0x04]);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, ORIGIN + 2);

        // BNE -2 loops back onto itself.
        let (mut regs, mut memory) = setup(&[0xD0, 0xFE]);
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, ORIGIN);

        let conditions: &[(u8, u8, bool)] = &[
            (0x90, 0, true),
            (0x90, CARRY_FLAG, false),
            (0xB0, CARRY_FLAG, true),
            (0x30, NEGATIVE_FLAG, true),
            (0x10, NEGATIVE_FLAG, false),
            (0x50, 0, true),
            (0x70, 0, false),
        ];
        for &(op, status, taken) in conditions {
            let (mut regs, mut memory) = setup(&[op, 0x10]);
            regs.p.set_bits(status);
            step(&mut regs, &mut memory);
            let expected = if taken { ORIGIN + 0x12 } else { ORIGIN + 2 };
            assert_eq!(regs.pc, expected, "opcode {:#04X}", op);
        }
    }

    #[test]
    fn flag_instructions() {
        let (regs, _) = run(&[0x38, 0xF8, 0x78], 3);
        assert!(regs.p.carry());
        assert!(regs.p.decimal_mode());
        assert!(regs.p.interrupt_disable());

        let (mut regs, mut memory) = setup(&[0x18, 0xD8, 0x58, 0xB8]);
        regs.p.set_bits(0xFF);
        for _ in 0..4 {
            step(&mut regs, &mut memory);
        }
        assert_eq!(regs.p.bits(), 0xFF & !0x01 & !0x08 & !0x04 & !0x40);
    }

    #[test]
    fn brk_jumps_through_vector_and_rti_returns() {
        let (mut regs, mut memory) = setup(&[0x00, 0xEA, 0xEA]);
        memory.write_u16(IRQ_VECTOR, 0x9000);
        memory.write_u8(0x9000, 0x40);
        regs.p.set_carry(true);

        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, 0x9000);
        assert_eq!(regs.sp, 0xFA);
        assert_eq!(memory.read_u16(0x01FC), ORIGIN + 1);
        assert_eq!(memory.read_u8(0x01FB) & BREAK_COMMAND, BREAK_COMMAND);
        assert!(regs.p.break_command());

        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, ORIGIN + 2);
        assert_eq!(regs.sp, 0xFD);
        assert!(!regs.p.break_command());
        assert!(regs.p.carry());
    }

    #[test]
    fn nop_does_nothing() {
        let (mut regs, mut memory) = setup(&[0xEA]);
        let before = regs;
        step(&mut regs, &mut memory);
        assert_eq!(regs.pc, before.pc + 1);
        assert_eq!(regs.p, before.p);
        assert_eq!(regs.a, before.a);
    }
}
