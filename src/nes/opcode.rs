// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use enum_primitive::FromPrimitive;
use std::fmt;

enum_from_primitive! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Opcode {
        ADCImm   = 0x69,
        ADCZero  = 0x65,
        ADCZeroX = 0x75,
        ADCAbs   = 0x6D,
        ADCAbsX  = 0x7D,
        ADCAbsY  = 0x79,
        ADCIndX  = 0x61,
        ADCIndY  = 0x71,

        ANDImm   = 0x29,
        ANDZero  = 0x25,
        ANDZeroX = 0x35,
        ANDAbs   = 0x2D,
        ANDAbsX  = 0x3D,
        ANDAbsY  = 0x39,
        ANDIndX  = 0x21,
        ANDIndY  = 0x31,

        ASLAcc   = 0x0A,
        ASLZero  = 0x06,
        ASLZeroX = 0x16,
        ASLAbs   = 0x0E,
        ASLAbsX  = 0x1E,

        BCCRel   = 0x90,
        BCSRel   = 0xB0,
        BEQRel   = 0xF0,
        BMIRel   = 0x30,
        BNERel   = 0xD0,
        BPLRel   = 0x10,
        BVCRel   = 0x50,
        BVSRel   = 0x70,

        BITZero  = 0x24,
        BITAbs   = 0x2C,

        BRK      = 0x00,

        CLC      = 0x18,
        CLD      = 0xD8,
        CLI      = 0x58,
        CLV      = 0xB8,

        CMPImm   = 0xC9,
        CMPZero  = 0xC5,
        CMPZeroX = 0xD5,
        CMPAbs   = 0xCD,
        CMPAbsX  = 0xDD,
        CMPAbsY  = 0xD9,
        CMPIndX  = 0xC1,
        CMPIndY  = 0xD1,

        CPXImm   = 0xE0,
        CPXZero  = 0xE4,
        CPXAbs   = 0xEC,

        CPYImm   = 0xC0,
        CPYZero  = 0xC4,
        CPYAbs   = 0xCC,

        DECZero  = 0xC6,
        DECZeroX = 0xD6,
        DECAbs   = 0xCE,
        DECAbsX  = 0xDE,

        DEX      = 0xCA,
        DEY      = 0x88,

        EORImm   = 0x49,
        EORZero  = 0x45,
        EORZeroX = 0x55,
        EORAbs   = 0x4D,
        EORAbsX  = 0x5D,
        EORAbsY  = 0x59,
        EORIndX  = 0x41,
        EORIndY  = 0x51,

        INCZero  = 0xE6,
        INCZeroX = 0xF6,
        INCAbs   = 0xEE,
        INCAbsX  = 0xFE,

        INX      = 0xE8,
        INY      = 0xC8,

        JMPAbs   = 0x4C,
        JMPInd   = 0x6C,

        JSRAbs   = 0x20,

        LDAImm   = 0xA9,
        LDAZero  = 0xA5,
        LDAZeroX = 0xB5,
        LDAAbs   = 0xAD,
        LDAAbsX  = 0xBD,
        LDAAbsY  = 0xB9,
        LDAIndX  = 0xA1,
        LDAIndY  = 0xB1,

        LDXImm   = 0xA2,
        LDXZero  = 0xA6,
        LDXZeroY = 0xB6,
        LDXAbs   = 0xAE,
        LDXAbsY  = 0xBE,

        LDYImm   = 0xA0,
        LDYZero  = 0xA4,
        LDYZeroX = 0xB4,
        LDYAbs   = 0xAC,
        LDYAbsX  = 0xBC,

        LSRAcc   = 0x4A,
        LSRZero  = 0x46,
        LSRZeroX = 0x56,
        LSRAbs   = 0x4E,
        LSRAbsX  = 0x5E,

        NOP      = 0xEA,

        ORAImm   = 0x09,
        ORAZero  = 0x05,
        ORAZeroX = 0x15,
        ORAAbs   = 0x0D,
        ORAAbsX  = 0x1D,
        ORAAbsY  = 0x19,
        ORAIndX  = 0x01,
        ORAIndY  = 0x11,

        PHA      = 0x48,
        PHP      = 0x08,
        PLA      = 0x68,
        PLP      = 0x28,

        ROLAcc   = 0x2A,
        ROLZero  = 0x26,
        ROLZeroX = 0x36,
        ROLAbs   = 0x2E,
        ROLAbsX  = 0x3E,

        RORAcc   = 0x6A,
        RORZero  = 0x66,
        RORZeroX = 0x76,
        RORAbs   = 0x6E,
        RORAbsX  = 0x7E,

        RTI      = 0x40,
        RTS      = 0x60,

        SBCImm   = 0xE9,
        SBCZero  = 0xE5,
        SBCZeroX = 0xF5,
        SBCAbs   = 0xED,
        SBCAbsX  = 0xFD,
        SBCAbsY  = 0xF9,
        SBCIndX  = 0xE1,
        SBCIndY  = 0xF1,

        SEC      = 0x38,
        SED      = 0xF8,
        SEI      = 0x78,

        STAZero  = 0x85,
        STAZeroX = 0x95,
        STAAbs   = 0x8D,
        STAAbsX  = 0x9D,
        STAAbsY  = 0x99,
        STAIndX  = 0x81,
        STAIndY  = 0x91,

        STXZero  = 0x86,
        STXZeroY = 0x96,
        STXAbs   = 0x8E,

        STYZero  = 0x84,
        STYZeroX = 0x94,
        STYAbs   = 0x8C,

        TAX      = 0xAA,
        TAY      = 0xA8,
        TSX      = 0xBA,
        TXA      = 0x8A,
        TXS      = 0x9A,
        TYA      = 0x98,
    }
}

/// The operation an opcode performs, independent of where its operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    // Load/store.
    LDA, LDX, LDY, STA, STX, STY,
    // Register transfers.
    TAX, TAY, TXA, TYA, TSX, TXS,
    // Stack.
    PHA, PHP, PLA, PLP,
    // Logical.
    AND, EOR, ORA, BIT,
    // Arithmetic.
    ADC, SBC, CMP, CPX, CPY,
    // Increments and decrements.
    INC, INX, INY, DEC, DEX, DEY,
    // Shifts.
    ASL, LSR, ROL, ROR,
    // Jumps and calls.
    JMP, JSR, RTS,
    // Branches.
    BCC, BCS, BEQ, BMI, BNE, BPL, BVC, BVS,
    // Status flag changes.
    CLC, CLD, CLI, CLV, SEC, SED, SEI,
    // System functions.
    BRK, NOP, RTI,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Rules for locating an instruction's operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of bytes following the opcode that belong to the instruction.
    pub fn operand_len(&self) -> u8 {
        use self::AddressingMode::*;

        match *self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative => 1,
            IndexedIndirect | IndirectIndexed => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}

/// Static description of a documented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionInfo {
    pub opcode: Opcode,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
}

impl InstructionInfo {
    /// Total length of the instruction in bytes, opcode included.
    pub fn len(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

lazy_static! {
    /// Opcode byte to instruction lookup, built once from the `Opcode` enum.
    /// Entries for illegal opcodes are `None`.
    static ref INSTRUCTION_TABLE: [Option<InstructionInfo>; 256] = {
        let mut table = [None; 256];
        for (byte, entry) in table.iter_mut().enumerate() {
            *entry = Opcode::from_u8(byte as u8).map(|opcode| opcode.info());
        }
        table
    };
}

/// Looks up the mnemonic and addressing mode of an opcode byte. Returns `None`
/// for the illegal and undocumented opcodes, which this CPU doesn't run.
#[inline(always)]
pub fn lookup(opcode: u8) -> Option<InstructionInfo> {
    INSTRUCTION_TABLE[opcode as usize]
}

impl Opcode {
    /// Splits the opcode into the operation it performs and the way its
    /// operand is addressed.
    pub fn info(self) -> InstructionInfo {
        use self::AddressingMode::*;
        use self::Mnemonic::*;

        let (mnemonic, mode) = match self {
            Opcode::ADCImm   => (ADC, Immediate),
            Opcode::ADCZero  => (ADC, ZeroPage),
            Opcode::ADCZeroX => (ADC, ZeroPageX),
            Opcode::ADCAbs   => (ADC, Absolute),
            Opcode::ADCAbsX  => (ADC, AbsoluteX),
            Opcode::ADCAbsY  => (ADC, AbsoluteY),
            Opcode::ADCIndX  => (ADC, IndexedIndirect),
            Opcode::ADCIndY  => (ADC, IndirectIndexed),

            Opcode::ANDImm   => (AND, Immediate),
            Opcode::ANDZero  => (AND, ZeroPage),
            Opcode::ANDZeroX => (AND, ZeroPageX),
            Opcode::ANDAbs   => (AND, Absolute),
            Opcode::ANDAbsX  => (AND, AbsoluteX),
            Opcode::ANDAbsY  => (AND, AbsoluteY),
            Opcode::ANDIndX  => (AND, IndexedIndirect),
            Opcode::ANDIndY  => (AND, IndirectIndexed),

            Opcode::ASLAcc   => (ASL, Accumulator),
            Opcode::ASLZero  => (ASL, ZeroPage),
            Opcode::ASLZeroX => (ASL, ZeroPageX),
            Opcode::ASLAbs   => (ASL, Absolute),
            Opcode::ASLAbsX  => (ASL, AbsoluteX),

            Opcode::BCCRel   => (BCC, Relative),
            Opcode::BCSRel   => (BCS, Relative),
            Opcode::BEQRel   => (BEQ, Relative),
            Opcode::BMIRel   => (BMI, Relative),
            Opcode::BNERel   => (BNE, Relative),
            Opcode::BPLRel   => (BPL, Relative),
            Opcode::BVCRel   => (BVC, Relative),
            Opcode::BVSRel   => (BVS, Relative),

            Opcode::BITZero  => (BIT, ZeroPage),
            Opcode::BITAbs   => (BIT, Absolute),

            Opcode::BRK      => (BRK, Implicit),

            Opcode::CLC      => (CLC, Implicit),
            Opcode::CLD      => (CLD, Implicit),
            Opcode::CLI      => (CLI, Implicit),
            Opcode::CLV      => (CLV, Implicit),

            Opcode::CMPImm   => (CMP, Immediate),
            Opcode::CMPZero  => (CMP, ZeroPage),
            Opcode::CMPZeroX => (CMP, ZeroPageX),
            Opcode::CMPAbs   => (CMP, Absolute),
            Opcode::CMPAbsX  => (CMP, AbsoluteX),
            Opcode::CMPAbsY  => (CMP, AbsoluteY),
            Opcode::CMPIndX  => (CMP, IndexedIndirect),
            Opcode::CMPIndY  => (CMP, IndirectIndexed),

            Opcode::CPXImm   => (CPX, Immediate),
            Opcode::CPXZero  => (CPX, ZeroPage),
            Opcode::CPXAbs   => (CPX, Absolute),

            Opcode::CPYImm   => (CPY, Immediate),
            Opcode::CPYZero  => (CPY, ZeroPage),
            Opcode::CPYAbs   => (CPY, Absolute),

            Opcode::DECZero  => (DEC, ZeroPage),
            Opcode::DECZeroX => (DEC, ZeroPageX),
            Opcode::DECAbs   => (DEC, Absolute),
            Opcode::DECAbsX  => (DEC, AbsoluteX),

            Opcode::DEX      => (DEX, Implicit),
            Opcode::DEY      => (DEY, Implicit),

            Opcode::EORImm   => (EOR, Immediate),
            Opcode::EORZero  => (EOR, ZeroPage),
            Opcode::EORZeroX => (EOR, ZeroPageX),
            Opcode::EORAbs   => (EOR, Absolute),
            Opcode::EORAbsX  => (EOR, AbsoluteX),
            Opcode::EORAbsY  => (EOR, AbsoluteY),
            Opcode::EORIndX  => (EOR, IndexedIndirect),
            Opcode::EORIndY  => (EOR, IndirectIndexed),

            Opcode::INCZero  => (INC, ZeroPage),
            Opcode::INCZeroX => (INC, ZeroPageX),
            Opcode::INCAbs   => (INC, Absolute),
            Opcode::INCAbsX  => (INC, AbsoluteX),

            Opcode::INX      => (INX, Implicit),
            Opcode::INY      => (INY, Implicit),

            Opcode::JMPAbs   => (JMP, Absolute),
            Opcode::JMPInd   => (JMP, Indirect),

            Opcode::JSRAbs   => (JSR, Absolute),

            Opcode::LDAImm   => (LDA, Immediate),
            Opcode::LDAZero  => (LDA, ZeroPage),
            Opcode::LDAZeroX => (LDA, ZeroPageX),
            Opcode::LDAAbs   => (LDA, Absolute),
            Opcode::LDAAbsX  => (LDA, AbsoluteX),
            Opcode::LDAAbsY  => (LDA, AbsoluteY),
            Opcode::LDAIndX  => (LDA, IndexedIndirect),
            Opcode::LDAIndY  => (LDA, IndirectIndexed),

            Opcode::LDXImm   => (LDX, Immediate),
            Opcode::LDXZero  => (LDX, ZeroPage),
            Opcode::LDXZeroY => (LDX, ZeroPageY),
            Opcode::LDXAbs   => (LDX, Absolute),
            Opcode::LDXAbsY  => (LDX, AbsoluteY),

            Opcode::LDYImm   => (LDY, Immediate),
            Opcode::LDYZero  => (LDY, ZeroPage),
            Opcode::LDYZeroX => (LDY, ZeroPageX),
            Opcode::LDYAbs   => (LDY, Absolute),
            Opcode::LDYAbsX  => (LDY, AbsoluteX),

            Opcode::LSRAcc   => (LSR, Accumulator),
            Opcode::LSRZero  => (LSR, ZeroPage),
            Opcode::LSRZeroX => (LSR, ZeroPageX),
            Opcode::LSRAbs   => (LSR, Absolute),
            Opcode::LSRAbsX  => (LSR, AbsoluteX),

            Opcode::NOP      => (NOP, Implicit),

            Opcode::ORAImm   => (ORA, Immediate),
            Opcode::ORAZero  => (ORA, ZeroPage),
            Opcode::ORAZeroX => (ORA, ZeroPageX),
            Opcode::ORAAbs   => (ORA, Absolute),
            Opcode::ORAAbsX  => (ORA, AbsoluteX),
            Opcode::ORAAbsY  => (ORA, AbsoluteY),
            Opcode::ORAIndX  => (ORA, IndexedIndirect),
            Opcode::ORAIndY  => (ORA, IndirectIndexed),

            Opcode::PHA      => (PHA, Implicit),
            Opcode::PHP      => (PHP, Implicit),
            Opcode::PLA      => (PLA, Implicit),
            Opcode::PLP      => (PLP, Implicit),

            Opcode::ROLAcc   => (ROL, Accumulator),
            Opcode::ROLZero  => (ROL, ZeroPage),
            Opcode::ROLZeroX => (ROL, ZeroPageX),
            Opcode::ROLAbs   => (ROL, Absolute),
            Opcode::ROLAbsX  => (ROL, AbsoluteX),

            Opcode::RORAcc   => (ROR, Accumulator),
            Opcode::RORZero  => (ROR, ZeroPage),
            Opcode::RORZeroX => (ROR, ZeroPageX),
            Opcode::RORAbs   => (ROR, Absolute),
            Opcode::RORAbsX  => (ROR, AbsoluteX),

            Opcode::RTI      => (RTI, Implicit),
            Opcode::RTS      => (RTS, Implicit),

            Opcode::SBCImm   => (SBC, Immediate),
            Opcode::SBCZero  => (SBC, ZeroPage),
            Opcode::SBCZeroX => (SBC, ZeroPageX),
            Opcode::SBCAbs   => (SBC, Absolute),
            Opcode::SBCAbsX  => (SBC, AbsoluteX),
            Opcode::SBCAbsY  => (SBC, AbsoluteY),
            Opcode::SBCIndX  => (SBC, IndexedIndirect),
            Opcode::SBCIndY  => (SBC, IndirectIndexed),

            Opcode::SEC      => (SEC, Implicit),
            Opcode::SED      => (SED, Implicit),
            Opcode::SEI      => (SEI, Implicit),

            Opcode::STAZero  => (STA, ZeroPage),
            Opcode::STAZeroX => (STA, ZeroPageX),
            Opcode::STAAbs   => (STA, Absolute),
            Opcode::STAAbsX  => (STA, AbsoluteX),
            Opcode::STAAbsY  => (STA, AbsoluteY),
            Opcode::STAIndX  => (STA, IndexedIndirect),
            Opcode::STAIndY  => (STA, IndirectIndexed),

            Opcode::STXZero  => (STX, ZeroPage),
            Opcode::STXZeroY => (STX, ZeroPageY),
            Opcode::STXAbs   => (STX, Absolute),

            Opcode::STYZero  => (STY, ZeroPage),
            Opcode::STYZeroX => (STY, ZeroPageX),
            Opcode::STYAbs   => (STY, Absolute),

            Opcode::TAX      => (TAX, Implicit),
            Opcode::TAY      => (TAY, Implicit),
            Opcode::TSX      => (TSX, Implicit),
            Opcode::TXA      => (TXA, Implicit),
            Opcode::TXS      => (TXS, Implicit),
            Opcode::TYA      => (TYA, Implicit),
        };

        InstructionInfo {
            opcode: self,
            mnemonic: mnemonic,
            mode: mode,
        }
    }
}
