// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::io::log;
use crate::nes::error::Error;
use crate::nes::instruction::Instruction;
use crate::nes::memory::Memory;
use crate::nes::registers::Registers;
use crate::nes::RuntimeOptions;
use std::fmt;
use std::io::BufRead;
use std::ops::Range;

/// This is an implementation of 2A03 processor used in the NES. The 2A03 is
/// based off the 6502 processor with some minor changes such as having no
/// binary-coded decimal mode. Only the documented instruction set is
/// supported and timing isn't emulated; every call to `step` runs exactly one
/// instruction to completion.
pub struct CPU {
    pub regs: Registers,

    // The CPU owns the whole address space. Anything else that wants to look
    // at memory goes through `memory` and `memory_mut`.
    memory: Memory,

    // Options passed from the command-line that may influence how the CPU
    // behaves.
    runtime_options: RuntimeOptions,

    // This will contain a reader if the CPU is in testing mode. It will be
    // read during program execution and compared against.
    execution_log: Option<Box<dyn BufRead>>,
}

impl CPU {
    pub fn new(runtime_options: RuntimeOptions) -> CPU {
        CPU {
            regs: Registers::new(),
            memory: Memory::new(),
            runtime_options: runtime_options,
            execution_log: None,
        }
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    /// Copies a program image into memory at the given address.
    pub fn load(&mut self, addr: u16, image: &[u8]) {
        self.memory.memdump(addr, image);
    }

    /// Save the passed execution log which will be used to compare the CPU's
    /// execution line by line. Lines are expected in the Nintendulator layout
    /// produced by `trace_line`.
    pub fn begin_testing<R: BufRead + 'static>(&mut self, log: R) {
        self.execution_log = Some(Box::new(log));
    }

    /// Decodes the instruction the program counter points at and executes
    /// it. All instruction logic is in instruction.rs.
    pub fn step(&mut self) -> Result<(), Error> {
        let before = self.regs;
        let instr = match Instruction::decode(&mut self.regs, &self.memory) {
            Ok(instr) => instr,
            Err(e) => {
                log::log("error", format!("FATAL ERROR: {}", e), &self.runtime_options);
                return Err(e);
            },
        };

        if self.runtime_options.verbose || self.execution_log.is_some() {
            let raw_fragment = trace_line(&before, &instr);

            // Print the log fragment only if verbose mode is enabled. Logs are
            // formatted like Nintendulator logs.
            if self.runtime_options.verbose {
                log::log("cpu", raw_fragment.as_str(), &self.runtime_options);
            }

            // The instruction never ran, so leave the registers as they were
            // when the frame was taken.
            if let Err(e) = self.compare_frame(&raw_fragment) {
                self.regs = before;
                return Err(e);
            }
        }

        instr.execute(&mut self.regs, &mut self.memory)
    }

    /// Reads the next line of the execution log, if there is one, and checks
    /// it against the frame the emulator just produced.
    fn compare_frame(&mut self, raw_fragment: &str) -> Result<(), Error> {
        let mut log_fragment = String::new();
        let read = match self.execution_log {
            Some(ref mut execution_log) => execution_log.read_line(&mut log_fragment)?,
            None => return Ok(()),
        };

        // Running off the end of the log ends the test run.
        if read == 0 {
            log::log("cpu", "Execution log exhausted, testing finished", &self.runtime_options);
            self.execution_log = None;
            return Ok(());
        }

        let log_fragment = log_fragment.trim_end();
        let expected = CPUFrame::parse(log_fragment);
        if expected.is_none() || expected != CPUFrame::parse(raw_fragment) {
            log::log("error", "FATAL ERROR: Mismatched CPU frames:", &self.runtime_options);
            log::log("error", format!("Emulator Frame: {}", raw_fragment), &self.runtime_options);
            log::log("error", format!("Log Frame:      {}", log_fragment), &self.runtime_options);
            return Err(Error::TraceMismatch {
                expected: log_fragment.to_string(),
                actual: raw_fragment.to_string(),
            });
        }

        Ok(())
    }

    /// Returns "SET" if the passed boolean is true, otherwise "UNSET". This
    /// function is used to display flags when the CPU crashes.
    fn fmt_flag(flag: bool) -> &'static str {
        if flag { "SET" } else { "UNSET" }
    }
}

/// Formats a Nintendulator style log frame for an instruction, using the
/// register state from before it was decoded:
///
/// `C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD`
pub fn trace_line(regs: &Registers, instr: &Instruction) -> String {
    let raw_bytes = instr.bytes()
        .iter()
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<String>>()
        .join(" ");

    format!("{:04X}  {:8}  {:30}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
            regs.pc, raw_bytes, instr.disassemble(), regs.a, regs.x, regs.y,
            regs.p.bits(), regs.sp)
}

impl fmt::Display for CPU {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let p = &self.regs.p;
        writeln!(f, "CPU State:")?;
        writeln!(f, "    Program Counter: {:#06X}", self.regs.pc)?;
        writeln!(f, "    Stack Pointer:   {:#04X}", self.regs.sp)?;
        writeln!(f, "    Accumulator:     {:#04X}", self.regs.a)?;
        writeln!(f, "    X Register:      {:#04X}", self.regs.x)?;
        writeln!(f, "    Y Register:      {:#04X}", self.regs.y)?;
        writeln!(f, "")?;
        writeln!(f, "Status Register: {:#04X}", p.bits())?;
        writeln!(f, "    Carry Flag:        {}", CPU::fmt_flag(p.carry()))?;
        writeln!(f, "    Zero Flag:         {}", CPU::fmt_flag(p.zero()))?;
        writeln!(f, "    Interrupt Disable: {}", CPU::fmt_flag(p.interrupt_disable()))?;
        writeln!(f, "    Decimal Mode:      {}", CPU::fmt_flag(p.decimal_mode()))?;
        writeln!(f, "    Break Command:     {}", CPU::fmt_flag(p.break_command()))?;
        writeln!(f, "    Overflow Flag:     {}", CPU::fmt_flag(p.overflow()))?;
        write!(f, "    Negative Flag:     {}", CPU::fmt_flag(p.negative()))
    }
}

/// CPU state for use during automated CPU testing. These values are contained
/// inside of Nintendulator logs and used for comparing log frames to test CPU
/// accuracy. The disassembly column is left out since reference logs annotate
/// it with memory contents.
#[derive(Debug, PartialEq)]
struct CPUFrame {
    bytes: [u8; 3],
    pc: u16,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    sp: u8,
}

impl CPUFrame {
    /// Parses a log frame and packs the parsed values into a structure. Returns
    /// `None` if the line is too short or a register column isn't hex.
    fn parse(frame: &str) -> Option<CPUFrame> {
        // Nintendulator stores instruction bytes as 8-bit hex in the log frame.
        // Missing bytes are blank.
        let bytes = [
            CPUFrame::extract_byte(frame, 6..8),
            CPUFrame::extract_byte(frame, 9..11),
            CPUFrame::extract_byte(frame, 12..14),
        ];

        Some(CPUFrame {
            bytes: bytes,
            pc: u16::from_str_radix(frame.get(0..4)?, 16).ok()?,
            a:  u8::from_str_radix(frame.get(50..52)?, 16).ok()?,
            x:  u8::from_str_radix(frame.get(55..57)?, 16).ok()?,
            y:  u8::from_str_radix(frame.get(60..62)?, 16).ok()?,
            p:  u8::from_str_radix(frame.get(65..67)?, 16).ok()?,
            sp: u8::from_str_radix(frame.get(71..73)?, 16).ok()?,
        })
    }

    /// Parses a hex encoded 8-bit integer, treating blanks as zero.
    fn extract_byte(frame: &str, range: Range<usize>) -> u8 {
        frame.get(range)
            .and_then(|slice| u8::from_str_radix(slice, 16).ok())
            .unwrap_or(0)
    }
}
