// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate getopts;
extern crate nesty;

use getopts::Options;
use nesty::io::binutils;
use nesty::io::errors::*;
use nesty::io::log;
use nesty::{CPU, RuntimeOptions};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};

/// Prints usage information to stdout.
fn print_usage(program: &str, opts: &Options) {
    let brief = format!("Usage: {} [options] IMAGE", program);
    print!("{}", opts.usage(&brief));
}

/// Parses a numeric option, falling back to a default when it's absent.
fn parse_opt<T, F>(matches: &getopts::Matches, name: &str, default: T, parse: F) -> Result<T, String>
    where F: Fn(&str) -> Result<T, String>
{
    match matches.opt_str(name) {
        Some(value) => parse(&value).map_err(|e| format!("--{}: {}", name, e)),
        None => Ok(default),
    }
}

/// Initializes and starts the emulator. Returns an exit code after which the
/// program unwinds and stops executing. The raw program image is loaded at the
/// origin, then a fixed number of instructions is executed.
fn init() -> i32 {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();
    let mut stderr = io::stderr();

    let mut opts = Options::new();
    opts.optflag("v", "verbose", "log every executed instruction");
    opts.optopt("o", "origin", "load address of IMAGE in hex (default 0000)", "ADDR");
    opts.optopt("p", "pc", "initial program counter in hex (default: origin)", "ADDR");
    opts.optopt("s", "steps", "number of instructions to execute (default 1)", "N");
    opts.optopt("t", "test-log", "compare execution against a trace log", "FILE");
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(e) => {
            writeln!(stderr, "nesty: {}", e).unwrap();
            return EXIT_FAILURE;
        },
    };

    if matches.opt_present("h") {
        print_usage(&program, &opts);
        return EXIT_SUCCESS;
    }

    let image_path = if matches.free.len() == 1 {
        matches.free[0].clone()
    } else {
        print_usage(&program, &opts);
        return EXIT_FAILURE;
    };

    let address = |text: &str| binutils::parse_address(text).map_err(String::from);
    let settings = parse_opt(&matches, "origin", 0, &address).and_then(|origin| {
        let pc = parse_opt(&matches, "pc", origin, &address)?;
        let steps = parse_opt(&matches, "steps", 1u64, |text| {
            text.parse::<u64>().map_err(|e| e.to_string())
        })?;
        Ok((origin, pc, steps))
    });
    let (origin, pc, steps) = match settings {
        Ok(settings) => settings,
        Err(e) => {
            writeln!(stderr, "nesty: {}", e).unwrap();
            return EXIT_FAILURE;
        },
    };

    let runtime_options = RuntimeOptions {
        verbose: matches.opt_present("v"),
    };

    let image = match binutils::read_bin(&image_path) {
        Ok(image) => image,
        Err(e) => {
            writeln!(stderr, "nesty: {}: {}", image_path, e).unwrap();
            return EXIT_INVALID_IMAGE;
        },
    };
    if let Err(e) = binutils::validate_image(&image, origin) {
        writeln!(stderr, "nesty: {}: {}", image_path, e).unwrap();
        return EXIT_INVALID_IMAGE;
    }

    let mut cpu = CPU::new(runtime_options);
    cpu.load(origin, &image);
    cpu.regs.pc = pc;
    log::log("nesty", format!("Loaded {} bytes at {:#06X}", image.len(), origin), &runtime_options);

    // Compare against a reference log if one was provided on the command-line.
    if let Some(path) = matches.opt_str("t") {
        match File::open(&path) {
            Ok(file) => cpu.begin_testing(BufReader::new(file)),
            Err(e) => {
                writeln!(stderr, "nesty: {}: {}", path, e).unwrap();
                return EXIT_CPU_LOG_NOT_FOUND;
            },
        }
    }

    for _ in 0..steps {
        if let Err(e) = cpu.step() {
            writeln!(stderr, "nesty: {}", e).unwrap();
            writeln!(stderr, "{}", cpu).unwrap();
            return exit_code(&e);
        }
    }

    println!("{}", cpu);
    EXIT_SUCCESS
}

/// Entry point of the program and wrapper of init. Takes the exit code returned
/// from init and exits with it.
fn main() {
    let exit_code = init();
    std::process::exit(exit_code); // Unwinding done, safe to exit.
}
