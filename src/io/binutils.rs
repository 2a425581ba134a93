// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fs::File;
use std::io::Error;
use std::io::Read;
use std::path::Path;
use std::result::Result;

// Largest image that fits the address space.
pub const MAX_IMAGE_SIZE: usize = 0x10000;

/// Reads a binary file at a given path and stores it in a vector of bytes.
pub fn read_bin<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Error> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Checks that a raw program image fits in memory when loaded at `origin`
/// without wrapping around past 0xFFFF.
pub fn validate_image(image: &[u8], origin: u16) -> Result<(), &'static str> {
    if image.is_empty() {
        return Err("image is empty");
    }
    if origin as usize + image.len() > MAX_IMAGE_SIZE {
        return Err("image does not fit in the address space at the given origin");
    }
    Ok(())
}

/// Parses a 16-bit hex address such as `C000`, `$C000` or `0xC000`.
pub fn parse_address(text: &str) -> Result<u16, &'static str> {
    let digits = text.trim_start_matches('$').trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|_| "address must be a 16-bit hex number")
}
