// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use chrono::{DateTime, Local};
use crate::nes::RuntimeOptions;

/// Logs a message to stdout with a given prefix if the emulator was started
/// with the verbose flag set.
pub fn log<P, T>(prefix: P, text: T, runtime_options: &RuntimeOptions) where P: Into<String>, T: Into<String> {
    if runtime_options.verbose {
        println!("{}", format_line(Local::now(), prefix, text));
    }
}

/// Builds a single log line: `[<timestamp>] -- [<prefix>] <text>`.
pub fn format_line<P, T>(time: DateTime<Local>, prefix: P, text: T) -> String where P: Into<String>, T: Into<String> {
    format!("[{}] -- [{}] {}", time, prefix.into(), text.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn line_layout() {
        let time = Local.with_ymd_and_hms(2016, 11, 5, 12, 30, 0).unwrap();
        let line = format_line(time, "cpu", "C000  EA        NOP");
        assert!(line.starts_with("[2016-11-05 12:30:00"));
        assert!(line.ends_with("] -- [cpu] C000  EA        NOP"));
    }
}
