//! `.ls8` program files: one binary byte per line, `#` starts a comment,
//! and any line that does not start with a digit is skipped.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CpuError, Result};
use crate::opcode::{HLT, LDI, PRN};

/// `LDI R0, 8; PRN R0; HLT`
pub const DEFAULT_PROGRAM: [u8; 6] = [LDI, 0b0000_0000, 0b0000_1000, PRN, 0b0000_0000, HLT];

pub fn parse_program(source: &str) -> Result<Vec<u8>> {
    let mut program = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        if !line.starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        // a byte is at most 8 digits; anything past that is ignored
        let head: String = line.chars().take(8).collect();
        let word = head.split('#').next().unwrap_or_default().trim();
        let byte = u8::from_str_radix(word, 2).map_err(|_| CpuError::Parse {
            line: idx + 1,
            text: word.to_string(),
        })?;
        program.push(byte);
    }

    Ok(program)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)?;
    let program = parse_program(&source)?;
    debug!(path = %path.display(), bytes = program.len(), "parsed program file");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_comments_and_blank_lines() {
        let source = "\
# print8.ls8
10000010 # LDI R0,8
00000000
00001000

01000111 # PRN R0
00000000
00000001 # HLT
";
        assert_eq!(parse_program(source).unwrap(), DEFAULT_PROGRAM.to_vec());
    }

    #[test]
    fn comment_directly_after_value() {
        assert_eq!(parse_program("00000001#HLT\n").unwrap(), vec![HLT]);
    }

    #[test]
    fn indented_lines_are_ignored() {
        assert_eq!(parse_program("  10000010\n00000001\n").unwrap(), vec![HLT]);
    }

    #[test]
    fn bad_byte_reports_line() {
        let err = parse_program("00000001\n0102\n").unwrap_err();
        assert!(matches!(err, CpuError::Parse { line: 2, ref text } if text == "0102"));

        let err = parse_program("0000 0001\n").unwrap_err();
        assert!(matches!(err, CpuError::Parse { line: 1, .. }));
    }

    #[test]
    fn only_first_eight_characters_count() {
        assert_eq!(parse_program("000000001\n").unwrap(), vec![0]);
        assert_eq!(parse_program("111111111\n").unwrap(), vec![255]);
        assert_eq!(parse_program("10000010abc\n").unwrap(), vec![LDI]);
        assert_eq!(parse_program("100000101 # x\n").unwrap(), vec![LDI]);
    }

    #[test]
    fn short_value_before_comment() {
        assert_eq!(parse_program("1 # HLT\n").unwrap(), vec![HLT]);
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_file("/nonexistent/program.ls8"),
            Err(CpuError::Io(_))
        ));
    }
}
