/*!
loader.rs - Program image loading from the assembler text format.

Format
======
One instruction byte per line, written as exactly its binary digits
(e.g. `10011001`). Everything from `#` to the end of the line is a
comment. Blank lines are skipped. Anything else on a line is an error,
reported with its 1-based line number.
*/

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::ram::RAM_SIZE;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read program file")]
    Io(#[from] std::io::Error),

    #[error("line {line}: `{text}` is not a binary byte literal")]
    BadLiteral { line: usize, text: String },

    #[error("program is {len} bytes but memory holds {limit}")]
    TooLarge { len: usize, limit: usize },
}

/// Parse assembler text into a flat program image.
pub fn parse_source(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let text = raw.splitn(2, '#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let byte = u8::from_str_radix(text, 2).map_err(|_| LoadError::BadLiteral {
            line: idx + 1,
            text: text.to_string(),
        })?;
        image.push(byte);
    }
    if image.len() > RAM_SIZE {
        return Err(LoadError::TooLarge {
            len: image.len(),
            limit: RAM_SIZE,
        });
    }
    Ok(image)
}

/// Read and parse a program file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadError> {
    let source = fs::read_to_string(path)?;
    parse_source(&source)
}
