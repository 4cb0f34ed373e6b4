//! Conversions between instruction words and the two on-disk forms: big-endian machine code bytes
//! and text made of `0`/`1` characters.

use core::mem::size_of;

use mipsbin_inst::Inst;
use thiserror::Error;

const WORD_BYTES: usize = size_of::<Inst>();
const WORD_BITS: usize = WORD_BYTES * 8;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("input is empty")]
    EmptyInput,
    #[error("input is {0} bits long, which is not a multiple of 32")]
    InvalidWordLength(usize),
    #[error("invalid bit `{digit}` at position {pos}")]
    InvalidDigit { pos: usize, digit: char },
}

pub fn words_from_bytes(bytes: &[u8]) -> Result<Vec<Inst>, StreamError> {
    if bytes.is_empty() {
        return Err(StreamError::EmptyInput);
    }
    if bytes.len() % WORD_BYTES != 0 {
        return Err(StreamError::InvalidWordLength(bytes.len() * 8));
    }

    Ok(bytes
        .chunks_exact(WORD_BYTES)
        .map(|c| Inst::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

pub fn words_to_bytes(words: &[Inst]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_be_bytes()).collect()
}

pub fn word_to_bits(word: Inst) -> String {
    format!("{:032b}", word)
}

/// One line of bits per word, each line newline-terminated.
pub fn bit_lines(words: &[Inst]) -> String {
    let mut out = String::with_capacity(words.len() * (WORD_BITS + 1));
    for &word in words {
        out.push_str(&word_to_bits(word));
        out.push('\n');
    }
    out
}

/// Dumps raw bytes as bits with no separators, 8 characters per byte.
pub fn bits_from_bytes(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:08b}", b)).collect()
}

/// Parses bit text back into words. Whitespace is skipped, so both the line-delimited and the
/// concatenated forms are accepted.
pub fn words_from_bits(text: &str) -> Result<Vec<Inst>, StreamError> {
    let mut words = Vec::new();
    let mut word: Inst = 0;
    let mut bits = 0;

    for (pos, digit) in text.chars().enumerate() {
        let bit = match digit {
            '0' => 0,
            '1' => 1,
            c if c.is_whitespace() => continue,
            c => return Err(StreamError::InvalidDigit { pos, digit: c }),
        };
        word = word << 1 | bit;
        bits += 1;
        if bits % WORD_BITS == 0 {
            words.push(word);
            word = 0;
        }
    }

    if bits == 0 {
        Err(StreamError::EmptyInput)
    } else if bits % WORD_BITS != 0 {
        Err(StreamError::InvalidWordLength(bits))
    } else {
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ADD: Inst = 0b000000_01010_01011_01001_00000_100000;
    const LW: Inst = 0b100011_10000_01001_1111111111111100;

    #[test]
    fn bytes() {
        let bytes = [0x01, 0x4b, 0x48, 0x20, 0x8e, 0x09, 0xff, 0xfc];
        assert_eq!(words_from_bytes(&bytes).unwrap(), vec![ADD, LW]);
        assert_eq!(words_to_bytes(&[ADD, LW]), bytes);
    }

    #[test]
    fn bad_bytes() {
        assert_eq!(words_from_bytes(&[]), Err(StreamError::EmptyInput));
        assert_eq!(
            words_from_bytes(&[0x01, 0x4b, 0x48, 0x20, 0x8e]),
            Err(StreamError::InvalidWordLength(40))
        );
        assert_eq!(words_to_bytes(&[]), Vec::<u8>::new());
    }

    #[test]
    fn bits() {
        assert_eq!(word_to_bits(ADD), "00000001010010110100100000100000");
        assert_eq!(word_to_bits(0), "0".repeat(32));
        assert_eq!(
            bit_lines(&[ADD, LW]),
            "00000001010010110100100000100000\n10001110000010011111111111111100\n"
        );
        assert_eq!(bit_lines(&[]), "");
    }

    #[test]
    fn raw_bits() {
        assert_eq!(bits_from_bytes(&[0x01, 0x4b]), "0000000101001011");
        assert_eq!(
            bits_from_bytes(&words_to_bytes(&[ADD, LW])),
            [word_to_bits(ADD), word_to_bits(LW)].concat()
        );
        assert_eq!(bits_from_bytes(&[]), "");
    }

    #[test]
    fn parse_bits() {
        assert_eq!(
            words_from_bits(&bit_lines(&[ADD, LW])).unwrap(),
            vec![ADD, LW]
        );
        assert_eq!(
            words_from_bits(&bits_from_bytes(&words_to_bytes(&[LW, ADD]))).unwrap(),
            vec![LW, ADD]
        );
        assert_eq!(
            words_from_bits("000000 01010 01011 01001 00000 100000\r\n").unwrap(),
            vec![ADD]
        );
    }

    #[test]
    fn bad_bits() {
        assert_eq!(words_from_bits(""), Err(StreamError::EmptyInput));
        assert_eq!(words_from_bits(" \n\n"), Err(StreamError::EmptyInput));
        assert_eq!(
            words_from_bits("0101"),
            Err(StreamError::InvalidWordLength(4))
        );
        assert_eq!(
            words_from_bits(&"1".repeat(33)),
            Err(StreamError::InvalidWordLength(33))
        );
        assert_eq!(
            words_from_bits("0012"),
            Err(StreamError::InvalidDigit { pos: 3, digit: '2' })
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            StreamError::InvalidWordLength(40).to_string(),
            "input is 40 bits long, which is not a multiple of 32"
        );
    }
}
