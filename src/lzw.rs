//! Variable-width LZW compression
//!
//! Code width starts at `MIN_CODE_SIZE + 1` bits and grows monotonically up
//! to `MAX_BITS` within a dictionary generation, resetting to the minimum
//! on every `CLEAR`. This is the coder both the block framer and the
//! Huffman table serializer (for its own embedded table) race against.

use crate::{Error, Result};
use crate::bitio::{BitReader, BitWriter};
use std::collections::HashMap;

/// Minimum code size in bits; the starting code width is one more than this.
pub const MIN_CODE_SIZE: u32 = 8;
/// Maximum code width in bits.
pub const MAX_BITS: u32 = 12;
/// Dictionary-reset code.
pub const CLEAR: u16 = 256;
/// End-of-input code.
pub const EOI: u16 = 257;
/// First code available for assignment after the reserved codes.
pub const FIRST_FREE: u16 = 258;
/// Largest code the dictionary can hold.
pub const MAX_CODE: u16 = (1u32 << MAX_BITS) as u16 - 1;
/// Early-change growth rule is not used by this codec.
const EARLY_CHANGE: bool = false;

fn threshold(width: u32) -> u32 {
    (1u32 << width) - if EARLY_CHANGE { 1 } else { 0 }
}

/// Encode `input` as a CLEAR-prefixed, EOI-terminated LZW bit stream.
pub fn encode(input: &[u8]) -> Vec<u8> {
    let mut writer = BitWriter::new();
    let mut dictionary: HashMap<Vec<u8>, u16> = HashMap::new();
    init_encode_dict(&mut dictionary);

    let mut width = MIN_CODE_SIZE + 1;
    let mut next_code = FIRST_FREE;
    writer.write(CLEAR as u64, width);

    let mut w: Vec<u8> = Vec::new();
    for &k in input {
        let mut wk = w.clone();
        wk.push(k);
        if dictionary.contains_key(&wk) {
            w = wk;
            continue;
        }

        writer.write(*dictionary.get(&w).expect("current match always known") as u64, width);

        if next_code <= MAX_CODE {
            dictionary.insert(wk, next_code);
            next_code += 1;
            if next_code as u32 > threshold(width) && width < MAX_BITS {
                width += 1;
            }
        } else {
            writer.write(CLEAR as u64, width);
            dictionary.clear();
            init_encode_dict(&mut dictionary);
            width = MIN_CODE_SIZE + 1;
            next_code = FIRST_FREE;
        }

        w = vec![k];
    }

    if !w.is_empty() {
        writer.write(*dictionary.get(&w).expect("final match always known") as u64, width);
    }
    writer.write(EOI as u64, width);
    writer.into_bytes()
}

fn init_encode_dict(dictionary: &mut HashMap<Vec<u8>, u16>) {
    for b in 0..256u16 {
        dictionary.insert(vec![b as u8], b);
    }
}

/// A decode-side dictionary entry: the code's prefix and trailing byte.
/// For the 256 root entries, `prefix == code` marks the chain's end.
#[derive(Clone, Copy)]
struct Entry {
    prefix: u16,
    last: u8,
}

fn init_decode_dict(dictionary: &mut HashMap<u16, Entry>) {
    dictionary.clear();
    for b in 0..256u16 {
        dictionary.insert(b, Entry { prefix: b, last: b as u8 });
    }
}

fn entry_bytes(dictionary: &HashMap<u16, Entry>, code: u16) -> Vec<u8> {
    let mut rev = Vec::new();
    let mut c = code;
    loop {
        let e = dictionary[&c];
        rev.push(e.last);
        if e.prefix == c {
            break;
        }
        c = e.prefix;
    }
    rev.reverse();
    rev
}

/// Decode an LZW bit stream produced by [`encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(input);
    let mut dictionary: HashMap<u16, Entry> = HashMap::new();
    init_decode_dict(&mut dictionary);

    let mut width = MIN_CODE_SIZE + 1;
    let mut next_code = FIRST_FREE;

    let first = reader.read(width)? as u16;
    if first != CLEAR {
        return Err(Error::InvalidFormat);
    }

    let mut output = Vec::new();
    let mut prev: Option<u16> = None;

    loop {
        let code = reader.read(width)? as u16;
        if code == EOI {
            break;
        }
        if code == CLEAR {
            init_decode_dict(&mut dictionary);
            width = MIN_CODE_SIZE + 1;
            next_code = FIRST_FREE;
            prev = None;
            continue;
        }

        let entry = if dictionary.contains_key(&code) {
            entry_bytes(&dictionary, code)
        } else {
            match prev {
                Some(p) if code == next_code => {
                    let mut e = entry_bytes(&dictionary, p);
                    e.push(e[0]);
                    e
                }
                _ => return Err(Error::CorruptedStream),
            }
        };

        if let Some(p) = prev {
            if next_code <= MAX_CODE {
                dictionary.insert(next_code, Entry { prefix: p, last: entry[0] });
                next_code += 1;
                if next_code as u32 >= threshold(width) && width < MAX_BITS {
                    width += 1;
                }
            }
        }

        output.extend_from_slice(&entry);
        prev = Some(code);
    }

    Ok(output)
}
