//! # zblock
//!
//! Block-parallel lossless compression built from two block-local codecs:
//! * `lzw` is a variable-width LZW coder with dictionary resets and the
//!   classic KwKwK edge case.
//! * `huffman` is a static Huffman coder whose code table is itself
//!   LZW-compressed and embedded in the block payload.
//!
//! `framer` splits an input buffer into fixed-size blocks, races both coders
//! on each block, and keeps whichever produced the smaller payload. `worker`
//! runs that race across blocks in parallel while preserving block order on
//! the way out.
//!
//! ## Buffer example
//!
//! ```
//! use zblock::{compress_slice, decompress_slice, Options};
//! let text = "TOBEORNOTTOBEORTOBEORNOT".as_bytes();
//! let packed = compress_slice(text,&Options::default()).expect("compression failed");
//! let unpacked = decompress_slice(&packed,&Options::default()).expect("expansion failed");
//! assert_eq!(text.to_vec(),unpacked);
//! ```

pub mod bitio;
pub mod lzw;
pub mod huffman;
pub mod framer;
pub mod worker;

pub use framer::{compress, compress_slice, decompress, decompress_slice};

/// Size of an uncompressed block, `2^BIT_SIZE - 1` with `BIT_SIZE = 12`.
pub const BLOCK_SIZE: usize = 4095;

/// Errors produced by the core codec and framer.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// First LZW code was not `CLEAR`, or a Huffman marker byte was not
    /// `0x00`/`0xAA`.
    #[error("invalid format")]
    InvalidFormat,
    /// An LZW code referenced neither a known dictionary entry nor the
    /// KwKwK case, a Huffman decode ran out of bits with no prefix match,
    /// or a frame's tag byte was not `'L'`/`'H'`.
    #[error("corrupted stream")]
    CorruptedStream,
    /// A bit reader was asked to read past the end of its buffer.
    #[error("end of stream")]
    EndOfStream,
    /// A compressed block payload exceeded `0xFFFF` bytes.
    #[error("compressed block too large")]
    BlockTooLarge,
    /// The output sink failed.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Options controlling the block framer.
///
/// Only the worker count is tunable at runtime; `BLOCK_SIZE`, the LZW
/// code-width bounds, and `EARLY_CHANGE` are compile-time constants of the
/// codecs themselves.
#[derive(Clone, Copy, Debug)]
pub struct Options {
    /// Maximum number of concurrent block workers, must be at least 1.
    pub workers: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}
