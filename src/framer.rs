//! Block framer
//!
//! Splits input into `BLOCK_SIZE`-byte blocks, races the LZW and Huffman
//! codecs on each block in parallel, and keeps whichever payload is
//! smaller (ties go to Huffman). Frames are `u16`-length-prefixed and
//! always appear, on both sides, in ascending block order.

use crate::worker::{self, CodecCounts};
use crate::{huffman, lzw, Error, Options, Result, BLOCK_SIZE};
use std::io::Write;
use std::sync::atomic::Ordering;

const TAG_LZW: u8 = b'L';
const TAG_HUFFMAN: u8 = b'H';

fn block_bounds(total: usize) -> Vec<(usize, usize)> {
    let mut bounds = Vec::new();
    let mut start = 0;
    while start < total {
        let end = (start + BLOCK_SIZE).min(total);
        bounds.push((start, end));
        start = end;
    }
    bounds
}

fn compress_block(block: &[u8], counts: &CodecCounts) -> Result<Vec<u8>> {
    let lzw_out = lzw::encode(block);
    let huf_out = huffman::encode(block);

    let mut payload = Vec::with_capacity(1 + lzw_out.len().min(huf_out.len()));
    if huf_out.len() > lzw_out.len() {
        counts.lzw_selected.fetch_add(1, Ordering::Relaxed);
        payload.push(TAG_LZW);
        payload.extend_from_slice(&lzw_out);
    } else {
        counts.huffman_selected.fetch_add(1, Ordering::Relaxed);
        payload.push(TAG_HUFFMAN);
        payload.extend_from_slice(&huf_out);
    }

    if payload.len() > 0xFFFF {
        return Err(Error::BlockTooLarge);
    }
    Ok(payload)
}

fn decode_payload(payload: &&[u8]) -> Result<Vec<u8>> {
    let payload = *payload;
    match payload.first() {
        Some(&TAG_LZW) => lzw::decode(&payload[1..]),
        Some(&TAG_HUFFMAN) => huffman::decode(&payload[1..]),
        _ => Err(Error::CorruptedStream),
    }
}

/// Compress `input`, writing length-prefixed frames to `sink` in block
/// order. Up to `opts.workers` blocks race their codecs concurrently; each
/// batch of blocks is written to `sink` as soon as it joins, before the next
/// batch of workers starts.
pub fn compress<W: Write>(input: &[u8], sink: &mut W, opts: &Options) -> Result<()> {
    let bounds = block_bounds(input.len());
    let counts = CodecCounts::default();
    let mut frame_count = 0usize;
    worker::run_batched(
        &bounds,
        opts.workers,
        |&(start, end)| compress_block(&input[start..end], &counts),
        |batch| {
            for payload in batch {
                sink.write_all(&(payload.len() as u16).to_le_bytes())?;
                sink.write_all(payload)?;
            }
            frame_count += batch.len();
            Ok(())
        },
    )?;
    log::debug!(
        "wrote {} frames ({} lzw, {} huffman)",
        frame_count,
        counts.lzw_selected.load(Ordering::Relaxed),
        counts.huffman_selected.load(Ordering::Relaxed)
    );
    Ok(())
}

/// Convenience wrapper returning the compressed bytes directly.
pub fn compress_slice(input: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    compress(input, &mut out, opts)?;
    Ok(out)
}

/// Decompress a frame stream produced by [`compress`], writing the
/// reconstructed bytes to `sink` in frame order.
pub fn decompress<W: Write>(input: &[u8], sink: &mut W, opts: &Options) -> Result<()> {
    let mut frames: Vec<&[u8]> = Vec::new();
    let mut offset = 0usize;
    while offset < input.len() {
        if offset + 2 > input.len() {
            return Err(Error::CorruptedStream);
        }
        let size = u16::from_le_bytes([input[offset], input[offset + 1]]) as usize;
        offset += 2;
        if offset + size > input.len() {
            return Err(Error::CorruptedStream);
        }
        frames.push(&input[offset..offset + size]);
        offset += size;
    }

    worker::run_batched(&frames, opts.workers, decode_payload, |batch| {
        for chunk in batch {
            sink.write_all(chunk)?;
        }
        Ok(())
    })?;
    Ok(())
}

/// Convenience wrapper returning the decompressed bytes directly.
pub fn decompress_slice(input: &[u8], opts: &Options) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    decompress(input, &mut out, opts)?;
    Ok(out)
}
