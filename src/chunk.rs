//! Split an input stream into chunks that can be counted independently
//!
//! Chunks cover the stream exactly once, in order, with no gaps and no overlaps. In `Lines` mode
//! a chunk is extended to the end of its last line so that no token is ever cut in half. In
//! `Bytes` mode chunks are exactly `chunk_size` bytes (except the last), and a word straddling a
//! boundary is counted as two fragments. That's an approximation, accepted for speed on inputs
//! without newlines.
use std::cmp;
use std::io::{self, BufRead, BufReader, Read};
use std::str::FromStr;
use errors::*;

/// 64 MiB
pub const DEFAULT_CHUNK_SIZE: usize = 64 << 20;
/// Chunk buffers bigger than this grow as they fill rather than up front
const PREALLOC_LIMIT: usize = DEFAULT_CHUNK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkMode {
    /// Cut only at line ends
    Lines,
    /// Cut every `chunk_size` bytes, wherever that is
    Bytes,
}

impl Default for ChunkMode {
    fn default() -> ChunkMode { ChunkMode::Lines }
}

impl FromStr for ChunkMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<ChunkMode> {
        match s {
            "lines" => Ok(ChunkMode::Lines),
            "bytes" => Ok(ChunkMode::Bytes),
            other => Err(Error::InvalidConfig(
                format!("chunk mode must be \"lines\" or \"bytes\", not {:?}", other))),
        }
    }
}

/// A contiguous piece of the input, owned by whichever worker receives it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position in the stream, starting from 0
    pub index: usize,
    /// Byte offset of the first byte of `data`
    pub offset: u64,
    pub data: Vec<u8>,
}

/// Lazily read chunks from a stream
pub struct ChunkReader<R> {
    reader: BufReader<R>,
    chunk_size: usize,
    mode: ChunkMode,
    offset: u64,
    index: usize,
    done: bool,
}

impl<R: Read> ChunkReader<R> {
    /// A `chunk_size` of 0 is treated as 1.
    pub fn new(reader: R, chunk_size: usize, mode: ChunkMode) -> ChunkReader<R> {
        ChunkReader {
            reader: BufReader::new(reader),
            chunk_size: cmp::max(1, chunk_size),
            mode: mode,
            offset: 0,
            index: 0,
            done: false,
        }
    }

    /// Read the next chunk into `data`, which keeps whatever was read even on error
    fn fill(&mut self, data: &mut Vec<u8>) -> io::Result<()> {
        // Size the buffer once instead of letting read_to_end double its way up
        data.reserve_exact(cmp::min(self.chunk_size, PREALLOC_LIMIT));
        (&mut self.reader).take(self.chunk_size as u64).read_to_end(data)?;
        if data.len() < self.chunk_size {
            // Short read means the stream is over
            self.done = true;
            return Ok(());
        }
        if self.mode == ChunkMode::Lines && data.last() != Some(&b'\n') {
            let extra = self.reader.read_until(b'\n', data)?;
            if extra > self.chunk_size {
                warn!("A long line near byte {} made a {} byte chunk (chunk size is {}); \
                    keeping it in one oversize chunk.",
                    self.offset, data.len(), self.chunk_size);
            }
        }
        Ok(())
    }
}

impl<R: Read> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut data = vec![];
        if let Err(err) = self.fill(&mut data) {
            // Nothing after a failed read can be trusted to line up
            self.done = true;
            return Some(Err(Error::StreamRead {
                offset: self.offset + data.len() as u64,
                source: err,
            }));
        }
        if data.is_empty() {
            self.done = true;
            return None;
        }
        let chunk = Chunk { index: self.index, offset: self.offset, data: data };
        self.index += 1;
        self.offset += chunk.data.len() as u64;
        Some(Ok(chunk))
    }
}
