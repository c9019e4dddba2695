// Licensed under the Apache-2.0 license

//! Word-hex memory files: one little-endian 32-bit word per line, written as
//! eight lowercase hex digits.

use std::iter::FusedIterator;
use std::slice::Chunks;

use crate::{BootImageError, BootImageResult};

pub const WORD_SIZE: usize = 4;
const HEX_DIGITS: usize = 8;

/// Little-endian words of a byte slice. The last word is zero padded.
#[derive(Clone, Debug)]
pub struct WordsLe<'a> {
    chunks: Chunks<'a, u8>,
}

impl Iterator for WordsLe<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        self.chunks.next().map(|chunk| {
            let mut word = [0u8; WORD_SIZE];
            word[..chunk.len()].copy_from_slice(chunk);
            u32::from_le_bytes(word)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chunks.size_hint()
    }
}

impl ExactSizeIterator for WordsLe<'_> {}
impl FusedIterator for WordsLe<'_> {}

pub fn to_words_le(bytes: &[u8]) -> WordsLe<'_> {
    WordsLe {
        chunks: bytes.chunks(WORD_SIZE),
    }
}

pub fn words_to_bytes_le(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

pub fn write_hex_lines(words: impl IntoIterator<Item = u32>) -> String {
    let words = words.into_iter();
    let mut out = String::with_capacity(words.size_hint().0 * (HEX_DIGITS + 1));
    for word in words {
        out.push_str(&format!("{word:08x}\n"));
    }
    out
}

pub fn read_hex_lines(text: &str) -> BootImageResult<Vec<u32>> {
    let mut words = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let malformed = |reason| BootImageError::MalformedHexLine {
            line: idx + 1,
            content: line.to_string(),
            reason,
        };
        if trimmed.len() != HEX_DIGITS {
            return Err(malformed("expected exactly 8 hex digits"));
        }
        if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed("not a hex number"));
        }
        let word = u32::from_str_radix(trimmed, 16).map_err(|_| malformed("not a hex number"))?;
        words.push(word);
    }
    Ok(words)
}

/// Copies `image` over `base` starting at word `word_offset`, growing `base`
/// with zero words when the image runs past its end.
pub fn overlay_words(mut base: Vec<u32>, image: &[u32], word_offset: usize) -> Vec<u32> {
    let end = word_offset + image.len();
    if end > base.len() {
        base.resize(end, 0);
    }
    base[word_offset..end].copy_from_slice(image);
    base
}

/// Word index of `image_addr` inside a word file that starts at `base_addr`.
pub fn word_offset(base_addr: u32, image_addr: u32) -> BootImageResult<usize> {
    let offset = image_addr
        .checked_sub(base_addr)
        .ok_or(BootImageError::PlacementOutOfBounds {
            region: "overlay image".to_string(),
            addr: image_addr,
            offset: i64::from(image_addr) - i64::from(base_addr),
            len: 0,
            size: 0,
        })?;
    if offset as usize % WORD_SIZE != 0 {
        return Err(BootImageError::MisalignedOffset {
            what: "image offset",
            value: offset.into(),
            align: WORD_SIZE as u32,
        });
    }
    Ok(offset as usize / WORD_SIZE)
}
