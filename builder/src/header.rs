// Licensed under the Apache-2.0 license

use boot_image::{BootHeader, HeaderBind, BIND_LEN, HDR_LEN};
use zerocopy::{FromBytes, IntoBytes};

use crate::{BootImageError, BootImageResult};

/// Rounds `x` up to the next multiple of `align`, which must be a power of two.
pub const fn align_up(x: u32, align: u32) -> u32 {
    (x + (align - 1)) & !(align - 1)
}

/// Packs the header fields into the 64 byte on-image form. No relationship
/// between the fields is checked here.
pub fn encode_header(
    img_type: u32,
    payload_off: u32,
    payload_len: u32,
    load_addr: u32,
    entry_addr: u32,
    sig_off: u32,
    sig_len: u32,
) -> [u8; HDR_LEN] {
    let hdr = BootHeader::new(
        img_type,
        payload_off,
        payload_len,
        load_addr,
        entry_addr,
        sig_off,
        sig_len,
    );
    let mut out = [0u8; HDR_LEN];
    out.copy_from_slice(hdr.as_bytes());
    out
}

/// Reads a header from the start of `bytes`. Trailing bytes are ignored.
pub fn decode_header(bytes: &[u8]) -> BootImageResult<BootHeader> {
    BootHeader::read_from_prefix(bytes)
        .map(|(hdr, _)| hdr)
        .map_err(|_| BootImageError::TruncatedHeader {
            expected: HDR_LEN,
            actual: bytes.len(),
        })
}

/// Like [`decode_header`], but also rejects headers that break the container
/// invariants.
pub fn decode_valid_header(bytes: &[u8]) -> BootImageResult<BootHeader> {
    let hdr = decode_header(bytes)?;
    hdr.check().map_err(BootImageError::InvalidHeader)?;
    Ok(hdr)
}

/// The record signed together with the payload.
pub fn build_binding(
    img_type: u32,
    payload_len: u32,
    load_addr: u32,
    entry_addr: u32,
) -> [u8; BIND_LEN] {
    let mut out = [0u8; BIND_LEN];
    out.copy_from_slice(HeaderBind::new(img_type, payload_len, load_addr, entry_addr).as_bytes());
    out
}
