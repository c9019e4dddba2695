// Licensed under the Apache-2.0 license

#![cfg_attr(target_arch = "riscv32", no_std)]

//! On-image records shared by the packer and the boot ROM.
//!
//! Every multi-byte field is little-endian regardless of host byte order.

use core::mem::size_of;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use zerocopy::byteorder::{LittleEndian, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// "IMG0" read as a little-endian word.
pub const BOOT_MAGIC: u32 = u32::from_le_bytes(*b"IMG0");
pub const HDR_VERSION: u16 = 0x0001;
pub const HDR_LEN: usize = size_of::<BootHeader>();
pub const BIND_LEN: usize = size_of::<HeaderBind>();

/// Raw ECDSA P-256 signature, r || s.
pub const SIG_LEN: usize = 64;
pub const SIG_COMPONENT_LEN: usize = SIG_LEN / 2;

/// Signature offsets are aligned to this many bytes.
pub const SIG_ALIGN: u32 = 4;

const HDR_RESERVED_WORDS: usize = 7;

const _: () = assert!(HDR_LEN == 64);
const _: () = assert!(BIND_LEN == 16);

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum ImageType {
    RomExt = 1,
    Bl0 = 2,
}

impl ImageType {
    pub fn name(self) -> &'static str {
        match self {
            ImageType::RomExt => "ROM_EXT",
            ImageType::Bl0 => "BL0",
        }
    }
}

/// Fixed-size 64 byte header that precedes every payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct BootHeader {
    pub magic: U32<LittleEndian>,
    pub hdr_version: U16<LittleEndian>,
    pub hdr_len: U16<LittleEndian>,

    pub img_type: U32<LittleEndian>,
    pub payload_off: U32<LittleEndian>, // offset from the image base to the payload
    pub payload_len: U32<LittleEndian>,

    pub load_addr: U32<LittleEndian>,  // where the payload is copied to
    pub entry_addr: U32<LittleEndian>, // where execution starts

    pub sig_off: U32<LittleEndian>, // offset from the image base to the signature
    pub sig_len: U32<LittleEndian>,

    pub reserved: [U32<LittleEndian>; HDR_RESERVED_WORDS],
}

impl BootHeader {
    pub fn new(
        img_type: u32,
        payload_off: u32,
        payload_len: u32,
        load_addr: u32,
        entry_addr: u32,
        sig_off: u32,
        sig_len: u32,
    ) -> Self {
        Self {
            magic: BOOT_MAGIC.into(),
            hdr_version: HDR_VERSION.into(),
            hdr_len: (HDR_LEN as u16).into(),
            img_type: img_type.into(),
            payload_off: payload_off.into(),
            payload_len: payload_len.into(),
            load_addr: load_addr.into(),
            entry_addr: entry_addr.into(),
            sig_off: sig_off.into(),
            sig_len: sig_len.into(),
            reserved: [U32::new(0); HDR_RESERVED_WORDS],
        }
    }

    pub fn image_type(&self) -> Option<ImageType> {
        ImageType::try_from(self.img_type.get()).ok()
    }

    /// Total number of bytes the header describes: header, payload, padding
    /// and signature.
    pub fn image_len(&self) -> u64 {
        u64::from(self.sig_off.get()) + u64::from(self.sig_len.get())
    }

    /// Checks the structural invariants of the header. Returns a description
    /// of the first violated invariant.
    pub fn check(&self) -> Result<(), &'static str> {
        if self.magic.get() != BOOT_MAGIC {
            return Err("bad magic");
        }
        if self.hdr_version.get() != HDR_VERSION {
            return Err("unsupported header version");
        }
        if usize::from(self.hdr_len.get()) != HDR_LEN {
            return Err("hdr_len is not the header size");
        }
        if self.image_type().is_none() {
            return Err("unknown image type");
        }
        if self.payload_off.get() != u32::from(self.hdr_len.get()) {
            return Err("payload_off does not follow the header");
        }
        let payload_end = u64::from(self.payload_off.get()) + u64::from(self.payload_len.get());
        let aligned_end = (payload_end + u64::from(SIG_ALIGN) - 1) & !(u64::from(SIG_ALIGN) - 1);
        if self.sig_off.get() % SIG_ALIGN != 0 {
            return Err("sig_off is not 4-byte aligned");
        }
        if u64::from(self.sig_off.get()) != aligned_end {
            return Err("sig_off does not immediately follow the payload");
        }
        if self.sig_len.get() as usize != SIG_LEN {
            return Err("sig_len is not 64");
        }
        if self.reserved.iter().any(|w| w.get() != 0) {
            return Err("reserved words are not zero");
        }
        Ok(())
    }
}

/// Header fields that are signed together with the payload so a signature
/// cannot be moved onto a different type, length or address.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct HeaderBind {
    pub img_type: U32<LittleEndian>,
    pub payload_len: U32<LittleEndian>,
    pub load_addr: U32<LittleEndian>,
    pub entry_addr: U32<LittleEndian>,
}

impl HeaderBind {
    pub fn new(img_type: u32, payload_len: u32, load_addr: u32, entry_addr: u32) -> Self {
        Self {
            img_type: img_type.into(),
            payload_len: payload_len.into(),
            load_addr: load_addr.into(),
            entry_addr: entry_addr.into(),
        }
    }
}

impl From<&BootHeader> for HeaderBind {
    fn from(hdr: &BootHeader) -> Self {
        Self {
            img_type: hdr.img_type,
            payload_len: hdr.payload_len,
            load_addr: hdr.load_addr,
            entry_addr: hdr.entry_addr,
        }
    }
}
