// Licensed under the Apache-2.0 license

use boot_image::ImageType;

use crate::container::build_container;
use crate::layout::{BootLayout, RegionPlacement};
use crate::signer::ImageSigner;
use crate::{BootImageError, BootImageResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    /// Absolute start address.
    pub start: u64,
    /// Absolute end address, exclusive.
    pub end: u64,
}

/// A zero-filled memory region that containers are copied into at fixed
/// absolute addresses.
#[derive(Debug)]
pub struct MemoryImage {
    base: u32,
    data: Vec<u8>,
    placements: Vec<Placement>,
}

impl MemoryImage {
    pub fn new(base: u32, size: usize) -> Self {
        Self {
            base,
            data: vec![0; size],
            placements: Vec::new(),
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Copies `blob` to absolute address `addr`.
    ///
    /// Fails if any byte of the blob would land outside the buffer, or if it
    /// shares a byte with anything placed earlier.
    pub fn place(&mut self, addr: u32, blob: &[u8], name: &str) -> BootImageResult<()> {
        let offset = i64::from(addr) - i64::from(self.base);
        let out_of_bounds = || BootImageError::PlacementOutOfBounds {
            region: name.to_string(),
            addr,
            offset,
            len: blob.len(),
            size: self.data.len(),
        };
        if offset < 0 || offset as u64 + blob.len() as u64 > self.data.len() as u64 {
            return Err(out_of_bounds());
        }

        let start = u64::from(addr);
        let end = start + blob.len() as u64;
        if let Some(other) = self
            .placements
            .iter()
            .find(|p| start < p.end && p.start < end)
        {
            return Err(BootImageError::PlacementOverlap {
                region: name.to_string(),
                start,
                end,
                other: other.name.clone(),
                other_start: other.start,
                other_end: other.end,
            });
        }

        let offset = offset as usize;
        self.data[offset..offset + blob.len()].copy_from_slice(blob);
        log::info!(
            "Placed {} at 0x{:x} ({} bytes, offset 0x{:x})",
            name,
            addr,
            blob.len(),
            offset
        );
        // Empty blobs occupy nothing and never conflict.
        if !blob.is_empty() {
            self.placements.push(Placement {
                name: name.to_string(),
                start,
                end,
            });
        }
        Ok(())
    }
}

/// The data SRAM image with both boot stages placed in it.
#[derive(Debug)]
pub struct PackedImages {
    pub memory: MemoryImage,
    pub rom_ext_len: usize,
    pub bl0_len: usize,
}

fn build_region(
    img_type: ImageType,
    region: &RegionPlacement,
    payload: &[u8],
    signer: &dyn ImageSigner,
) -> BootImageResult<Vec<u8>> {
    let image = build_container(
        img_type,
        payload,
        region.load_addr,
        region.entry_addr,
        signer,
    )?;
    log::info!(
        "{} image size: {} bytes @ 0x{:x}",
        img_type.name(),
        image.len(),
        region.image_addr
    );
    Ok(image)
}

/// Signs both stages and places them at their configured addresses.
pub fn pack_images(
    layout: &BootLayout,
    rom_ext_payload: &[u8],
    bl0_payload: &[u8],
    signer: &dyn ImageSigner,
) -> BootImageResult<PackedImages> {
    let rom_ext = build_region(ImageType::RomExt, &layout.rom_ext, rom_ext_payload, signer)?;
    let bl0 = build_region(ImageType::Bl0, &layout.bl0, bl0_payload, signer)?;

    let mut memory = MemoryImage::new(layout.sram_base, layout.sram_size as usize);
    memory.place(layout.rom_ext.image_addr, &rom_ext, "ROM_EXT image")?;
    memory.place(layout.bl0.image_addr, &bl0, "BL0 image")?;

    Ok(PackedImages {
        memory,
        rom_ext_len: rom_ext.len(),
        bl0_len: bl0.len(),
    })
}
