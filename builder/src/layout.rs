// Licensed under the Apache-2.0 license

use std::path::Path;

use serde::Deserialize;

use crate::{BootImageError, BootImageResult};

/// Where a container sits in SRAM and where its payload runs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegionPlacement {
    pub image_addr: u32,
    pub load_addr: u32,
    pub entry_addr: u32,
}

/// Memory layout of the data SRAM image the boot ROM reads containers from.
///
/// The defaults match the reference target. Any field can be overridden from
/// a TOML file, for example:
///
/// ```toml
/// sram_base = 0x20000
/// sram_size = 0x10000
///
/// [bl0]
/// image_addr = 0x24000
/// load_addr = 0x12000
/// entry_addr = 0x12000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootLayout {
    pub sram_base: u32,
    pub sram_size: u32,
    pub rom_ext: RegionPlacement,
    pub bl0: RegionPlacement,
}

pub const EXEC_BASE: u32 = 0x1_0000;
pub const BL0_ENTRY_BASE: u32 = EXEC_BASE + 0x2000;

impl Default for BootLayout {
    fn default() -> Self {
        BootLayout {
            sram_base: 0x2_0000,
            sram_size: 0x1_0000,
            rom_ext: RegionPlacement {
                image_addr: 0x2_1000,
                load_addr: EXEC_BASE,
                entry_addr: EXEC_BASE,
            },
            bl0: RegionPlacement {
                image_addr: 0x2_3000,
                load_addr: BL0_ENTRY_BASE,
                entry_addr: BL0_ENTRY_BASE,
            },
        }
    }
}

impl BootLayout {
    pub fn from_toml_str(path: &Path, contents: &str) -> BootImageResult<Self> {
        toml::from_str(contents).map_err(|e| BootImageError::Layout {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    pub fn from_toml_file(path: &Path) -> BootImageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| BootImageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &contents)
    }

    /// One past the last SRAM address, widened so it cannot overflow.
    pub fn sram_end(&self) -> u64 {
        u64::from(self.sram_base) + u64::from(self.sram_size)
    }
}
