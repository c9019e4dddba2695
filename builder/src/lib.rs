// Licensed under the Apache-2.0 license

//! Builds signed secure boot containers and the data SRAM image that carries
//! them to the boot ROM.

pub mod container;
mod error;
pub mod header;
pub mod layout;
pub mod memory_image;
pub mod output;
pub mod pubkey;
pub mod signer;
pub mod words;

pub use container::{build_container, build_unsigned_container, ContainerLayout};
pub use error::{BootImageError, BootImageResult};
pub use header::{align_up, build_binding, decode_header, decode_valid_header, encode_header};
pub use layout::{BootLayout, RegionPlacement};
pub use memory_image::{pack_images, MemoryImage, PackedImages, Placement};
pub use pubkey::{extract_xy, public_key_from_pem, render_trusted_pubkey_header};
pub use signer::{der_to_raw, sign, ImageSigner, OpensslSigner, P256Signer, RawSignature};
pub use words::{read_hex_lines, to_words_le, write_hex_lines};
