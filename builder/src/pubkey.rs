// Licensed under the Apache-2.0 license

use std::path::Path;

use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::DecodePublicKey;
use p256::PublicKey;

use crate::{BootImageError, BootImageResult};

const UNCOMPRESSED_MARKER: u8 = 0x04;
const UNCOMPRESSED_LEN: usize = 65;
pub const PUBKEY_XY_LEN: usize = 64;

/// Splits a SEC1 uncompressed point (0x04 || X || Y) into X || Y.
pub fn extract_xy(point: &[u8]) -> BootImageResult<[u8; PUBKEY_XY_LEN]> {
    if point.len() != UNCOMPRESSED_LEN || point[0] != UNCOMPRESSED_MARKER {
        return Err(BootImageError::MalformedKeyEncoding {
            expected: UNCOMPRESSED_LEN,
            actual: point.len(),
            marker: point.first().copied(),
        });
    }
    let mut xy = [0u8; PUBKEY_XY_LEN];
    xy.copy_from_slice(&point[1..]);
    Ok(xy)
}

pub fn public_key_from_pem(pem: &str) -> BootImageResult<[u8; PUBKEY_XY_LEN]> {
    let key = PublicKey::from_public_key_pem(pem.trim())
        .map_err(|e| BootImageError::InvalidKey(format!("public key: {e}")))?;
    extract_xy(key.to_encoded_point(false).as_bytes())
}

pub fn public_key_from_pem_file(path: &Path) -> BootImageResult<[u8; PUBKEY_XY_LEN]> {
    let pem = std::fs::read_to_string(path).map_err(|source| BootImageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    public_key_from_pem(&pem)
}

/// C header the boot ROM compiles in as its trust anchor.
pub fn render_trusted_pubkey_header(xy: &[u8; PUBKEY_XY_LEN]) -> String {
    let mut out = String::from(
        "// Auto-generated by cargo xtask pack\n#pragma once\n#include <stdint.h>\n\n",
    );
    out.push_str("static const uint8_t TRUSTED_PUBKEY_XY[64] = {\n");
    for line in xy.chunks(16) {
        let bytes: String = line.iter().map(|byte| format!("0x{byte:02x},")).collect();
        out.push_str(&bytes);
        out.push('\n');
    }
    out.push_str("};\n");
    out
}
