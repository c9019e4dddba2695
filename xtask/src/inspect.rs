// Licensed under the Apache-2.0 license

use anyhow::{anyhow, bail, Context, Result};
use boot_builder::words::words_to_bytes_le;
use boot_builder::{decode_header, read_hex_lines};
use boot_image::BootHeader;
use std::path::Path;

fn header_at(bytes: &[u8], base_addr: u32, addr: u32) -> Result<BootHeader> {
    let offset = addr.checked_sub(base_addr).ok_or_else(|| {
        anyhow!("address 0x{addr:x} is below the file base 0x{base_addr:x}")
    })? as usize;
    if offset >= bytes.len() {
        bail!(
            "address 0x{addr:x} is past the end of the file (0x{:x} bytes from 0x{base_addr:x})",
            bytes.len()
        );
    }
    Ok(decode_header(&bytes[offset..])?)
}

fn describe(header: &BootHeader) -> String {
    let img_type = match header.image_type() {
        Some(t) => t.name().to_string(),
        None => format!("unknown ({})", header.img_type.get()),
    };
    format!(
        "magic:       0x{:08x}\n\
         hdr_version: {}\n\
         hdr_len:     {}\n\
         img_type:    {}\n\
         payload:     off=0x{:x} len=0x{:x}\n\
         load_addr:   0x{:08x}\n\
         entry_addr:  0x{:08x}\n\
         signature:   off=0x{:x} len=0x{:x}\n\
         image_len:   0x{:x}",
        header.magic.get(),
        header.hdr_version.get(),
        header.hdr_len.get(),
        img_type,
        header.payload_off.get(),
        header.payload_len.get(),
        header.load_addr.get(),
        header.entry_addr.get(),
        header.sig_off.get(),
        header.sig_len.get(),
        header.image_len(),
    )
}

pub(crate) fn inspect(file: &Path, base_addr: u32, addr: u32) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let words = read_hex_lines(&text).with_context(|| format!("in {}", file.display()))?;
    let bytes = words_to_bytes_le(&words);

    let header = header_at(&bytes, base_addr, addr)?;
    println!("{}", describe(&header));

    header
        .check()
        .map_err(|reason| anyhow!("invalid boot header at 0x{addr:x}: {reason}"))?;
    let offset = (addr - base_addr) as usize;
    if offset as u64 + header.image_len() > bytes.len() as u64 {
        bail!(
            "container at 0x{addr:x} runs past the end of {}",
            file.display()
        );
    }
    println!("header OK");
    Ok(())
}
