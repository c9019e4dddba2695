// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use boot_builder::output::write_atomic;
use boot_builder::words::{overlay_words, word_offset};
use boot_builder::{build_unsigned_container, read_hex_lines, to_words_le, write_hex_lines};
use boot_image::ImageType;
use std::io::Write;
use std::path::Path;

fn read_words(path: &Path) -> Result<Vec<u32>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    read_hex_lines(&text).with_context(|| format!("in {}", path.display()))
}

pub(crate) fn rom_ext_hex(
    rom_ext_bin: &Path,
    out_hex: &Path,
    load_addr: u32,
    entry_addr: u32,
) -> Result<()> {
    let payload = std::fs::read(rom_ext_bin)
        .with_context(|| format!("failed to read {}", rom_ext_bin.display()))?;
    let image = build_unsigned_container(ImageType::RomExt, &payload, load_addr, entry_addr)?;
    write_atomic(out_hex, write_hex_lines(to_words_le(&image)).as_bytes())?;
    println!(
        "Wrote: {} ({} bytes, unsigned)",
        out_hex.display(),
        image.len()
    );
    Ok(())
}

pub(crate) fn bin2hex(input: &Path, out: Option<&Path>) -> Result<()> {
    let bytes =
        std::fs::read(input).with_context(|| format!("failed to read {}", input.display()))?;
    let text = write_hex_lines(to_words_le(&bytes));
    match out {
        Some(path) => {
            write_atomic(path, text.as_bytes())?;
            log::info!("Wrote: {}", path.display());
        }
        None => std::io::stdout()
            .lock()
            .write_all(text.as_bytes())
            .context("failed to write to stdout")?,
    }
    Ok(())
}

pub(crate) fn overlay(
    base: &Path,
    image: &Path,
    out: &Path,
    base_addr: u32,
    image_addr: u32,
) -> Result<()> {
    let base_words = read_words(base)?;
    let image_words = read_words(image)?;
    let offset = word_offset(base_addr, image_addr)?;
    let merged = overlay_words(base_words, &image_words, offset);
    write_atomic(out, write_hex_lines(merged).as_bytes())?;
    println!(
        "Wrote: {} ({} words @ 0x{:x})",
        out.display(),
        image_words.len(),
        image_addr
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.hex");
        let image = dir.path().join("image.hex");
        let out = dir.path().join("out.hex");
        std::fs::write(&base, write_hex_lines([1, 2, 3, 4])).unwrap();
        std::fs::write(&image, "deadbeef\n\ncafef00d\n").unwrap();

        overlay(&base, &image, &out, 0x2_0000, 0x2_0008).unwrap();
        assert_eq!(
            read_words(&out).unwrap(),
            vec![1, 2, 0xdead_beef, 0xcafe_f00d]
        );
    }

    #[test]
    fn test_overlay_reports_bad_line() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.hex");
        let image = dir.path().join("image.hex");
        std::fs::write(&base, "00000000\n").unwrap();
        std::fs::write(&image, "xyz\n").unwrap();

        let err = overlay(&base, &image, &dir.path().join("out.hex"), 0, 0).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("image.hex"));
        assert!(msg.contains("line 1"));
        assert!(!dir.path().join("out.hex").exists());
    }

    #[test]
    fn test_rom_ext_hex_file() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("rom_ext.bin");
        let out = dir.path().join("rom_ext.hex");
        std::fs::write(&bin, [0u8; 100]).unwrap();

        rom_ext_hex(&bin, &out, 0x1_0000, 0x1_0000).unwrap();
        let words = read_words(&out).unwrap();
        assert_eq!(words.len(), 57);
        assert_eq!(words[0], boot_image::BOOT_MAGIC);
    }

    #[test]
    fn test_bin2hex_file() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("any.bin");
        let out = dir.path().join("any.hex");
        std::fs::write(&bin, [0x01, 0x02, 0x03, 0x04, 0x05]).unwrap();

        bin2hex(&bin, Some(&out)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&out).unwrap(),
            "04030201\n00000005\n"
        );
    }
}
