// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use clap_num::maybe_hex;
use std::path::PathBuf;

mod hex_tools;
mod inspect;
mod pack;

use pack::PackArgs;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Xtask {
    /// Log every step, including header fields and signatures
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign ROM_EXT and BL0 and pack them into the data SRAM image
    Pack(PackArgs),
    /// Wrap a ROM_EXT binary in an unsigned container and write it as word hex
    RomExtHex {
        /// Path to the ROM_EXT binary
        #[arg(long, value_name = "ROM_EXT_BIN")]
        rom_ext_bin: PathBuf,

        /// Output word hex file
        #[arg(long, value_name = "FILE")]
        out_hex: PathBuf,

        #[arg(long, value_parser=maybe_hex::<u32>, default_value = "0x10000")]
        load_addr: u32,

        #[arg(long, value_parser=maybe_hex::<u32>, default_value = "0x10000")]
        entry_addr: u32,
    },
    /// Convert any binary to little-endian word hex
    Bin2hex {
        /// Input binary
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Copy a word hex image over a base word hex file at an address
    Overlay {
        #[arg(value_name = "BASE_HEX")]
        base: PathBuf,

        #[arg(value_name = "IMAGE_HEX")]
        image: PathBuf,

        #[arg(value_name = "OUT_HEX")]
        out: PathBuf,

        /// Address of the first word in the base file
        #[arg(long, value_parser=maybe_hex::<u32>, default_value = "0x20000")]
        base_addr: u32,

        /// Address the image is copied to
        #[arg(long, value_parser=maybe_hex::<u32>, default_value = "0x21000")]
        image_addr: u32,
    },
    /// Decode and check the container header found in a word hex file
    Inspect {
        #[arg(value_name = "IMAGE_HEX")]
        file: PathBuf,

        /// Address of the first word in the file
        #[arg(long, value_parser=maybe_hex::<u32>, default_value = "0x20000")]
        base_addr: u32,

        /// Address of the container header
        #[arg(long, value_parser=maybe_hex::<u32>)]
        addr: Option<u32>,
    },
}

fn main() {
    let cli = Xtask::parse();
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = simple_logger::SimpleLogger::new().with_level(level).init();

    let result = match &cli.xtask {
        Commands::Pack(args) => pack::pack(args),
        Commands::RomExtHex {
            rom_ext_bin,
            out_hex,
            load_addr,
            entry_addr,
        } => hex_tools::rom_ext_hex(rom_ext_bin, out_hex, *load_addr, *entry_addr),
        Commands::Bin2hex { input, out } => hex_tools::bin2hex(input, out.as_deref()),
        Commands::Overlay {
            base,
            image,
            out,
            base_addr,
            image_addr,
        } => hex_tools::overlay(base, image, out, *base_addr, *image_addr),
        Commands::Inspect {
            file,
            base_addr,
            addr,
        } => inspect::inspect(file, *base_addr, addr.unwrap_or(*base_addr)),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    });
}
