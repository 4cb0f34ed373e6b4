#![deny(clippy::alloc_instead_of_core)]
#![deny(clippy::allow_attributes_without_reason)]
#![deny(clippy::cast_possible_truncation)]
#![deny(clippy::dbg_macro)]
#![deny(clippy::equatable_if_let)]
#![deny(clippy::filter_map_next)]
#![deny(clippy::flat_map_option)]
#![deny(clippy::map_unwrap_or)]
#![deny(clippy::missing_panics_doc)]
#![deny(clippy::option_if_let_else)]
#![deny(clippy::panic)]
#![deny(clippy::std_instead_of_alloc)]
#![deny(clippy::std_instead_of_core)]
#![deny(clippy::todo)]
#![deny(clippy::wildcard_enum_match_arm)]
#![deny(clippy::wildcard_imports)]
#![deny(macro_use_extern_crate)]
// TODO: enable this when things are stable
// #![deny(missing_docs)]
#![deny(unused_crate_dependencies)]
#![deny(unused_extern_crates)]
#![deny(unused_lifetimes)]
#![deny(unused_qualifications)]

use core::fmt::Display;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod asm;
mod bits;
mod disasm;
mod output;
use asm::assemble;
use bits::dump_bits;
use disasm::disassemble;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    #[clap(about = "Assemble source code into bit text and machine code")]
    Asm {
        source: PathBuf,
        #[clap(short, long, help = "Bit text output [default: <SOURCE>.bin]")]
        bin_path: Option<PathBuf>,
        #[clap(short, long, help = "Machine code output [default: <SOURCE>.mhc]")]
        mhc_path: Option<PathBuf>,
    },
    #[clap(about = "Disassemble machine code back into source code")]
    Disasm {
        input: PathBuf,
        #[clap(short, help = "Source output [default: <INPUT>.dis.asm]")]
        out_path: Option<PathBuf>,
        #[clap(long, help = "Read bit text instead of machine code")]
        bits: bool,
    },
    #[clap(about = "Dump machine code as a single string of bits")]
    Bits {
        input: PathBuf,
        #[clap(short, help = "Bit text output [default: <INPUT>.raw.bin]")]
        out_path: Option<PathBuf>,
    },
}

/// Logs every failed line or word and builds one error listing them all.
fn report<E: Display>(what: &str, errors: &[E]) -> anyhow::Error {
    let mut msg = format!("{} failed with {} error(s):", what, errors.len());
    for e in errors {
        warn!("{}: {}", what, e);
        msg.push_str("\n  ");
        msg.push_str(&e.to_string());
    }
    anyhow!(msg)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = match Args::parse().action {
        Action::Asm {
            source,
            bin_path,
            mhc_path,
        } => assemble(source, bin_path, mhc_path),
        Action::Disasm {
            input,
            out_path,
            bits,
        } => disassemble(input, out_path, bits),
        Action::Bits { input, out_path } => dump_bits(input, out_path),
    } {
        eprintln!("\x1b[1;31m{}\x1b[1;0m", e);
        std::process::exit(1);
    }
}
