use std::{
    error::Error,
    fs::{read, read_to_string},
    path::PathBuf,
};

use anyhow::anyhow;
use mipsbin_disasm as disasm;
use mipsbin_util as util;
use tracing::{debug, info};

use crate::{
    output::{commit, output_path},
    report,
};

pub fn disassemble(
    path: PathBuf,
    out_path: Option<PathBuf>,
    bits: bool,
) -> Result<(), Box<dyn Error>> {
    let out_path = output_path(&path, out_path, "dis.asm")?;

    debug!(path = %path.display(), bits, "reading machine code");
    let words = if bits {
        let text = read_to_string(&path).map_err(|e| anyhow!("failed to read input: {}", e))?;
        util::words_from_bits(&text)
    } else {
        let bytes = read(&path).map_err(|e| anyhow!("failed to read input: {}", e))?;
        util::words_from_bytes(&bytes)
    }
    .map_err(|e| anyhow!("invalid machine code: {}", e))?;

    let lines = disasm::disassemble_all(&words).map_err(|errors| report("disassembly", &errors))?;
    let mut source = lines.join("\n");
    source.push('\n');

    commit(&[(out_path, source.into_bytes())])?;
    info!(words = words.len(), "disassembled {}", path.display());
    Ok(())
}
