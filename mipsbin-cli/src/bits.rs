use std::{error::Error, fs::read, path::PathBuf};

use anyhow::anyhow;
use mipsbin_util as util;
use tracing::{debug, info};

use crate::output::{commit, output_path};

pub fn dump_bits(path: PathBuf, out_path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let out_path = output_path(&path, out_path, "raw.bin")?;

    debug!(path = %path.display(), "reading machine code");
    let bytes = read(&path).map_err(|e| anyhow!("failed to read input: {}", e))?;
    // only whole words are dumped
    util::words_from_bytes(&bytes).map_err(|e| anyhow!("invalid machine code: {}", e))?;

    commit(&[(out_path, util::bits_from_bytes(&bytes).into_bytes())])?;
    info!(bytes = bytes.len(), "dumped bits of {}", path.display());
    Ok(())
}
