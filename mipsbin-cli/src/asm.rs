use std::{error::Error, fs::read_to_string, path::PathBuf};

use anyhow::anyhow;
use mipsbin_asm as asm;
use mipsbin_util as util;
use tracing::{debug, info};

use crate::{
    output::{commit, output_path},
    report,
};

pub fn assemble(
    path: PathBuf,
    bin_path: Option<PathBuf>,
    mhc_path: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    let bin_path = output_path(&path, bin_path, "bin")?;
    let mhc_path = output_path(&path, mhc_path, "mhc")?;
    if bin_path == mhc_path {
        Err(anyhow!("bit text and machine code outputs are the same file"))?;
    }

    debug!(path = %path.display(), "reading source");
    let source = read_to_string(&path).map_err(|e| anyhow!("failed to read source: {}", e))?;
    let program = asm::assemble(&source).map_err(|errors| report("assembly", &errors))?;

    commit(&[
        (bin_path, util::bit_lines(&program).into_bytes()),
        (mhc_path, util::words_to_bytes(&program)),
    ])?;
    info!(words = program.len(), "assembled {}", path.display());
    Ok(())
}
