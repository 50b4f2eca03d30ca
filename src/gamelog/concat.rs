use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Concatenate every `*.csv` file in `dir`, in file-name order, into
/// `out` under one shared header.
///
/// Rows are copied verbatim. Every file must carry the same header as the
/// first one; headers are all checked before `out` is touched. `out` may
/// live inside `dir`; it is never read as input. Returns the number of data
/// rows written.
pub fn concat_logs(dir: impl AsRef<Path>, out: impl AsRef<Path>) -> Result<usize> {
    let out = out.as_ref();
    let inputs = csv_files(dir.as_ref(), out)?;
    let header = shared_header(&inputs)?;

    let mut writer = BufWriter::new(File::create(out)?);
    let mut rows = 0;

    if let Some(header) = &header {
        writeln!(writer, "{}", header)?;
    }

    for path in &inputs {
        let mut lines = BufReader::new(File::open(path)?).lines();
        if lines.next().transpose()?.is_none() {
            log::debug!("skipping empty log {}", path.display());
            continue;
        }

        for line in lines {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            writeln!(writer, "{}", line)?;
            rows += 1;
        }
    }

    writer.flush()?;
    log::info!("concatenated {} logs ({} rows) into {}", inputs.len(), rows, out.display());
    Ok(rows)
}

/// Header common to every non-empty input, `None` when all are empty.
fn shared_header(inputs: &[PathBuf]) -> Result<Option<String>> {
    let mut header: Option<String> = None;
    for path in inputs {
        let Some(first) = BufReader::new(File::open(path)?).lines().next().transpose()? else {
            continue;
        };
        match &header {
            None => header = Some(first),
            Some(h) if *h == first => {}
            Some(_) => return Err(Error::HeaderMismatch { path: path.clone() }),
        }
    }
    Ok(header)
}

fn csv_files(dir: &Path, exclude: &Path) -> Result<Vec<PathBuf>> {
    let exclude = exclude.canonicalize().ok();
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_csv = path.extension().is_some_and(|e| e == "csv");
        if !is_csv || !path.is_file() {
            continue;
        }
        if exclude.is_some() && path.canonicalize().ok() == exclude {
            continue;
        }
        files.push(path);
    }
    files.sort();
    Ok(files)
}
