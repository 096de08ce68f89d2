use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use log::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::OutputError;

/// Pack `entries` (file names inside `staging`) into `archive`, in the
/// given order, replacing any existing archive.
///
/// PNG entries are stored as-is; everything else is deflated.
pub fn pack(staging: &Path, entries: &[String], archive: &Path) -> Result<(), OutputError> {
    let file = File::create(archive)?;
    let mut zip_writer = ZipWriter::new(BufWriter::new(file));

    for name in entries {
        let method = if name.ends_with(".png") {
            CompressionMethod::Stored
        } else {
            CompressionMethod::Deflated
        };
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);
        zip_writer.start_file(name.as_str(), options)?;

        let mut source = File::open(staging.join(name))?;
        io::copy(&mut source, &mut zip_writer)?;
    }

    let inner = zip_writer.finish()?;
    inner
        .into_inner()
        .map_err(|e| OutputError::IoError(io::Error::new(io::ErrorKind::Other, e.error().to_string())))?;

    debug!("Packed {} entries into {}", entries.len(), archive.display());
    Ok(())
}

/// Pack the staging directory, then delete it.
pub fn pack_and_clean(staging: &Path, entries: &[String], archive: &Path) -> Result<(), OutputError> {
    pack(staging, entries, archive)?;
    fs::remove_dir_all(staging)?;
    Ok(())
}
