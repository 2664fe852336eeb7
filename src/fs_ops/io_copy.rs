//! Streaming copy used by the cross-device fallback.
//!
//! - Destination is created with create_new, so an existing file is never clobbered.
//! - 1 MiB buffers; the destination is fsynced before returning.
//! - The source is read once to EOF; a short read against the size seen at
//!   open time is reported as UnexpectedEof.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

const BUF_SIZE: usize = 1024 * 1024;

/// Copy `src` -> `dst` (which must not exist). Returns bytes written.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_f = File::open(src)?;
    let expected = src_f.metadata()?.len();
    let dst_f = OpenOptions::new().write(true).create_new(true).open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    if bytes < expected {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("copied {bytes} of {expected} bytes"),
        ));
    }
    Ok(bytes)
}
