/// Plain-text file mirror for log output
///
/// Disabled until `init_file_logging` succeeds. Writes are buffered and
/// flushed on `flush_file_logging` or when the buffer fills.
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

static FILE_SINK: Lazy<Mutex<Option<BufWriter<File>>>> = Lazy::new(|| Mutex::new(None));

/// Open (append) the log file, creating parent directories as needed
pub fn init_file_logging(path: &str) -> std::io::Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut sink = FILE_SINK.lock();
    if let Some(previous) = sink.as_mut() {
        let _ = previous.flush();
    }
    *sink = Some(BufWriter::new(file));
    Ok(())
}

/// Append one line; silently dropped when file logging is off
pub fn write_to_file(line: &str) {
    let mut sink = FILE_SINK.lock();
    if let Some(writer) = sink.as_mut() {
        if writeln!(writer, "{}", line).is_err() {
            // Disk full or file removed: stop mirroring rather than fail every call
            *sink = None;
        }
    }
}

pub fn flush_file_logging() {
    if let Some(writer) = FILE_SINK.lock().as_mut() {
        let _ = writer.flush();
    }
}
