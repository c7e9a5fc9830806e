use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::writer::MakeWriter;

/// Where probe diagnostics go. The report itself always goes to stdout, so
/// log lines never mix with the JSON.
#[derive(Clone)]
pub(crate) enum LogTarget {
    Stderr,
    File(Arc<Mutex<File>>),
}

impl LogTarget {
    pub(crate) fn open(path: Option<PathBuf>) -> io::Result<Self> {
        match path {
            Some(path) => Ok(Self::File(Arc::new(Mutex::new(File::create(path)?)))),
            None => Ok(Self::Stderr),
        }
    }
}

pub(crate) struct LogSink(LogTarget);

impl<'a> MakeWriter<'a> for LogTarget {
    type Writer = LogSink;

    fn make_writer(&'a self) -> Self::Writer {
        LogSink(self.clone())
    }
}

impl LogSink {
    fn with_file<T>(file: &Mutex<File>, op: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut guard = file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        op(&mut guard)
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &self.0 {
            LogTarget::Stderr => io::stderr().write_all(buf)?,
            LogTarget::File(file) => Self::with_file(file, |f| f.write_all(buf))?,
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match &self.0 {
            LogTarget::Stderr => io::stderr().flush(),
            LogTarget::File(file) => Self::with_file(file, Write::flush),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_logs_to_stderr() {
        assert!(matches!(LogTarget::open(None).unwrap(), LogTarget::Stderr));
    }

    #[test]
    fn file_target_receives_every_line() {
        let path = std::env::temp_dir().join(format!("oci-log-{}.txt", std::process::id()));
        let target = LogTarget::open(Some(path.clone())).unwrap();
        let mut sink = target.make_writer();
        sink.write_all(b"resolved 12.1\n").unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "resolved 12.1\n");
        std::fs::remove_file(path).unwrap();
    }
}
