use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

const MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;

pub fn init_logging(log_level: Level, log_file: Option<&str>) {
    let level_filter = LevelFilter::from_level(log_level);
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_filter(level_filter);

    let file_layer = log_file.map(|path| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(CappedLog::new(PathBuf::from(path), MAX_LOG_FILE_BYTES))
            .with_filter(level_filter)
    });

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();
}

/// Append-only log file that drops its older half once it reaches `max_len`.
#[derive(Clone)]
struct CappedLog {
    path: PathBuf,
    max_len: u64,
    lock: Arc<Mutex<()>>,
}

impl CappedLog {
    fn new(path: PathBuf, max_len: u64) -> Self {
        Self { path, max_len, lock: Arc::new(Mutex::new(())) }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CappedLog {
    type Writer = CappedLog;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn keep_tail(path: &Path, keep: u64) -> io::Result<()> {
    let mut tail = Vec::new();
    {
        let mut file = File::open(path)?;
        let size = file.metadata()?.len();
        file.seek(SeekFrom::Start(size.saturating_sub(keep)))?;
        file.read_to_end(&mut tail)?;
    }
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    file.write_all(&tail)
}

impl Write for CappedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let _guard = self.lock.lock().map_err(|_| io::Error::other("log file lock poisoned"))?;

        let len = std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        if len >= self.max_len {
            keep_tail(&self.path, self.max_len / 2)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capped_log_trims_to_newest_half() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxy.log");
        let mut log = CappedLog::new(path.clone(), 8);

        log.write_all(b"01234567").unwrap();
        log.write_all(b"89").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "456789");
    }

    #[test]
    fn test_capped_log_appends_below_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proxy.log");
        let mut log = CappedLog::new(path.clone(), 1024);

        log.write_all(b"first\n").unwrap();
        log.write_all(b"second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
