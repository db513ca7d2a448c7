use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use tracing::Level;

static LOG_FILE: OnceLock<Arc<Mutex<File>>> = OnceLock::new();

/// Where log lines end up. The terminal host owns the screen, so without a
/// log file the output is discarded rather than written over the panels.
pub struct DelegatingWriter {
    inner: DelegatingInner,
}

enum DelegatingInner {
    File(Arc<Mutex<File>>),
    Stderr(io::Stderr),
    Sink(io::Sink),
}

impl DelegatingWriter {
    fn new(quiet: bool) -> Self {
        let inner = if let Some(file) = LOG_FILE.get() {
            DelegatingInner::File(file.clone())
        } else if quiet {
            DelegatingInner::Sink(io::sink())
        } else {
            DelegatingInner::Stderr(io::stderr())
        };
        DelegatingWriter { inner }
    }
}

impl Write for DelegatingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            DelegatingInner::File(f) => match f.lock() {
                Ok(mut file) => file.write(buf),
                Err(_) => Ok(buf.len()),
            },
            DelegatingInner::Stderr(s) => s.write(buf),
            DelegatingInner::Sink(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            DelegatingInner::File(f) => match f.lock() {
                Ok(mut file) => file.flush(),
                Err(_) => Ok(()),
            },
            DelegatingInner::Stderr(s) => s.flush(),
            DelegatingInner::Sink(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SubscriberMakeWriter {
    quiet: bool,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for SubscriberMakeWriter {
    type Writer = DelegatingWriter;

    fn make_writer(&'a self) -> Self::Writer {
        DelegatingWriter::new(self.quiet)
    }
}

/// Open (append) the log file that subsequent log lines are written to.
/// Only the first successful call takes effect.
pub fn open_log_file(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = LOG_FILE.set(Arc::new(Mutex::new(file)));
    Ok(())
}

/// Initialize the tracing subscriber writing to stderr (or the log file when
/// one is open). Safe to call multiple times; later calls are no-ops for the
/// global subscriber.
pub fn init_default() {
    install(false);
}

/// Initialize the tracing subscriber for full-screen use: log lines go to
/// `path` when given and are discarded otherwise.
pub fn init_for_tui(path: Option<&Path>) -> io::Result<()> {
    if let Some(path) = path {
        open_log_file(path)?;
    }
    install(true);
    Ok(())
}

fn install(quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(SubscriberMakeWriter { quiet })
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
