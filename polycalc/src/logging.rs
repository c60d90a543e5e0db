//! Tracing setup for the polycalc binary.

use std::io;
use tracing::Subscriber;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    Layer,
};

/// Targets whose events are logged.
const TARGETS: &[&str] = &[
    "polycalc::app",
    "polycalc::parser",
    "polycalc::interpreter",
    "polycalc::math",
];

/// Installs a global subscriber logging polycalc events up to `level` to standard error.
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(level: LevelFilter) {
    let _ = tracing_subscriber::registry()
        .with(polycalc_layer(level, io::stderr))
        .try_init();
}

/// A compact, uncolored layer writing polycalc events up to `level` to `writer`.
pub(crate) fn polycalc_layer<S, W>(level: LevelFilter, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let targets = TARGETS
        .iter()
        .fold(Targets::new(), |targets, target| {
            targets.with_target(*target, level)
        });

    fmt::layer()
        .compact()
        .with_target(true)
        .without_time()
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(targets)
}

/// An in-memory log sink.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl LogBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
