use chrono::{FixedOffset, Utc};
use std::fmt;
use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

/// Stamps log lines with wall-clock time in the project time zone.
#[derive(Debug, Clone, Copy)]
pub struct ProjectTime {
    offset: FixedOffset,
}

impl ProjectTime {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl FormatTime for ProjectTime {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        let now = Utc::now().with_timezone(&self.offset);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f%:z"))
    }
}

/// `RUST_LOG` wins over `level` when set.
pub fn init_logging(level: &str, offset: FixedOffset) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ProjectTime::new(offset))
        .with_writer(std::io::stderr)
        .init();
}
