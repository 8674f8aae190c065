use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// The default filter directive, used when RUST_LOG is unset.
const DEFAULT_FILTER: &str = "info";

/// Formatting style of the log lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FmtStyle {
    /// Multi-line, human friendly.
    #[default]
    Pretty,
    /// Single line per event.
    Compact,
    /// Newline delimited JSON.
    Json,
}

/// Builder for the global tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingTelemetry {
    style: FmtStyle,
    colours: bool,
}

impl TracingTelemetry {
    /// This creates an empty builder.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Sets the formatting style.
    #[must_use]
    pub fn with_style(mut self, style: FmtStyle) -> Self {
        self.style = style;
        self
    }

    /// Enables or disables ANSI colours. Has no effect on the json style.
    #[must_use]
    pub fn with_colours(mut self, colours: bool) -> Self {
        self.colours = colours;
        self
    }

    /// Installs the subscriber as the global default. The filter is read from RUST_LOG.
    pub fn init(self, service_name: &str) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(self.colours);

        match self.style {
            FmtStyle::Pretty => builder.pretty().init(),
            FmtStyle::Compact => builder.compact().init(),
            FmtStyle::Json => builder.json().init(),
        }

        tracing::debug!(service = service_name, style = ?self.style, "Logging initialized");
    }
}
