//! Logging and telemetry setup for the binary.
//!
//! Logs always go through `tracing-subscriber` with an `EnvFilter`. With the
//! `observability` feature, spans and metrics are also exported to stdout
//! through OpenTelemetry.

#[cfg(feature = "observability")]
use opentelemetry::{KeyValue, global, trace::TracerProvider};
#[cfg(feature = "observability")]
use opentelemetry_sdk::{Resource, metrics::SdkMeterProvider, trace::SdkTracerProvider};
use std::env;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the subscriber.
pub type ObservabilityError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration for logging and telemetry.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Service name for telemetry attribution
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Log level filter used when `RUST_LOG` is unset (e.g., "info", "debug")
    pub log_level: String,
    /// Emit JSON log lines
    pub json_logs: bool,
}

impl ObservabilityConfig {
    /// Create a new configuration with the given service name.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            json_logs: false,
        }
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json_logs(mut self, enabled: bool) -> Self {
        self.json_logs = enabled;
        self
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

/// Keeps telemetry providers alive; call [`ObservabilityGuard::shutdown`]
/// before exit to flush them.
#[derive(Debug, Default)]
pub struct ObservabilityGuard {
    #[cfg(feature = "observability")]
    tracer_provider: Option<SdkTracerProvider>,
    #[cfg(feature = "observability")]
    meter_provider: Option<SdkMeterProvider>,
}

impl ObservabilityGuard {
    /// Flush and stop exporters.
    pub fn shutdown(self) {
        #[cfg(feature = "observability")]
        {
            if let Some(Err(e)) = self.tracer_provider.map(|provider| provider.shutdown()) {
                eprintln!("Failed to shut down tracer provider: {e}");
            }
            if let Some(Err(e)) = self.meter_provider.map(|provider| provider.shutdown()) {
                eprintln!("Failed to shut down meter provider: {e}");
            }
        }
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over [`ObservabilityConfig::log_level`].
///
/// # Errors
///
/// Returns an error if the filter does not parse or a subscriber is already
/// installed.
pub fn init_observability(
    config: &ObservabilityConfig,
) -> Result<ObservabilityGuard, ObservabilityError> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_level(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true)
            .boxed()
    };

    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(feature = "observability")]
    let guard = {
        let resource = Resource::builder()
            .with_service_name(config.service_name.clone())
            .with_attributes(vec![KeyValue::new(
                "service.version",
                config.service_version.clone(),
            )])
            .build();

        let tracer_provider = SdkTracerProvider::builder()
            .with_simple_exporter(opentelemetry_stdout::SpanExporter::default())
            .with_resource(resource.clone())
            .build();
        global::set_tracer_provider(tracer_provider.clone());

        let meter_provider = SdkMeterProvider::builder()
            .with_periodic_exporter(opentelemetry_stdout::MetricExporter::default())
            .with_resource(resource)
            .build();
        global::set_meter_provider(meter_provider.clone());

        let tracer = tracer_provider.tracer(config.service_name.clone());
        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;

        ObservabilityGuard {
            tracer_provider: Some(tracer_provider),
            meter_provider: Some(meter_provider),
        }
    };

    #[cfg(not(feature = "observability"))]
    let guard = {
        registry.try_init()?;
        ObservabilityGuard::default()
    };

    Ok(guard)
}
