use crate::config::DEFAULT_SERVICE_NAME;
use crate::utils::env::get_env;

use opentelemetry::trace::TracerProvider;
use opentelemetry::KeyValue;
use opentelemetry_aws::trace::XrayIdGenerator;
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace as sdktrace;
use tracing_subscriber::{fmt, layer::SubscriberExt, Registry};

/// Service metadata attached to every exported span
pub fn service_resource() -> Resource {
    Resource::new(vec![
        KeyValue::new("service.name", get_env("SERVICE_NAME", DEFAULT_SERVICE_NAME)),
        KeyValue::new(
            "service.version",
            get_env("SERVICE_VERSION", env!("CARGO_PKG_VERSION")),
        ),
        KeyValue::new("environment", get_env("SERVICE_ENVIRONMENT", "local")),
    ])
}

/// Installs fmt output plus an X-Ray compatible OpenTelemetry layer.
/// A second call leaves the first subscriber in place.
pub fn init_tracing() {
    let service_name = get_env("SERVICE_NAME", DEFAULT_SERVICE_NAME);
    let config = sdktrace::Config::default()
        .with_id_generator(XrayIdGenerator::default())
        .with_resource(service_resource());
    let tracer_provider = sdktrace::TracerProvider::builder()
        .with_config(config)
        .build();
    let tracer = tracer_provider
        .tracer_builder(service_name.clone())
        .with_version(env!("CARGO_PKG_VERSION"))
        .build();

    let subscriber = Registry::default()
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .with(fmt::layer());
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        tracing::warn!("tracing subscriber already set: {}", e);
        return;
    }

    tracing::info!("Tracing initialized for {}", service_name);
}
