// Logging setup: pretty console output, optional JSON file output, and timing for spans marked `on_close = true`
use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use eyre::{Result, WrapErr};
use tracing::field::{Field, Visit};
use tracing::{debug, span, Id, Subscriber};
use tracing_subscriber::{
    fmt,
    layer::{Context, Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter,
};

const CRATE_TARGET: &str = "crypto_lp_tracker";
const LOG_DIR: &str = "logs";

static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Other crates log at warn, this crate at `level`; an unparseable level falls back to info
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(format!("warn,{}={}", CRATE_TARGET, level))
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}=info", CRATE_TARGET)))
}

pub fn init_logging(bin_name: &str) -> Result<()> {
    let console_log_level = env::var("CONSOLE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let file_log_level = env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "INFO".to_string());
    let log_to_file = env::var("LOG_TO_FILE").map(|v| v == "true").unwrap_or(false);

    let console_layer = fmt::Layer::new()
        .pretty()
        .with_filter(crate_filter(&console_log_level));

    let file_layer = if log_to_file {
        let log_dir = Path::new(LOG_DIR);
        fs::create_dir_all(log_dir).wrap_err("Failed to create log directory")?;
        let timestamp = chrono::Local::now().format("%Y-%m-%d_%H-%M-%S");
        let file_appender = tracing_appender::rolling::never(log_dir, format!("{}_{}.log", bin_name, timestamp));
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        FILE_GUARD.set(guard).ok();

        Some(
            fmt::Layer::new()
                .json()
                .with_writer(non_blocking)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_filter(crate_filter(&file_log_level)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(SpanTimingLayer)
        .try_init()
        .wrap_err("Failed to install tracing subscriber")?;
    Ok(())
}

/// Reports busy/idle/total time of spans created with `on_close = true`
struct SpanTimingLayer;

struct SpanTiming {
    started: Instant,
    last_transition: Instant,
    busy: Duration,
    idle: Duration,
}

#[derive(Default)]
struct OnCloseVisitor {
    on_close: bool,
}

impl Visit for OnCloseVisitor {
    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "on_close" {
            self.on_close = value;
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

impl<S> Layer<S> for SpanTimingLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &span::Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = OnCloseVisitor::default();
        attrs.record(&mut visitor);
        if !visitor.on_close {
            return;
        }
        if let Some(span) = ctx.span(id) {
            let now = Instant::now();
            span.extensions_mut().insert(SpanTiming {
                started: now,
                last_transition: now,
                busy: Duration::ZERO,
                idle: Duration::ZERO,
            });
        }
    }

    fn on_enter(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(timing) = span.extensions_mut().get_mut::<SpanTiming>() {
                timing.idle += timing.last_transition.elapsed();
                timing.last_transition = Instant::now();
            }
        }
    }

    fn on_exit(&self, id: &Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            if let Some(timing) = span.extensions_mut().get_mut::<SpanTiming>() {
                timing.busy += timing.last_transition.elapsed();
                timing.last_transition = Instant::now();
            }
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(&id) {
            if let Some(timing) = span.extensions_mut().remove::<SpanTiming>() {
                debug!(
                    span = span.name(),
                    busy_time = ?timing.busy,
                    idle_time = ?timing.idle,
                    total_time = ?timing.started.elapsed(),
                    "span closed"
                );
            }
        }
    }
}
