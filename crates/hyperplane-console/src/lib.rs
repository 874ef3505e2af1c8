//! Colorful console output for enumeration runs.
//!
//! Provides a custom `tracing` layer that formats engine events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Landscape loading, move generation, enumeration start/end and
//!   per-pass traversal progress
//! - **WARN**: Skipped input lines
//! - **TRACE**: Every local optimum found

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "hyperplane=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
            .add_directive(
                DEFAULT_DIRECTIVE
                    .parse::<Directive>()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            );

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EnumerationConsoleLayer)
            .try_init();
    });
}

// Marks the start of a run for elapsed time tracking.
fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since the run started.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 _   _                                  _
| | | |_   _ _ __   ___ _ __ _ __ | | __ _ _ __   ___
| |_| | | | | '_ \ / _ \ '__| '_ \| |/ _` | '_ \ / _ \
|  _  | |_| | |_) |  __/ |  | |_) | | (_| | | | |  __/
|_| |_|\__, | .__/ \___|_|  | .__/|_|\__,_|_| |_|\___|
       |___/|_|             |_|
"#;

    let version_line = format!(
        "              v{} - Exhaustive Local Optima Enumeration\n",
        VERSION
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats enumeration events with colors.
pub struct EnumerationConsoleLayer;

impl<S: Subscriber> Layer<S> for EnumerationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        if !metadata.target().starts_with("hyperplane") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    length: Option<u64>,
    subfunctions: Option<u64>,
    moves: Option<u64>,
    radius: Option<u64>,
    hyperplane: Option<bool>,
    reorder: Option<bool>,
    setup_ms: Option<u64>,
    pass: Option<u64>,
    position: Option<u64>,
    fitness: Option<i64>,
    count: Option<u64>,
    visited: Option<u64>,
    flips: Option<u64>,
    elapsed_ms: Option<u64>,
    optima_ratio: Option<f64>,
    line: Option<u64>,
    header: Option<String>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s.trim_matches('"').to_string()),
            "header" => self.header = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "length" => self.length = Some(value),
            "subfunctions" => self.subfunctions = Some(value),
            "moves" => self.moves = Some(value),
            "radius" => self.radius = Some(value),
            "setup_ms" => self.setup_ms = Some(value),
            "pass" => self.pass = Some(value),
            "position" => self.position = Some(value),
            "count" => self.count = Some(value),
            "visited" => self.visited = Some(value),
            "flips" => self.flips = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "line" => self.line = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "fitness" => self.fitness = Some(value),
            _ => self.record_u64(field, value as u64),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "optima_ratio" {
            self.optima_ratio = Some(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "hyperplane" => self.hyperplane = Some(value),
            "reorder" => self.reorder = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "header" => self.header = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "enumerate_start" => format_enumerate_start(v),
        "enumerate_end" => format_enumerate_end(v),
        "setup" => format_setup(v),
        "landscape_loaded" => format_landscape_loaded(v),
        "progress" => format_progress(v),
        "optimum" => format_optimum(v, level),
        _ if level == Level::WARN || level == Level::ERROR => format_warning(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_switch(on: Option<bool>) -> String {
    if on.unwrap_or(false) {
        "on".bright_green().to_string()
    } else {
        "off".bright_black().to_string()
    }
}

fn format_enumerate_start(v: &EventVisitor) -> String {
    mark_run_start();
    let length = v.length.unwrap_or(0);

    format!(
        "{} {} Enumerating │ {} bits │ {} subfunctions │ {} moves │ radius {} │ 2^{} states │ hyperplanes {} │ reordering {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        length.to_formatted_string(&Locale::en).bright_yellow(),
        v.subfunctions.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.moves.unwrap_or(0).to_formatted_string(&Locale::en).bright_yellow(),
        v.radius.unwrap_or(0).bright_yellow(),
        length.bright_magenta(),
        format_switch(v.hyperplane),
        format_switch(v.reorder),
    )
}

fn format_enumerate_end(v: &EventVisitor) -> String {
    let count = v.count.unwrap_or(0);
    let visited = v.visited.unwrap_or(0);
    let elapsed = v.elapsed_ms.unwrap_or(0);

    let mut output = format!(
        "{} {} Enumeration complete │ {} │ {} local optima",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(elapsed).yellow(),
        count
            .to_formatted_string(&Locale::en)
            .bright_green()
            .bold(),
    );

    output.push_str(&format!(
        " │ {} states visited",
        visited.to_formatted_string(&Locale::en).white()
    ));

    if let Some(flips) = v.flips {
        output.push_str(&format!(
            " │ {} flips",
            flips.to_formatted_string(&Locale::en).white()
        ));
    }

    if let Some(ratio) = v.optima_ratio {
        output.push_str(&format!(" │ {} optima per state", format_ratio(ratio).white()));
    }

    output
}

fn format_setup(v: &EventVisitor) -> String {
    format!(
        "{} {} Moves generated │ {} moves │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        v.moves
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white()
            .bold(),
        format_duration_ms(v.setup_ms.unwrap_or(0)).yellow(),
    )
}

fn format_landscape_loaded(v: &EventVisitor) -> String {
    format!(
        "{} {} Landscape loaded │ {} bits │ {} subfunctions",
        format_elapsed(),
        "◆".bright_blue(),
        v.length.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.subfunctions
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} pass {:>4} │ position {:>6}",
        format_elapsed(),
        "⚡".bright_cyan(),
        v.pass.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.position
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
    )
}

fn format_optimum(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    format!(
        "{} {} Local optimum │ fitness {}",
        format_elapsed(),
        "✓".bright_green(),
        format_fitness(v.fitness.unwrap_or(0)),
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let Some(message) = v.message.as_deref() else {
        return String::new();
    };
    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        message.yellow()
    );
    if let Some(line) = v.line {
        output.push_str(&format!(" │ line {}", line));
    }
    if let Some(header) = v.header.as_deref() {
        output.push_str(&format!(" │ header {}", header.bright_yellow()));
    }
    output
}

fn format_ratio(ratio: f64) -> String {
    if ratio == 0.0 || ratio >= 0.001 {
        format!("{:.4}", ratio)
    } else {
        format!("{:.3e}", ratio)
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_fitness(fitness: i64) -> String {
    let text = fitness.to_formatted_string(&Locale::en);
    if fitness < 0 {
        text.bright_red().to_string()
    } else {
        text.bright_green().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_ms() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_event_is_silent() {
        let visitor = EventVisitor {
            event: Some("something_else".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_optimum_only_at_trace() {
        let visitor = EventVisitor {
            event: Some("optimum".to_string()),
            fitness: Some(3),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::DEBUG).is_empty());
        assert!(format_event(&visitor, Level::TRACE).contains("Local optimum"));
    }

    #[test]
    fn test_enumerate_end_mentions_count() {
        let visitor = EventVisitor {
            event: Some("enumerate_end".to_string()),
            count: Some(1234),
            visited: Some(5000),
            elapsed_ms: Some(12),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::INFO);
        assert!(output.contains("1,234"));
        assert!(output.contains("12ms"));
    }

    #[test]
    fn test_warnings_show_message() {
        let visitor = EventVisitor {
            message: Some("Unexpected line header".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::WARN).contains("Unexpected line header"));
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }

    #[test]
    fn test_warning_names_offending_header() {
        let visitor = EventVisitor {
            message: Some("Unexpected line header".to_string()),
            line: Some(7),
            header: Some("q".to_string()),
            ..Default::default()
        };
        let output = format_event(&visitor, Level::WARN);
        assert!(output.contains("line 7"));
        assert!(output.contains(&format!("header {}", "q".bright_yellow())));
    }

    #[test]
    fn test_enumerate_end_reports_optima_ratio() {
        let visitor = EventVisitor {
            event: Some("enumerate_end".to_string()),
            count: Some(4),
            visited: Some(16),
            optima_ratio: Some(0.25),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).contains("0.2500 optima per state"));
        assert_eq!(format_ratio(0.00002), "2.000e-5");
    }

    #[test]
    fn test_default_directive_enables_info() {
        let filter = EnvFilter::new(DEFAULT_DIRECTIVE);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
