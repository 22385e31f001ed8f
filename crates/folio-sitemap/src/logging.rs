use colored::{ColoredString, Colorize};
use env_logger::{Builder, Env};
use std::io::Write;
use std::time::Duration;

pub struct FormatElapsedTimeOptions {
    pub(crate) millis_yellow_threshold: u128,
    pub(crate) millis_red_threshold: u128,
}

impl Default for FormatElapsedTimeOptions {
    fn default() -> Self {
        Self {
            millis_yellow_threshold: 100,
            millis_red_threshold: 500,
        }
    }
}

/// Installs the terminal logger. `RUST_LOG` controls the filter, `info` when unset (`error` when `quiet`).
///
/// Calling this more than once is harmless, only the first logger is kept.
pub fn init_logging(quiet: bool) {
    let default_filter = if quiet { "error" } else { "info" };
    let logging_env = Env::default().filter_or("RUST_LOG", default_filter);
    let _ = Builder::from_env(logging_env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").to_string().dimmed(),
                record.target().to_ascii_lowercase().bold().bright_yellow(),
                record.args()
            )
        })
        .try_init();
}

pub fn format_elapsed_time(elapsed: Duration, options: &FormatElapsedTimeOptions) -> ColoredString {
    match elapsed.as_secs() {
        secs if secs > 0 => format!("{}s", secs).red(),
        _ => match elapsed.as_millis() {
            millis if millis > options.millis_red_threshold => format!("{}ms", millis).red(),
            millis if millis > options.millis_yellow_threshold => {
                format!("{}ms", millis).yellow()
            }
            millis if millis > 0 => format!("{}ms", millis).normal(),
            _ => format!("{}μs", elapsed.as_micros()).normal(),
        },
    }
}
