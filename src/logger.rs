use chrono::Local;
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<Logger> = OnceCell::new();

pub struct Logger {
    prefix: Option<String>,
}

impl Logger {
    fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    pub fn log(&self, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Some(ref prefix) = self.prefix {
            println!("[{}][{}] {}", timestamp, prefix, message);
        } else {
            println!("[{}] {}", timestamp, message);
        }
    }
}

/// Installs the process-wide logger. Later calls keep the first one.
pub fn init_logger(prefix: Option<String>) {
    LOGGER.get_or_init(|| Logger::new(prefix));
}

pub fn is_enabled() -> bool {
    LOGGER.get().is_some()
}

/// Writes `message` through the installed logger. Dropped when no logger
/// is installed, so library callers stay quiet unless they opt in.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
