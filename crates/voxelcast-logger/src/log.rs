use crate::severity::LogSeverity;
use crate::systime::now;

/// Writes one timestamped line to stdout.
pub fn log(msg: String, log_severity: LogSeverity) {
    println!("[{}] {} {}", log_severity, now(), msg);
}
