use chrono::Local;

/// Severity tag carried by every status line. Mirrors the badge styles of
/// the desktop log pane that consumes these messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Badge,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Badge => "badge",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Notification sink for merge progress. A failure is still reported through
/// the merge result; the sink is for humans watching the run.
pub trait StatusSink {
    fn emit(&mut self, severity: Severity, message: &str);
}

/// Prints timestamped, tagged lines. Warnings and errors go to stderr.
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn emit(&mut self, severity: Severity, message: &str) {
        let line = format!(
            "[{}] [{}] {message}",
            Local::now().format("%H:%M:%S"),
            severity.tag()
        );
        match severity {
            Severity::Warning | Severity::Error => eprintln!("{line}"),
            Severity::Normal | Severity::Badge | Severity::Success => println!("{line}"),
        }
    }
}

/// Collects emitted messages so tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink(pub Vec<(Severity, String)>);

#[cfg(test)]
impl StatusSink for MemorySink {
    fn emit(&mut self, severity: Severity, message: &str) {
        self.0.push((severity, message.to_string()));
    }
}
