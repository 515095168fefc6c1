//! Console-reporting sink
//!
//! Commands report through this trait instead of printing directly, so the
//! exact set and order of lines stays assertable. `ConsoleReporter` is what
//! the CLI wires in; `MemoryReporter` records for tests and embedders.

/// Severity of one reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLevel {
    Info,
    Comment,
    Error,
}

pub trait Reporter {
    fn info(&mut self, line: &str);
    fn comment(&mut self, line: &str);
    fn error(&mut self, line: &str);
}

/// Writes info/comment lines to stdout and error lines to stderr
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&mut self, line: &str) {
        println!("{line}");
    }

    fn comment(&mut self, line: &str) {
        println!("{line}");
    }

    fn error(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Records every reported line in order
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub lines: Vec<(ReportLevel, String)>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn at_level(&self, level: ReportLevel) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn infos(&self) -> Vec<&str> {
        self.at_level(ReportLevel::Info)
    }

    pub fn comments(&self) -> Vec<&str> {
        self.at_level(ReportLevel::Comment)
    }

    pub fn errors(&self) -> Vec<&str> {
        self.at_level(ReportLevel::Error)
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, line: &str) {
        self.lines.push((ReportLevel::Info, line.to_string()));
    }

    fn comment(&mut self, line: &str) {
        self.lines.push((ReportLevel::Comment, line.to_string()));
    }

    fn error(&mut self, line: &str) {
        self.lines.push((ReportLevel::Error, line.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_keeps_order_and_levels() {
        let mut reporter = MemoryReporter::new();
        reporter.comment("first");
        reporter.error("second");
        reporter.info("third");

        assert_eq!(
            reporter.lines,
            vec![
                (ReportLevel::Comment, "first".to_string()),
                (ReportLevel::Error, "second".to_string()),
                (ReportLevel::Info, "third".to_string()),
            ]
        );
        assert_eq!(reporter.comments(), vec!["first"]);
        assert_eq!(reporter.errors(), vec!["second"]);
        assert_eq!(reporter.infos(), vec!["third"]);
    }
}
