use std::collections::VecDeque;

/// Ring buffer of human-readable drag events, for copy-pasting into bug reports.
#[derive(Debug, Default)]
pub(super) struct DebugEventLog {
    enabled: bool,
    capacity: usize,
    next_event: u64,
    lines: VecDeque<String>,
}

impl DebugEventLog {
    pub(super) fn new(enabled: bool, capacity: usize) -> Self {
        Self {
            enabled,
            capacity: capacity.clamp(1, 10_000),
            next_event: 0,
            lines: VecDeque::new(),
        }
    }

    pub(super) fn push(&mut self, message: impl Into<String>) {
        if !self.enabled {
            return;
        }
        while self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines
            .push_back(format!("[event {}] {}", self.next_event, message.into()));
        self.next_event += 1;
    }

    pub(super) fn text(&self) -> String {
        self.lines.iter().cloned().collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_log_stays_empty() {
        let mut log = DebugEventLog::new(false, 10);
        log.push("start");
        assert_eq!(log.text(), "");
    }

    #[test]
    fn keeps_only_the_newest_lines() {
        let mut log = DebugEventLog::new(true, 2);
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.text(), "[event 1] b\n[event 2] c");
    }

    #[test]
    fn zero_capacity_still_keeps_one_line() {
        let mut log = DebugEventLog::new(true, 0);
        log.push("a");
        log.push("b");
        assert_eq!(log.text(), "[event 1] b");
    }
}
