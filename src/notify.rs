use std::sync::{Arc, Mutex};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, severity: Severity, message: &str);
}

pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        let tag = match severity {
            Severity::Success => "OK ".bold().green(),
            Severity::Error => "ERR".bold().red(),
            Severity::Warning => "WRN".bold().yellow(),
        };
        eprintln!(
            "{}{}{} {}",
            "[".bold().white(),
            tag,
            "]".bold().white(),
            message
        );
    }
}

// collects notifications instead of printing them
#[derive(Clone, Default)]
pub struct MemoryNotifier {
    events: Arc<Mutex<Vec<(Severity, String)>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Severity, String)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((severity, message.to_string()));
        }
    }
}

#[derive(Default)]
struct BusyState {
    count: usize,
    bar: Option<ProgressBar>,
}

// one spinner shared by overlapping calls; cleared when the last guard drops
#[derive(Clone)]
pub struct BusyIndicator {
    visible: bool,
    state: Arc<Mutex<BusyState>>,
}

impl BusyIndicator {
    pub fn stderr() -> Self {
        Self {
            visible: true,
            state: Arc::new(Mutex::new(BusyState::default())),
        }
    }

    pub fn hidden() -> Self {
        Self {
            visible: false,
            state: Arc::new(Mutex::new(BusyState::default())),
        }
    }

    pub fn start(&self, message: &str) -> BusyGuard {
        if let Ok(mut state) = self.state.lock() {
            state.count += 1;
            if state.count == 1 && self.visible {
                let bar = ProgressBar::new_spinner();
                bar.set_draw_target(ProgressDrawTarget::stderr());
                bar.enable_steady_tick(Duration::from_millis(120));
                bar.set_message(message.to_string());
                state.bar = Some(bar);
            } else if let Some(bar) = state.bar.as_ref() {
                bar.set_message(message.to_string());
            }
        }
        BusyGuard {
            state: self.state.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.count > 0)
            .unwrap_or(false)
    }

    pub fn println(&self, message: &str) {
        if let Ok(state) = self.state.lock() {
            if let Some(bar) = state.bar.as_ref() {
                bar.println(message);
                return;
            }
        }
        eprintln!("{message}");
    }
}

pub struct BusyGuard {
    state: Arc<Mutex<BusyState>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.count = state.count.saturating_sub(1);
            if state.count == 0 {
                if let Some(bar) = state.bar.take() {
                    bar.finish_and_clear();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Severity::Success, "first");
        notifier.notify(Severity::Error, "second");

        let events = notifier.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], (Severity::Success, "first".to_string()));
        assert_eq!(events[1], (Severity::Error, "second".to_string()));
    }

    #[test]
    fn busy_guard_releases_on_drop() {
        let busy = BusyIndicator::hidden();
        assert!(!busy.is_active());

        let guard = busy.start("working");
        assert!(busy.is_active());
        drop(guard);
        assert!(!busy.is_active());
    }

    #[test]
    fn overlapping_guards_keep_the_indicator_on() {
        let busy = BusyIndicator::hidden();
        let first = busy.start("one");
        let second = busy.start("two");

        drop(first);
        assert!(busy.is_active());
        drop(second);
        assert!(!busy.is_active());
    }
}
