//! Side-channel notifications for tolerated binding problems.

use super::error::CoerceError;

/// Receives a notice whenever a lookup misses or a value fails to coerce.
///
/// Called whether or not the binder goes on to tolerate the problem (through
/// `default` or `omit`). Never called for fields that bind cleanly, and the
/// binder does not look at anything an observer does.
pub trait Observer {
    fn key_missing(&self, field: &str, section: &str, key: &str);

    fn coercion_failed(&self, field: &str, section: &str, key: &str, error: &CoerceError);
}

/// Forwards notices to `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn key_missing(&self, field: &str, section: &str, key: &str) {
        tracing::warn!(field, section, key, "configuration key not found");
    }

    fn coercion_failed(&self, field: &str, section: &str, key: &str, error: &CoerceError) {
        tracing::warn!(field, section, key, %error, "configuration value failed to parse");
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentObserver;

impl Observer for SilentObserver {
    fn key_missing(&self, _field: &str, _section: &str, _key: &str) {}

    fn coercion_failed(&self, _field: &str, _section: &str, _key: &str, _error: &CoerceError) {}
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::Kind;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.text()
    }

    #[test]
    fn test_tracing_observer_reports_missing_key() {
        let output = capture(|| {
            TracingObserver.key_missing("exchange.access_key", "exchange", "access-key");
        });

        assert!(output.contains("WARN"));
        assert!(output.contains("configuration key not found"));
        assert!(output.contains("exchange.access_key"));
        assert!(output.contains("access-key"));
    }

    #[test]
    fn test_tracing_observer_reports_coercion_failure() {
        let output = capture(|| {
            TracingObserver.coercion_failed(
                "workers",
                "DEFAULT",
                "workers",
                &CoerceError::InvalidBool("maybe".into()),
            );
        });

        assert!(output.contains("configuration value failed to parse"));
        assert!(output.contains("maybe"));
    }

    #[test]
    fn test_silent_observer_emits_nothing() {
        let output = capture(|| {
            SilentObserver.key_missing("a", "DEFAULT", "a");
            SilentObserver.coercion_failed("a", "DEFAULT", "a", &CoerceError::Unsupported(Kind::Array));
        });

        assert!(output.is_empty());
    }
}
