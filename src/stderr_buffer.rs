use std::sync::{Mutex, MutexGuard};

static HELD: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn held() -> MutexGuard<'static, Option<Vec<String>>> {
    HELD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding diagnostics. While held, `buffered_eprintln!()` stores
/// messages instead of writing to stderr (the TUI owns the terminal).
pub fn hold() {
    *held() = Some(Vec::new());
}

/// Stop holding and return every message collected since `hold()`.
pub fn release() -> Vec<String> {
    held().take().unwrap_or_default()
}

/// Emit a diagnostic line. Stored while held, printed to stderr otherwise.
pub fn emit(msg: String) {
    let mut guard = held();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// Works like `eprintln!` but routes through the stderr buffer when it is
/// holding messages.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::emit(format!($($arg)*))
    };
}
