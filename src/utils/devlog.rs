//! Per-stage pipeline traces.
//!
//! `query` emits one `dev6!` line per executed stage (`stage=<i> kind=<k> in=<n> out=<m>`)
//! while the `pipeline-trace` flag is on. Lines go to the `recquery::dev6` log target,
//! which `logger::configure_logging_with_dev` can route to `dev6.log`, and to an opt-in
//! thread-local buffer so tests can assert on the stages a run went through.

use std::cell::RefCell;

/// Log target for stage traces.
pub const DEV_TARGET: &str = "recquery::dev6";

thread_local! {
    static TL_SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Stops capturing stage traces on this thread when dropped.
pub struct DevSinkGuard;
impl Drop for DevSinkGuard {
    fn drop(&mut self) {
        TL_SINK.with(|s| *s.borrow_mut() = None);
    }
}

/// Start capturing stage traces emitted on the current thread.
pub fn enable_thread_sink() -> DevSinkGuard {
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    DevSinkGuard
}

/// Append one trace line to this thread's buffer, if capturing.
pub fn write_str(msg: &str) {
    TL_SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(msg.to_owned());
        }
    });
}

/// Take the captured trace lines, leaving the buffer empty.
pub fn drain() -> Vec<String> {
    TL_SINK.with(|s| match s.borrow_mut().as_mut() {
        Some(buf) => std::mem::take(buf),
        None => Vec::new(),
    })
}

/// Captured trace lines so far, without clearing them.
pub fn snapshot() -> Vec<String> {
    TL_SINK.with(|s| s.borrow().as_ref().cloned().unwrap_or_default())
}

/// Emit a pipeline trace line: captured by the thread buffer when enabled and
/// logged at `TRACE` under [`DEV_TARGET`].
#[macro_export]
macro_rules! dev6 {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        $crate::utils::devlog::write_str(&__s);
        log::log!(target: $crate::utils::devlog::DEV_TARGET, log::Level::Trace, "{}", __s);
    }};
}
