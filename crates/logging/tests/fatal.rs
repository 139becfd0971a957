//! Integration tests for `fatal`.
//!
//! Process termination is replaced by a panicking exit hook so the test can
//! observe what `fatal` did before exiting.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use logging::{FATAL_EXIT_CODE, FATAL_MESSAGE, MemoryBackend, Value, kv};
use logging_sink::{MemoryEvent, Severity};

struct Exited(i32);

fn exit_by_unwinding(code: i32) -> ! {
    panic::panic_any(Exited(code))
}

/// Verifies fatal writes one error record, then flushes, then exits with code 1.
#[test]
fn fatal_logs_flushes_and_exits() {
    let previous = logging::set_exit_hook(exit_by_unwinding);
    let backend = Arc::new(MemoryBackend::new());
    logging::install_backend(backend.clone());
    let err = io::Error::other("disk on fire");

    let line = line!() + 2;
    let outcome = panic::catch_unwind::<_, ()>(AssertUnwindSafe(|| {
        logging::fatal(Some(&err), kv!["attempt" => 3]);
    }));

    let payload = outcome.expect_err("fatal returned");
    let exited = payload.downcast_ref::<Exited>().expect("exit hook was not called");
    assert_eq!(exited.0, FATAL_EXIT_CODE);

    let records = backend.take();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.severity, Severity::Error);
    assert_eq!(record.message, FATAL_MESSAGE);
    assert_eq!(record.keys(), ["attempt", "error"]);
    assert_eq!(record.field("error"), Some(&Value::from("disk on fire".to_owned())));
    assert_eq!(record.caller.line(), line);
    assert_eq!(backend.events(), [MemoryEvent::Write, MemoryEvent::Flush]);

    logging::uninstall();
    logging::set_exit_hook(previous);
}
