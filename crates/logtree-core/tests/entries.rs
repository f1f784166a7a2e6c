//! Entry binding, record rendering, and mutation under concurrency.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::json;

use logtree_core::entry::Count;
use logtree_core::error::ErrorCode;
use logtree_core::sink::{MemorySink, NullSink};
use logtree_core::{Address, Counter, Elapsed, Entry, Outcomes, Success};

fn null() -> Arc<NullSink> {
    Arc::new(NullSink)
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` under a debug-level subscriber and return what it logged.
fn capture_logs(f: impl FnOnce()) -> String {
    let out = Captured::default();
    let writer = out.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = out.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn record_nests_for_every_address_length() {
    for n in 1..=6 {
        let segments: Vec<String> = (0..n).map(|i| format!("s{i}")).collect();
        let address = Address::new(segments.clone());
        let counter = Counter::new();
        counter.bind(null(), address.clone()).unwrap();
        counter.increment(7);

        let record = counter.record().unwrap();
        let mut cursor = &record;
        for seg in &segments {
            let obj = cursor.as_object().expect("object at every level");
            assert_eq!(obj.len(), 1);
            cursor = &obj[seg];
        }
        assert_eq!(cursor, &json!(7));
        assert_eq!(record.pointer(&address.json_pointer()), Some(&json!(7)));
    }
}

#[test]
fn record_reflects_later_mutation() {
    let counter = Counter::new();
    counter.bind(null(), Address::new(["a", "b"])).unwrap();
    assert_eq!(counter.record().unwrap(), json!({"a": {"b": 0}}));
    counter.increment(1);
    counter.increment(2);
    assert_eq!(counter.record().unwrap(), json!({"a": {"b": 3}}));
}

#[test]
fn second_bind_fails() {
    let counter = Counter::new();
    counter.bind(null(), Address::new(["svc", "requests"])).unwrap();
    let err = counter
        .bind(null(), Address::new(["other", "requests"]))
        .expect_err("rebind must fail");
    assert_eq!(err.code(), ErrorCode::AlreadyBound);
    assert!(err.to_string().contains("svc.requests"));
    assert_eq!(counter.address(), Some(&Address::new(["svc", "requests"])));
}

#[test]
fn rejected_rebind_logs_nothing() {
    let counter = Counter::new();
    let logs = capture_logs(|| {
        counter.bind(null(), Address::new(["svc", "requests"])).unwrap();
        assert!(counter.bind(null(), Address::new(["svc", "requests"])).is_err());
    });
    assert_eq!(logs.matches("entry bound").count(), 1, "{logs}");
}

#[test]
fn inc_adds_one() {
    let counter = Counter::new();
    counter.inc();
    counter.inc();
    counter.increment(3);
    assert_eq!(counter.value(), 5);
}

#[test]
fn unbound_record_fails() {
    let elapsed = Elapsed::new();
    assert!(!elapsed.is_bound());
    let err = elapsed.record().expect_err("unbound");
    assert_eq!(err.code(), ErrorCode::Unbound);
    assert_eq!(elapsed.emit().unwrap_err().code(), ErrorCode::Unbound);
}

#[test]
fn emit_delivers_to_bound_sink() {
    let sink = Arc::new(MemorySink::new());
    let success = Success::new();
    success.bind(sink.clone(), Address::new(["jobs", "import"])).unwrap();
    success.run().succeed();
    success.emit().unwrap();
    assert_eq!(
        sink.records(),
        vec![json!({"jobs": {"import": {"count": 1, "succeed": 1, "fail": 0}}})]
    );
}

#[test]
fn concurrent_increments_lose_nothing() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 10_000;

    let counter = Arc::new(Entry::with_initial(Count(5)));
    counter.bind(null(), Address::new(["c"])).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    counter.inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(counter.value(), 5 + THREADS * PER_THREAD);
    assert_eq!(counter.record().unwrap(), json!({"c": 5 + THREADS * PER_THREAD}));
}

#[test]
fn success_counts_balance_after_mixed_outcomes() {
    let success = Arc::new(Success::new());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let success = Arc::clone(&success);
            thread::spawn(move || {
                for i in 0..500u32 {
                    let _ = success.run_result(|| if (i + t) % 3 == 0 { Err(()) } else { Ok(()) });
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let o = success.outcomes();
    assert_eq!(o.count, 2000);
    assert_eq!(o.count, o.succeed + o.fail);
    assert!(o.fail > 0 && o.succeed > 0);
}

#[test]
fn in_flight_attempt_is_counted_but_unresolved() {
    let success = Success::new();
    let attempt = success.run();
    assert_eq!(success.outcomes(), Outcomes { count: 1, succeed: 0, fail: 0 });
    attempt.fail();
    assert_eq!(success.outcomes(), Outcomes { count: 1, succeed: 0, fail: 1 });
}

#[test]
fn panic_inside_attempt_is_a_failure() {
    let success = Success::new();
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        let _attempt = success.run();
        panic!("boom");
    }));
    assert!(res.is_err());
    assert_eq!(success.outcomes(), Outcomes { count: 1, succeed: 0, fail: 1 });

    // lock released on unwind
    success.run().succeed();
    assert_eq!(success.outcomes(), Outcomes { count: 2, succeed: 1, fail: 1 });
}

#[test]
fn elapsed_is_monotonic_and_accumulates_on_failure() {
    let elapsed = Elapsed::new();
    let mut last = elapsed.total();
    for _ in 0..3 {
        elapsed.time_fn(|| thread::sleep(Duration::from_millis(2)));
        let now = elapsed.total();
        assert!(now >= last);
        last = now;
    }
    assert!(last >= Duration::from_millis(6));

    let failed: Result<(), &str> = (|| {
        let _t = elapsed.time();
        thread::sleep(Duration::from_millis(2));
        Err::<(), &str>("work failed")?;
        Ok(())
    })();
    assert!(failed.is_err());
    assert!(elapsed.total() >= last + Duration::from_millis(2));

    let before_panic = elapsed.total();
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        elapsed.time_fn(|| {
            thread::sleep(Duration::from_millis(1));
            panic!("boom")
        })
    }));
    assert!(res.is_err());
    assert!(elapsed.total() >= before_panic + Duration::from_millis(1));
}

#[test]
fn elapsed_renders_seconds() {
    let elapsed = Elapsed::new();
    elapsed.bind(null(), Address::new(["t"])).unwrap();
    elapsed.time_fn(|| thread::sleep(Duration::from_millis(5)));
    let secs = elapsed.record().unwrap()["t"].as_f64().unwrap();
    assert!(secs >= 0.005);
}
