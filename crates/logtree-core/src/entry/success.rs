use serde::Serialize;

use super::{Entry, Metric};

/// Outcome record of a tracked operation.
///
/// Once every started attempt has finished, `count == succeed + fail`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcomes {
    pub count: u64,
    pub succeed: u64,
    pub fail: u64,
}

impl Metric for Outcomes {
    const KIND: &'static str = "success";
}

pub type Success = Entry<Outcomes>;

impl Entry<Outcomes> {
    /// Start an attempt. It counts as failed unless [`Attempt::succeed`] is called.
    pub fn run(&self) -> Attempt<'_> {
        self.update(|o| o.count += 1);
        Attempt {
            entry: self,
            succeeded: false,
        }
    }

    /// Track `f` as one attempt; `Ok` is a success, `Err` or a panic a failure.
    pub fn run_result<T, E>(&self, f: impl FnOnce() -> Result<T, E>) -> Result<T, E> {
        let attempt = self.run();
        let res = f();
        if res.is_ok() {
            attempt.succeed();
        }
        res
    }

    pub fn outcomes(&self) -> Outcomes {
        self.update(|o| *o)
    }
}

/// In-flight attempt of a [`Success`] entry.
#[must_use = "an attempt dropped immediately is recorded as a failure"]
pub struct Attempt<'a> {
    entry: &'a Success,
    succeeded: bool,
}

impl Attempt<'_> {
    pub fn succeed(mut self) {
        self.succeeded = true;
    }

    pub fn fail(self) {}
}

impl Drop for Attempt<'_> {
    fn drop(&mut self) {
        let succeeded = self.succeeded;
        self.entry.update(|o| {
            if succeeded {
                o.succeed += 1;
            } else {
                o.fail += 1;
            }
        });
    }
}
