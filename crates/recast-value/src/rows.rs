//! Cursor-like row sources.
//!
//! Some callers hand the decoder a live handle over a sequence of values
//! (the shape of a SQL array whose contents sit behind a result cursor).
//! Such a handle must be drained exactly once and released afterwards,
//! including when draining fails. [`Rows`] enforces that discipline: the
//! underlying [`RowSource`] is consumed by the first [`Rows::materialize`]
//! call and released before the call returns, on success and on error
//! alike. If a handle is dropped without being materialized, the source is
//! released on drop.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::Value;
use crate::error::{ValueError, ValueResult};

/// A releasable source of row values.
pub trait RowSource: Send {
    /// Drain every remaining row.
    fn fetch_all(&mut self) -> ValueResult<Vec<Value>>;

    /// Free any live resource behind the source. Called exactly once.
    fn release(&mut self);
}

struct RowsCell {
    source: Option<Box<dyn RowSource>>,
}

impl Drop for RowsCell {
    fn drop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.release();
        }
    }
}

/// Shared handle over a [`RowSource`].
///
/// Cloning the handle shares the source; whichever clone materializes
/// first wins, later attempts fail with a cursor error.
#[derive(Clone)]
pub struct Rows {
    inner: Arc<Mutex<RowsCell>>,
}

impl Rows {
    /// Wrap a row source.
    pub fn new(source: impl RowSource + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RowsCell {
                source: Some(Box::new(source)),
            })),
        }
    }

    /// Drain the source into an in-memory sequence and release it.
    ///
    /// # Errors
    ///
    /// Returns [`ValueError::Cursor`] if the source was already consumed,
    /// or the source's own error if draining fails. The source is released
    /// in either case.
    pub fn materialize(&self) -> ValueResult<Vec<Value>> {
        let mut cell = self.inner.lock();
        let Some(mut source) = cell.source.take() else {
            return Err(ValueError::cursor("rows already consumed"));
        };
        let result = source.fetch_all();
        source.release();
        result
    }

    /// Check whether the source has already been consumed.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        self.inner.lock().source.is_none()
    }
}

impl fmt::Debug for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let consumed = self
            .inner
            .try_lock()
            .map(|cell| cell.source.is_none())
            .unwrap_or(false);
        f.debug_struct("Rows").field("consumed", &consumed).finish()
    }
}

impl PartialEq for Rows {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// In-memory [`RowSource`] over a prepared Vec.
///
/// Useful for tests and for in-process callers that already hold the rows.
pub struct VecRows {
    items: Vec<Value>,
    released: Option<Arc<std::sync::atomic::AtomicBool>>,
}

impl VecRows {
    /// Create a source yielding the given values.
    #[must_use]
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            items,
            released: None,
        }
    }

    /// Create a source that flips `flag` when released.
    #[must_use]
    pub fn with_release_flag(
        items: Vec<Value>,
        flag: Arc<std::sync::atomic::AtomicBool>,
    ) -> Self {
        Self {
            items,
            released: Some(flag),
        }
    }
}

impl RowSource for VecRows {
    fn fetch_all(&mut self) -> ValueResult<Vec<Value>> {
        Ok(std::mem::take(&mut self.items))
    }

    fn release(&mut self) {
        if let Some(flag) = &self.released {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    struct FailingRows {
        released: Arc<AtomicBool>,
    }

    impl RowSource for FailingRows {
        fn fetch_all(&mut self) -> ValueResult<Vec<Value>> {
            Err(ValueError::cursor("backend gone"))
        }

        fn release(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_materialize_drains_once() {
        let rows = Rows::new(VecRows::new(vec![Value::integer(1), Value::integer(2)]));
        assert!(!rows.is_consumed());

        let items = rows.materialize().unwrap();
        assert_eq!(items, vec![Value::integer(1), Value::integer(2)]);
        assert!(rows.is_consumed());

        assert!(matches!(
            rows.materialize(),
            Err(ValueError::Cursor { .. })
        ));
    }

    #[test]
    fn test_release_on_success() {
        let flag = Arc::new(AtomicBool::new(false));
        let rows = Rows::new(VecRows::with_release_flag(
            vec![Value::integer(1)],
            flag.clone(),
        ));
        rows.materialize().unwrap();
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_release_on_failure() {
        let flag = Arc::new(AtomicBool::new(false));
        let rows = Rows::new(FailingRows {
            released: flag.clone(),
        });
        assert!(rows.materialize().is_err());
        assert!(flag.load(Ordering::SeqCst));
    }

    #[test]
    fn test_release_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));
        {
            let _rows = Rows::new(VecRows::with_release_flag(vec![], flag.clone()));
        }
        assert!(flag.load(Ordering::SeqCst));
    }
}
