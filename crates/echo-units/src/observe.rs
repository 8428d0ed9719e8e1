// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lock-guarded mutable cells with weak, generation-based dirty tracking.
//!
//! Every value type in this crate is an immutable `Copy` value. When a caller
//! needs in-place mutation it wraps the value in a [`Mutable`], which owns one
//! `Mutex` and a generation counter. [`Mutable::observe`] hands out an
//! [`ObserveTicket`] holding only a `Weak` reference, so tickets never keep a
//! subject alive; once the subject is dropped the ticket reports clean and
//! inactive forever.
//!
//! The lock is not reentrant. Calling any method of a `Mutable` from inside
//! its own [`Mutable::mutate`] or [`Mutable::read`] closure deadlocks.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, trace};

use crate::error::MathResult;

/// Anything whose modifications are counted by a generation number.
pub trait GenerationSource: Send + Sync {
    /// Current generation; increases by one on every committed write.
    fn generation(&self) -> u64;
}

/// Types that can issue [`ObserveTicket`]s.
pub trait Observable {
    /// Snapshot of the current generation behind a weak handle.
    fn observe(&self) -> ObserveTicket;
}

struct State<T> {
    value: T,
    generation: u64,
}

impl<T> State<T> {
    fn commit(&mut self, value: T) {
        self.value = value;
        self.generation = self.generation.wrapping_add(1);
    }
}

struct Guarded<T> {
    state: Mutex<State<T>>,
}

impl<T> Guarded<T> {
    fn lock(&self) -> MutexGuard<'_, State<T>> {
        // Commits happen only after the closure returns, so a panic inside
        // `mutate` never leaves a half-written value behind.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Send> GenerationSource for Guarded<T> {
    fn generation(&self) -> u64 {
        self.lock().generation
    }
}

/// Thread-safe mutable wrapper around an immutable value type.
///
/// All reads and writes take the instance lock. [`Mutable::mutate`] holds it
/// across a whole compound update, so other threads observe either the old or
/// the new value and never a mix.
pub struct Mutable<T> {
    inner: Arc<Guarded<T>>,
}

impl<T> Mutable<T>
where
    T: Copy + Send + 'static,
{
    /// Wraps `value` at generation zero.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Guarded {
                state: Mutex::new(State {
                    value,
                    generation: 0,
                }),
            }),
        }
    }

    /// Copy of the current value.
    pub fn get(&self) -> T {
        self.inner.lock().value
    }

    /// Immutable snapshot of the current value.
    pub fn freeze(&self) -> T {
        self.get()
    }

    /// Replaces the value and bumps the generation, even when `value`
    /// equals the current one.
    pub fn set(&self, value: T) {
        self.inner.lock().commit(value);
    }

    /// Runs `f` against a working copy under the lock and commits the copy
    /// only if `f` returns `Ok`.
    ///
    /// On `Err` the stored value is untouched, so a failing compound update
    /// never leaves partial results. Every `Ok` commits and bumps the
    /// generation.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut T) -> MathResult<R>) -> MathResult<R> {
        let mut state = self.inner.lock();
        let mut working = state.value;
        let out = f(&mut working)?;
        state.commit(working);
        Ok(out)
    }

    /// Infallible form of [`Mutable::mutate`].
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut state = self.inner.lock();
        let mut working = state.value;
        f(&mut working);
        state.commit(working);
    }

    /// Reads through a borrow under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock().value)
    }

    /// Number of committed changes so far.
    pub fn generation(&self) -> u64 {
        self.inner.lock().generation
    }

    /// Consumes the cell and returns the final value.
    pub fn into_inner(self) -> T {
        self.get()
    }
}

impl<T> Observable for Mutable<T>
where
    T: Copy + Send + 'static,
{
    fn observe(&self) -> ObserveTicket {
        let seen = self.generation();
        let weak: Weak<Guarded<T>> = Arc::downgrade(&self.inner);
        let subject: Weak<dyn GenerationSource> = weak;
        trace!(generation = seen, "observe ticket issued");
        ObserveTicket {
            subject,
            seen,
            reclaimed: AtomicBool::new(false),
        }
    }
}

impl<T> Default for Mutable<T>
where
    T: Copy + Send + Default + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for Mutable<T>
where
    T: Copy + Send + 'static,
{
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> fmt::Debug for Mutable<T>
where
    T: Copy + Send + fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("Mutable")
            .field("value", &state.value)
            .field("generation", &state.generation)
            .finish()
    }
}

/// Dirty-tracking handle for one [`Mutable`].
///
/// Holds a weak reference plus the generation seen at the last reset. The
/// ticket never keeps its subject alive and never fails: once the subject
/// is dropped, [`is_active`](Self::is_active) and
/// [`is_dirty`](Self::is_dirty) both return `false` permanently.
pub struct ObserveTicket {
    subject: Weak<dyn GenerationSource>,
    seen: u64,
    reclaimed: AtomicBool,
}

impl ObserveTicket {
    fn upgrade(&self) -> Option<Arc<dyn GenerationSource>> {
        let subject = self.subject.upgrade();
        if subject.is_none() && !self.reclaimed.swap(true, Ordering::Relaxed) {
            debug!(seen = self.seen, "observed subject reclaimed; ticket is now inert");
        }
        subject
    }

    /// `true` while the subject is alive.
    pub fn is_active(&self) -> bool {
        self.upgrade().is_some()
    }

    /// `true` when the subject changed since the ticket was issued or last
    /// reset.
    pub fn is_dirty(&self) -> bool {
        self.upgrade()
            .is_some_and(|subject| subject.generation() != self.seen)
    }

    /// Marks the current state as seen.
    pub fn reset(&mut self) {
        if let Some(subject) = self.upgrade() {
            self.seen = subject.generation();
        }
    }

    /// Returns whether the subject was dirty and marks the current state as
    /// seen, reading the generation once.
    pub fn fetch_and_reset(&mut self) -> bool {
        match self.upgrade() {
            Some(subject) => {
                let current = subject.generation();
                let dirty = current != self.seen;
                self.seen = current;
                dirty
            }
            None => false,
        }
    }

    /// Generation recorded at issue or at the last reset.
    pub const fn seen_generation(&self) -> u64 {
        self.seen
    }
}

impl fmt::Debug for ObserveTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserveTicket")
            .field("seen", &self.seen)
            .field("active", &(self.subject.strong_count() > 0))
            .finish()
    }
}

/// Source of an immutable value: either the value itself or a [`Mutable`]
/// cell holding one.
pub trait Snapshot<T> {
    /// Immutable copy of the current value.
    fn snapshot(&self) -> T;
}

impl<T: Copy> Snapshot<T> for T {
    fn snapshot(&self) -> T {
        *self
    }
}

impl<T> Snapshot<T> for Mutable<T>
where
    T: Copy + Send + 'static,
{
    fn snapshot(&self) -> T {
        self.get()
    }
}

/// Immutable copy of `source`. Immutable sources are copied as-is.
pub fn copy_of<T, S: Snapshot<T> + ?Sized>(source: &S) -> T {
    source.snapshot()
}

/// Builds a value by running `f` against a temporary [`Mutable`] seeded
/// with `initial`, then freezes the result.
pub fn build<T>(initial: T, f: impl FnOnce(&Mutable<T>) -> MathResult<()>) -> MathResult<T>
where
    T: Copy + Send + 'static,
{
    let scratch = Mutable::new(initial);
    f(&scratch)?;
    Ok(scratch.into_inner())
}

/// Copies `source` and applies `f` to the copy before freezing it.
pub fn copy_with<T, S>(source: &S, f: impl FnOnce(&Mutable<T>) -> MathResult<()>) -> MathResult<T>
where
    T: Copy + Send + 'static,
    S: Snapshot<T> + ?Sized,
{
    build(source.snapshot(), f)
}
