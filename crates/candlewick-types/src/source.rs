//! Pull-based tick sources.

use crate::{Result, Tick};

/// A forward-only source of ticks for one market side.
///
/// `Ok(None)` marks the end of the source. Errors are fatal: callers do not
/// pull again after an `Err`.
pub trait TickSource {
    /// Returns the next tick, or None when the source is exhausted.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be read or parsed.
    fn next_tick(&mut self) -> Result<Option<Tick>>;
}

impl<S: TickSource + ?Sized> TickSource for &mut S {
    fn next_tick(&mut self) -> Result<Option<Tick>> {
        (**self).next_tick()
    }
}

impl<S: TickSource + ?Sized> TickSource for Box<S> {
    fn next_tick(&mut self) -> Result<Option<Tick>> {
        (**self).next_tick()
    }
}

/// In-memory tick source over an iterator of ticks.
#[derive(Debug, Clone)]
pub struct TickIter<I> {
    inner: I,
}

impl<I: Iterator<Item = Tick>> TickSource for TickIter<I> {
    fn next_tick(&mut self) -> Result<Option<Tick>> {
        Ok(self.inner.next())
    }
}

/// Wraps any collection of ticks as a [`TickSource`].
pub fn from_ticks<T: IntoIterator<Item = Tick>>(ticks: T) -> TickIter<T::IntoIter> {
    TickIter {
        inner: ticks.into_iter(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ticks_drains_in_order() {
        let mut source = from_ticks(vec![Tick::new(1, 1.0, 1.0), Tick::new(2, 2.0, 1.0)]);

        assert_eq!(source.next_tick().unwrap().unwrap().epoch, 1);
        assert_eq!(source.next_tick().unwrap().unwrap().epoch, 2);
        assert!(source.next_tick().unwrap().is_none());
    }

    #[test]
    fn test_boxed_source() {
        let mut source: Box<dyn TickSource> = Box::new(from_ticks([Tick::new(5, 1.0, 1.0)]));
        assert_eq!(source.next_tick().unwrap().unwrap().epoch, 5);
        assert!(source.next_tick().unwrap().is_none());
    }
}
