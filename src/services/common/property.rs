use std::fmt::Debug;

use async_stream::stream;
use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive cell whose committed values can be observed.
///
/// Every commit notifies all watchers. Watchers only ever observe the
/// latest committed value, so a slow observer may skip intermediate
/// values but never sees them out of order.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Mutate the value in place as a single commit.
    ///
    /// The closure reports whether it changed anything; watchers are only
    /// notified when it returns `true`. Concurrent updates are serialized.
    pub(crate) fn update<F>(&self, modify: F) -> bool
    where
        F: FnOnce(&mut T) -> bool,
    {
        self.tx.send_if_modified(modify)
    }

    /// Get a clone of the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Raw receiver for observers that drive their own select loop.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }

    /// Stream of committed values, starting with the current one.
    pub fn watch(&self) -> impl Stream<Item = T> + Send + 'static {
        WatchStream::new(self.rx.clone())
    }

    /// Stream of a derived slice of the value.
    ///
    /// Yields the current slice immediately, then only when the slice
    /// itself changes.
    pub fn watch_map<U, F>(&self, mut project: F) -> impl Stream<Item = U> + Send + 'static
    where
        U: Clone + PartialEq + Send + 'static,
        F: FnMut(&T) -> U + Send + 'static,
    {
        let mut rx = self.tx.subscribe();

        stream! {
            let mut last = project(&*rx.borrow_and_update());
            yield last.clone();

            while rx.changed().await.is_ok() {
                let next = project(&*rx.borrow_and_update());
                if next != last {
                    last = next.clone();
                    yield next;
                }
            }
        }
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[test]
    fn update_skips_notification_when_closure_reports_no_change() {
        let property = Property::new(vec![1, 2]);
        let mut rx = property.subscribe();

        assert!(!property.update(|_| false));
        assert!(!rx.has_changed().unwrap_or(true));

        assert!(property.update(|v| {
            v.push(3);
            true
        }));
        assert!(rx.has_changed().unwrap_or(false));
        assert_eq!(property.get(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn watch_map_only_yields_distinct_slices() {
        let property = Property::new((0_u32, "a"));
        let mut slices = Box::pin(property.watch_map(|(_, label)| *label));

        assert_eq!(slices.next().await, Some("a"));

        property.update(|value| {
            value.0 = 1;
            true
        });
        property.update(|value| {
            *value = (2, "b");
            true
        });

        assert_eq!(slices.next().await, Some("b"));
    }
}
