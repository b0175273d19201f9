//! Per-frame update notification.
//!
//! The host calls [`FrameBus::dispatch`] once per rendered frame. Estimators
//! subscribe through [`Tracked::attach`] and stop receiving frames once their
//! [`Registration`] is disposed.
//!
//! ```text
//! host frame ──► FrameBus::dispatch(now, subject)
//!                     │
//!                     ├──► ResourceTickFeed::on_frame ──► TickPhaseEstimator
//!                     └──► CooldownFeed::on_frame     ──► CooldownCastStateTracker
//! ```
//!
//! Everything here is single-threaded (`Rc<RefCell<_>>`).

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::sampling::Subject;

/// Receives one callback per host frame while registered.
pub trait FrameHandler {
    fn on_frame(&mut self, now: f64, subject: &dyn Subject);
}

type SharedHandler = Rc<RefCell<dyn FrameHandler>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, SharedHandler)>,
}

/// Fan-out point for the host's frame notification.
#[derive(Clone, Default)]
pub struct FrameBus {
    registry: Rc<RefCell<Registry>>,
}

impl FrameBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, handler: SharedHandler) -> Registration {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, handler));
        tracing::debug!(id, "Frame handler registered");

        Registration {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver a frame to every registered handler.
    ///
    /// A frame without a subject (e.g. logged out, loading screen) is
    /// skipped entirely. Returns the number of handlers notified.
    pub fn dispatch(&self, now: f64, subject: Option<&dyn Subject>) -> usize {
        let Some(subject) = subject else {
            tracing::trace!(now, "No subject present, skipping frame");
            return 0;
        };

        // Snapshot so handlers may register/dispose while we iterate
        let handlers: Vec<SharedHandler> = self
            .registry
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();

        let mut notified = 0;
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut h) => {
                    h.on_frame(now, subject);
                    notified += 1;
                }
                Err(_) => tracing::warn!(now, "Frame handler is borrowed, skipping"),
            }
        }
        notified
    }

    pub fn handler_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Subscription to a [`FrameBus`]. Dropping it unregisters the handler.
pub struct Registration {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Registration {
    /// Unregister from the bus. Safe to call any number of times.
    pub fn dispose(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
            tracing::debug!(id = self.id, "Frame handler unregistered");
        }
        self.registry = Weak::new();
    }

    /// False once disposed or once the bus itself is gone
    pub fn is_active(&self) -> bool {
        self.registry.strong_count() > 0
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// An estimator handler attached to a bus, readable by the renderer.
pub struct Tracked<H: FrameHandler + 'static> {
    handler: Rc<RefCell<H>>,
    registration: Registration,
}

impl<H: FrameHandler + 'static> Tracked<H> {
    pub fn attach(bus: &FrameBus, handler: H) -> Self {
        let handler = Rc::new(RefCell::new(handler));
        let shared: SharedHandler = handler.clone();
        let registration = bus.register(shared);
        Self {
            handler,
            registration,
        }
    }

    /// Borrow the handler for reading.
    ///
    /// Don't hold the borrow across [`FrameBus::dispatch`]; the frame would
    /// be skipped for this handler.
    pub fn get(&self) -> Ref<'_, H> {
        self.handler.borrow()
    }

    pub fn dispose(&mut self) {
        self.registration.dispose();
    }

    pub fn is_attached(&self) -> bool {
        self.registration.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::test_support::FakeSubject;

    #[derive(Default)]
    struct FrameCounter {
        frames: Vec<f64>,
    }

    impl FrameHandler for FrameCounter {
        fn on_frame(&mut self, now: f64, _subject: &dyn Subject) {
            self.frames.push(now);
        }
    }

    #[test]
    fn test_dispatch_reaches_attached_handler() {
        let bus = FrameBus::new();
        let tracked = Tracked::attach(&bus, FrameCounter::default());
        let subject = FakeSubject::default();

        assert_eq!(bus.dispatch(1.0, Some(&subject)), 1);
        assert_eq!(bus.dispatch(2.0, Some(&subject)), 1);
        assert_eq!(tracked.get().frames, vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_subject_skips_frame() {
        let bus = FrameBus::new();
        let tracked = Tracked::attach(&bus, FrameCounter::default());

        assert_eq!(bus.dispatch(1.0, None), 0);
        assert!(tracked.get().frames.is_empty());
    }

    #[test]
    fn test_dispose_is_idempotent_and_stops_updates() {
        let bus = FrameBus::new();
        let mut tracked = Tracked::attach(&bus, FrameCounter::default());
        let subject = FakeSubject::default();

        bus.dispatch(1.0, Some(&subject));
        tracked.dispose();
        tracked.dispose();
        assert!(!tracked.is_attached());
        assert_eq!(bus.handler_count(), 0);

        bus.dispatch(2.0, Some(&subject));
        assert_eq!(tracked.get().frames, vec![1.0]);
    }

    #[test]
    fn test_drop_unregisters() {
        let bus = FrameBus::new();
        {
            let _tracked = Tracked::attach(&bus, FrameCounter::default());
            assert_eq!(bus.handler_count(), 1);
        }
        assert_eq!(bus.handler_count(), 0);
    }

    #[test]
    fn test_dispose_after_bus_dropped() {
        let bus = FrameBus::new();
        let mut tracked = Tracked::attach(&bus, FrameCounter::default());
        drop(bus);
        assert!(!tracked.is_attached());
        tracked.dispose();
    }

    #[test]
    fn test_borrowed_handler_is_skipped() {
        let bus = FrameBus::new();
        let tracked = Tracked::attach(&bus, FrameCounter::default());
        let subject = FakeSubject::default();

        let held = tracked.get();
        assert_eq!(bus.dispatch(1.0, Some(&subject)), 0);
        drop(held);
        assert_eq!(bus.dispatch(2.0, Some(&subject)), 1);
    }
}
