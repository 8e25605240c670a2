use crate::input::MenuKey;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type KeyHandler = Rc<dyn Fn(MenuKey)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    handlers: Vec<(u64, KeyHandler)>,
}

/// Window-level key listener registry.
///
/// The host forwards every key press to [`KeyboardHub::dispatch`]; menus
/// subscribe while mounted and are removed again when their
/// [`KeySubscription`] is dropped.
#[derive(Clone, Default)]
pub struct KeyboardHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(MenuKey) + 'static) -> KeySubscription {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.handlers.push((id, Rc::new(handler)));
        log::debug!("key listener {} registered", id);

        KeySubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Delivers `key` to every current listener and returns how many there were.
    pub fn dispatch(&self, key: MenuKey) -> usize {
        // handlers may drop their own subscription while running
        let handlers: Vec<KeyHandler> = self
            .listeners
            .borrow()
            .handlers
            .iter()
            .map(|(_, h)| h.clone())
            .collect();

        for handler in &handlers {
            handler(key);
        }
        handlers.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().handlers.len()
    }
}

#[must_use = "the listener is removed as soon as the subscription is dropped"]
pub struct KeySubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for KeySubscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .handlers
                .retain(|(id, _)| *id != self.id);
            log::debug!("key listener {} released", self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_subscribers() {
        let hub = KeyboardHub::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let _sub = hub.subscribe(move |key| log.borrow_mut().push(key));

        assert_eq!(hub.dispatch(MenuKey::Char('q')), 1);
        assert_eq!(hub.dispatch(MenuKey::Escape), 1);
        assert_eq!(*seen.borrow(), vec![MenuKey::Char('q'), MenuKey::Escape]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let hub = KeyboardHub::new();
        let count = Rc::new(Cell::new(0));

        let counter = count.clone();
        let sub = hub.subscribe(move |_| counter.set(counter.get() + 1));
        hub.dispatch(MenuKey::Enter);
        drop(sub);

        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(MenuKey::Enter), 0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_handler_may_drop_its_own_subscription() {
        let hub = KeyboardHub::new();
        let slot: Rc<RefCell<Option<KeySubscription>>> = Rc::new(RefCell::new(None));

        let own = slot.clone();
        let sub = hub.subscribe(move |_| {
            own.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        assert_eq!(hub.dispatch(MenuKey::Char('x')), 1);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = KeyboardHub::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }
}
