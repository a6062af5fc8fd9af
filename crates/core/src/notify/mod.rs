use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::{DemoError, Result};

/// Listener reacting to broadcast messages.
pub trait Observer {
    fn update(&self, message: &str) -> Result<()>;
}

/// Ordered list of observers. Insertion order is delivery order and the same
/// observer may be attached more than once.
#[derive(Default)]
pub struct NotificationChannel {
    observers: Vec<Rc<dyn Observer>>,
}

impl fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, observer: Rc<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Removes the first entry pointing at the same observer.
    pub fn detach(&mut self, observer: &Rc<dyn Observer>) -> Result<()> {
        let position = self
            .observers
            .iter()
            .position(|candidate| Rc::ptr_eq(candidate, observer))
            .ok_or(DemoError::ObserverNotFound)?;
        self.observers.remove(position);
        Ok(())
    }

    /// Delivers `message` to every observer in attachment order. The first
    /// failing observer aborts the broadcast.
    pub fn notify(&self, message: &str) -> Result<()> {
        tracing::debug!(message, observers = self.observers.len(), "broadcasting");
        for observer in &self.observers {
            observer.update(message)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

/// Text shown in the window's status line. Cloning shares the same text.
#[derive(Debug, Default, Clone)]
pub struct StatusLabel {
    text: Rc<RefCell<String>>,
}

impl StatusLabel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }
}

/// Observer that mirrors broadcasts into a [`StatusLabel`].
#[derive(Debug, Clone)]
pub struct LabelObserver {
    label: StatusLabel,
}

impl LabelObserver {
    pub fn new(label: StatusLabel) -> Self {
        Self { label }
    }
}

impl Observer for LabelObserver {
    fn update(&self, message: &str) -> Result<()> {
        self.label.set_text(format!("Observer received: {message}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Observer for Recorder {
        fn update(&self, message: &str) -> Result<()> {
            self.log.borrow_mut().push(format!("{}:{message}", self.name));
            Ok(())
        }
    }

    struct Failing;

    impl Observer for Failing {
        fn update(&self, _message: &str) -> Result<()> {
            Err(DemoError::msg("display gone"))
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<dyn Observer> {
        Rc::new(Recorder {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn delivers_in_attachment_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = NotificationChannel::new();
        channel.attach(recorder("first", &log));
        channel.attach(recorder("second", &log));

        channel.notify("hello").unwrap();

        assert_eq!(*log.borrow(), vec!["first:hello", "second:hello"]);
    }

    #[test]
    fn duplicate_attach_receives_twice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = NotificationChannel::new();
        let observer = recorder("dup", &log);
        channel.attach(observer.clone());
        channel.attach(observer.clone());

        channel.notify("x").unwrap();
        assert_eq!(log.borrow().len(), 2);

        channel.detach(&observer).unwrap();
        log.borrow_mut().clear();
        channel.notify("y").unwrap();
        assert_eq!(*log.borrow(), vec!["dup:y"]);
    }

    #[test]
    fn detach_removes_only_that_observer() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = NotificationChannel::new();
        let first = recorder("first", &log);
        let second = recorder("second", &log);
        channel.attach(first.clone());
        channel.attach(second);

        channel.detach(&first).unwrap();
        channel.notify("m").unwrap();

        assert_eq!(*log.borrow(), vec!["second:m"]);
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn detaching_unknown_observer_fails() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = NotificationChannel::new();
        let stranger = recorder("stranger", &log);

        let err = channel.detach(&stranger).unwrap_err();
        assert!(matches!(err, DemoError::ObserverNotFound));
        assert!(channel.is_empty());
    }

    #[test]
    fn failing_observer_skips_the_rest() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut channel = NotificationChannel::new();
        channel.attach(recorder("before", &log));
        channel.attach(Rc::new(Failing));
        channel.attach(recorder("after", &log));

        assert!(channel.notify("boom").is_err());
        assert_eq!(*log.borrow(), vec!["before:boom"]);
    }

    #[test]
    fn label_observer_formats_message() {
        let label = StatusLabel::new();
        let observer = LabelObserver::new(label.clone());
        assert_eq!(label.text(), "");

        observer.update("Product A created").unwrap();
        assert_eq!(label.text(), "Observer received: Product A created");
    }
}
