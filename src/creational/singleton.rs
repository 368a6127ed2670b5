// Singleton as an explicit, injected holder instead of global state: whoever
// owns the `Lazy` decides how long "the one instance" lives.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::info;

/// Creates its value on first use and hands out shared references to that
/// single instance until [`Lazy::reset`] is called.
#[derive(Debug)]
pub struct Lazy<T> {
    slot: RefCell<Option<Rc<T>>>,
    creations: Cell<usize>,
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self {
            slot: RefCell::new(None),
            creations: Cell::new(0),
        }
    }
}

impl<T> Lazy<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_init(&self, init: impl FnOnce() -> T) -> Rc<T> {
        if let Some(existing) = self.slot.borrow().as_ref() {
            return Rc::clone(existing);
        }

        let value = Rc::new(init());
        self.creations.set(self.creations.get() + 1);
        info!(creations = self.creations.get(), "instance created");
        *self.slot.borrow_mut() = Some(Rc::clone(&value));
        value
    }

    /// Drops the holder's instance. References already handed out stay
    /// valid; the next `get_or_init` creates a new instance.
    pub fn reset(&self) {
        self.slot.borrow_mut().take();
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// How many instances this holder has created over its lifetime.
    pub fn creations(&self) -> usize {
        self.creations.get()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub debug_mode: bool,
}

impl AppConfig {
    pub fn load() -> Self {
        Self {
            app_name: "design-patterns".to_string(),
            debug_mode: cfg!(debug_assertions),
        }
    }

    pub fn show_message(&self, narrator: &Narrator) {
        narrator.say(format_args!(
            "Hello from the single {} config (debug: {})",
            self.app_name, self.debug_mode
        ));
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let holder: Lazy<AppConfig> = Lazy::new();

    let first = holder.get_or_init(AppConfig::load);
    first.show_message(narrator);

    let second = holder.get_or_init(AppConfig::load);
    second.show_message(narrator);

    if Rc::ptr_eq(&first, &second) {
        narrator.say("Both references point to the same instance!");
    } else {
        narrator.say("Different instances exist (should not happen)!");
    }
    narrator.say(format_args!("Instances created: {}", holder.creations()));

    narrator.blank();
    narrator.say("Resetting the holder...");
    holder.reset();
    let third = holder.get_or_init(AppConfig::load);
    narrator.say(format_args!(
        "After reset: same as before? {} (instances created: {})",
        Rc::ptr_eq(&first, &third),
        holder.creations()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_instance() {
        let holder = Lazy::new();
        let a = holder.get_or_init(AppConfig::load);
        let b = holder.get_or_init(|| panic!("must not run twice"));

        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(holder.creations(), 1);
    }

    #[test]
    fn test_lazy_until_first_use() {
        let holder: Lazy<AppConfig> = Lazy::new();
        assert!(!holder.is_initialized());
        assert_eq!(holder.creations(), 0);

        holder.get_or_init(AppConfig::load);
        assert!(holder.is_initialized());
    }

    #[test]
    fn test_reset_creates_new_instance() {
        let holder = Lazy::new();
        let before = holder.get_or_init(|| 1u32);
        holder.reset();
        assert!(!holder.is_initialized());

        let after = holder.get_or_init(|| 2u32);
        assert!(!Rc::ptr_eq(&before, &after));
        assert_eq!(*before, 1);
        assert_eq!(*after, 2);
        assert_eq!(holder.creations(), 2);
    }

    #[test]
    fn test_independent_holders() {
        let a: Lazy<u8> = Lazy::new();
        let b: Lazy<u8> = Lazy::new();
        assert!(!Rc::ptr_eq(&a.get_or_init(|| 0), &b.get_or_init(|| 0)));
    }
}
