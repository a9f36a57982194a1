//! Config bindings
//!
//! A binding is a get/set pair that lets an overlay observe (and an editor
//! flip) an option without knowing where the option is stored. Bindings are
//! pure pass-through: no caching, no validation.

use std::fmt;
use std::sync::Arc;

use crate::context::{Flag, FlagStore};

/// Read/write handle onto a single value owned elsewhere.
pub trait Binding<T>: Send + Sync {
    fn get(&self) -> T;
    fn set(&self, value: T);
}

/// Binding onto one flag of a [`FlagStore`]
#[derive(Clone)]
pub struct FlagBinding {
    store: Arc<dyn FlagStore>,
    flag: Flag,
}

impl FlagBinding {
    pub fn new(store: Arc<dyn FlagStore>, flag: Flag) -> Self {
        Self { store, flag }
    }

    pub fn flag(&self) -> Flag {
        self.flag
    }
}

impl fmt::Debug for FlagBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagBinding").field("flag", &self.flag).finish()
    }
}

impl Binding<bool> for FlagBinding {
    fn get(&self) -> bool {
        self.store.get_flag(self.flag)
    }

    fn set(&self, value: bool) {
        self.store.set_flag(self.flag, value);
    }
}

/// Binding built from a getter and a setter closure.
///
/// For hosts whose option storage is not a [`FlagStore`].
pub struct AccessorBinding<T> {
    getter: Box<dyn Fn() -> T + Send + Sync>,
    setter: Box<dyn Fn(T) + Send + Sync>,
}

impl<T> AccessorBinding<T> {
    pub fn new(
        getter: impl Fn() -> T + Send + Sync + 'static,
        setter: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            getter: Box::new(getter),
            setter: Box::new(setter),
        }
    }
}

impl<T> Binding<T> for AccessorBinding<T> {
    fn get(&self) -> T {
        (self.getter)()
    }

    fn set(&self, value: T) {
        (self.setter)(value)
    }
}

/// Binding that always reads the same value and ignores writes.
#[derive(Debug, Clone, Copy)]
pub struct ConstBinding<T>(pub T);

impl<T: Copy + Send + Sync> Binding<T> for ConstBinding<T> {
    fn get(&self) -> T {
        self.0
    }

    fn set(&self, _value: T) {}
}
