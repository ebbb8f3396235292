//! Interning for food and allergen names.
//!
//! A puzzle input mentions the same few hundred names over and over (every
//! record repeats most of the foods), and the resolver copies them into the
//! universe, every record and every candidate set. Interning makes each of
//! those copies an `Rc` clone of one shared allocation.
//!
//! An `Interner` lives for one parse. Once it is dropped the names are owned
//! only by the records built from that input.

use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Interner {
    names: HashMap<Box<str>, Rc<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, returning the shared `Rc<str>` for it.
    pub fn intern(&mut self, name: impl AsRef<str>) -> Rc<str> {
        let name = name.as_ref();
        if let Some(existing) = self.names.get(name) {
            return Rc::clone(existing);
        }
        let rc: Rc<str> = Rc::from(name);
        self.names.insert(Box::from(name), Rc::clone(&rc));
        rc
    }

    /// Number of distinct names interned so far.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.names.len()
    }
}
