//! Undo-capable container: past/present/future stacks around one state slice.
//!
//! Applied only to the slice that needs time travel; everything else in
//! [`crate::kernel::ProjectState`] lives outside it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Undoable<T: Clone> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
}

impl<T: Clone> Undoable<T> {
    pub fn new(present: T) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Applies `mutate` to a working copy. When it reports a change, the old
    /// present is pushed to the past and the future is cleared.
    pub fn record_with(&mut self, mutate: impl FnOnce(&mut T) -> bool) -> bool {
        let mut next = self.present.clone();
        if !mutate(&mut next) {
            return false;
        }
        let old = std::mem::replace(&mut self.present, next);
        self.past.push(old);
        self.future.clear();
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(prev) => {
                let current = std::mem::replace(&mut self.present, prev);
                self.future.push(current);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.present, next);
                self.past.push(current);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/undo.rs"]
mod tests;
