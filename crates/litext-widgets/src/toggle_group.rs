#![forbid(unsafe_code)]

//! Mutually exclusive toggle buttons.
//!
//! A [`ToggleGroup`] is a caller-owned handle. Cloning it yields another
//! handle to the same member list, so every button of a group can carry
//! its own copy. When one member is pressed, [`ToggleGroup::notify`]
//! releases every other pressed member.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use litext_core::dom::{Document, NodeId};
use litext_core::error::DomError;

use crate::button::{ButtonState, PRESSED_CLASS};

struct Member {
    id: String,
    root: NodeId,
    state: Rc<Cell<ButtonState>>,
}

/// Shared handle to a named group of toggle buttons.
#[derive(Clone)]
pub struct ToggleGroup {
    name: Rc<str>,
    members: Rc<RefCell<Vec<Member>>>,
}

impl fmt::Debug for ToggleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleGroup")
            .field("name", &self.name)
            .field("members", &self.len())
            .finish()
    }
}

impl ToggleGroup {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            members: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of registered members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a button. Registering the same id twice replaces the entry.
    pub(crate) fn register(&self, id: &str, root: NodeId, state: Rc<Cell<ButtonState>>) {
        let mut members = self.members.borrow_mut();
        members.retain(|m| m.id != id);
        members.push(Member {
            id: id.to_string(),
            root,
            state,
        });
    }

    /// Drop a button from the group. Returns whether it was a member.
    pub fn unregister(&self, id: &str) -> bool {
        let mut members = self.members.borrow_mut();
        let before = members.len();
        members.retain(|m| m.id != id);
        members.len() != before
    }

    /// `id` was just pressed: release every other pressed member.
    ///
    /// Returns the ids of the released members.
    pub fn notify(&self, doc: &mut Document, id: &str) -> Result<Vec<String>, DomError> {
        let members = self.members.borrow();
        let mut released = Vec::new();
        for member in members.iter().filter(|m| m.id != id) {
            let state = member.state.get();
            if !state.contains(ButtonState::PRESSED) {
                continue;
            }
            member.state.set(state - ButtonState::PRESSED);
            if doc.is_alive(member.root) {
                doc.remove_class(member.root, PRESSED_CLASS)?;
            }
            released.push(member.id.clone());
        }
        Ok(released)
    }

    /// Id of the pressed member, if any.
    #[must_use]
    pub fn pressed_member(&self) -> Option<String> {
        self.members
            .borrow()
            .iter()
            .find(|m| m.state.get().contains(ButtonState::PRESSED))
            .map(|m| m.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(doc: &mut Document, group: &ToggleGroup, id: &str) -> (NodeId, Rc<Cell<ButtonState>>) {
        let root = doc.create_element("div");
        let state = Rc::new(Cell::new(ButtonState::TOGGLE_ENABLED));
        group.register(id, root, Rc::clone(&state));
        (root, state)
    }

    #[test]
    fn notify_releases_other_pressed_members() {
        let mut doc = Document::new();
        let group = ToggleGroup::new("align");
        let (a_root, a) = member(&mut doc, &group, "a");
        let (_, b) = member(&mut doc, &group, "b");
        a.set(a.get() | ButtonState::PRESSED);
        doc.add_class(a_root, PRESSED_CLASS).unwrap();

        b.set(b.get() | ButtonState::PRESSED);
        let released = group.notify(&mut doc, "b").unwrap();
        assert_eq!(released, vec!["a".to_string()]);
        assert!(!a.get().contains(ButtonState::PRESSED));
        assert!(!doc.has_class(a_root, PRESSED_CLASS));
        assert_eq!(group.pressed_member().as_deref(), Some("b"));
    }

    #[test]
    fn unregister_and_reregister() {
        let mut doc = Document::new();
        let group = ToggleGroup::new("g");
        member(&mut doc, &group, "a");
        member(&mut doc, &group, "a");
        assert_eq!(group.len(), 1);
        assert!(group.unregister("a"));
        assert!(!group.unregister("a"));
        assert!(group.is_empty());
    }

    #[test]
    fn clones_share_members() {
        let mut doc = Document::new();
        let group = ToggleGroup::new("g");
        let other = group.clone();
        member(&mut doc, &other, "a");
        assert_eq!(group.len(), 1);
        assert_eq!(group.name(), "g");
    }
}
