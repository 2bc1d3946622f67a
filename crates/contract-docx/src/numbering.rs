//! List numbering registry.
//!
//! Every ordered list met during one assembly run is registered here and
//! receives the next instance number under [`CONTRACT_LIST`]. Instances are
//! never reset, not even at section boundaries, so that each list restarts its
//! own numbering while sharing one numbering definition. Unordered lists all
//! share [`DASH_BULLETS`] and are never registered.

use std::collections::HashMap;
use std::fmt;

use ecow::EcoString;
use serde::Serialize;

/// The numbering reference shared by all ordered lists.
pub const CONTRACT_LIST: &str = "contract-list";
/// The numbering reference shared by all unordered lists.
pub const DASH_BULLETS: &str = "dash-bullets";

/// Identifies one registered ordered list within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ListId(u32);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "list#{}", self.0)
    }
}

/// The numbering an ordered list draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListRegistration {
    /// The numbering definition reference.
    pub reference: EcoString,
    /// The 1-based instance number under `reference`.
    pub instance: u32,
}

/// Registry of ordered list instances for one assembly run.
///
/// A registry must not outlive the run that created it, and must never be
/// shared between runs.
#[derive(Debug, Default)]
pub struct ListRegistry {
    next_id: u32,
    lists: HashMap<ListId, ListRegistration>,
    order: Vec<ListId>,
}

impl ListRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new ordered list and returns its identifier.
    pub fn register_ordered_list(&mut self) -> ListId {
        let id = ListId(self.next_id);
        self.next_id += 1;

        let instance = self
            .lists
            .values()
            .filter(|list| list.reference == CONTRACT_LIST)
            .count() as u32
            + 1;

        log::debug!("registered ordered {id} as {CONTRACT_LIST} instance {instance}");
        self.lists.insert(
            id,
            ListRegistration {
                reference: CONTRACT_LIST.into(),
                instance,
            },
        );
        self.order.push(id);

        id
    }

    /// Looks up a registered list.
    pub fn lookup(&self, id: ListId) -> Option<&ListRegistration> {
        self.lists.get(&id)
    }

    /// The reference used by every unordered list.
    pub fn bullet_reference(&self) -> &'static str {
        DASH_BULLETS
    }

    /// Iterates registrations in the order they were made.
    pub fn registrations(&self) -> impl Iterator<Item = &ListRegistration> + '_ {
        self.order.iter().filter_map(|id| self.lists.get(id))
    }

    /// The number of registered lists.
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Whether no list has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
