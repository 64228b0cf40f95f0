//! In-memory reference implementation of the content tree port.

use crate::tree::{ContentNode, ContentTree, LocaleFilter};
use crate::types::{Locale, NodeId};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

#[derive(Default)]
struct TreeInner {
    nodes: HashMap<NodeId, ContentNode>,
    /// Hosting is opt-out: every known node hosts views unless listed here.
    non_hosts: HashSet<NodeId>,
    /// node -> translation group
    groups: HashMap<NodeId, u64>,
    /// (translation group, locale) -> node
    members: HashMap<(u64, Locale), NodeId>,
    next_group: u64,
}

/// In-memory content tree with translation groups.
///
/// Intended for tests and for embedders whose content system is itself
/// in-process; real deployments implement [`ContentTree`] against their own
/// storage.
pub struct InMemoryTree {
    default_locale: Locale,
    inner: RwLock<TreeInner>,
}

impl InMemoryTree {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            default_locale,
            inner: RwLock::new(TreeInner::default()),
        }
    }

    /// Add or replace a node. Nodes host views by default.
    pub fn add_node(&self, node: ContentNode) {
        let mut inner = self.inner.write();
        if let Some(locale) = node.locale.clone() {
            let group = match inner.groups.get(&node.id).copied() {
                Some(group) => group,
                None => {
                    let group = inner.next_group;
                    inner.next_group += 1;
                    inner.groups.insert(node.id, group);
                    group
                }
            };
            inner.members.insert((group, locale), node.id);
        }
        inner.nodes.insert(node.id, node);
    }

    /// Link two localized nodes as translations of each other. Both ends must
    /// already be known and carry a locale; anything else is a no-op.
    pub fn link_translations(&self, a: NodeId, b: NodeId) {
        let mut inner = self.inner.write();
        let (locale_a, locale_b) = {
            let la = inner.nodes.get(&a).and_then(|n| n.locale.clone());
            let lb = inner.nodes.get(&b).and_then(|n| n.locale.clone());
            match (la, lb) {
                (Some(la), Some(lb)) => (la, lb),
                _ => return,
            }
        };

        let group = match inner.groups.get(&a).copied() {
            Some(group) => group,
            None => {
                let group = inner.next_group;
                inner.next_group += 1;
                inner.groups.insert(a, group);
                group
            }
        };

        // Merge b's existing group members into a's group.
        if let Some(old) = inner.groups.get(&b).copied() {
            if old != group {
                let moved: Vec<(Locale, NodeId)> = inner
                    .members
                    .iter()
                    .filter(|((g, _), _)| *g == old)
                    .map(|((_, locale), id)| (locale.clone(), *id))
                    .collect();
                for (locale, id) in moved {
                    inner.members.remove(&(old, locale.clone()));
                    inner.members.insert((group, locale), id);
                    inner.groups.insert(id, group);
                }
            }
        }

        inner.groups.insert(a, group);
        inner.groups.insert(b, group);
        inner.members.insert((group, locale_a), a);
        inner.members.insert((group, locale_b), b);
    }

    /// Grant or revoke the view-hosting capability for a node.
    pub fn set_hosts_views(&self, id: NodeId, hosts: bool) {
        let mut inner = self.inner.write();
        if hosts {
            inner.non_hosts.remove(&id);
        } else {
            inner.non_hosts.insert(id);
        }
    }
}

impl ContentTree for InMemoryTree {
    fn fetch(&self, id: NodeId, filter: LocaleFilter<'_>) -> Option<ContentNode> {
        let inner = self.inner.read();
        let node = inner.nodes.get(&id)?;
        if let LocaleFilter::Scoped(scope) = filter {
            if let Some(locale) = &node.locale {
                if locale != scope {
                    return None;
                }
            }
        }
        Some(node.clone())
    }

    fn default_locale(&self) -> Locale {
        self.default_locale.clone()
    }

    fn translation_of(&self, id: NodeId, locale: &Locale) -> Option<NodeId> {
        let inner = self.inner.read();
        let node = inner.nodes.get(&id)?;
        match &node.locale {
            Some(own) if own == locale => Some(id),
            Some(_) => {
                let group = inner.groups.get(&id)?;
                inner.members.get(&(*group, locale.clone())).copied()
            }
            None => None,
        }
    }

    fn hosts_views(&self, id: NodeId) -> bool {
        let inner = self.inner.read();
        inner.nodes.contains_key(&id) && !inner.non_hosts.contains(&id)
    }
}
