use std::collections::HashMap;

use crate::link::{Link, LinkId};

/// Links of one scan pass, keyed by identifier.
///
/// Insertion order is kept: it is the tie-break when links are sorted by
/// start offset. A registry is never merged with another one; each pass
/// builds a new registry.
#[derive(Debug, Default, Clone)]
pub struct LinkRegistry {
    links: Vec<Link>,
    by_id: HashMap<LinkId, usize>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link. A link with an identifier already present replaces the
    /// old entry in place and the old entry is returned.
    pub fn insert(&mut self, link: Link) -> Option<Link> {
        match self.by_id.get(&link.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.links[slot], link)),
            None => {
                self.by_id.insert(link.id.clone(), self.links.len());
                self.links.push(link);
                None
            }
        }
    }

    pub fn get(&self, id: &LinkId) -> Option<&Link> {
        self.by_id.get(id).map(|&slot| &self.links[slot])
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Positioned links by ascending start; equal starts keep insertion order.
    pub fn sorted_by_start(&self) -> Vec<&Link> {
        let mut sorted: Vec<&Link> = self.links.iter().filter(|l| l.span.is_some()).collect();
        sorted.sort_by_key(|link| link.start());
        sorted
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.by_id.clear();
    }
}

impl Extend<Link> for LinkRegistry {
    fn extend<I: IntoIterator<Item = Link>>(&mut self, iter: I) {
        for link in iter {
            self.insert(link);
        }
    }
}
