//! Pointer behaviour for rendered links.
//!
//! After the host renders, [`InteractionTracker::bind`] walks the link
//! elements and attaches each one to a [`Link`]. The host then forwards
//! pointer events on an element to [`hover`](InteractionTracker::hover),
//! [`leave`](InteractionTracker::leave) and
//! [`click`](InteractionTracker::click).
//!
//! Hovering a link that the selection touches means the user is editing it:
//! the tracker becomes *expanded*, shows a text cursor and lets the next
//! click place the caret instead of navigating.

use crate::decoration::Attr;
use crate::focus::{EditorFocus, park_caret};
use crate::link::{IdGenerator, Link, LinkId, LinkKind};
use crate::registry::LinkRegistry;
use crate::span::SelectionRange;

/// Pointer look over the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Affordance {
    /// Ordinary caret placement; click-to-navigate is overridden.
    #[default]
    TextCursor,
    /// The pointer acts as a link cursor.
    LinkPointer,
}

pub trait PointerAffordancePort {
    fn set_affordance(&mut self, affordance: Affordance);
}

/// Performs the actual navigation; the tracker only decides when.
pub trait Navigator {
    fn navigate_internal(&mut self, destination: &str);
    fn navigate_external(&mut self, destination: &str);
}

/// A rendered element that may represent a link.
pub trait LinkElement {
    fn attribute(&self, name: &str) -> Option<String>;
    fn has_class(&self, class: &str) -> bool;
    fn set_attribute(&mut self, name: &str, value: &str);
    /// Routes this element's click, mouseover and mouseleave to `link`.
    fn attach(&mut self, link: Link);
}

/// The host's rendered output.
pub trait RenderedDocument {
    fn for_each_link_element(&mut self, visit: &mut dyn FnMut(&mut dyn LinkElement));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The selection touches the link; the click only places the caret.
    Suppressed,
    Navigated { kind: LinkKind, destination: String },
    /// Nothing to navigate to.
    NoDestination,
}

/// Per-view hover and click state.
#[derive(Debug, Default)]
pub struct InteractionTracker {
    expanded: bool,
    affordance: Affordance,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while hovering a link that the selection touches.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn affordance(&self) -> Affordance {
        self.affordance
    }

    /// Forgets hover state from a previous live session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pointer currently acts as a link cursor.
    pub fn is_engaged(&self) -> bool {
        self.affordance == Affordance::LinkPointer
    }

    /// Attaches every link element not yet marked done.
    ///
    /// Elements with a known identifier get their registry link. Elements
    /// from other rendering paths, or whose identifier is no longer in the
    /// registry, get a placeholder link without a position. Returns the
    /// number of elements bound by this call.
    pub fn bind(
        &mut self,
        rendered: &mut dyn RenderedDocument,
        registry: &LinkRegistry,
        ids: &mut dyn IdGenerator,
    ) -> usize {
        let mut bound = 0;
        rendered.for_each_link_element(&mut |element| {
            if element.attribute(Attr::DONE).is_some() {
                return;
            }
            let uid = element.attribute(Attr::UID);
            let href = element.attribute(Attr::HREF);
            if uid.is_none() && href.is_none() {
                return;
            }

            let known = uid.and_then(|uid| registry.get(&LinkId::new(uid)).cloned());
            let link = known.unwrap_or_else(|| {
                let kind = if element.has_class(Attr::INTERNAL_CLASS) {
                    LinkKind::Internal
                } else {
                    LinkKind::External
                };
                Link::placeholder(ids.next_id(), kind, href)
            });

            element.set_attribute(Attr::DONE, "");
            element.attach(link);
            bound += 1;
        });
        if bound > 0 {
            log::debug!("bound {bound} link elements");
        }
        bound
    }

    /// Recomputes the expanded state for `link` and applies the affordance.
    pub fn hover(
        &mut self,
        link: &Link,
        selection: &[SelectionRange],
        pointer: &mut dyn PointerAffordancePort,
    ) -> bool {
        self.expanded = selection
            .iter()
            .any(|range| link.touches(range.from) || link.touches(range.to));

        self.affordance = if self.expanded {
            Affordance::TextCursor
        } else {
            Affordance::LinkPointer
        };
        pointer.set_affordance(self.affordance);
        self.expanded
    }

    pub fn leave(&mut self, pointer: &mut dyn PointerAffordancePort) {
        self.affordance = Affordance::TextCursor;
        pointer.set_affordance(self.affordance);
    }

    /// Navigates to `link` unless the last hover found it expanded.
    pub fn click<H>(&mut self, link: &Link, host: &mut H) -> ClickOutcome
    where
        H: Navigator + EditorFocus + ?Sized,
    {
        if self.expanded {
            return ClickOutcome::Suppressed;
        }
        let Some(destination) = link.destination.clone() else {
            log::debug!("link {} has no destination", link.id);
            return ClickOutcome::NoDestination;
        };

        park_caret(host);
        match link.kind {
            LinkKind::Internal => host.navigate_internal(&destination),
            LinkKind::External => host.navigate_external(&destination),
        }
        ClickOutcome::Navigated {
            kind: link.kind,
            destination,
        }
    }
}
