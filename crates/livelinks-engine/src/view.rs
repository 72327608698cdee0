use std::rc::Rc;

use crate::crossref::{CrossRefIndex, DocumentId, import_references};
use crate::decoration::{DecorationError, DecorationSet, LabelPosition, build_decorations};
use crate::error::EngineError;
use crate::focus::{EditorFocus, park_caret};
use crate::interaction::{
    ClickOutcome, InteractionTracker, Navigator, PointerAffordancePort, RenderedDocument,
};
use crate::link::{IdGenerator, Link, UuidIds};
use crate::registry::LinkRegistry;
use crate::scanning::assembler::assemble;
use crate::scanning::{SyntaxSource, UrlShape, scan};
use crate::span::{SelectionRange, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Source,
    Preview,
}

/// The host view's current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: EditorMode,
    /// Raw source editing inside the source mode.
    pub source: bool,
}

impl ViewState {
    pub const fn live() -> Self {
        Self {
            mode: EditorMode::Source,
            source: false,
        }
    }

    pub const fn raw_source() -> Self {
        Self {
            mode: EditorMode::Source,
            source: true,
        }
    }

    pub const fn preview() -> Self {
        Self {
            mode: EditorMode::Preview,
            source: false,
        }
    }

    /// Rendered markup with interactive links.
    pub fn is_live(self) -> bool {
        self.mode == EditorMode::Source && !self.source
    }
}

/// The host's button for switching between editing and reading mode.
pub trait ModeSwitchButton {
    fn set_hidden(&mut self, hidden: bool);
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub url_shape: UrlShape,
    pub label_position: LabelPosition,
    /// Hide the mode switch button while the view is live.
    pub hide_switch: bool,
}

impl EngineOptions {
    pub fn new<S: AsRef<str>>(
        url_schemes: &[S],
        label_position: LabelPosition,
        hide_switch: bool,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            url_shape: UrlShape::new(url_schemes)?,
            label_position,
            hide_switch,
        })
    }
}

/// Everything one pass reads from the host.
#[derive(Clone, Copy)]
pub struct PassInput<'a> {
    pub document: &'a DocumentId,
    pub syntax: &'a dyn SyntaxSource,
    pub index: &'a dyn CrossRefIndex,
    pub visible: &'a [Span],
}

/// Result of one pass: the registry and the decorations built from it.
#[derive(Debug, Default)]
pub struct PassSnapshot {
    pub registry: LinkRegistry,
    pub decorations: DecorationSet,
}

impl PassSnapshot {
    /// Runs a full pass: cross references first, then the token scan.
    pub fn build(
        input: &PassInput<'_>,
        options: &EngineOptions,
        ids: &mut dyn IdGenerator,
    ) -> Result<Self, DecorationError> {
        let mut registry = LinkRegistry::new();
        registry.extend(import_references(input.index, input.document, ids));

        let tokens = scan(input.syntax, input.visible);
        registry.extend(assemble(&tokens, &options.url_shape, ids));

        let decorations = build_decorations(&registry, options.label_position)?;
        log::debug!(
            "pass over {}: {} tokens, {} links",
            input.document,
            tokens.len(),
            registry.len()
        );
        Ok(Self {
            registry,
            decorations,
        })
    }
}

/// What changed since the last host notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewUpdate {
    pub doc_changed: bool,
    pub viewport_changed: bool,
}

/// Link state of one editor view.
///
/// Owns the mode, the latest [`PassSnapshot`] and the interaction tracker.
/// A failed pass leaves the previous snapshot in place.
pub struct LinkView {
    options: EngineOptions,
    live: bool,
    snapshot: Rc<PassSnapshot>,
    tracker: InteractionTracker,
    ids: Box<dyn IdGenerator>,
}

impl LinkView {
    pub fn new(options: EngineOptions) -> Self {
        Self::with_ids(options, Box::new(UuidIds))
    }

    pub fn with_ids(options: EngineOptions, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            options,
            live: false,
            snapshot: Rc::new(PassSnapshot::default()),
            tracker: InteractionTracker::new(),
            ids,
        }
    }

    /// First setup of a freshly created view.
    ///
    /// In live mode this runs a pass and parks the caret so no markup is
    /// expanded under it.
    pub fn open(
        &mut self,
        state: ViewState,
        input: &PassInput<'_>,
        button: Option<&mut dyn ModeSwitchButton>,
        focus: &mut dyn EditorFocus,
    ) -> Result<(), EngineError> {
        self.switch_mode(state, button);
        if self.live {
            self.refresh(input)?;
            park_caret(focus);
        }
        Ok(())
    }

    /// Applies a host layout change. Returns true if the view just became
    /// live, in which case the host should call [`refresh`](Self::refresh).
    pub fn switch_mode(&mut self, state: ViewState, button: Option<&mut dyn ModeSwitchButton>) -> bool {
        let was_live = self.live;
        self.live = state.is_live();

        if self.options.hide_switch
            && let Some(button) = button
        {
            button.set_hidden(self.live);
        }
        if !self.live {
            self.snapshot = Rc::new(PassSnapshot::default());
            self.tracker.reset();
        }
        if was_live != self.live {
            log::debug!("view live: {}", self.live);
        }
        self.live && !was_live
    }

    /// Reacts to a document or viewport change. Returns true if a pass ran.
    pub fn update(&mut self, update: ViewUpdate, input: &PassInput<'_>) -> Result<bool, EngineError> {
        if !self.live || !(update.doc_changed || update.viewport_changed) {
            return Ok(false);
        }
        self.refresh(input)?;
        Ok(true)
    }

    /// Rebuilds the snapshot. On failure the previous snapshot stays.
    pub fn refresh(&mut self, input: &PassInput<'_>) -> Result<(), EngineError> {
        if !self.live {
            return Ok(());
        }
        let snapshot = PassSnapshot::build(input, &self.options, self.ids.as_mut())?;
        self.snapshot = Rc::new(snapshot);
        Ok(())
    }

    /// The host finished applying decorations; bind the new elements.
    pub fn on_rendered(&mut self, rendered: &mut dyn RenderedDocument) -> usize {
        if !self.live {
            return 0;
        }
        self.tracker
            .bind(rendered, &self.snapshot.registry, self.ids.as_mut())
    }

    pub fn hover(
        &mut self,
        link: &Link,
        selection: &[SelectionRange],
        pointer: &mut dyn PointerAffordancePort,
    ) -> bool {
        self.tracker.hover(link, selection, pointer)
    }

    pub fn leave(&mut self, pointer: &mut dyn PointerAffordancePort) {
        self.tracker.leave(pointer);
    }

    pub fn click<H>(&mut self, link: &Link, host: &mut H) -> ClickOutcome
    where
        H: Navigator + EditorFocus + ?Sized,
    {
        self.tracker.click(link, host)
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn expanded(&self) -> bool {
        self.tracker.expanded()
    }

    pub fn tracker(&self) -> &InteractionTracker {
        &self.tracker
    }

    pub fn snapshot(&self) -> Rc<PassSnapshot> {
        Rc::clone(&self.snapshot)
    }

    pub fn decorations(&self) -> &DecorationSet {
        &self.snapshot.decorations
    }
}
