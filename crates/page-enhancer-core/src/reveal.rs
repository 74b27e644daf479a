//! Reveal-on-scroll for project cards.
//!
//! ```text
//! prepare()
//!   ├── no cards                         → Empty
//!   ├── no observer OR reduced motion    → Immediate (all revealed now)
//!   └── otherwise                        → Observe (caller creates a watcher, watch_all)
//!
//! handle_entries()
//!   intersecting + pending → Revealed, unwatch
//! ```
//!
//! Reveal is one-way: a revealed card is never watched again and never
//! loses its visible class.

use tracing::{debug, trace};

use crate::capabilities::Capabilities;
use crate::config::{ObserverOptions, RevealConfig};
use crate::host::Styled;

/// Per-card reveal state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Pending,
    Revealed,
}

/// How the controller decided to reveal its cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Nothing to reveal
    Empty,
    /// Every card was revealed at setup
    Immediate,
    /// Cards wait for the viewport
    Observe,
}

/// One visibility notification for a watched card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEntry {
    /// Index of the card in the controller's set
    pub index: usize,
    pub is_intersecting: bool,
}

/// Something that watches cards for viewport intersection.
pub trait VisibilityWatcher {
    fn watch(&mut self, index: usize);
    fn unwatch(&mut self, index: usize);
}

/// Owns the card set and its reveal states.
pub struct RevealController<E> {
    cards: Vec<E>,
    states: Vec<RevealState>,
    config: RevealConfig,
    animate: bool,
}

impl<E: Styled> RevealController<E> {
    pub fn new(cards: Vec<E>, config: RevealConfig, caps: &Capabilities) -> Self {
        let states = vec![RevealState::Pending; cards.len()];
        Self {
            cards,
            states,
            config,
            animate: caps.animate_reveals(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[E] {
        &self.cards
    }

    pub fn state(&self, index: usize) -> Option<RevealState> {
        self.states.get(index).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Revealed)
            .count()
    }

    /// Options for the watcher the caller should create in `Observe` mode.
    pub fn observer_options(&self) -> ObserverOptions {
        self.config.observer_options()
    }

    /// Mark every card as pending and pick the reveal mode.
    pub fn prepare(&mut self) -> RevealMode {
        if self.cards.is_empty() {
            debug!("No revealable cards");
            return RevealMode::Empty;
        }

        for card in &self.cards {
            card.add_class(&self.config.pending_class);
        }

        if self.animate {
            debug!(cards = self.cards.len(), "Cards will reveal on scroll");
            RevealMode::Observe
        } else {
            for index in 0..self.cards.len() {
                self.reveal(index);
            }
            debug!(cards = self.cards.len(), "Cards revealed immediately");
            RevealMode::Immediate
        }
    }

    /// Start watching every card that is still pending.
    pub fn watch_all<W: VisibilityWatcher>(&self, watcher: &mut W) {
        for (index, state) in self.states.iter().enumerate() {
            if *state == RevealState::Pending {
                watcher.watch(index);
            }
        }
    }

    /// Reveal intersecting cards and stop watching them.
    ///
    /// Returns the number of cards revealed by this batch.
    pub fn handle_entries<W, I>(&mut self, entries: I, watcher: &mut W) -> usize
    where
        W: VisibilityWatcher,
        I: IntoIterator<Item = VisibilityEntry>,
    {
        let mut revealed = 0;
        for entry in entries {
            if !entry.is_intersecting {
                continue;
            }
            if self.reveal(entry.index) {
                watcher.unwatch(entry.index);
                revealed += 1;
            }
        }
        revealed
    }

    /// Reveal one card. Returns `true` only on its first reveal.
    pub fn reveal(&mut self, index: usize) -> bool {
        match self.states.get(index) {
            Some(RevealState::Pending) => {
                self.cards[index].add_class(&self.config.visible_class);
                self.states[index] = RevealState::Revealed;
                trace!(index, "Card revealed");
                true
            }
            Some(RevealState::Revealed) => false,
            None => {
                trace!(index, "Ignoring reveal for unknown card");
                false
            }
        }
    }
}
