//! The searcher (visitor) contract: desired depth, per-match callback,
//! and the tri-state continuation protocol.

use crate::catalog::Address;
use crate::context::MatchContext;
use crate::filter::SearchFilter;

/// The granularity level at which a searcher wants callbacks.
///
/// Totally ordered: `Target < Image < CompUnit < Function`. The engine
/// never calls back shallower than the requested depth and never descends
/// past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SearchDepth {
    Target,
    Image,
    CompUnit,
    Function,
}

impl SearchDepth {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Image => "image",
            Self::CompUnit => "comp_unit",
            Self::Function => "function",
        }
    }
}

impl std::fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Instruction returned from a searcher callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackAction {
    /// Proceed normally: next sibling, or deeper where applicable.
    Continue,
    /// Abandon the remainder of the current branch and resume one level up.
    /// At a loop with no finer level beneath it, degrades to `Continue`.
    Pop,
    /// Abort the entire search immediately. No further callbacks at any
    /// level.
    Stop,
}

impl CallbackAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Pop => "pop",
            Self::Stop => "stop",
        }
    }
}

impl std::fmt::Display for CallbackAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Visitor invoked at every qualifying catalog node at its desired depth.
///
/// Implementation state lives in the concrete searcher, not in the engine.
pub trait Searcher {
    /// The depth at which this searcher wants callbacks.
    fn depth(&self) -> SearchDepth;

    /// Called once per qualifying node at [`depth`](Self::depth).
    ///
    /// `address` and `container_only` are reserved for function/line-level
    /// resolution; the engine currently passes `None` and `false`.
    fn on_match(
        &mut self,
        filter: &dyn SearchFilter,
        context: &MatchContext,
        address: Option<&Address>,
        container_only: bool,
    ) -> CallbackAction;

    /// Append a human-readable description of this searcher.
    fn describe(&self, _s: &mut String) {}
}
