//! Lexical scope tracking.
//!
//! The tracker is a stack of block frames. The bottom frame is the file
//! scope and is never popped. Every block opened with `:` pushes a frame;
//! `END` pops one. A frame is an *owner* frame when the statement that
//! opened it created a named scope (procedure, function, trigger), and
//! only owner frames produce a [`ScopeRegion`] when they close.
//!
//! A recognizer never opens a frame directly. It calls [`push`] to set the
//! statement's pending scope, and the frame is opened when the statement
//! ends. Items emitted while the statement is being recognized therefore
//! all see the enclosing scope.
//!
//! [`push`]: ScopeTracker::push

use abl_ir::{ItemId, ScopeRef};
use tracing::{debug, trace};

/// Source range covered by a named scope's block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScopeRegion {
    pub scope: ScopeRef,
    /// Offset of the statement that opened the block.
    pub start: u32,
    /// Offset just past the terminator of the closing `END` (or the end
    /// of the file for blocks that were never closed).
    pub end: u32,
}

impl ScopeRegion {
    #[inline]
    pub fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset < self.end
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

#[derive(Copy, Clone, Debug)]
struct Frame {
    scope: ScopeRef,
    start: u32,
    owner: bool,
}

#[derive(Debug)]
pub struct ScopeTracker {
    frames: Vec<Frame>,
    pending: Option<ScopeRef>,
}

impl Default for ScopeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeTracker {
    pub fn new() -> Self {
        ScopeTracker {
            frames: vec![Frame {
                scope: ScopeRef::File,
                start: 0,
                owner: false,
            }],
            pending: None,
        }
    }

    /// The scope on top of the stack.
    pub fn current(&self) -> ScopeRef {
        self.frames.last().map_or(ScopeRef::File, |f| f.scope)
    }

    /// Number of open frames, the file frame included.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Make `item` the scope of the block the current statement opens.
    ///
    /// A later push in the same statement replaces an earlier one.
    pub fn push(&mut self, item: ItemId) {
        trace!(item = item.index(), "pending scope");
        self.pending = Some(ScopeRef::Item(item));
    }

    /// Whether the current statement has set a pending scope.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Close the current statement. If it opens a block, push a frame for
    /// it starting at `start`; otherwise drop the pending scope.
    pub fn close_statement(&mut self, opens_block: bool, start: u32) {
        let pending = self.pending.take();
        if !opens_block {
            return;
        }
        let frame = match pending {
            Some(scope) => Frame {
                scope,
                start,
                owner: true,
            },
            None => Frame {
                scope: self.current(),
                start,
                owner: false,
            },
        };
        trace!(depth = self.frames.len() + 1, owner = frame.owner, "open block");
        self.frames.push(frame);
    }

    /// Close the innermost block at offset `end`.
    ///
    /// Returns the region of a closed owner frame. An `END` with no open
    /// block leaves the file frame in place.
    pub fn pop(&mut self, end: u32) -> Option<ScopeRegion> {
        if self.frames.len() <= 1 {
            debug!(offset = end, "END without an open block");
            return None;
        }
        let frame = self.frames.pop()?;
        trace!(depth = self.frames.len(), "close block");
        frame.owner.then_some(ScopeRegion {
            scope: frame.scope,
            start: frame.start,
            end,
        })
    }

    /// Close every block still open at end of file.
    pub fn finish(&mut self, end: u32) -> Vec<ScopeRegion> {
        self.pending = None;
        let mut regions = Vec::new();
        while self.frames.len() > 1 {
            if let Some(region) = self.pop(end) {
                regions.push(region);
            }
        }
        if !regions.is_empty() {
            debug!(count = regions.len(), "blocks left open at end of file");
        }
        regions
    }
}
