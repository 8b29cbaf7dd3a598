//! Per-symbol facet flags.
//!
//! `ParseFlags` tag a parsed symbol (or a static keyword) with independent
//! provenance and semantic facets. The completion layer copies them verbatim
//! so the UI can draw one tag icon per set facet.
//!
//! # Layout
//!
//! Bit 0 is reserved and is never a facet: a zero-valued flag must not be
//! testable as "present". Facets start at bit 1. The post-pass facets
//! (`MISSING_DB_NAME`, `NOT_FOUND`, `IS_TOO_LONG`) are the only ones a
//! resolution pass may add after the recognizer that created the item
//! returned.

use bitflags::bitflags;

/// The bit that no facet may occupy.
pub const RESERVED_BIT: u32 = 1 << 0;

bitflags! {
    /// Independent facets of a parsed symbol.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ParseFlags: u32 {
        // === Provenance ===

        /// Not from the parsed source itself (merged from another file).
        const EXTERNAL = 1 << 1;

        // === Scope ===

        /// Defined inside a procedure, function, or trigger body.
        const LOCAL_SCOPE = 1 << 2;
        /// Defined at file level.
        const FILE_SCOPE = 1 << 3;
        /// A parameter of the enclosing block.
        const PARAMETER = 1 << 4;

        // === Keywords ===

        /// Reserved keyword; cannot be used as an identifier.
        const RESERVED = 1 << 5;
        /// Abbreviated spelling of a keyword.
        const ABBREVIATION = 1 << 6;

        // === Storage class (DEFINE) ===

        const NEW = 1 << 7;
        const GLOBAL = 1 << 8;
        const SHARED = 1 << 9;
        const PRIVATE = 1 << 10;

        // === Field attributes ===

        const MANDATORY = 1 << 11;
        const EXTENT = 1 << 12;
        const INDEX = 1 << 13;

        // === Object facets ===

        /// A named buffer over a table.
        const BUFFER = 1 << 14;
        /// Created with CREATE rather than DEFINE.
        const DYNAMIC = 1 << 15;
        /// Procedure implemented in an external library.
        const EXTERNAL_PROC = 1 << 16;
        /// Procedure or function loaded persistently.
        const PERSISTENT = 1 << 17;

        // === Warnings ===

        /// Block body exceeds the configured character limit.
        const IS_TOO_LONG = 1 << 18;
        /// RUN target is computed (`VALUE(...)`), so the target is a guess.
        const UNCERTAIN = 1 << 19;
        /// Table referenced without its database qualifier.
        const MISSING_DB_NAME = 1 << 20;
        /// Referenced file could not be found.
        const NOT_FOUND = 1 << 21;
        /// RUN statement carries PERSISTENT.
        const LOAD_PERSISTENT = 1 << 22;
    }
}

// The reserved bit must stay outside every facet.
const _: () = assert!(
    ParseFlags::all().bits() & RESERVED_BIT == 0,
    "bit 0 is reserved as 'no flag' and must not be a facet"
);

impl ParseFlags {
    /// Facets a resolution pass may add after the item was created.
    pub const POST_PASS: Self = Self::from_bits_truncate(
        Self::MISSING_DB_NAME.bits() | Self::NOT_FOUND.bits() | Self::IS_TOO_LONG.bits(),
    );

    /// Facets that describe a warning rather than a property.
    pub const WARNINGS: Self = Self::from_bits_truncate(
        Self::IS_TOO_LONG.bits()
            | Self::UNCERTAIN.bits()
            | Self::MISSING_DB_NAME.bits()
            | Self::NOT_FOUND.bits(),
    );

    /// Build flags from raw bits, dropping the reserved bit and unknown bits.
    #[inline]
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_truncate(bits & !RESERVED_BIT)
    }

    /// Check whether any warning facet is set.
    #[inline]
    pub const fn has_warning(self) -> bool {
        self.intersects(Self::WARNINGS)
    }

    /// Keep only the facets a post-pass is allowed to add.
    #[inline]
    #[must_use]
    pub const fn post_pass_only(self) -> Self {
        self.intersection(Self::POST_PASS)
    }

    /// Names of the set facets, in bit order.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        self.iter_names().map(|(name, _)| name)
    }
}
