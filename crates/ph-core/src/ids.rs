//! Strongly typed identifier wrappers and generational handles.
//!
//! Plain IDs are `Copy + Ord + Hash` so they can be used as map keys and
//! sorted collection elements without ceremony.  The inner integer is `pub`
//! to allow direct indexing into SoA `Vec`s via `id.0 as usize`, but callers
//! should prefer the `.index()` helpers for clarity.
//!
//! Handles (`SquadHandle`, `EffectHandle`) are non-owning references into a
//! slot arena: a slot index plus the generation the slot had when the handle
//! was issued.  Destroying the referent bumps the slot's generation, so every
//! outstanding handle silently stops resolving instead of aliasing whatever
//! reuses the slot next.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

/// Generate a generational handle type: `{ slot, generation }`.
macro_rules! generational_handle {
    ($(#[$attr:meta])* $vis:vis struct $name:ident;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name {
            pub slot:       u32,
            pub generation: u32,
        }

        impl $name {
            #[inline]
            pub fn new(slot: u32, generation: u32) -> Self {
                Self { slot, generation }
            }

            /// Slot index into the owning arena.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.slot as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}v{})", stringify!($name), self.slot, self.generation)
            }
        }
    };
}

typed_id! {
    /// Index of a creature in SoA agent storage.
    pub struct AgentId(u32);
}

typed_id! {
    /// Identifier of any world entity (players, props, creatures, breakables).
    pub struct EntityId(u32);
}

generational_handle! {
    /// Non-owning reference to a squad in the squad registry.
    pub struct SquadHandle;
}

generational_handle! {
    /// Non-owning reference to a transient effect entity (e.g. an energy wave).
    pub struct EffectHandle;
}
