//! Entity relationship classes shared by perception, combat, and spatial
//! queries.

/// Broad classification of a world entity.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum EntityClass {
    /// Static or unclassified world object.
    #[default]
    None,
    /// A player-controlled character.
    Player,
    /// An ordinary pack hound.
    Hound,
    /// The pack leader variant.
    AlphaHound,
    /// Any other creature.
    Npc,
    /// A breakable brush (crates, windows).  Takes blast damage through cover.
    Breakable,
    /// A pushable brush.  Takes blast damage through cover.
    Pushable,
    /// A loose physics prop.
    Prop,
}

impl EntityClass {
    /// `true` for both hound variants.  Sonic blasts and same-species overlap
    /// checks treat every hound as kin.
    #[inline]
    pub fn is_hound_kin(self) -> bool {
        matches!(self, EntityClass::Hound | EntityClass::AlphaHound)
    }

    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, EntityClass::Player)
    }

    /// Classes that take blast damage even when occluded.
    #[inline]
    pub fn ignores_cover(self) -> bool {
        matches!(self, EntityClass::Breakable | EntityClass::Pushable)
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityClass::None       => "none",
            EntityClass::Player     => "player",
            EntityClass::Hound      => "hound",
            EntityClass::AlphaHound => "alpha_hound",
            EntityClass::Npc        => "npc",
            EntityClass::Breakable  => "breakable",
            EntityClass::Pushable   => "pushable",
            EntityClass::Prop       => "prop",
        }
    }
}

impl std::fmt::Display for EntityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
