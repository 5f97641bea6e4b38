//! Color identity for allocation sites
//!
//! Every allocation site gets a palette slot the first time it is seen and
//! keeps it for the rest of the session. Slots are drawn at random, so two
//! unrelated sites can occasionally share a color. Free space has its own
//! reserved token, and heat fields use a fixed three-step classifier.

use crate::grid::Field;
use crate::profile::AllocationSite;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// xterm-256 indices that read well as cell backgrounds
pub const GOOD_COLORS: [u8; 62] = [
    1, 2, 3, 4, 5, 6, 7, 11, 14, 17, 21, 19, 22, 23, 27, 33, 30, 34, 45, 41, 46, 49, 51, 52, 54,
    56, 58, 59, 62, 65, 71, 76, 89, 91, 94, 95, 124, 125, 126, 127, 129, 130, 131, 154, 156, 159,
    161, 166, 167, 178, 195, 197, 199, 203, 208, 210, 211, 214, 220, 226, 229, 255,
];

/// Access-count class used by the heat view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeatClass {
    /// Never accessed
    Cold,
    /// Accessed exactly once
    Warm,
    /// Accessed more than once
    Hot,
}

impl HeatClass {
    pub fn classify(access: u32) -> Self {
        match access {
            0 => HeatClass::Cold,
            1 => HeatClass::Warm,
            _ => HeatClass::Hot,
        }
    }
}

/// Display color of a field, resolved to a terminal color by the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorToken {
    Free,
    /// Slot into [`GOOD_COLORS`]
    Site(usize),
    Heat(HeatClass),
}

/// Session-scoped, append-only mapping from site to palette slot
#[derive(Debug)]
pub struct ColorCache<R: Rng = StdRng> {
    entries: Vec<(AllocationSite, usize)>,
    palette_len: usize,
    rng: R,
}

impl ColorCache<StdRng> {
    /// Cache seeded from OS entropy; colors differ between runs
    pub fn from_entropy() -> Self {
        ColorCache::new(StdRng::from_entropy())
    }

    /// Cache with a reproducible color assignment
    pub fn seeded(seed: u64) -> Self {
        ColorCache::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ColorCache<R> {
    pub fn new(rng: R) -> Self {
        ColorCache::with_palette_len(rng, GOOD_COLORS.len())
    }

    pub fn with_palette_len(rng: R, palette_len: usize) -> Self {
        assert!(palette_len > 0, "color palette must not be empty");
        ColorCache {
            entries: Vec::new(),
            palette_len,
            rng,
        }
    }

    /// Color for a site, assigning a new slot on first sight
    pub fn color_for(&mut self, site: Option<&AllocationSite>) -> ColorToken {
        let Some(site) = site else {
            return ColorToken::Free;
        };

        if let Some((_, slot)) = self.entries.iter().find(|(seen, _)| seen.same_origin(site)) {
            return ColorToken::Site(*slot);
        }

        let slot = self.rng.gen_range(0..self.palette_len);
        self.entries.push((site.clone(), slot));
        ColorToken::Site(slot)
    }

    /// Color for a grid field in either view
    pub fn color_for_field(&mut self, field: &Field) -> ColorToken {
        match field {
            Field::Heap { uid, .. } => self.color_for(uid.as_deref()),
            Field::Heat { access, .. } => ColorToken::Heat(HeatClass::classify(*access)),
        }
    }

    /// Number of distinct sites colored so far
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
