//! Scroll-position visibility tracking for the page's sections.
//!
//! The tracker owns the visibility map exclusively. Consumers read the full
//! map (every region always present) and react to the crossing events
//! returned by `update`.

use std::collections::BTreeMap;

/// Named, scroll-addressable area of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Region {
    Info,
    Services,
    Projects,
    Contact,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Info,
        Region::Services,
        Region::Projects,
        Region::Contact,
    ];
}

/// Fraction of a region's rows that must be on screen before it counts as
/// visible.
pub const DEFAULT_THRESHOLD: f64 = 0.15;

/// Whether scrolling away clears a region's flag again, or the flag sticks
/// once it has first been set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingPolicy {
    Bidirectional,
    Latch,
}

/// Rows of the page currently on screen.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub top: usize,
    pub height: usize,
}

/// Row extent of one region within the page.
#[derive(Clone, Copy, Debug)]
pub struct RegionBounds {
    pub region: Region,
    pub top: usize,
    pub height: usize,
}

impl RegionBounds {
    /// Fraction of this region's rows inside the viewport, in `0.0..=1.0`.
    pub fn visible_fraction(&self, viewport: Viewport) -> f64 {
        if self.height == 0 {
            return 0.0;
        }
        let top = self.top.max(viewport.top);
        let bottom = (self.top + self.height).min(viewport.top + viewport.height);
        if bottom <= top {
            return 0.0;
        }
        (bottom - top) as f64 / self.height as f64
    }
}

/// A crossing of the visibility threshold in either direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    pub region: Region,
    pub visible: bool,
}

#[derive(Debug)]
pub struct VisibilityTracker {
    threshold: f64,
    policy: TrackingPolicy,
    watched: Vec<Region>,
    flags: BTreeMap<Region, bool>,
}

impl VisibilityTracker {
    pub fn new(threshold: f64, policy: TrackingPolicy) -> Self {
        let flags = Region::ALL.iter().map(|&r| (r, false)).collect();
        Self {
            threshold,
            policy,
            watched: Vec::new(),
            flags,
        }
    }

    /// Establish watches. Regions not observed never emit crossings.
    pub fn observe(&mut self, regions: &[Region]) {
        for region in regions {
            if !self.watched.contains(region) {
                self.watched.push(*region);
            }
        }
    }

    /// Drop every watch and reset all flags. Called on teardown.
    pub fn release(&mut self) {
        self.watched.clear();
        for flag in self.flags.values_mut() {
            *flag = false;
        }
    }

    /// Re-evaluate every watched region against the viewport and return one
    /// crossing per region whose flag changed.
    pub fn update(&mut self, sections: &[RegionBounds], viewport: Viewport) -> Vec<Crossing> {
        let mut crossings = Vec::new();
        for &region in &self.watched {
            let Some(bounds) = sections.iter().find(|b| b.region == region) else {
                continue;
            };
            let measured = bounds.visible_fraction(viewport) >= self.threshold;
            let flag = self.flags.entry(region).or_insert(false);
            if *flag == measured {
                continue;
            }
            if !measured && self.policy == TrackingPolicy::Latch {
                continue;
            }
            *flag = measured;
            crossings.push(Crossing {
                region,
                visible: measured,
            });
        }
        crossings
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.flags.get(&region).copied().unwrap_or(false)
    }

    /// Full visibility map; every region is always present.
    pub fn snapshot(&self) -> &BTreeMap<Region, bool> {
        &self.flags
    }
}
