//! Bounds bridge between the widget viewport and the search geo filter
//!
//! The bridge is a two-state machine. While quiescent, a populated viewport
//! becomes the new [`GeoFilter`] and the bridge enters cool-down; while
//! cooling down, viewport changes are ignored so a programmatic recenter is
//! not mistaken for a user pan. The owner schedules the release; every arm
//! bumps a generation so only the most recent release timer takes effect.

use crate::core::config::ViewportBounds;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Simplified bounds consumed by search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoFilter {
    /// Derives a filter from viewport bounds; `None` unless all corners are populated
    pub fn from_bounds(bounds: &ViewportBounds) -> Option<Self> {
        let (south_west, north_east) = bounds.corners()?;
        Some(Self {
            south: south_west.lat,
            west: south_west.lng,
            north: north_east.lat,
            east: north_east.lng,
        })
    }
}

/// Outcome of feeding a bounds change into the bridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsReaction {
    /// Cooling down; the change was not acted on
    Ignored,
    /// A new filter was derived; release the guard for `generation` after the window
    FilterSet { filter: GeoFilter, generation: u64 },
    /// Bounds were unset; the filter was cleared
    FilterCleared,
}

#[derive(Debug, Clone)]
pub struct BoundsBridge {
    filter: Option<GeoFilter>,
    cooling_down: bool,
    generation: u64,
    cooldown: Duration,
}

impl BoundsBridge {
    /// Creates a bridge that starts cooling down; the owner must arm a release
    pub fn new(cooldown: Duration) -> Self {
        Self {
            filter: None,
            cooling_down: true,
            generation: 0,
            cooldown,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn is_cooling_down(&self) -> bool {
        self.cooling_down
    }

    pub fn filter(&self) -> Option<GeoFilter> {
        self.filter
    }

    /// Enters cool-down and returns the generation its release must carry
    pub fn arm(&mut self) -> u64 {
        self.cooling_down = true;
        self.generation += 1;
        self.generation
    }

    /// Returns to quiescent if `generation` is still the latest arm
    pub fn release(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            log::debug!(
                "ignoring superseded cool-down release {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.cooling_down = false;
        true
    }

    pub fn clear_filter(&mut self) {
        self.filter = None;
    }

    /// Reacts to a change of the viewport bounds
    pub fn observe(&mut self, bounds: &ViewportBounds) -> BoundsReaction {
        if self.cooling_down {
            return BoundsReaction::Ignored;
        }

        match GeoFilter::from_bounds(bounds) {
            Some(filter) => {
                let generation = self.arm();
                self.filter = Some(filter);
                BoundsReaction::FilterSet { filter, generation }
            }
            None => {
                self.filter = None;
                BoundsReaction::FilterCleared
            }
        }
    }
}
