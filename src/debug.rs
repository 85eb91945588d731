/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct the engine keeps up to date for
 * display. Every value is written during the serial commit phase only.
 *
 * Includes metrics for:
 * - Running maximum of per-boid interactions (never decreases)
 * - Number of completed ticks
 * - Duration of the last tick
 * - Parallel processing chunk size
 */

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DebugInfo {
    max_interactions: u32,
    pub ticks: u64,
    pub last_tick: Duration,
    pub chunk_size: usize,
}

impl DebugInfo {
    // Highest neighbor + near-neighbor count any boid has reported so far
    #[inline]
    pub fn max_interactions(&self) -> u32 {
        self.max_interactions
    }

    pub(crate) fn observe_interactions(&mut self, interactions: u32) {
        self.max_interactions = self.max_interactions.max(interactions);
    }
}
