use alloc::collections::VecDeque;
use core::ops::BitOr;
use smallvec::SmallVec;

use crate::*;

impl Board {
    /// Reveals `coords` and flood-fills outward through zero-count cells.
    ///
    /// Revealed or flagged targets are left alone and report [`RevealOutcome::NoChange`]. A mine target is the only cell
    /// revealed and reports [`RevealOutcome::HitMine`]. The cascade itself never opens a mine or a flagged cell.
    pub fn reveal_cascade(&self, coords: Coord2) -> (Self, RevealOutcome) {
        if !self.cell(coords).is_closed() {
            return (self.clone(), RevealOutcome::NoChange);
        }

        let mut next = self.clone();
        let outcome = next.reveal_in_place(coords);
        (next, outcome)
    }

    /// Whether `coords` is a revealed number whose flagged neighbors match it exactly.
    pub fn can_chord_at(&self, coords: Coord2) -> bool {
        let cell = self.cell(coords);
        cell.is_revealed
            && cell.neighbor_count > 0
            && self.count_flagged_neighbors(coords) == cell.neighbor_count
    }

    /// Reveals every closed neighbor of a satisfied number.
    ///
    /// All neighbors are opened even when one of them is a mine, so the returned board holds every cell opened by the
    /// chord and the outcome is [`RevealOutcome::HitMine`] if any of them exploded.
    pub fn chord_open(&self, coords: Coord2) -> (Self, RevealOutcome) {
        if !self.can_chord_at(coords) {
            return (self.clone(), RevealOutcome::NoChange);
        }

        let targets: SmallVec<[Coord2; 8]> = self
            .iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).is_closed())
            .collect();

        let mut next = self.clone();
        let outcome = targets
            .into_iter()
            .map(|pos| next.reveal_in_place(pos))
            .fold(RevealOutcome::NoChange, BitOr::bitor);
        (next, outcome)
    }

    fn reveal_in_place(&mut self, coords: Coord2) -> RevealOutcome {
        let start = self.cell_mut(coords);
        if !start.is_closed() {
            // an earlier cascade in the same chord got here first
            return RevealOutcome::NoChange;
        }

        start.is_revealed = true;
        if start.is_mine {
            return RevealOutcome::HitMine;
        }
        if start.neighbor_count > 0 {
            return RevealOutcome::Revealed;
        }

        let mut frontier = VecDeque::from([coords]);
        while let Some(current) = frontier.pop_front() {
            for pos in self.iter_neighbors(current) {
                let cell = self.cell_mut(pos);
                if !cell.is_closed() || cell.is_mine {
                    continue;
                }

                cell.is_revealed = true;
                if cell.neighbor_count == 0 {
                    frontier.push_back(pos);
                }
            }
        }

        RevealOutcome::Revealed
    }
}
