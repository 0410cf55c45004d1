use serde::{Deserialize, Serialize};

/// One machining or additive feature type.
///
/// `CATALOG` fixes the ordered list of feature types; a kind's position in
/// that list is its stable id and doubles as the semantic class id written
/// to the dataset labels. `Stock` is the label of untouched stock faces and
/// is never scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Chamfer,
    ThroughHole,
    TriangularPassage,
    RectangularPassage,
    SixSidesPassage,
    TriangularThroughSlot,
    RectangularThroughSlot,
    CircularThroughSlot,
    RectangularThroughStep,
    TwoSidesThroughStep,
    SlantedThroughStep,
    ORing,
    BlindHole,
    TriangularPocket,
    RectangularPocket,
    SixSidesPocket,
    CircularEndPocket,
    RectangularBlindSlot,
    VCircularEndBlindSlot,
    HCircularEndBlindSlot,
    TriangularBlindStep,
    CircularBlindStep,
    RectangularBlindStep,
    Round,
    Counterbore,
    Boss,
    CountersunkHole,
    Rib,
    VariableRound,
    Stud,
    ThreadedHole,
    SpurGear,
    Stock,
}

/// Ordered feature catalog. Position = stable feature-type id = class id.
pub const CATALOG: [FeatureKind; 33] = [
    FeatureKind::Chamfer,
    FeatureKind::ThroughHole,
    FeatureKind::TriangularPassage,
    FeatureKind::RectangularPassage,
    FeatureKind::SixSidesPassage,
    FeatureKind::TriangularThroughSlot,
    FeatureKind::RectangularThroughSlot,
    FeatureKind::CircularThroughSlot,
    FeatureKind::RectangularThroughStep,
    FeatureKind::TwoSidesThroughStep,
    FeatureKind::SlantedThroughStep,
    FeatureKind::ORing,
    FeatureKind::BlindHole,
    FeatureKind::TriangularPocket,
    FeatureKind::RectangularPocket,
    FeatureKind::SixSidesPocket,
    FeatureKind::CircularEndPocket,
    FeatureKind::RectangularBlindSlot,
    FeatureKind::VCircularEndBlindSlot,
    FeatureKind::HCircularEndBlindSlot,
    FeatureKind::TriangularBlindStep,
    FeatureKind::CircularBlindStep,
    FeatureKind::RectangularBlindStep,
    FeatureKind::Round,
    FeatureKind::Counterbore,
    FeatureKind::Boss,
    FeatureKind::CountersunkHole,
    FeatureKind::Rib,
    FeatureKind::VariableRound,
    FeatureKind::Stud,
    FeatureKind::ThreadedHole,
    FeatureKind::SpurGear,
    FeatureKind::Stock,
];

/// Category used for canonical combination ordering. Face-creating
/// operations must all precede edge transitions, which consume edges that
/// have to be stable by then.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureCategory {
    Step,
    Slot,
    Through,
    Blind,
    ORing,
    Transition,
}

/// How the feature's cut/extrusion depth is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthKind {
    /// Cut through the whole stock thickness.
    Through,
    /// Depth drawn inside the blind feasible interval.
    Blind,
    /// Through or blind, decided at sampling time.
    Either,
    /// Edge transition; no depth parameter.
    None,
}

/// Positional perturbation applied to a candidate bound before the
/// feasibility test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shifter {
    /// Random inner sub-rectangle; gives holes a random center and size.
    Center,
    /// Full-width strip at a random height; used by slots.
    Band,
    /// Sub-rectangle pinned to one bound edge; used by steps.
    EdgeAnchor,
    /// No perturbation.
    None,
}

/// What happens when one stage of a multi-stage feature fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackPolicy {
    /// Any failed stage reverts the whole feature application.
    WholeFeature,
    /// Failed stages are skipped; the surviving stages are accepted as a
    /// degraded but valid result.
    BestEffortStages,
}

impl FeatureKind {
    /// Stable id of this kind: its position in `CATALOG`.
    pub fn label_id(self) -> u32 {
        CATALOG
            .iter()
            .position(|&k| k == self)
            .expect("every kind appears in CATALOG") as u32
    }

    pub fn from_label_id(id: u32) -> Option<FeatureKind> {
        CATALOG.get(id as usize).copied()
    }

    /// Catalog name, matching the dataset's class vocabulary.
    pub fn name(self) -> &'static str {
        use FeatureKind::*;
        match self {
            Chamfer => "chamfer",
            ThroughHole => "through_hole",
            TriangularPassage => "triangular_passage",
            RectangularPassage => "rectangular_passage",
            SixSidesPassage => "6sides_passage",
            TriangularThroughSlot => "triangular_through_slot",
            RectangularThroughSlot => "rectangular_through_slot",
            CircularThroughSlot => "circular_through_slot",
            RectangularThroughStep => "rectangular_through_step",
            TwoSidesThroughStep => "2sides_through_step",
            SlantedThroughStep => "slanted_through_step",
            ORing => "o_ring",
            BlindHole => "blind_hole",
            TriangularPocket => "triangular_pocket",
            RectangularPocket => "rectangular_pocket",
            SixSidesPocket => "6sides_pocket",
            CircularEndPocket => "circular_end_pocket",
            RectangularBlindSlot => "rectangular_blind_slot",
            VCircularEndBlindSlot => "v_circular_end_blind_slot",
            HCircularEndBlindSlot => "h_circular_end_blind_slot",
            TriangularBlindStep => "triangular_blind_step",
            CircularBlindStep => "circular_blind_step",
            RectangularBlindStep => "rectangular_blind_step",
            Round => "round",
            Counterbore => "counterbore",
            Boss => "boss",
            CountersunkHole => "countersunk_hole",
            Rib => "rib",
            VariableRound => "variable_round",
            Stud => "stud",
            ThreadedHole => "threaded_hole",
            SpurGear => "spur_gear",
            Stock => "stock",
        }
    }

    pub fn category(self) -> Option<FeatureCategory> {
        use FeatureCategory::*;
        use FeatureKind::*;
        let cat = match self {
            Chamfer | Round | VariableRound => Transition,
            RectangularThroughStep | TwoSidesThroughStep | SlantedThroughStep
            | TriangularBlindStep | CircularBlindStep | RectangularBlindStep => Step,
            TriangularThroughSlot | RectangularThroughSlot | CircularThroughSlot
            | RectangularBlindSlot | VCircularEndBlindSlot | HCircularEndBlindSlot => Slot,
            ThroughHole | TriangularPassage | RectangularPassage | SixSidesPassage => Through,
            BlindHole | TriangularPocket | RectangularPocket | SixSidesPocket
            | CircularEndPocket | Counterbore | CountersunkHole | Boss | Rib | Stud
            | ThreadedHole | SpurGear => Blind,
            FeatureKind::ORing => FeatureCategory::ORing,
            Stock => return None,
        };
        Some(cat)
    }

    pub fn depth_kind(self) -> DepthKind {
        use FeatureKind::*;
        match self {
            Chamfer | Round | VariableRound | Stock => DepthKind::None,
            ThroughHole | TriangularPassage | RectangularPassage | SixSidesPassage
            | TriangularThroughSlot | RectangularThroughSlot | CircularThroughSlot
            | RectangularThroughStep | TwoSidesThroughStep | SlantedThroughStep
            | Counterbore | CountersunkHole => DepthKind::Through,
            ThreadedHole => DepthKind::Either,
            _ => DepthKind::Blind,
        }
    }

    pub fn shifter(self) -> Shifter {
        use FeatureKind::*;
        match self.category() {
            Some(FeatureCategory::Slot) => Shifter::Band,
            Some(FeatureCategory::Step) => Shifter::EdgeAnchor,
            Some(FeatureCategory::Transition) | None => Shifter::None,
            _ => match self {
                // Rib and spur gear place against the full usable region.
                Rib | SpurGear => Shifter::None,
                _ => Shifter::Center,
            },
        }
    }

    /// Features whose material is added to the stock rather than removed.
    pub fn is_additive(self) -> bool {
        matches!(
            self,
            FeatureKind::Boss | FeatureKind::Rib | FeatureKind::Stud | FeatureKind::SpurGear
        )
    }

    /// Edge transitions consume the running edge list instead of bounds.
    pub fn is_edge_based(self) -> bool {
        matches!(
            self,
            FeatureKind::Chamfer | FeatureKind::Round | FeatureKind::VariableRound
        )
    }

    /// Members of the through/blind family force bound rediscovery after
    /// they complete, because they change the usable placement regions.
    pub fn forces_bound_rediscovery(self) -> bool {
        use FeatureKind::*;
        matches!(
            self,
            TriangularPassage
                | RectangularPassage
                | SixSidesPassage
                | TriangularPocket
                | RectangularPocket
                | SixSidesPocket
                | ThroughHole
                | BlindHole
                | CircularEndPocket
                | ORing
                | Counterbore
                | CountersunkHole
        )
    }

    pub fn rollback_policy(self) -> RollbackPolicy {
        use FeatureKind::*;
        match self {
            // Multi-tooth and multi-groove constructions tolerate
            // individual sub-cut failures.
            SpurGear | Stud | ThreadedHole => RollbackPolicy::BestEffortStages,
            _ => RollbackPolicy::WholeFeature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_ids_match_catalog_positions() {
        for (i, kind) in CATALOG.iter().enumerate() {
            assert_eq!(kind.label_id(), i as u32);
            assert_eq!(FeatureKind::from_label_id(i as u32), Some(*kind));
        }
        assert_eq!(FeatureKind::from_label_id(CATALOG.len() as u32), None);
    }

    #[test]
    fn stock_is_last_and_unscheduled() {
        assert_eq!(CATALOG.last(), Some(&FeatureKind::Stock));
        assert_eq!(FeatureKind::Stock.category(), None);
    }

    #[test]
    fn every_scheduled_kind_has_a_category() {
        for kind in CATALOG.iter().filter(|k| **k != FeatureKind::Stock) {
            assert!(kind.category().is_some(), "{} lacks a category", kind.name());
        }
        // the o-ring is its own ordering category, not part of blind
        assert_eq!(
            FeatureKind::ORing.category(),
            Some(FeatureCategory::ORing)
        );
    }

    #[test]
    fn transitions_have_no_depth() {
        for kind in CATALOG {
            if kind.is_edge_based() {
                assert_eq!(kind.depth_kind(), DepthKind::None);
            }
        }
    }

    #[test]
    fn names_are_unique() {
        let names: Vec<&str> = CATALOG.iter().map(|k| k.name()).collect();
        let mut dedup = names.clone();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), names.len());
    }
}
