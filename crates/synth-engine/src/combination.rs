use rand::seq::SliceRandom;
use rand::Rng;
use swarf_types::{FeatureCategory, FeatureKind, GenConfig, CATALOG};

/// Draw a random feature combination of configured length. Order is not
/// meaningful until `canonical_order` is applied.
pub fn random_combination<R: Rng>(cfg: &GenConfig, rng: &mut R) -> Vec<FeatureKind> {
    let scheduled: Vec<FeatureKind> = CATALOG
        .iter()
        .copied()
        .filter(|k| *k != FeatureKind::Stock)
        .collect();
    let len = rng.gen_range(cfg.combo_len[0]..=cfg.combo_len[1]);
    (0..len)
        .map(|_| *scheduled.choose(rng).expect("catalog is non-empty"))
        .collect()
}

/// Rewrite a combination into canonical application order:
/// steps, slots, through, blind, o-ring, then edge transitions.
/// The sort is stable, so same-category draws keep their relative order.
pub fn canonical_order(combo: &mut [FeatureKind]) {
    combo.sort_by_key(|k| category_rank(*k));
}

fn category_rank(kind: FeatureKind) -> u8 {
    match kind.category() {
        Some(FeatureCategory::Step) => 0,
        Some(FeatureCategory::Slot) => 1,
        Some(FeatureCategory::Through) => 2,
        Some(FeatureCategory::Blind) => 3,
        Some(FeatureCategory::ORing) => 4,
        Some(FeatureCategory::Transition) => 5,
        None => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn combinations_respect_configured_length() {
        let cfg = GenConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            let combo = random_combination(&cfg, &mut rng);
            assert!(combo.len() >= cfg.combo_len[0] && combo.len() <= cfg.combo_len[1]);
            assert!(!combo.contains(&FeatureKind::Stock));
        }
    }

    #[test]
    fn canonical_order_is_nondecreasing_by_category() {
        let cfg = GenConfig::default();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..32 {
            let mut combo = random_combination(&cfg, &mut rng);
            canonical_order(&mut combo);
            let ranks: Vec<u8> = combo.iter().map(|k| category_rank(*k)).collect();
            assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn transitions_always_land_last() {
        let mut combo = vec![
            FeatureKind::Chamfer,
            FeatureKind::ThroughHole,
            FeatureKind::Round,
            FeatureKind::RectangularThroughStep,
        ];
        canonical_order(&mut combo);
        assert_eq!(combo[0], FeatureKind::RectangularThroughStep);
        assert_eq!(combo[1], FeatureKind::ThroughHole);
        assert!(combo[2..].iter().all(|k| k.is_edge_based()));
        // stable: chamfer drawn before round stays before it
        assert_eq!(combo[2], FeatureKind::Chamfer);
    }
}
