//! Weighted selection of sponsor banner items

use rand::Rng;
use rand::seq::SliceRandom;

use shared::{AdMedia, WeightedItem};

/// Pick one item with probability `weight / total_weight` (pure function)
///
/// Items with weight 0 are never chosen; an empty or all-zero pool yields `None`.
pub fn select<'a, R>(pool: &'a [WeightedItem], rng: &mut R) -> Option<&'a WeightedItem>
where
    R: Rng + ?Sized,
{
    let eligible: Vec<&WeightedItem> = pool.iter().filter(|item| item.weight > 0).collect();
    if eligible.is_empty() {
        return None;
    }

    let total_weight: u64 = eligible.iter().map(|item| u64::from(item.weight)).sum();
    if total_weight == 0 {
        return eligible.choose(rng).copied();
    }

    let draw = rng.gen_range(0..total_weight);
    let mut accumulated = 0u64;
    for item in eligible.iter().copied() {
        accumulated += u64::from(item.weight);
        if draw < accumulated {
            return Some(item);
        }
    }

    eligible.last().copied()
}

/// Select using the thread-local RNG
pub fn select_ad(pool: &[WeightedItem]) -> Option<&WeightedItem> {
    select(pool, &mut rand::thread_rng())
}

/// Banner state for one page view
///
/// A fresh banner is activated on every page view; nothing carries over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdBanner {
    pub item: WeightedItem,
    pub muted: bool,
}

impl AdBanner {
    /// Choose the item for this page view, if any item is eligible
    pub fn activate<R>(pool: &[WeightedItem], rng: &mut R) -> Option<Self>
    where
        R: Rng + ?Sized,
    {
        select(pool, rng).map(|item| Self {
            item: item.clone(),
            muted: true,
        })
    }

    pub fn is_video(&self) -> bool {
        matches!(self.item.payload.media, AdMedia::Video { .. })
    }

    /// Flip sound on a video item; returns the new muted flag
    pub fn toggle_mute(&mut self) -> bool {
        if self.is_video() {
            self.muted = !self.muted;
        }
        self.muted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use shared::{AdPayload, default_pool};

    fn item(id: &str, weight: u32) -> WeightedItem {
        WeightedItem::new(
            id,
            AdPayload {
                media: AdMedia::Image { url: format!("/images/{id}.png") },
                alt_text: id.to_string(),
                link_url: "/".to_string(),
                is_external: false,
            },
            weight,
        )
    }

    #[test]
    fn test_frequencies_follow_weights() {
        let pool = vec![item("heavy", 3), item("light", 1)];
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 10_000;

        let heavy = (0..trials)
            .filter(|_| select(&pool, &mut rng).map(|i| i.id.as_str()) == Some("heavy"))
            .count();
        let heavy_share = heavy as f64 / trials as f64;
        let light_share = 1.0 - heavy_share;

        assert!((0.70..=0.80).contains(&heavy_share), "heavy share {heavy_share}");
        assert!((0.20..=0.30).contains(&light_share), "light share {light_share}");
    }

    #[test]
    fn test_empty_and_zero_weight_pools() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select(&[], &mut rng).is_none());
        assert!(select(&[item("off", 0)], &mut rng).is_none());
    }

    #[test]
    fn test_zero_weight_items_never_chosen() {
        let pool = vec![item("off", 0), item("on", 5), item("also-off", 0)];
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            assert_eq!(select(&pool, &mut rng).map(|i| i.id.as_str()), Some("on"));
        }
    }

    #[test]
    fn test_select_ad_on_default_pool() {
        let pool = default_pool();
        let chosen = select_ad(&pool).unwrap();
        assert!(chosen.id == "ad001" || chosen.id == "ad002");
    }

    #[test]
    fn test_banner_mute_only_for_video() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut image = AdBanner::activate(&[item("still", 1)], &mut rng).unwrap();
        assert!(image.muted);
        assert!(image.toggle_mute());

        let mut clip = item("clip", 1);
        clip.payload.media = AdMedia::Video { url: "/v/clip.mp4".to_string() };
        let mut video = AdBanner::activate(&[clip], &mut rng).unwrap();
        assert!(!video.toggle_mute());
        assert!(video.toggle_mute());
    }

    #[test]
    fn test_activation_without_eligible_items() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(AdBanner::activate(&[item("off", 0)], &mut rng).is_none());
    }
}
