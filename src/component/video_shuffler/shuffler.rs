use rand::Rng;
use rand::seq::SliceRandom;

/// 均勻隨機重排（Fisher-Yates），每種排列機率相同
pub fn shuffle_clips<T, R: Rng + ?Sized>(clips: &mut [T], rng: &mut R) {
    clips.shuffle(rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn test_shuffle_is_permutation() {
        let original: Vec<PathBuf> = (0..20)
            .map(|i| PathBuf::from(format!("/tmp/clip_0_{i}.mp4")))
            .collect();
        let mut clips = original.clone();
        let mut rng = StdRng::seed_from_u64(42);

        shuffle_clips(&mut clips, &mut rng);

        let mut sorted = clips.clone();
        sorted.sort();
        let mut expected = original.clone();
        expected.sort();
        assert_eq!(sorted, expected);
        assert_ne!(clips, original);
    }

    #[test]
    fn test_shuffle_has_no_bias_toward_identity() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        let trials = 6000;

        for _ in 0..trials {
            let mut items = vec![0u8, 1, 2];
            shuffle_clips(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        // 期望每種排列約 1000 次
        for (permutation, count) in &counts {
            assert!(
                (800..=1200).contains(count),
                "permutation {permutation:?} appeared {count} times"
            );
        }
    }

    #[test]
    fn test_shuffle_handles_trivial_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut empty: Vec<PathBuf> = Vec::new();
        shuffle_clips(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut single = vec![PathBuf::from("a.mp4")];
        shuffle_clips(&mut single, &mut rng);
        assert_eq!(single, vec![PathBuf::from("a.mp4")]);
    }
}
