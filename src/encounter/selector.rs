//! Pattern Selector
//!
//! Chooses the next pattern id for the current phase, avoiding an immediate
//! repeat of the previous choice. No state beyond the single `last` input.

use super::components::GameRng;

/// Select the next pattern id uniformly at random from `0..count`, excluding
/// `last` when more than one pattern is available.
///
/// Returns `last` only when `count == 1`.
pub fn select_pattern(rng: &mut GameRng, count: usize, last: Option<usize>) -> usize {
    debug_assert!(count > 0, "phase must have at least one pattern");

    let mut candidates: Vec<usize> = (0..count).collect();
    if let Some(last) = last {
        if candidates.len() > 1 {
            candidates.retain(|&id| id != last);
        }
    }

    candidates[rng.random_index(candidates.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_repeats_with_multiple_patterns() {
        let mut rng = GameRng::from_seed(99);
        let mut last = None;
        for _ in 0..500 {
            let picked = select_pattern(&mut rng, 5, last);
            assert!(picked < 5);
            if let Some(last) = last {
                assert_ne!(picked, last);
            }
            last = Some(picked);
        }
    }

    #[test]
    fn single_pattern_phase_always_repeats() {
        let mut rng = GameRng::from_seed(1);
        for _ in 0..10 {
            assert_eq!(select_pattern(&mut rng, 1, Some(0)), 0);
        }
    }

    #[test]
    fn first_selection_covers_full_range() {
        let mut rng = GameRng::from_seed(5);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[select_pattern(&mut rng, 3, None)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
