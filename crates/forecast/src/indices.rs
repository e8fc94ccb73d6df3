//! Derived weather indices

use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::Distribution;
use weather_model::WeatherCondition;

/// Upper bounds (exclusive, m/s) of Beaufort levels 0-11
const BEAUFORT_LIMITS: [f64; 12] = [
    0.3, 1.6, 3.4, 5.5, 8.0, 10.8, 13.9, 17.2, 20.8, 24.5, 28.5, 32.7,
];

/// Sampling weights, aligned with [`WeatherCondition::ALL`]
const CONDITION_WEIGHTS: [f64; 6] = [0.30, 0.25, 0.20, 0.15, 0.07, 0.03];

/// Beaufort wind force (0-12) for a speed in m/s
pub fn beaufort_level(wind_speed: f64) -> u8 {
    BEAUFORT_LIMITS
        .iter()
        .position(|&limit| wind_speed < limit)
        .unwrap_or(BEAUFORT_LIMITS.len()) as u8
}

/// Draw a weather condition from the fixed climatological weights
pub fn sample_condition<R: Rng + ?Sized>(rng: &mut R) -> WeatherCondition {
    // The weights are constant and positive, so construction cannot fail.
    match WeightedIndex::new(CONDITION_WEIGHTS) {
        Ok(dist) => WeatherCondition::ALL[dist.sample(rng)],
        Err(_) => WeatherCondition::Sunny,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_beaufort_boundaries() {
        assert_eq!(beaufort_level(0.0), 0);
        assert_eq!(beaufort_level(0.3), 1);
        assert_eq!(beaufort_level(5.4), 3);
        assert_eq!(beaufort_level(5.5), 4);
        assert_eq!(beaufort_level(32.6), 11);
        assert_eq!(beaufort_level(32.7), 12);
        assert_eq!(beaufort_level(60.0), 12);
    }

    #[test]
    fn test_condition_weights_favor_sunny() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 5000;
        let sunny = (0..n)
            .filter(|_| sample_condition(&mut rng) == WeatherCondition::Sunny)
            .count();
        let share = sunny as f64 / n as f64;
        assert!((0.25..0.35).contains(&share), "sunny share {}", share);
    }
}
