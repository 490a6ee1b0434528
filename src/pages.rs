use chrono::{Duration, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub const WORLD_CUP_TITLE: &str = "Soccer Tournament History";
pub const PIE_TITLE: &str = "Page 2 - Pie Chart";
pub const LINE_TITLE: &str = "Page 3 - Line Chart";

const LINE_POINTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct PieSample {
    pub title: &'static str,
    pub slices: Vec<(String, u64)>,
}

/// Percentage of the total held by each slice, in slice order. All zeros
/// when the total is zero.
pub fn share_pcts(slices: &[(String, u64)]) -> Vec<f64> {
    let total: u64 = slices.iter().map(|(_, v)| v).sum();
    slices
        .iter()
        .map(|(_, v)| {
            if total == 0 {
                0.0
            } else {
                *v as f64 * 100.0 / total as f64
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSample {
    pub title: &'static str,
    pub points: Vec<(NaiveDate, f64)>,
}

pub fn country_shares() -> PieSample {
    let slices = [("USA", 10), ("Canada", 12), ("France", 9), ("Germany", 14), ("UK", 8)]
        .into_iter()
        .map(|(name, v)| (name.to_string(), v))
        .collect();
    PieSample {
        title: PIE_TITLE,
        slices,
    }
}

/// 50 consecutive days from 2022-01-01 carrying a cumulative sum of
/// standard-normal steps.
pub fn random_walk<R: Rng + ?Sized>(rng: &mut R) -> LineSample {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();
    let mut total = 0.0;
    let points = (0..LINE_POINTS)
        .map(|i| {
            let step: f64 = StandardNormal.sample(rng);
            total += step;
            (start + Duration::days(i as i64), total)
        })
        .collect();
    LineSample {
        title: LINE_TITLE,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn random_walk_covers_fifty_consecutive_days() {
        let mut rng = StdRng::seed_from_u64(7);
        let line = random_walk(&mut rng);
        assert_eq!(line.points.len(), 50);
        assert_eq!(line.points[0].0, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(line.points[49].0, NaiveDate::from_ymd_opt(2022, 2, 19).unwrap());
        assert!(line.points.iter().all(|(_, v)| v.is_finite()));
    }

    #[test]
    fn country_shares_sum_to_hundred() {
        let pie = country_shares();
        let pcts = share_pcts(&pie.slices);
        assert_eq!(pcts.len(), 5);
        assert!((pcts[3] - 1400.0 / 53.0).abs() < 1e-9);
        let sum: f64 = pcts.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_shares_are_zero() {
        let slices = vec![("Other".to_string(), 0)];
        assert_eq!(share_pcts(&slices), [0.0]);
    }

    #[test]
    fn random_walk_is_reproducible_for_a_seed() {
        let a = random_walk(&mut StdRng::seed_from_u64(11));
        let b = random_walk(&mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
        assert_ne!(a.points[0].1, a.points[1].1);
    }
}
