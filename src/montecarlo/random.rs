//! Random annual-return sampling for stochastic trials

use rand::Rng;

/// Additive guard inside the Box–Muller logarithm so a uniform draw of
/// exactly 0 stays finite. The bias it introduces is negligible.
const LN_GUARD: f64 = 1e-10;

/// One standard-normal sample via the Box–Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random();
    let u2: f64 = rng.random();

    let r = (-2.0 * (u1 + LN_GUARD).ln()).sqrt();
    let theta = 2.0 * std::f64::consts::PI * u2;

    r * theta.cos()
}

/// One lognormally-distributed annual return sample, as a decimal.
///
/// The Itô drift correction `mean - vol^2/2` makes the expected (not
/// instantaneous) annual return converge to `mean_return` over many draws;
/// without it the sample mean would be biased upward. The `exp(..) - 1`
/// form keeps any single draw above -100%.
pub fn lognormal_annual_return<R: Rng + ?Sized>(
    rng: &mut R,
    mean_return: f64,
    volatility: f64,
) -> f64 {
    let z = standard_normal(rng);
    let drift = mean_return - volatility * volatility / 2.0;
    (drift + volatility * z).exp() - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = SmallRng::seed_from_u64(7);
        let n = 100_000;
        let samples: Vec<f64> = (0..n).map(|_| standard_normal(&mut rng)).collect();

        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert!(mean.abs() < 0.02, "mean {mean} too far from 0");
        assert!((var - 1.0).abs() < 0.03, "variance {var} too far from 1");
        assert!(samples.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_lognormal_mean_converges() {
        let mut rng = SmallRng::seed_from_u64(42);
        let (mu, sigma) = (0.08, 0.15);
        let n = 200_000;

        let sum: f64 = (0..n)
            .map(|_| lognormal_annual_return(&mut rng, mu, sigma))
            .sum();
        let sample_mean = sum / n as f64;

        // E[exp(drift + sigma z)] = exp(mu), so E[return] = exp(mu) - 1
        let expected = mu.exp() - 1.0;
        assert!(
            (sample_mean - expected).abs() < 0.005,
            "sample mean {sample_mean} vs expected {expected}"
        );
    }

    #[test]
    fn test_lognormal_floor() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..10_000 {
            let r = lognormal_annual_return(&mut rng, 0.05, 0.5);
            assert!(r > -1.0);
        }
    }
}
