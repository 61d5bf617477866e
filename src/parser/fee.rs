/// Totals below this pay the flat fee.
pub const FLAT_FEE_CEILING: u64 = 1_000_000;
pub const FLAT_FEE: u64 = 32_000;

/// Upper bound (inclusive) and rate for each percentage tier, low to high.
/// Anything above the last bound pays `TOP_RATE`.
const TIERS: &[(u64, f64)] = &[
    (1_599_999, 0.045),
    (2_099_999, 0.04),
    (2_999_999, 0.035),
];
const TOP_RATE: f64 = 0.03;

/// Service fee for a summed balance, rounded to the nearest thousand
/// (ties go to the even thousand).
pub fn service_fee(total: u64) -> u64 {
    if total < FLAT_FEE_CEILING {
        return FLAT_FEE;
    }
    let rate = TIERS
        .iter()
        .find(|(upper, _)| total <= *upper)
        .map(|(_, rate)| *rate)
        .unwrap_or(TOP_RATE);
    let thousands = (total as f64 * rate / 1000.0).round_ties_even();
    (thousands * 1000.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries() {
        assert_eq!(service_fee(0), 32_000);
        assert_eq!(service_fee(999_999), 32_000);
        assert_eq!(service_fee(1_000_000), 45_000);
        assert_eq!(service_fee(1_600_000), 64_000);
        assert_eq!(service_fee(2_100_000), 74_000);
        assert_eq!(service_fee(3_000_000), 90_000);
    }

    #[test]
    fn half_thousand_goes_to_even() {
        // 1_100_000 * 4.5% = 49_500 -> 50_000; 1_300_000 * 4.5% = 58_500 -> 58_000
        assert_eq!(service_fee(1_100_000), 50_000);
        assert_eq!(service_fee(1_300_000), 58_000);
    }

    #[test]
    fn always_thousands() {
        for total in (0..6_000_000).step_by(37_531) {
            assert_eq!(service_fee(total) % 1000, 0, "total {total}");
        }
    }

    #[test]
    fn monotone_within_tier() {
        let tiers = [
            (0, 999_999),
            (1_000_000, 1_599_999),
            (1_600_000, 2_099_999),
            (2_100_000, 2_999_999),
            (3_000_000, 9_000_000),
        ];
        for (lo, hi) in tiers {
            let mut prev = service_fee(lo);
            for total in (lo..=hi).step_by(10_007) {
                let fee = service_fee(total);
                assert!(fee >= prev, "fee dropped at {total}");
                prev = fee;
            }
        }
    }
}
