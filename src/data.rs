//! Synthetic purchase data generation using statrs distributions

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::{Gamma, Normal};

/// Seed for the generator. Output is reproducible within this crate's RNG
/// (`StdRng`), not across RNG implementations.
pub const SEED: u64 = 42;

/// Amounts below this are raised to it
pub const MIN_PURCHASE_AMOUNT: f64 = 10.0;

/// Gamma shape used for every segment; scale is `mean / GAMMA_SHAPE`
const GAMMA_SHAPE: f64 = 2.0;

/// Spending parameters for one customer segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub name: &'static str,
    pub mean: f64,
    pub std: f64,
    pub n: usize,
}

/// Customer segments in definition order (also the plot order)
pub const SEGMENTS: [Segment; 4] = [
    Segment { name: "Premium", mean: 250.0, std: 60.0, n: 150 },
    Segment { name: "Standard", mean: 150.0, std: 40.0, n: 200 },
    Segment { name: "Basic", mean: 75.0, std: 25.0, n: 180 },
    Segment { name: "Occasional", mean: 120.0, std: 80.0, n: 120 },
];

/// One (segment, amount) observation
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRecord {
    pub segment: &'static str,
    /// Purchase amount in dollars, rounded to cents
    pub amount: f64,
}

/// Generated purchase records together with the segment table that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub segments: Vec<Segment>,
    pub records: Vec<PurchaseRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Amounts for a single segment, in generation order
    pub fn amounts_for(&self, segment: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.segment == segment)
            .map(|r| r.amount)
            .collect()
    }

    /// Group amounts by segment, following the segment definition order
    pub fn group_by_segment(&self) -> Vec<(&'static str, Vec<f64>)> {
        self.segments
            .iter()
            .map(|segment| (segment.name, self.amounts_for(segment.name)))
            .collect()
    }
}

/// Generate the customer purchase dataset with the fixed seed
pub fn generate_customer_data() -> crate::Result<Dataset> {
    generate_with_seed(&SEGMENTS, SEED)
}

/// Generate purchase records for `segments` from a single RNG stream seeded with `seed`
///
/// For each segment, `n` Gamma(2, mean/2) draws are taken first, then `n`
/// Normal(0, std/4) noise draws; the sums are floored at
/// [`MIN_PURCHASE_AMOUNT`] and rounded to two decimals.
pub fn generate_with_seed(segments: &[Segment], seed: u64) -> crate::Result<Dataset> {
    let mut rng = StdRng::seed_from_u64(seed);
    let total: usize = segments.iter().map(|s| s.n).sum();
    let mut records = Vec::with_capacity(total);

    for segment in segments {
        // statrs parameterizes Gamma by rate
        let scale = segment.mean / GAMMA_SHAPE;
        let gamma = Gamma::new(GAMMA_SHAPE, 1.0 / scale)?;
        let noise = Normal::new(0.0, segment.std / 4.0)?;

        let base: Vec<f64> = (0..segment.n).map(|_| gamma.sample(&mut rng)).collect();
        let jitter: Vec<f64> = (0..segment.n).map(|_| noise.sample(&mut rng)).collect();

        records.extend(base.iter().zip(jitter.iter()).map(|(b, j)| PurchaseRecord {
            segment: segment.name,
            amount: round_cents((b + j).max(MIN_PURCHASE_AMOUNT)),
        }));
    }

    Ok(Dataset {
        segments: segments.to_vec(),
        records,
    })
}

/// Round to two decimal places
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
