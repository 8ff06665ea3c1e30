//! Random hierarchy seeding for manual testing
//!
//! Builds a three-level tree (roots, subsidiaries, nested subsidiaries)
//! through the regular create path, so every seeded party satisfies the
//! path invariant.

use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::application::services::HierarchyService;
use crate::application::{ApplicationError, ApplicationResult};
use crate::config::SeedConfig;
use crate::domain::NewParty;

const ADJECTIVES: &[&str] = &[
    "Apex", "Blue", "Bright", "Cedar", "Crystal", "Delta", "Eastern", "Golden", "Granite",
    "Harbor", "Iron", "Lunar", "Maple", "Northern", "Pacific", "Pioneer", "Quantum", "Silver",
    "Summit", "Vertex",
];

const NOUNS: &[&str] = &[
    "Analytics", "Capital", "Dynamics", "Energy", "Foods", "Freight", "Holdings", "Industries",
    "Logistics", "Media", "Mining", "Partners", "Pharma", "Robotics", "Systems", "Textiles",
    "Ventures", "Works",
];

const SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "GmbH", "AG", "& Co", "Corp"];

/// Counts of parties created per level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub roots: usize,
    pub subsidiaries: usize,
    pub nested: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.roots + self.subsidiaries + self.nested
    }
}

/// Populates the store with a random multi-level tree.
pub struct SeedService {
    hierarchy: Arc<HierarchyService>,
}

impl SeedService {
    pub fn new(hierarchy: Arc<HierarchyService>) -> Self {
        Self { hierarchy }
    }

    /// Seed according to `plan`. A fixed `rng_seed` reproduces tree shape and names.
    pub fn seed(&self, plan: &SeedConfig, rng_seed: Option<u64>) -> ApplicationResult<SeedReport> {
        let subsidiaries = checked_range("subsidiaries", plan.subsidiaries_min, plan.subsidiaries_max)?;
        let nested = checked_range("nested", plan.nested_min, plan.nested_max)?;

        let mut rng = match rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        info!("seeding {} top-level parties", plan.roots);

        let mut report = SeedReport::default();
        for _ in 0..plan.roots {
            let root = self.hierarchy.create(NewParty::root(company_name(&mut rng)))?;
            report.roots += 1;

            for _ in 0..rng.gen_range(subsidiaries.clone()) {
                let subsidiary = self
                    .hierarchy
                    .create(NewParty::owned_by(company_name(&mut rng), &root.id))?;
                report.subsidiaries += 1;

                for _ in 0..rng.gen_range(nested.clone()) {
                    self.hierarchy
                        .create(NewParty::owned_by(company_name(&mut rng), &subsidiary.id))?;
                    report.nested += 1;
                }
            }
            debug!("seeded tree under {}", root.id);
        }

        info!("seeding complete: {} parties", report.total());
        Ok(report)
    }
}

fn checked_range(
    label: &str,
    min: usize,
    max: usize,
) -> ApplicationResult<RangeInclusive<usize>> {
    if min > max {
        return Err(ApplicationError::Config {
            message: format!("seed {label} range is empty: {min} > {max}"),
        });
    }
    Ok(min..=max)
}

/// Random company-style name, e.g. "Harbor Logistics Ltd".
fn company_name<R: Rng>(rng: &mut R) -> String {
    let pick = |rng: &mut R, words: &[&'static str]| -> &'static str {
        words.choose(rng).copied().unwrap_or_default()
    };
    let adjective = pick(rng, ADJECTIVES);
    let noun = pick(rng, NOUNS);
    let suffix = pick(rng, SUFFIXES);
    format!("{adjective} {noun} {suffix}")
}
