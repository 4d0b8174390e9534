//! Repetition of one scenario with fresh wave seeds.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ss_core::{ConfigError, ConfigResult};
use ss_engine::{Directive, ObjectRef};
use ss_project::schema::WaveSeedDef;

use crate::case::Case;

/// Engine seeds are signed 32-bit values.
const SEED_BOUND: i64 = 2_147_483_647;

#[derive(Debug, Clone, PartialEq)]
pub struct SeedRepetition {
    /// Declared case count
    pub cases: usize,
    /// Seed of the per-case seed generator, drawn from entropy once when not declared
    pub generator_seed: u64,
}

impl SeedRepetition {
    pub fn from_def(def: &WaveSeedDef) -> ConfigResult<Self> {
        if def.cases == 0 {
            return Err(ConfigError::invalid("wave seed cases", 0, "must be positive"));
        }
        let generator_seed = def.generator_seed.unwrap_or_else(rand::random::<u64>);
        let sweep = Self {
            cases: def.cases,
            generator_seed,
        };
        tracing::warn!(
            declared = sweep.cases,
            planned = sweep.case_count(),
            "wave seed repetition runs cases 1..n, one fewer than declared"
        );
        Ok(sweep)
    }

    pub fn case_count(&self) -> usize {
        self.cases.saturating_sub(1)
    }

    /// Distinct per-case seeds; identical for identical generator seeds.
    pub fn seeds(&self) -> Vec<i64> {
        let mut rng = StdRng::seed_from_u64(self.generator_seed);
        let mut drawn = HashSet::new();
        let mut seeds = Vec::with_capacity(self.case_count());
        while seeds.len() < self.case_count() {
            let seed = rng.gen_range(-SEED_BOUND..SEED_BOUND);
            if drawn.insert(seed) {
                seeds.push(seed);
            }
        }
        seeds
    }

    pub fn plan_cases(&self) -> Vec<Case> {
        self.seeds()
            .into_iter()
            .enumerate()
            .map(|(index, seed)| Case {
                id: format!("wave_seed_{}", seed),
                index,
                independent_value: (index + 1) as f64,
                directives: vec![
                    Directive::new(ObjectRef::Environment, "UserSpecifiedRandomWaveSeeds", true),
                    Directive::new(ObjectRef::Environment, "WaveSeed", seed),
                ],
            })
            .collect()
    }
}
