//! Strategy selection and the try-all driver.

use crate::binary_lp::{BinaryLpSolver, MicroLpSolver};
use crate::error::{Error, Result};
use crate::heuristics::EdgelessPolicy;
use crate::minimizer::CrossMinimizer;
use crate::report::Reporter;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialized by its canonical name; deserialized through [`FromStr`], so documents accept
/// the same spellings as the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Strategy {
    Barycenter,
    Median,
    Split,
    SplitBest10,
    BinaryLp,
    #[default]
    TryAll,
}

impl Strategy {
    /// Evaluation order of [`Strategy::TryAll`]; earlier entries win ties.
    pub const TRY_ALL_ORDER: [Strategy; 4] = [
        Strategy::Barycenter,
        Strategy::Median,
        Strategy::SplitBest10,
        Strategy::BinaryLp,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Barycenter => "barycenter",
            Strategy::Median => "median",
            Strategy::Split => "split",
            Strategy::SplitBest10 => "split-best-10",
            Strategy::BinaryLp => "binary-lp",
            Strategy::TryAll => "try-all",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "barycenter" | "baricenter" => Ok(Self::Barycenter),
            "median" => Ok(Self::Median),
            "split" => Ok(Self::Split),
            "split-best-10" | "split10" => Ok(Self::SplitBest10),
            "binary-lp" | "binopt" => Ok(Self::BinaryLp),
            "try-all" | "tryall" => Ok(Self::TryAll),
            other => Err(Error::invalid_argument(format!("unknown strategy: {other}"))),
        }
    }
}

impl TryFrom<String> for Strategy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Strategy> for String {
    fn from(value: Strategy) -> Self {
        value.name().to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SolveOptions {
    pub strategy: Strategy,
    /// Seed for the split heuristic; `None` seeds from OS entropy (not reproducible).
    pub seed: Option<u64>,
    pub edgeless: EdgelessPolicy,
}

impl SolveOptions {
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// A strategy's order together with its crossing count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    pub strategy: Strategy,
    pub order: Vec<usize>,
    pub crossings: f64,
}

/// Capabilities a solve needs: randomness, the LP solver and an optional reporter.
pub struct SolveEnv<'a> {
    rng: &'a mut dyn RngCore,
    lp_solver: &'a dyn BinaryLpSolver,
    reporter: Option<&'a mut dyn Reporter>,
    edgeless: EdgelessPolicy,
}

impl<'a> SolveEnv<'a> {
    pub fn new(rng: &'a mut dyn RngCore, lp_solver: &'a dyn BinaryLpSolver) -> Self {
        Self {
            rng,
            lp_solver,
            reporter: None,
            edgeless: EdgelessPolicy::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: &'a mut dyn Reporter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_edgeless(mut self, edgeless: EdgelessPolicy) -> Self {
        self.edgeless = edgeless;
        self
    }

    fn report(&mut self, text: &str) {
        let Some(reporter) = self.reporter.as_deref_mut() else {
            return;
        };
        if let Err(err) = reporter.log(text) {
            tracing::warn!(error = %err, "reporter failed; continuing");
        }
    }
}

impl CrossMinimizer {
    pub fn solve(&self, strategy: Strategy, env: &mut SolveEnv<'_>) -> Result<Solution> {
        if strategy == Strategy::TryAll {
            return self.try_all(env);
        }
        let order = self.order_with(strategy, env)?;
        let crossings = self.cross_count(&order)?;
        Ok(Solution {
            strategy,
            order,
            crossings,
        })
    }

    /// Builds the env from `options` (seeded rng, [`MicroLpSolver`]) and solves.
    pub fn solve_with_options(
        &self,
        options: &SolveOptions,
        reporter: &mut dyn Reporter,
    ) -> Result<Solution> {
        let mut rng = options.rng();
        let mut env = SolveEnv::new(&mut rng, &MicroLpSolver)
            .with_reporter(reporter)
            .with_edgeless(options.edgeless);
        self.solve(options.strategy, &mut env)
    }

    fn order_with(&self, strategy: Strategy, env: &mut SolveEnv<'_>) -> Result<Vec<usize>> {
        match strategy {
            Strategy::Barycenter => self.solve_barycenter(env.edgeless),
            Strategy::Median => self.solve_median(env.edgeless),
            Strategy::Split => Ok(self.solve_split(&mut *env.rng)),
            Strategy::SplitBest10 => self.solve_split10(&mut *env.rng),
            Strategy::BinaryLp => self.solve_binary_lp(env.lp_solver),
            Strategy::TryAll => self.try_all(env).map(|s| s.order),
        }
    }

    /// Runs every strategy in [`Strategy::TRY_ALL_ORDER`] and keeps the lowest count.
    ///
    /// A failing strategy is reported and skipped; the call fails only when all of them
    /// fail, with the last error.
    fn try_all(&self, env: &mut SolveEnv<'_>) -> Result<Solution> {
        let _span = tracing::debug_span!("try_all", lower = self.lower_count()).entered();

        let mut best: Option<Solution> = None;
        let mut last_err: Option<Error> = None;
        for strategy in Strategy::TRY_ALL_ORDER {
            let attempt = self
                .order_with(strategy, env)
                .and_then(|order| Ok((self.cross_count(&order)?, order)));
            match attempt {
                Ok((crossings, order)) => {
                    tracing::debug!(%strategy, crossings, "strategy finished");
                    env.report(&format!("{strategy} {crossings}"));
                    if best.as_ref().is_none_or(|b| crossings < b.crossings) {
                        best = Some(Solution {
                            strategy,
                            order,
                            crossings,
                        });
                    }
                }
                Err(err) => {
                    tracing::warn!(%strategy, error = %err, "strategy failed");
                    env.report(&format!("{strategy} failed: {err}"));
                    last_err = Some(err);
                }
            }
        }

        match (best, last_err) {
            (Some(best), _) => Ok(best),
            (None, Some(err)) => Err(err),
            (None, None) => Err(Error::invalid_argument("no strategy was evaluated")),
        }
    }
}
