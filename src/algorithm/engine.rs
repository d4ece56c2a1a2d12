//! Generation-by-generation substitution driver
//!
//! The engine owns no tiling knowledge. It validates the seed, then applies a
//! [`Transition`] exactly `steps` times. Per-tile work runs on the rayon pool
//! once a generation is large enough. Results are always concatenated in
//! parent order, so output never depends on scheduling.

use crate::algorithm::rules::{Recurrence, RuleTable, Transition};
use crate::io::configuration::{DEFAULT_MAX_TILES, PARALLEL_THRESHOLD};
use crate::io::error::{Result, TilingError, WithContext, invalid_parameter};
use crate::math::scalar::Scalar;
use crate::spatial::affine::AffineTransform;
use crate::spatial::tile::{Prototype, Tile};
use rayon::prelude::*;

/// Tile collection after a fixed number of substitution steps
#[derive(Debug, Clone, PartialEq)]
pub struct Generation<P, S> {
    step: usize,
    tiles: Vec<Tile<P, S>>,
}

impl<P: Prototype, S: Scalar> Generation<P, S> {
    /// Generation 0 made of `tiles`
    pub const fn seed(tiles: Vec<Tile<P, S>>) -> Self {
        Self { step: 0, tiles }
    }

    /// Number of transitions applied since the seed
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Tiles in deterministic order
    pub fn tiles(&self) -> &[Tile<P, S>] {
        &self.tiles
    }

    /// Take ownership of the tiles
    pub fn into_tiles(self) -> Vec<Tile<P, S>> {
        self.tiles
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the generation has no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Progress notification emitted after every generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Generation just completed
    pub step: usize,
    /// Total generations requested
    pub steps: usize,
    /// Tiles in the completed generation
    pub tiles: usize,
}

/// Engine tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Largest generation the engine will build
    pub max_tiles: usize,
    /// Generations smaller than this are processed sequentially
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tiles: DEFAULT_MAX_TILES,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

/// Applies transitions to generations
#[derive(Debug, Clone, Default)]
pub struct SubstitutionEngine {
    config: EngineConfig,
}

impl SubstitutionEngine {
    /// Create an engine with the given tunables
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `max_tiles` is zero
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.max_tiles == 0 {
            return Err(invalid_parameter(
                "max_tiles",
                &config.max_tiles,
                &"must allow at least one tile",
            ));
        }
        Ok(Self { config })
    }

    /// Tunables in effect
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Apply `transition` to `seed` exactly `steps` times
    ///
    /// `steps == 0` returns the seed unchanged.
    ///
    /// # Errors
    ///
    /// - `VertexCount` / `NonFiniteVertex` for an invalid seed or child
    /// - `UnknownPrototype` for a tile the rule table does not cover
    /// - solver errors raised by rule functions
    /// - `ResourceExhausted` when a generation would exceed `max_tiles`
    pub fn run<P: Prototype, S: Scalar>(
        &self,
        seed: Generation<P, S>,
        transition: &Transition<P, S>,
        steps: usize,
    ) -> Result<Generation<P, S>> {
        self.run_with(seed, transition, steps, |_| {})
    }

    /// Like [`Self::run`], reporting after every generation
    ///
    /// # Errors
    ///
    /// Same as [`Self::run`]
    pub fn run_with<P: Prototype, S: Scalar>(
        &self,
        seed: Generation<P, S>,
        transition: &Transition<P, S>,
        steps: usize,
        mut observer: impl FnMut(StepReport),
    ) -> Result<Generation<P, S>> {
        self.validate_all(&seed.tiles)?;
        if seed.tiles.len() > self.config.max_tiles {
            return Err(TilingError::ResourceExhausted {
                step: 0,
                resource: "tiles",
                requested: seed.tiles.len(),
                limit: self.config.max_tiles,
            });
        }
        tracing::debug!(seed = seed.tiles.len(), steps, "starting substitution");

        let mut current = seed.tiles;
        // Only the recurrence needs the generation before the current one
        let mut previous: Option<Vec<Tile<P, S>>> = None;

        for step in 1..=steps {
            let next = match transition {
                Transition::Substitute(table) => self.substitute(&current, table, step),
                Transition::Recur(recurrence) => {
                    let earlier = previous.as_deref().unwrap_or(&current);
                    self.recur(&current, earlier, recurrence, step)
                }
            }
            .at_step(step)?;

            tracing::debug!(step, tiles_in = current.len(), tiles_out = next.len(), "generation built");
            observer(StepReport {
                step,
                steps,
                tiles: next.len(),
            });

            if matches!(transition, Transition::Recur(_)) {
                previous = Some(std::mem::replace(&mut current, next));
            } else {
                current = next;
            }
        }

        Ok(Generation {
            step: steps,
            tiles: current,
        })
    }

    fn validate_all<P: Prototype, S: Scalar>(&self, tiles: &[Tile<P, S>]) -> Result<()> {
        if tiles.len() < self.config.parallel_threshold {
            tiles.iter().try_for_each(Tile::validate)
        } else {
            tiles.par_iter().try_for_each(Tile::validate)
        }
    }

    fn check_budget(&self, step: usize, requested: usize) -> Result<()> {
        if requested > self.config.max_tiles {
            tracing::warn!(step, requested, limit = self.config.max_tiles, "tile budget exceeded");
            return Err(TilingError::ResourceExhausted {
                step,
                resource: "tiles",
                requested,
                limit: self.config.max_tiles,
            });
        }
        Ok(())
    }

    fn reserve<T>(&self, step: usize, capacity: usize) -> Result<Vec<T>> {
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(capacity)
            .map_err(|_allocation| TilingError::ResourceExhausted {
                step,
                resource: "tiles",
                requested: capacity,
                limit: self.config.max_tiles,
            })?;
        Ok(tiles)
    }

    fn substitute<P: Prototype, S: Scalar>(
        &self,
        current: &[Tile<P, S>],
        table: &RuleTable<P, S>,
        step: usize,
    ) -> Result<Vec<Tile<P, S>>> {
        // Fail before allocating when every production has a fixed branching
        let mut predicted = Some(0usize);
        for tile in current {
            predicted = match (predicted, table.branching(tile)?) {
                (Some(total), Some(k)) => Some(total.saturating_add(k)),
                _ => None,
            };
        }
        if let Some(total) = predicted {
            self.check_budget(step, total)?;
        }

        let apply = |tile: &Tile<P, S>| -> Result<Vec<Tile<P, S>>> {
            let children = table.apply(tile)?;
            children.iter().try_for_each(Tile::validate)?;
            Ok(children)
        };
        let families: Vec<Vec<Tile<P, S>>> = if current.len() < self.config.parallel_threshold {
            current.iter().map(apply).collect::<Result<_>>()?
        } else {
            current.par_iter().map(apply).collect::<Result<_>>()?
        };

        let total = families.iter().map(Vec::len).sum();
        self.check_budget(step, total)?;
        let mut next = self.reserve(step, total)?;
        for family in families {
            next.extend(family);
        }
        Ok(next)
    }

    fn recur<P: Prototype, S: Scalar>(
        &self,
        current: &[Tile<P, S>],
        earlier: &[Tile<P, S>],
        recurrence: &Recurrence<S>,
        step: usize,
    ) -> Result<Vec<Tile<P, S>>> {
        let total = current.len().saturating_add(earlier.len());
        self.check_budget(step, total)?;
        let mut next = self.reserve(step, total)?;
        next.extend(self.map_all(current, &recurrence.recent)?);
        next.extend(self.map_all(earlier, &recurrence.earlier)?);
        Ok(next)
    }

    fn map_all<P: Prototype, S: Scalar>(
        &self,
        tiles: &[Tile<P, S>],
        transform: &AffineTransform<S>,
    ) -> Result<Vec<Tile<P, S>>> {
        let map = |tile: &Tile<P, S>| -> Result<Tile<P, S>> {
            let image = tile.transformed(transform, tile.prototype())?;
            image.validate()?;
            Ok(image)
        };
        if tiles.len() < self.config.parallel_threshold {
            tiles.iter().map(map).collect()
        } else {
            tiles.par_iter().map(map).collect()
        }
    }
}
