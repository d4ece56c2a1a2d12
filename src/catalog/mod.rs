//! Built-in tiling families
//!
//! Each family bundles a seed, a transition and the coordinate field it is
//! exact in. Generation runs in that field; the finished mesh is converted to
//! floating point only for statistics and rendering.

/// Ammann A2 L-shapes via the two-generation recurrence
pub mod ammann;
/// Ammann chair, four affine images per step
pub mod chair;
/// Fibonacci squares with identity retagging
pub mod fibonacci;
/// Robinson triangles of the Penrose tiling in ℚ(√5)
pub mod penrose;
/// Square-triangle pinwheel placed by the constraint solver
pub mod pinwheel;
/// Quartered unit square
pub mod squares;

use crate::algorithm::engine::{Generation, StepReport, SubstitutionEngine};
use crate::algorithm::rules::Transition;
use crate::io::error::{Result, TilingError};
use crate::math::scalar::{Equality, Scalar};
use crate::spatial::point::Point;
use crate::spatial::tile::{Prototype, Tile};
use crate::spatial::vertices::VertexSet;

/// One tile of a finished mesh, in floating point
#[derive(Debug, Clone, PartialEq)]
pub struct MeshTile {
    /// Prototype name
    pub prototype: &'static str,
    /// Polygon outline
    pub outline: Vec<Point<f64>>,
}

/// A generated tiling ready for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Family name
    pub name: &'static str,
    /// Substitution steps applied
    pub steps: usize,
    /// Tiles in generation order
    pub tiles: Vec<MeshTile>,
    /// Distinct vertices, deduplicated in the family's own field
    pub vertices: Vec<Point<f64>>,
}

/// A tiling family that can be generated by name
pub trait Tiling: Send + Sync {
    /// Name used on the command line and in the plot-range file
    fn name(&self) -> &'static str;

    /// One-line description for listings
    fn description(&self) -> &'static str;

    /// Run `steps` substitutions from the seed and collect the mesh
    ///
    /// # Errors
    ///
    /// Propagates every engine and solver failure
    fn generate(
        &self,
        engine: &SubstitutionEngine,
        steps: usize,
        observer: &mut dyn FnMut(StepReport),
    ) -> Result<Mesh>;
}

/// A family described by plain functions over one coordinate field
pub struct Family<P, S> {
    name: &'static str,
    description: &'static str,
    seed: fn() -> Result<Vec<Tile<P, S>>>,
    transition: fn() -> Transition<P, S>,
    equality: Equality,
    embed: fn(Point<S>) -> Point<f64>,
}

impl<P: Prototype, S: Scalar> Family<P, S> {
    /// Family embedded in the plane by plain conversion to `f64`
    pub fn new(
        name: &'static str,
        description: &'static str,
        seed: fn() -> Result<Vec<Tile<P, S>>>,
        transition: fn() -> Transition<P, S>,
        equality: Equality,
    ) -> Self {
        Self {
            name,
            description,
            seed,
            transition,
            equality,
            embed: Point::to_f64,
        }
    }

    /// Use a custom map from field coordinates to the plane
    #[must_use]
    pub fn with_embedding(mut self, embed: fn(Point<S>) -> Point<f64>) -> Self {
        self.embed = embed;
        self
    }

    /// Equality used to merge vertices
    pub const fn equality(&self) -> Equality {
        self.equality
    }

    /// Run the engine and return the raw generation in the native field
    ///
    /// # Errors
    ///
    /// Propagates every engine and solver failure
    pub fn generation(
        &self,
        engine: &SubstitutionEngine,
        steps: usize,
        observer: &mut dyn FnMut(StepReport),
    ) -> Result<Generation<P, S>> {
        let seed = Generation::seed((self.seed)()?);
        let transition = (self.transition)();
        engine.run_with(seed, &transition, steps, observer)
    }
}

impl<P: Prototype, S: Scalar> Tiling for Family<P, S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn generate(
        &self,
        engine: &SubstitutionEngine,
        steps: usize,
        observer: &mut dyn FnMut(StepReport),
    ) -> Result<Mesh> {
        let generation = self.generation(engine, steps, observer)?;
        let vertices = VertexSet::from_tiles(generation.tiles(), self.equality);
        tracing::info!(
            tiling = self.name,
            steps,
            tiles = generation.len(),
            vertices = vertices.len(),
            "tiling generated"
        );

        let embed = self.embed;
        let tiles = generation
            .into_tiles()
            .into_iter()
            .map(|tile| MeshTile {
                prototype: tile.prototype().name(),
                outline: tile.into_vertices().into_iter().map(embed).collect(),
            })
            .collect();
        Ok(Mesh {
            name: self.name,
            steps,
            tiles,
            vertices: vertices.points().iter().map(|&v| embed(v)).collect(),
        })
    }
}

/// Every built-in family, in listing order
pub fn catalog() -> Vec<Box<dyn Tiling>> {
    vec![
        Box::new(squares::family()),
        Box::new(chair::family()),
        Box::new(fibonacci::family()),
        Box::new(pinwheel::family()),
        Box::new(ammann::family()),
        Box::new(penrose::family()),
    ]
}

/// Look a family up by name
///
/// # Errors
///
/// Returns `UnknownTiling` if no built-in family has that name
pub fn find(name: &str) -> Result<Box<dyn Tiling>> {
    catalog()
        .into_iter()
        .find(|tiling| tiling.name() == name)
        .ok_or_else(|| TilingError::UnknownTiling {
            name: name.to_string(),
        })
}
