//! Production rules and the transitions the engine applies between generations
//!
//! A [`RuleTable`] maps every prototype of a tiling family to a
//! [`Production`]. Productions are pure: the same tile always yields the same
//! children in the same order.

use crate::algorithm::solver::ConstraintSolver;
use crate::io::error::{Result, TilingError};
use crate::math::scalar::Scalar;
use crate::spatial::affine::AffineTransform;
use crate::spatial::tile::{Prototype, Tile};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Signature of a hand-written production
pub type RuleFn<P, S> =
    Arc<dyn Fn(&Tile<P, S>, &ConstraintSolver) -> Result<Vec<Tile<P, S>>> + Send + Sync>;

/// One child of an affine production: the parent's vertices mapped and retagged
#[derive(Debug, Clone)]
pub struct AffineChild<P, S> {
    /// Prototype of the child
    pub prototype: P,
    /// Map from parent vertices to child vertices
    pub transform: AffineTransform<S>,
}

/// How one prototype is replaced
pub enum Production<P, S> {
    /// The tile is its own single child
    Identity,
    /// Each child is an affine image of the parent
    Affine(Vec<AffineChild<P, S>>),
    /// Children computed by a function of the parent tile
    Rule(RuleFn<P, S>),
}

impl<P, S> Clone for Production<P, S>
where
    P: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Affine(children) => Self::Affine(children.clone()),
            Self::Rule(rule) => Self::Rule(Arc::clone(rule)),
        }
    }
}

impl<P: fmt::Debug, S> fmt::Debug for Production<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("Identity"),
            Self::Affine(children) => {
                let prototypes: Vec<&P> = children.iter().map(|c| &c.prototype).collect();
                f.debug_tuple("Affine").field(&prototypes).finish()
            }
            Self::Rule(_) => f.write_str("Rule"),
        }
    }
}

impl<P: Prototype, S: Scalar> Production<P, S> {
    /// Wrap a closure as a production
    pub fn rule(
        rule: impl Fn(&Tile<P, S>, &ConstraintSolver) -> Result<Vec<Tile<P, S>>>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self::Rule(Arc::new(rule))
    }

    /// Number of children, when it does not depend on the tile
    pub fn branching(&self) -> Option<usize> {
        match self {
            Self::Identity => Some(1),
            Self::Affine(children) => Some(children.len()),
            Self::Rule(_) => None,
        }
    }

    /// Replace `tile` by its children
    ///
    /// # Errors
    ///
    /// Returns whatever the production reports, typically a solver failure
    /// or a child with the wrong vertex count
    pub fn produce(&self, tile: &Tile<P, S>, solver: &ConstraintSolver) -> Result<Vec<Tile<P, S>>> {
        match self {
            Self::Identity => Ok(vec![tile.clone()]),
            Self::Affine(children) => children
                .iter()
                .map(|child| tile.transformed(&child.transform, child.prototype))
                .collect(),
            Self::Rule(rule) => rule(tile, solver),
        }
    }
}

/// Productions for every prototype of one tiling family
#[derive(Debug, Clone)]
pub struct RuleTable<P, S> {
    name: String,
    productions: HashMap<P, Production<P, S>>,
    solver: ConstraintSolver,
}

impl<P: Prototype, S: Scalar> RuleTable<P, S> {
    /// Create an empty table solving with `solver`
    pub fn new(name: impl Into<String>, solver: ConstraintSolver) -> Self {
        Self {
            name: name.into(),
            productions: HashMap::new(),
            solver,
        }
    }

    /// Register the production for `prototype`, replacing any previous one
    #[must_use]
    pub fn with(mut self, prototype: P, production: Production<P, S>) -> Self {
        self.productions.insert(prototype, production);
        self
    }

    /// Table name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Solver handed to rule functions
    pub const fn solver(&self) -> &ConstraintSolver {
        &self.solver
    }

    /// Production registered for `prototype`
    ///
    /// # Errors
    ///
    /// Returns `UnknownPrototype` if the table has no entry for it
    pub fn production(&self, prototype: P) -> Result<&Production<P, S>> {
        self.productions
            .get(&prototype)
            .ok_or_else(|| TilingError::UnknownPrototype {
                prototype: prototype.name(),
                table: self.name.clone(),
            })
    }

    /// Replace `tile` by its children
    ///
    /// # Errors
    ///
    /// Returns `UnknownPrototype` for unregistered prototypes and propagates
    /// production failures
    pub fn apply(&self, tile: &Tile<P, S>) -> Result<Vec<Tile<P, S>>> {
        self.production(tile.prototype())?
            .produce(tile, &self.solver)
    }

    /// Exact child count for `tile`, when it does not depend on geometry
    ///
    /// # Errors
    ///
    /// Returns `UnknownPrototype` for unregistered prototypes
    pub fn branching(&self, tile: &Tile<P, S>) -> Result<Option<usize>> {
        Ok(self.production(tile.prototype())?.branching())
    }
}

/// Two-term recurrence over generations
///
/// Generation `n + 1` is `recent(n) ∪ earlier(n - 1)`: every tile of the
/// latest generation mapped by `recent`, followed by every tile of the one
/// before mapped by `earlier`. Before the first step both are the seed.
#[derive(Debug, Clone)]
pub struct Recurrence<S> {
    /// Map applied to the immediately preceding generation
    pub recent: AffineTransform<S>,
    /// Map applied to the generation before that
    pub earlier: AffineTransform<S>,
}

/// How one generation is turned into the next
#[derive(Debug, Clone)]
pub enum Transition<P, S> {
    /// Apply a rule table to every tile
    Substitute(RuleTable<P, S>),
    /// Combine the last two generations
    Recur(Recurrence<S>),
}

impl<P, S> From<RuleTable<P, S>> for Transition<P, S> {
    fn from(table: RuleTable<P, S>) -> Self {
        Self::Substitute(table)
    }
}

impl<P, S> From<Recurrence<S>> for Transition<P, S> {
    fn from(recurrence: Recurrence<S>) -> Self {
        Self::Recur(recurrence)
    }
}
