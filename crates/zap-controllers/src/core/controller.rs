use std::collections::{HashMap, HashSet};

use crate::api::types::EdgeId;
use crate::core::edge::ControllerEdge;
use crate::core::time::TimeStep;
use crate::systems::debug::DebugDraw;

/// A per-step behavior applied to a set of bodies (buoyancy, wind, gravity wells, ...).
///
/// Concrete controllers only implement the hooks. Attachment bookkeeping lives in
/// `ControllerRegistry`, which passes each hook a consistent view of the bodies the
/// controller currently affects. `W` is the world type the hooks act on.
pub trait Controller<B, W: ?Sized = ()> {
    /// Apply this controller's effect for one tick.
    fn step(&mut self, world: &mut W, step: &TimeStep, bodies: BodyList<'_, B>);

    /// Emit debug geometry for this controller.
    fn draw(&self, world: &W, draw: &mut dyn DebugDraw, bodies: BodyList<'_, B>);

    /// Short name used in log output.
    fn name(&self) -> &str {
        "controller"
    }
}

/// Live read-only view of one controller's edges.
///
/// Iteration order is unspecified.
pub struct BodyList<'a, B> {
    edges: &'a HashSet<EdgeId>,
    arena: &'a HashMap<EdgeId, ControllerEdge<B>>,
}

impl<B> Clone for BodyList<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for BodyList<'_, B> {}

impl<'a, B: Copy + PartialEq> BodyList<'a, B> {
    pub(crate) fn new(
        edges: &'a HashSet<EdgeId>,
        arena: &'a HashMap<EdgeId, ControllerEdge<B>>,
    ) -> Self {
        Self { edges, arena }
    }

    /// Number of edges (attached bodies, counting duplicates).
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over the edges with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeId, &'a ControllerEdge<B>)> + 'a {
        let (edges, arena) = (self.edges, self.arena);
        edges
            .iter()
            .filter_map(move |id| arena.get(id).map(|edge| (*id, edge)))
    }

    /// Iterate over the attached bodies.
    pub fn bodies(&self) -> impl Iterator<Item = B> + 'a {
        self.iter().map(|(_, edge)| edge.body)
    }

    /// Whether at least one edge points at `body`.
    pub fn contains(&self, body: B) -> bool {
        self.iter().any(|(_, edge)| edge.body == body)
    }
}
