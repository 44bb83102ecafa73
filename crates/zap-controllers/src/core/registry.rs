// core/registry.rs
//
// Controller/body association registry: a bipartite graph of edge records.
// Every edge id lives in exactly two sets: its controller's and its body's.
//
// Usage:
//   let mut registry: ControllerRegistry<EntityId, World> = ControllerRegistry::new();
//   let wind = registry.add_controller(Box::new(Wind::new()))?;
//   registry.add_body(wind, entity_id)?;
//   registry.step(&mut world, &step);  // Runs every controller over its bodies

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::api::config::{DuplicatePolicy, RegistryConfig};
use crate::api::types::{ControllerId, EdgeId};
use crate::core::controller::{BodyList, Controller};
use crate::core::edge::ControllerEdge;
use crate::core::error::{ControllerError, InvariantViolation};
use crate::core::time::TimeStep;
use crate::systems::debug::DebugDraw;

/// A controller together with the edges it owns.
struct ControllerSlot<B, W: ?Sized> {
    controller: Box<dyn Controller<B, W>>,
    edges: HashSet<EdgeId>,
}

/// Owns controllers and the edges linking them to bodies.
///
/// Bodies are external; `B` is whatever handle the engine uses for them.
/// The registry keeps each body's reverse edge set keyed by that handle.
pub struct ControllerRegistry<B, W: ?Sized = ()> {
    config: RegistryConfig,
    controllers: HashMap<ControllerId, ControllerSlot<B, W>>,
    /// Controller ids in creation order; step/draw visit controllers in this order.
    order: Vec<ControllerId>,
    /// Reverse edge sets. A body with no edges has no entry.
    bodies: HashMap<B, HashSet<EdgeId>>,
    edges: HashMap<EdgeId, ControllerEdge<B>>,
    next_controller: u64,
    next_edge: u64,
}

impl<B, W> ControllerRegistry<B, W>
where
    B: Copy + Eq + Hash + fmt::Debug,
    W: ?Sized,
{
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            controllers: HashMap::with_capacity(config.controller_capacity),
            order: Vec::with_capacity(config.controller_capacity),
            bodies: HashMap::with_capacity(config.edge_capacity),
            edges: HashMap::with_capacity(config.edge_capacity),
            next_controller: 0,
            next_edge: 0,
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // -- Controller lifecycle --

    /// Take ownership of a controller. It starts with no bodies.
    pub fn add_controller(
        &mut self,
        controller: Box<dyn Controller<B, W>>,
    ) -> Result<ControllerId, ControllerError> {
        let id = ControllerId(allocate(&mut self.next_controller, "controller")?);
        log::debug!("{}: added ({})", id, controller.name());
        self.controllers.insert(
            id,
            ControllerSlot {
                controller,
                edges: HashSet::new(),
            },
        );
        self.order.push(id);
        Ok(id)
    }

    /// Detach every body from a controller, then hand the controller back.
    pub fn remove_controller(
        &mut self,
        id: ControllerId,
    ) -> Result<Box<dyn Controller<B, W>>, ControllerError> {
        self.clear(id)?;
        let slot = self
            .controllers
            .remove(&id)
            .ok_or(ControllerError::UnknownController(id))?;
        self.order.retain(|&c| c != id);
        log::debug!("{}: removed ({})", id, slot.controller.name());
        Ok(slot.controller)
    }

    // -- Attach / detach --

    /// Attach a body to a controller, creating one new edge on both sides.
    pub fn add_body(&mut self, controller: ControllerId, body: B) -> Result<EdgeId, ControllerError> {
        let slot = self
            .controllers
            .get_mut(&controller)
            .ok_or(ControllerError::UnknownController(controller))?;

        if self.config.duplicate_policy == DuplicatePolicy::Reject {
            if let Some(edge) = latest_edge(&self.bodies, &self.edges, controller, &body) {
                log::warn!("{}: rejected duplicate attach of {:?}", controller, body);
                return Err(ControllerError::AlreadyAttached { controller, edge });
            }
        }

        let id = EdgeId(allocate(&mut self.next_edge, "edge")?);
        self.edges.insert(id, ControllerEdge::new(controller, body));
        slot.edges.insert(id);
        self.bodies.entry(body).or_default().insert(id);
        log::trace!("{}: attached {:?} ({})", controller, body, id);
        Ok(id)
    }

    /// Detach a body from a controller, removing its edge from both sides.
    ///
    /// With duplicate attachments allowed, the most recently created edge for
    /// the pair is the one removed.
    pub fn remove_body(&mut self, controller: ControllerId, body: B) -> Result<(), ControllerError> {
        let slot = self
            .controllers
            .get(&controller)
            .ok_or(ControllerError::UnknownController(controller))?;
        if slot.edges.is_empty() {
            return Err(InvariantViolation::RemoveFromEmpty { controller }.into());
        }
        let edge = latest_edge(&self.bodies, &self.edges, controller, &body)
            .ok_or(InvariantViolation::BodyNotAttached { controller })?;
        self.detach_edge(edge);
        Ok(())
    }

    /// Detach every body from a controller. Returns the number of edges removed.
    pub fn clear(&mut self, controller: ControllerId) -> Result<usize, ControllerError> {
        let slot = self
            .controllers
            .get(&controller)
            .ok_or(ControllerError::UnknownController(controller))?;
        // Snapshot: detach_edge mutates the set being walked.
        let snapshot: Vec<EdgeId> = slot.edges.iter().copied().collect();
        for &id in &snapshot {
            self.detach_edge(id);
        }
        if !snapshot.is_empty() {
            log::debug!("{}: cleared {} bodies", controller, snapshot.len());
        }
        Ok(snapshot.len())
    }

    /// Detach a body from every controller affecting it, e.g. before the
    /// engine destroys the body. Returns the number of edges removed.
    pub fn detach_body(&mut self, body: B) -> usize {
        let Some(ids) = self.bodies.get(&body) else { return 0 };
        let snapshot: Vec<EdgeId> = ids.iter().copied().collect();
        for &id in &snapshot {
            self.detach_edge(id);
        }
        log::debug!("{:?}: detached from {} controllers", body, snapshot.len());
        snapshot.len()
    }

    fn detach_edge(&mut self, id: EdgeId) -> Option<ControllerEdge<B>> {
        let edge = self.edges.remove(&id)?;
        if let Some(slot) = self.controllers.get_mut(&edge.controller) {
            slot.edges.remove(&id);
        }
        if let Some(set) = self.bodies.get_mut(&edge.body) {
            set.remove(&id);
            if set.is_empty() {
                self.bodies.remove(&edge.body);
            }
        }
        log::trace!("{}: detached {:?} ({})", edge.controller, edge.body, id);
        Some(edge)
    }

    // -- Queries --

    /// The live set of edges for a controller.
    pub fn body_list(&self, controller: ControllerId) -> Option<BodyList<'_, B>> {
        self.controllers
            .get(&controller)
            .map(|slot| BodyList::new(&slot.edges, &self.edges))
    }

    /// The edges of every controller affecting `body`.
    pub fn controller_list(&self, body: B) -> impl Iterator<Item = (EdgeId, &ControllerEdge<B>)> + '_ {
        let edges = &self.edges;
        self.bodies
            .get(&body)
            .into_iter()
            .flatten()
            .filter_map(move |id| edges.get(id).map(|edge| (*id, edge)))
    }

    /// Number of edges on the body side.
    pub fn body_edge_count(&self, body: B) -> usize {
        self.bodies.get(&body).map_or(0, HashSet::len)
    }

    pub fn is_attached(&self, controller: ControllerId, body: B) -> bool {
        latest_edge(&self.bodies, &self.edges, controller, &body).is_some()
    }

    pub fn edge(&self, id: EdgeId) -> Option<&ControllerEdge<B>> {
        self.edges.get(&id)
    }

    pub fn controller(&self, id: ControllerId) -> Option<&(dyn Controller<B, W> + 'static)> {
        self.controllers.get(&id).map(|slot| slot.controller.as_ref())
    }

    pub fn controller_mut(&mut self, id: ControllerId) -> Option<&mut (dyn Controller<B, W> + 'static)> {
        self.controllers.get_mut(&id).map(|slot| slot.controller.as_mut())
    }

    /// Controller ids in creation order.
    pub fn controller_ids(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.order.iter().copied()
    }

    pub fn controller_count(&self) -> usize {
        self.controllers.len()
    }

    /// Total number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // -- Per-tick hooks --

    /// Run every controller's `step` hook over its current bodies.
    pub fn step(&mut self, world: &mut W, step: &TimeStep) {
        for id in &self.order {
            let Some(slot) = self.controllers.get_mut(id) else { continue };
            let bodies = BodyList::new(&slot.edges, &self.edges);
            slot.controller.step(world, step, bodies);
        }
    }

    /// Run every controller's `draw` hook.
    pub fn draw(&self, world: &W, draw: &mut dyn DebugDraw) {
        for id in &self.order {
            let Some(slot) = self.controllers.get(id) else { continue };
            let bodies = BodyList::new(&slot.edges, &self.edges);
            slot.controller.draw(world, draw, bodies);
        }
    }

    /// Check that every edge is recorded on both of its endpoints and nowhere else.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        for (&id, edge) in &self.edges {
            let on_controller = self
                .controllers
                .get(&edge.controller)
                .is_some_and(|slot| slot.edges.contains(&id));
            let on_body = self
                .bodies
                .get(&edge.body)
                .is_some_and(|set| set.contains(&id));
            if !on_controller || !on_body {
                return Err(InvariantViolation::Asymmetric { edge: id });
            }
        }
        for (&controller, slot) in &self.controllers {
            for &id in &slot.edges {
                if self.edges.get(&id).map(|e| e.controller) != Some(controller) {
                    return Err(InvariantViolation::Asymmetric { edge: id });
                }
            }
        }
        for (body, set) in &self.bodies {
            for &id in set {
                if self.edges.get(&id).map(|e| &e.body) != Some(body) {
                    return Err(InvariantViolation::Asymmetric { edge: id });
                }
            }
        }
        Ok(())
    }
}

impl<B, W> Default for ControllerRegistry<B, W>
where
    B: Copy + Eq + Hash + fmt::Debug,
    W: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Hand out the counter's value and advance it; the last value is never issued.
fn allocate(counter: &mut u64, kind: &'static str) -> Result<u64, ControllerError> {
    let id = *counter;
    *counter = id
        .checked_add(1)
        .ok_or(ControllerError::IdsExhausted { kind })?;
    Ok(id)
}

/// The newest edge joining `controller` and `body`, found through the body's set.
fn latest_edge<B: Eq + Hash>(
    bodies: &HashMap<B, HashSet<EdgeId>>,
    edges: &HashMap<EdgeId, ControllerEdge<B>>,
    controller: ControllerId,
    body: &B,
) -> Option<EdgeId> {
    bodies
        .get(body)?
        .iter()
        .copied()
        .filter(|id| edges.get(id).is_some_and(|e| e.controller == controller))
        .max()
}
