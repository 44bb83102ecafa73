use crate::api::types::ControllerId;

/// One live association between a controller and a body.
///
/// The same record is referenced from the controller's edge set and from the
/// body's edge set; it exists exactly as long as the association does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerEdge<B> {
    /// The controller end of the edge.
    pub controller: ControllerId,
    /// The body end of the edge.
    pub body: B,
}

impl<B> ControllerEdge<B> {
    pub fn new(controller: ControllerId, body: B) -> Self {
        Self { controller, body }
    }
}
