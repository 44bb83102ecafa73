use std::fmt;

/// Unique identifier for a controller owned by a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ControllerId(pub u64);

/// Stable identifier for one controller/body association.
///
/// Allocated monotonically and never reused, so a handle to a detached
/// edge can never resolve to a newer one. Allocation fails rather than wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u64);

impl fmt::Display for ControllerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Controller({})", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_handle_kind() {
        assert_eq!(ControllerId(3).to_string(), "Controller(3)");
        assert_eq!(EdgeId(7).to_string(), "Edge(7)");
    }

    #[test]
    fn edge_ids_order_by_allocation() {
        assert!(EdgeId(1) < EdgeId(2));
    }
}
