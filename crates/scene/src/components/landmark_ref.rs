/// Back-reference from a pickable entity to its catalog record.
///
/// Only the primary drawable of a landmark carries this component;
/// decorative entities (ground, ornaments) do not, which is what keeps
/// them out of picking.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LandmarkRef {
    /// Index into the catalog's record list.
    pub index: usize,
}

impl LandmarkRef {
    pub fn new(index: usize) -> Self {
        Self { index }
    }
}
