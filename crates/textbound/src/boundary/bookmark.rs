use super::types::RuleMask;

/// Cursor state detached from the mapping it was taken from.
///
/// Cursors borrow their mapping, so they cannot outlive a remap. A bookmark
/// can: it records the mapping's identity and generation, and restoring it
/// after the mapping was rebuilt fails with
/// [`BoundaryError::StaleCursor`](crate::BoundaryError::StaleCursor) instead
/// of silently landing in the new index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bookmark {
    pub(crate) mapping_id: u64,
    pub(crate) generation: u64,
    pub(crate) position: usize,
    pub(crate) mask: RuleMask,
    pub(crate) full_select: bool,
}

impl Bookmark {
    pub fn mapping_id(&self) -> u64 {
        self.mapping_id
    }

    /// Generation of the mapping when the bookmark was taken.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn mask(&self) -> RuleMask {
        self.mask
    }

    /// Only meaningful for token cursors.
    pub fn full_select(&self) -> bool {
        self.full_select
    }
}
