//! Path reconstruction from a parent vector
//!
//! Walks predecessor links from a target back to the source and reverses the
//! result. The walk is iterative and gives up after `V` links, so a malformed
//! parent vector containing a cycle reports "no path" instead of looping.

use log::warn;

use crate::algorithm::traits::NodeId;

/// Rebuilds source-to-target vertex sequences from one parent vector
#[derive(Debug, Clone, Copy)]
pub struct PathReconstructor<'a> {
    parents: &'a [Option<NodeId>],
    source: NodeId,
}

impl<'a> PathReconstructor<'a> {
    pub fn new(parents: &'a [Option<NodeId>], source: NodeId) -> Self {
        Self { parents, source }
    }

    /// Vertices from the source to `target`, both inclusive
    ///
    /// Returns `None` when `target` is not connected to the source through
    /// the parent links. The self-path is `[source]`.
    pub fn reconstruct(&self, target: NodeId) -> Option<Vec<NodeId>> {
        let mut path = vec![target];
        let mut current = target;

        while current != self.source {
            if path.len() > self.parents.len() {
                warn!("parent chain from {} does not reach {}", target, self.source);
                return None;
            }
            current = (*self.parents.get(current.0)?)?;
            path.push(current);
        }

        path.reverse();
        Some(path)
    }
}

/// Convenience wrapper around [`PathReconstructor::reconstruct`]
pub fn reconstruct_path(
    parents: &[Option<NodeId>],
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    PathReconstructor::new(parents, source).reconstruct(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[usize]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_self_path_is_singleton() {
        let parents = vec![None, Some(NodeId(0))];
        assert_eq!(reconstruct_path(&parents, NodeId(0), NodeId(0)), Some(ids(&[0])));
    }

    #[test]
    fn test_chain_is_reversed() {
        // 0 <- 1 <- 3 <- 2
        let parents = vec![None, Some(NodeId(0)), Some(NodeId(3)), Some(NodeId(1))];
        let rec = PathReconstructor::new(&parents, NodeId(0));
        assert_eq!(rec.reconstruct(NodeId(2)), Some(ids(&[0, 1, 3, 2])));
        assert_eq!(rec.reconstruct(NodeId(3)), Some(ids(&[0, 1, 3])));
    }

    #[test]
    fn test_unreached_target_has_no_path() {
        let parents = vec![None, Some(NodeId(0)), None];
        assert_eq!(reconstruct_path(&parents, NodeId(0), NodeId(2)), None);
    }

    #[test]
    fn test_cycle_terminates() {
        // 1 and 2 point at each other and never reach 0
        let parents = vec![None, Some(NodeId(2)), Some(NodeId(1))];
        assert_eq!(reconstruct_path(&parents, NodeId(0), NodeId(1)), None);
    }

    #[test]
    fn test_self_referential_root_sentinel() {
        // Legacy layout where the root is its own parent
        let parents = vec![Some(NodeId(0)), Some(NodeId(0))];
        assert_eq!(reconstruct_path(&parents, NodeId(0), NodeId(1)), Some(ids(&[0, 1])));
    }

    #[test]
    fn test_out_of_range_target() {
        let parents = vec![None];
        assert_eq!(reconstruct_path(&parents, NodeId(0), NodeId(5)), None);
    }
}
