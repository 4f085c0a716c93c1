//! Divergence level between two bisection IDs
//!
//! Bisection IDs store the depth-0 decision in the most significant bit, so
//! comparing two IDs from the root means scanning from the high end: the
//! position of the highest set bit of the XOR is the shallowest depth at
//! which the two nodes' cells diverge. Edges crossing a coarse top-level
//! boundary therefore get a low level, edges crossing only a leaf-level
//! boundary a high one.

use crate::BisectionID;

/// Shallowest recursion depth at which two IDs diverge, or `None` if they
/// are identical (same leaf cell, no border between them).
pub fn divergence_level(lhs: BisectionID, rhs: BisectionID) -> Option<u32> {
    if lhs == rhs {
        None
    } else {
        Some((lhs ^ rhs).leading_zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_ids_never_diverge() {
        assert_eq!(divergence_level(0, 0), None);
        assert_eq!(divergence_level(u32::MAX, u32::MAX), None);
        assert_eq!(divergence_level(0b101 << 29, 0b101 << 29), None);
    }

    #[test]
    fn test_root_split_is_level_zero() {
        assert_eq!(divergence_level(0, 1 << 31), Some(0));
    }

    #[test]
    fn test_divergence_at_first_differing_depth() {
        // Same side at depth 0, opposite sides at depth 1.
        assert_eq!(divergence_level(0b00 << 30, 0b01 << 30), Some(1));
        // Deeper bits differ too, but the shallowest divergence wins.
        assert_eq!(divergence_level(0b100 << 29, 0b111 << 29), Some(1));
    }

    #[test]
    fn test_leaf_level_boundary() {
        let lhs = 0b1010 << 28;
        let rhs = (0b1010 << 28) | (1 << 27);
        assert_eq!(divergence_level(lhs, rhs), Some(4));
    }
}
