use std::collections::VecDeque;

use crate::game::PieceId;

/// Connection graph between pieces. A group is everything reachable from a
/// piece through confirmed links; links are only ever added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Links {
    adjacency: Vec<Vec<PieceId>>,
}

impl Links {
    pub fn new(total: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); total],
        }
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn link_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Joins the groups of `a` and `b`. Returns false when they already share a
    /// group or either id is out of range.
    pub fn merge(&mut self, a: PieceId, b: PieceId) -> bool {
        let total = self.adjacency.len();
        if a >= total || b >= total || self.same_group(a, b) {
            return false;
        }
        self.adjacency[a].push(b);
        self.adjacency[b].push(a);
        true
    }

    pub fn same_group(&self, a: PieceId, b: PieceId) -> bool {
        if a == b {
            return a < self.adjacency.len();
        }
        self.collect_group(a).binary_search(&b).is_ok()
    }

    /// Sorted members of the group containing `start`.
    pub fn collect_group(&self, start: PieceId) -> Vec<PieceId> {
        let total = self.adjacency.len();
        if start >= total {
            return Vec::new();
        }
        let mut visited = vec![false; total];
        let mut queue = VecDeque::new();
        let mut group = Vec::new();
        visited[start] = true;
        queue.push_back(start);
        while let Some(id) = queue.pop_front() {
            group.push(id);
            for &next in &self.adjacency[id] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        group.sort_unstable();
        group
    }

    /// Smallest member id of the group, used as its stable label.
    pub fn group_id(&self, id: PieceId) -> Option<PieceId> {
        self.collect_group(id).first().copied()
    }

    pub fn groups(&self) -> Vec<Vec<PieceId>> {
        let total = self.adjacency.len();
        let mut seen = vec![false; total];
        let mut groups = Vec::new();
        for start in 0..total {
            if seen[start] {
                continue;
            }
            let group = self.collect_group(start);
            for &id in &group {
                seen[id] = true;
            }
            groups.push(group);
        }
        groups
    }

    pub fn group_count(&self) -> usize {
        self.groups().len()
    }

    pub fn is_fully_connected(&self) -> bool {
        let total = self.adjacency.len();
        total > 0 && self.collect_group(0).len() == total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_a_no_op_inside_a_group() {
        let mut links = Links::new(3);
        assert!(links.merge(0, 1));
        assert!(links.merge(1, 2));
        assert!(!links.merge(2, 0));
        assert!(!links.merge(1, 1));
        assert_eq!(links.link_count(), 2);
    }

    #[test]
    fn out_of_range_ids_are_ignored() {
        let mut links = Links::new(2);
        assert!(!links.merge(0, 7));
        assert!(links.collect_group(9).is_empty());
        assert!(!links.same_group(5, 5));
        assert_eq!(links.group_id(9), None);
    }
}
