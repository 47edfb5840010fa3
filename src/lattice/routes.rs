use tracing::{debug, debug_span};

use super::builder::{Edge, Lattice};

impl Lattice {
    /// Every structurally consistent choice of one edge per step.
    ///
    /// An edge sequence is consistent when the destination state of step i
    /// names the same candidate as the source state of step i+1; only then
    /// does the sequence pin exactly one article per mention. Enumeration
    /// is exhaustive on purpose — callers consume the full ranked set of
    /// assignments, so a best-path shortcut cannot replace it. Routes come
    /// out in cross-product order: earlier steps vary slowest.
    pub(super) fn routes(&self) -> Vec<Vec<Edge>> {
        if self.edge_groups.is_empty() {
            return Vec::new();
        }
        let _span = debug_span!("routes", steps = self.edge_groups.len()).entered();

        // Extending prefixes and rejecting inconsistent ones early is
        // equivalent to filtering the full cross product, in the same
        // order: every extension of a rejected prefix would be rejected.
        let mut routes: Vec<Vec<Edge>> = vec![Vec::new()];
        for group in &self.edge_groups {
            let mut extended = Vec::with_capacity(routes.len() * group.len());
            for route in &routes {
                for &edge in group {
                    if let Some(&last) = route.last() {
                        if !self.connects(last, edge) {
                            continue;
                        }
                    }
                    let mut longer = route.clone();
                    longer.push(edge);
                    extended.push(longer);
                }
            }
            routes = extended;
        }

        debug!(route_count = routes.len());
        routes
    }

    /// Destination state of `prev` and source state of `next` name the
    /// same (position, candidate) pair.
    fn connects(&self, prev: Edge, next: Edge) -> bool {
        match (
            self.index.columns.key(prev.column),
            self.index.rows.key(next.row),
        ) {
            (Some(destination), Some(source)) => {
                destination.position == source.position && destination.label == source.label
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lattice::builder::build_lattice;
    use crate::lattice::testutil::{mentions, SimilarityTable};

    #[test]
    fn test_route_count_is_candidate_cross_product() {
        let model = SimilarityTable::new(&["a1", "a2", "b1", "b2", "b3", "c1", "c2"]);
        let input = mentions(&[
            ("A", &["a1", "a2"]),
            ("B", &["b1", "b2", "b3"]),
            ("C", &["c1", "c2"]),
        ]);

        let lattice = build_lattice(&input, &model).unwrap();
        // One candidate per mention: 2 * 3 * 2 assignments.
        assert_eq!(lattice.routes().len(), 12);
    }

    #[test]
    fn test_routes_are_internally_consistent() {
        let model = SimilarityTable::new(&["a1", "a2", "b1", "b2", "c1"]);
        let input = mentions(&[("A", &["a1", "a2"]), ("B", &["b1", "b2"]), ("C", &["c1"])]);

        let lattice = build_lattice(&input, &model).unwrap();
        for route in lattice.routes() {
            for window in route.windows(2) {
                let destination = lattice.index.columns.key(window[0].column).unwrap();
                let source = lattice.index.rows.key(window[1].row).unwrap();
                assert_eq!(destination.label, source.label);
                assert_eq!(destination.position, source.position);
            }
        }
    }

    #[test]
    fn test_fewer_than_two_mentions_yield_no_routes() {
        let model = SimilarityTable::new(&["a1"]);
        let lattice = build_lattice(&mentions(&[("A", &["a1"])]), &model).unwrap();
        assert!(lattice.routes().is_empty());

        let empty = build_lattice(&[], &model).unwrap();
        assert!(empty.routes().is_empty());
    }

    #[test]
    fn test_single_step_routes_are_the_edge_group() {
        let model = SimilarityTable::new(&["a1", "a2", "b1"]);
        let input = mentions(&[("A", &["a1", "a2"]), ("B", &["b1"])]);

        let lattice = build_lattice(&input, &model).unwrap();
        let routes = lattice.routes();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0], vec![lattice.edge_groups[0][0]]);
        assert_eq!(routes[1], vec![lattice.edge_groups[0][1]]);
    }
}
