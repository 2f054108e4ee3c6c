use crate::{RoutingError, RoutingResult};

/// Maps node ids to solver indices for a single vehicle.
///
/// Non-depot nodes take indices `0..num_nodes - 1` in node order, the
/// vehicle start is `num_nodes - 1` and the vehicle end is `num_nodes`.
/// Both start and end map back to the depot node.
#[derive(Clone, Debug)]
pub struct RoutingIndexManager {
    depot: usize,
    index_to_node: Vec<usize>,
    node_to_index: Vec<usize>,
}

impl RoutingIndexManager {
    pub fn new(num_nodes: usize, num_vehicles: usize, depot: usize) -> RoutingResult<Self> {
        if num_nodes == 0 {
            return Err(RoutingError::EmptyModel);
        }
        if num_vehicles != 1 {
            return Err(RoutingError::UnsupportedVehicleCount(num_vehicles));
        }
        if depot >= num_nodes {
            return Err(RoutingError::DepotOutOfRange { depot, num_nodes });
        }

        let mut index_to_node: Vec<usize> = (0..num_nodes).filter(|&n| n != depot).collect();
        index_to_node.push(depot);
        index_to_node.push(depot);

        let mut node_to_index = vec![0; num_nodes];
        for (index, &node) in index_to_node.iter().enumerate().take(num_nodes) {
            node_to_index[node] = index;
        }

        Ok(Self {
            depot,
            index_to_node,
            node_to_index,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.node_to_index.len()
    }

    /// Size of the solver index space (nodes plus the duplicated end).
    pub fn num_indices(&self) -> usize {
        self.index_to_node.len()
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn index_to_node(&self, index: usize) -> usize {
        self.index_to_node[index]
    }

    /// The depot resolves to the vehicle start index.
    pub fn node_to_index(&self, node: usize) -> usize {
        self.node_to_index[node]
    }

    pub(crate) fn start_index(&self) -> usize {
        self.num_nodes() - 1
    }

    pub(crate) fn end_index(&self) -> usize {
        self.num_nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::RoutingIndexManager;
    use crate::RoutingError;

    #[test]
    fn depot_maps_to_start_and_end() {
        let manager = RoutingIndexManager::new(4, 1, 3).expect("manager");

        assert_eq!(manager.num_indices(), 5);
        assert_eq!(manager.start_index(), 3);
        assert_eq!(manager.end_index(), 4);
        assert_eq!(manager.index_to_node(3), 3);
        assert_eq!(manager.index_to_node(4), 3);
        assert_eq!(manager.node_to_index(3), 3);
    }

    #[test]
    fn non_depot_nodes_round_trip_when_depot_is_first() {
        let manager = RoutingIndexManager::new(4, 1, 0).expect("manager");

        assert_eq!(manager.index_to_node(0), 1);
        assert_eq!(manager.index_to_node(2), 3);
        for node in 1..4 {
            assert_eq!(manager.index_to_node(manager.node_to_index(node)), node);
        }
        assert_eq!(manager.node_to_index(0), manager.start_index());
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        assert_eq!(
            RoutingIndexManager::new(0, 1, 0).unwrap_err(),
            RoutingError::EmptyModel
        );
        assert_eq!(
            RoutingIndexManager::new(3, 2, 0).unwrap_err(),
            RoutingError::UnsupportedVehicleCount(2)
        );
        assert_eq!(
            RoutingIndexManager::new(3, 1, 3).unwrap_err(),
            RoutingError::DepotOutOfRange {
                depot: 3,
                num_nodes: 3
            }
        );
    }
}
