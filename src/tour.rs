use std::fmt::{Display, Formatter};

use crate::{Error, Result};

/// Node visits from the start sentinel to the end sentinel, depot at both ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tour {
    nodes: Vec<usize>,
}

impl Tour {
    pub fn new(nodes: Vec<usize>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for node in &self.nodes {
            if !first {
                write!(f, " -> ")?;
            }
            write!(f, "{node}")?;
            first = false;
        }
        Ok(())
    }
}

/// Drops the depot from `tour` and checks that what remains is a permutation of `0..depot`.
pub fn decode(tour: &Tour, depot: usize) -> Result<Vec<usize>> {
    let ordering: Vec<usize> = tour
        .nodes()
        .iter()
        .copied()
        .filter(|&node| node != depot)
        .collect();

    let mut seen = vec![false; depot];
    for &node in &ordering {
        match seen.get_mut(node) {
            Some(slot) if !*slot => *slot = true,
            Some(_) => {
                return Err(Error::invalid_tour(format!("node {node} visited twice")));
            }
            None => {
                return Err(Error::invalid_tour(format!(
                    "node {node} is out of range for {depot} elements"
                )));
            }
        }
    }

    if ordering.len() != depot {
        return Err(Error::invalid_tour(format!(
            "tour visits {} of {depot} elements",
            ordering.len()
        )));
    }

    Ok(ordering)
}
