use super::Deadline;
use crate::arc_costs::ArcCosts;

/// Extends the path from `start` with the cheapest arc to an unvisited node,
/// lowest index first on ties. `None` if the deadline passes first.
pub(crate) fn path_cheapest_arc(
    costs: &ArcCosts,
    start: usize,
    end: usize,
    customers: &[usize],
    deadline: &Deadline,
) -> Option<Vec<usize>> {
    let mut remaining = customers.to_vec();
    let mut path = Vec::with_capacity(customers.len() + 2);
    path.push(start);

    let mut tail = start;
    loop {
        if deadline.expired() {
            return None;
        }

        let Some((pos, _)) = remaining
            .iter()
            .enumerate()
            .min_by_key(|&(_, &candidate)| (costs.get(tail, candidate), candidate))
        else {
            break;
        };

        tail = remaining.swap_remove(pos);
        path.push(tail);
    }

    path.push(end);
    Some(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::path_cheapest_arc;
    use crate::{arc_costs::ArcCosts, search::Deadline};

    #[test]
    fn follows_cheapest_arcs_from_start() {
        // 0..3 sit on a line at 0, 10, 3, 7; index 4 is the start, 5 the end.
        let pos = [0_i64, 10, 3, 7];
        let costs = ArcCosts::build(6, |a, b| {
            if a >= 4 || b >= 4 {
                if a == 4 && b == 1 { 0 } else { 100 }
            } else {
                (pos[a] - pos[b]).abs()
            }
        });

        let path = path_cheapest_arc(&costs, 4, 5, &[0, 1, 2, 3], &Deadline::after(None))
            .expect("path");
        assert_eq!(path, vec![4, 1, 3, 2, 0, 5]);
    }

    #[test]
    fn expired_deadline_gives_no_path() {
        let costs = ArcCosts::build(3, |_, _| 1);
        let deadline = Deadline::after(Some(Duration::ZERO));
        assert!(path_cheapest_arc(&costs, 1, 2, &[0], &deadline).is_none());
    }
}
