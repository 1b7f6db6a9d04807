use std::collections::VecDeque;
use std::hash::Hash;

use hashbrown::HashMap;

use crate::error::GraphError;

/// Kahn ordering of `(node, inputs)` pairs: every node comes after its
/// inputs. Ties keep the order of `nodes`. Inputs not listed in `nodes`
/// are ignored.
pub fn topo_order<K>(nodes: &[(K, Vec<K>)]) -> Result<Vec<K>, GraphError>
where
    K: Copy + Eq + Hash,
{
    let mut indeg: HashMap<K, usize> = nodes.iter().map(|(k, _)| (*k, 0)).collect();
    let mut adj: HashMap<K, Vec<K>> = HashMap::new();

    for (node, inputs) in nodes {
        for input in inputs {
            if !indeg.contains_key(input) {
                continue;
            }
            adj.entry(*input).or_default().push(*node);
            *indeg.entry(*node).or_default() += 1;
        }
    }

    let mut q: VecDeque<K> = nodes
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| indeg.get(k) == Some(&0))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(u) = q.pop_front() {
        order.push(u);
        if let Some(vs) = adj.get(&u) {
            for v in vs {
                if let Some(d) = indeg.get_mut(v) {
                    *d -= 1;
                    if *d == 0 {
                        q.push_back(*v);
                    }
                }
            }
        }
    }

    if order.len() != indeg.len() {
        return Err(GraphError::Cycle);
    }
    Ok(order)
}
