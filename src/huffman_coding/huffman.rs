use std::fmt::{Display, Formatter};

use log::trace;

use crate::error::{Error, Result};
use crate::tools::freq_count::FrequencyTable;
use crate::tools::symbol_map::Symbol;

/// What a node holds: two children (by arena index) or a symbol.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(usize, usize),
    Leaf(Symbol),
}

/// A node of the Huffman tree.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    /// Sum of the frequencies below this node.
    pub weight: u64,
    /// Concatenated symbol labels of the leaves below this node, in merge order.
    pub label: String,
    /// Edge bit from the parent: false (0) for the first node taken in a merge, true (1) for
    /// the second. None for the root.
    pub bit: Option<bool>,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, label: String, node_data: NodeData) -> Node {
        Node {
            weight,
            label,
            bit: None,
            node_data,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node_data, NodeData::Leaf(_))
    }
}

/// A Huffman tree stored as an arena. Leaves come first, in the order the weights were given,
/// followed by internal nodes in the order they were merged. The root is always the last node.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: usize,
}

impl HuffmanTree {
    /// Build a tree with one leaf per alphabet symbol, zero counts included.
    pub fn from_frequencies(freqs: &FrequencyTable) -> HuffmanTree {
        let weights = freqs.iter().collect::<Vec<(Symbol, u64)>>();
        // A frequency table always holds the whole alphabet, so this cannot fail.
        Self::build(&weights)
    }

    /// Build a tree from (symbol, weight) pairs. The slice order is the initial node order and
    /// decides every tie, so the same slice always yields the same tree.
    pub fn from_weights(weights: &[(Symbol, u64)]) -> Result<HuffmanTree> {
        if weights.is_empty() {
            return Err(Error::invalid("cannot build a Huffman tree without symbols"));
        }
        for (i, (sym, _)) in weights.iter().enumerate() {
            if weights[..i].iter().any(|(other, _)| other == sym) {
                return Err(Error::invalid(format!("symbol {} is listed twice", sym)));
            }
        }
        Ok(Self::build(weights))
    }

    fn build(weights: &[(Symbol, u64)]) -> HuffmanTree {
        let mut nodes = weights
            .iter()
            .map(|&(sym, weight)| Node::new(weight, sym.to_string(), NodeData::Leaf(sym)))
            .collect::<Vec<Node>>();

        // Arena indices of the nodes that have not been merged yet.
        let mut pending = (0..nodes.len()).collect::<Vec<usize>>();

        // ...then pare it down to one single node with child nodes.
        while pending.len() > 1 {
            // Must be a stable sort: equal weights keep their current list order.
            pending.sort_by_key(|&idx| nodes[idx].weight);

            // Pull off the two lightest nodes and make a new parent for them
            let left = pending.remove(0);
            let right = pending.remove(0);
            nodes[left].bit = Some(false);
            nodes[right].bit = Some(true);

            let weight = nodes[left].weight + nodes[right].weight;
            let label = format!("{}{}", nodes[left].label, nodes[right].label);
            trace!("Merged {} and {} into {} ({})", nodes[left].label, nodes[right].label, label, weight);
            nodes.push(Node::new(weight, label, NodeData::Kids(left, right)));
            pending.push(nodes.len() - 1);
        }

        let root = pending[0];
        HuffmanTree { nodes, root }
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Weight of the root, which is the sum of every input weight.
    pub fn root_weight(&self) -> u64 {
        self.nodes[self.root].weight
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn internal_count(&self) -> usize {
        self.nodes.len() - self.leaf_count()
    }

    fn fmt_node(&self, idx: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        let node = &self.nodes[idx];
        let bit = match node.bit {
            Some(true) => "1",
            Some(false) => "0",
            None => "",
        };
        write!(f, "[{}:{}", bit, node.label)?;
        if let NodeData::Kids(left, right) = node.node_data {
            write!(f, ";")?;
            self.fmt_node(left, f)?;
            write!(f, ",")?;
            self.fmt_node(right, f)?;
        }
        write!(f, "]")
    }
}

impl Display for HuffmanTree {
    /// Nested `[bit:label;left,right]` form, used in debug output.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_node(self.root, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::freqs;
    use crate::tools::symbol_map::ALPHABET;
    use proptest::prelude::*;

    #[test]
    fn acgt_tree_test() {
        let tree = HuffmanTree::from_frequencies(&freqs("ACGT"));
        assert_eq!(tree.root_weight(), 4);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.internal_count(), 4);
        assert_eq!(tree.node(tree.root()).label, "CTGNA");
        assert_eq!(tree.node(tree.root()).bit, None);
        assert_eq!(
            tree.to_string(),
            "[:CTGNA;[0:CT;[0:C],[1:T]],[1:GNA;[0:G],[1:NA;[0:N],[1:A]]]]"
        );
    }

    #[test]
    fn zero_weight_tree_test() {
        // All weights tie, so merges happen strictly in list order.
        let tree = HuffmanTree::from_frequencies(&freqs(""));
        assert_eq!(tree.root_weight(), 0);
        assert_eq!(tree.leaf_count(), 5);
        assert_eq!(tree.node(tree.root()).label, "TGNAC");
    }

    #[test]
    fn single_symbol_tree_test() {
        let tree = HuffmanTree::from_weights(&[(Symbol::G, 7)]).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert!(tree.node(tree.root()).is_leaf());
        assert_eq!(tree.root_weight(), 7);
        assert_eq!(tree.internal_count(), 0);
    }

    #[test]
    fn from_weights_rejects_test() {
        assert!(matches!(HuffmanTree::from_weights(&[]), Err(Error::InvalidInput(_))));
        assert!(matches!(
            HuffmanTree::from_weights(&[(Symbol::A, 1), (Symbol::A, 2)]),
            Err(Error::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn weight_conservation_property(counts in proptest::array::uniform5(0_u64..1_000)) {
            let table = FrequencyTable::from_counts(counts);
            let tree = HuffmanTree::from_frequencies(&table);
            prop_assert_eq!(tree.root_weight(), counts.iter().sum::<u64>());
            prop_assert_eq!(tree.leaf_count(), ALPHABET.len());
            prop_assert_eq!(tree.internal_count(), ALPHABET.len() - 1);
            prop_assert_eq!(tree.root(), tree.nodes().len() - 1);
        }

        #[test]
        fn deterministic_property(counts in proptest::array::uniform5(0_u64..50)) {
            let table = FrequencyTable::from_counts(counts);
            let a = HuffmanTree::from_frequencies(&table);
            let b = HuffmanTree::from_frequencies(&table);
            prop_assert_eq!(a.to_string(), b.to_string());
        }
    }
}
