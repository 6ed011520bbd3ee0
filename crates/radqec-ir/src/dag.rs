//! DAG-based circuit representation.
//!
//! Every qubit and classical bit is a wire running from an input node to an
//! output node. Applying an instruction splices an operation node into each
//! wire it touches, just before the wire's output node, so any topological
//! order of the graph is a valid execution order of the circuit.

use std::collections::BTreeMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// Identifier for a wire in the DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireId {
    /// A quantum wire.
    Qubit(QubitId),
    /// A classical wire.
    Clbit(ClbitId),
}

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Start of a wire.
    In(WireId),
    /// End of a wire.
    Out(WireId),
    /// An operation.
    Op(Instruction),
}

impl DagNode {
    /// The instruction, if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// Edge weight: the wire the edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DagEdge {
    /// The wire.
    pub wire: WireId,
}

/// DAG-based circuit representation.
///
/// `wire_front` maps each wire to the node just before its output node so
/// `apply` finds the splice point without scanning edges.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<DagNode, DagEdge, u32>,
    qubit_io: FxHashMap<QubitId, (NodeIndex, NodeIndex)>,
    clbit_io: FxHashMap<ClbitId, (NodeIndex, NodeIndex)>,
    wire_front: FxHashMap<WireId, NodeIndex>,
    num_ops: usize,
}

impl CircuitDag {
    /// Create an empty DAG.
    pub fn new() -> Self {
        Self::default()
    }

    fn add_wire(&mut self, wire: WireId) -> (NodeIndex, NodeIndex) {
        let in_node = self.graph.add_node(DagNode::In(wire));
        let out_node = self.graph.add_node(DagNode::Out(wire));
        self.graph.add_edge(in_node, out_node, DagEdge { wire });
        self.wire_front.insert(wire, in_node);
        (in_node, out_node)
    }

    /// Add a qubit wire. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if !self.qubit_io.contains_key(&qubit) {
            let io = self.add_wire(WireId::Qubit(qubit));
            self.qubit_io.insert(qubit, io);
        }
    }

    /// Add a classical wire. Adding an existing bit is a no-op.
    pub fn add_clbit(&mut self, clbit: ClbitId) {
        if !self.clbit_io.contains_key(&clbit) {
            let io = self.add_wire(WireId::Clbit(clbit));
            self.clbit_io.insert(clbit, io);
        }
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let op = Some(instruction.name().to_string());

        if let Some(expected) = instruction.kind.arity() {
            if instruction.qubits.len() != expected {
                return Err(IrError::QubitCountMismatch {
                    op: instruction.name().to_string(),
                    expected,
                    got: instruction.qubits.len(),
                });
            }
        }

        if instruction.is_measure() && instruction.qubits.len() != instruction.clbits.len() {
            return Err(IrError::MeasurementArity {
                qubits: instruction.qubits.len(),
                clbits: instruction.clbits.len(),
            });
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.qubit_io.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    op: op.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    op: op.clone(),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if !self.clbit_io.contains_key(&clbit) {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    op: op.clone(),
                });
            }
        }

        Ok(())
    }

    fn splice(&mut self, wire: WireId, out_node: NodeIndex, op_node: NodeIndex) -> IrResult<()> {
        let prev = self.wire_front[&wire];
        let edge = self
            .graph
            .edges_directed(prev, Direction::Outgoing)
            .find(|e| e.weight().wire == wire && e.target() == out_node)
            .map(|e| e.id())
            .ok_or_else(|| {
                IrError::InvalidDag(format!("wire {wire:?} is not connected to its output"))
            })?;
        self.graph.remove_edge(edge);
        self.graph.add_edge(prev, op_node, DagEdge { wire });
        self.graph.add_edge(op_node, out_node, DagEdge { wire });
        self.wire_front.insert(wire, op_node);
        Ok(())
    }

    /// Append an instruction at the end of every wire it touches.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.validate(&instruction)?;

        let qubits = instruction.qubits.clone();
        let clbits = instruction.clbits.clone();
        let op_node = self.graph.add_node(DagNode::Op(instruction));

        for qubit in qubits {
            let (_, out_node) = self.qubit_io[&qubit];
            self.splice(WireId::Qubit(qubit), out_node, op_node)?;
        }
        for clbit in clbits {
            let (_, out_node) = self.clbit_io[&clbit];
            self.splice(WireId::Clbit(clbit), out_node, op_node)?;
        }

        self.num_ops += 1;
        Ok(op_node)
    }

    fn toposort(&self) -> IrResult<Vec<NodeIndex>> {
        petgraph::algo::toposort(&self.graph, None)
            .map_err(|cycle| IrError::InvalidDag(format!("cycle at node {:?}", cycle.node_id())))
    }

    /// Operations in program order.
    ///
    /// Nodes are only ever appended, and an operation's predecessors always
    /// exist before it does, so node-index order is a topological order that
    /// also preserves the order instructions were applied in.
    pub fn topological_ops(&self) -> IrResult<Vec<&Instruction>> {
        Ok(self
            .graph
            .node_weights()
            .filter_map(DagNode::instruction)
            .collect())
    }

    /// Number of operation nodes.
    pub fn num_ops(&self) -> usize {
        self.num_ops
    }

    /// Number of qubit wires.
    pub fn num_qubits(&self) -> usize {
        self.qubit_io.len()
    }

    /// Number of classical wires.
    pub fn num_clbits(&self) -> usize {
        self.clbit_io.len()
    }

    /// Length of the longest chain of operations. Barriers count as a layer.
    pub fn depth(&self) -> IrResult<usize> {
        let mut depths: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.graph.node_count(), Default::default());
        let mut max_depth = 0;

        for node in self.toposort()? {
            let pred = self
                .graph
                .edges_directed(node, Direction::Incoming)
                .map(|e| depths.get(&e.source()).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            let depth = match self.graph[node] {
                DagNode::Op(_) => pred + 1,
                _ => pred,
            };
            max_depth = max_depth.max(depth);
            depths.insert(node, depth);
        }

        Ok(max_depth)
    }

    /// Histogram of operation names.
    pub fn count_ops(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for node in self.graph.node_weights() {
            if let Some(inst) = node.instruction() {
                *counts.entry(inst.name()).or_insert(0) += 1;
            }
        }
        counts
    }
}
