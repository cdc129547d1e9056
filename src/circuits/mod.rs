// src/circuits/mod.rs

//! Ordered sequences of [`Operation`]s over named quantum and classical
//! registers.
//!
//! A [`Circuit`] owns a flat array of qubits and classical bits. Registers
//! are named, contiguous slices of those arrays; they only matter for
//! labelling diagrams and for grouping measurement counts.

mod diagram;

use crate::core::{ClbitId, QlError, QubitId, Result};
use crate::operations::{Gate, Operation};

/// A named slice of a circuit's qubits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumRegister {
    name: String,
    start: usize,
    size: usize,
}

impl QuantumRegister {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The register's `index`-th qubit. `index` must be below [`Self::size`];
    /// anything else is reported by [`Circuit::validate`] or lands on another
    /// register's qubit.
    pub fn qubit(&self, index: usize) -> QubitId {
        debug_assert!(index < self.size, "qubit index {index} outside register {}", self.name);
        QubitId(self.start + index)
    }

    /// All qubits of the register in ascending order.
    pub fn qubits(&self) -> impl DoubleEndedIterator<Item = QubitId> + '_ {
        (self.start..self.start + self.size).map(QubitId)
    }

    fn contains(&self, qubit: QubitId) -> bool {
        (self.start..self.start + self.size).contains(&qubit.0)
    }
}

/// A named slice of a circuit's classical bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicalRegister {
    name: String,
    start: usize,
    size: usize,
}

impl ClassicalRegister {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// The register's `index`-th classical bit.
    pub fn clbit(&self, index: usize) -> ClbitId {
        debug_assert!(index < self.size, "clbit index {index} outside register {}", self.name);
        ClbitId(self.start + index)
    }

    pub fn clbits(&self) -> impl DoubleEndedIterator<Item = ClbitId> + '_ {
        (self.start..self.start + self.size).map(ClbitId)
    }
}

/// An ordered list of operations over a fixed set of qubits and classical
/// bits.
///
/// Mutating helpers return `&mut Self` so that several gates can be chained:
///
/// ```
/// use qlessons::Circuit;
///
/// let mut bell = Circuit::with_size(2, 2);
/// bell.h(0).cx(0, 1).measure(0, 0).measure(1, 1);
/// assert_eq!(bell.len(), 4);
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    num_qubits: usize,
    num_clbits: usize,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a circuit with no qubits, bits or operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a circuit with one quantum register `q` and, when
    /// `num_clbits > 0`, one classical register `c`.
    pub fn with_size(num_qubits: usize, num_clbits: usize) -> Self {
        let mut circuit = Self::new();
        if num_qubits > 0 {
            circuit.add_qreg("q", num_qubits);
        }
        if num_clbits > 0 {
            circuit.add_creg("c", num_clbits);
        }
        circuit
    }

    /// Appends a quantum register of `size` fresh qubits.
    pub fn add_qreg(&mut self, name: &str, size: usize) -> QuantumRegister {
        let reg = QuantumRegister {
            name: name.to_string(),
            start: self.num_qubits,
            size,
        };
        self.num_qubits += size;
        self.qregs.push(reg.clone());
        reg
    }

    /// Appends a classical register of `size` fresh bits, initialised to 0.
    pub fn add_creg(&mut self, name: &str, size: usize) -> ClassicalRegister {
        let reg = ClassicalRegister {
            name: name.to_string(),
            start: self.num_clbits,
            size,
        };
        self.num_clbits += size;
        self.cregs.push(reg.clone());
        reg
    }

    /// Adds a single operation to the end of the circuit.
    pub fn add_operation(&mut self, op: Operation) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Adds multiple operations from an iterator to the end of the circuit.
    pub fn add_operations<I>(&mut self, ops: I) -> &mut Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.operations.extend(ops);
        self
    }

    pub fn gate(&mut self, gate: Gate, target: impl Into<QubitId>) -> &mut Self {
        self.add_operation(Operation::Gate { gate, target: target.into() })
    }

    pub fn controlled(
        &mut self,
        gate: Gate,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> &mut Self {
        self.add_operation(Operation::Controlled {
            gate,
            control: control.into(),
            target: target.into(),
        })
    }

    pub fn h(&mut self, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::H, target)
    }

    pub fn x(&mut self, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::X, target)
    }

    pub fn y(&mut self, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Y, target)
    }

    pub fn z(&mut self, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Z, target)
    }

    pub fn sx(&mut self, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Sx, target)
    }

    /// Phase gate `diag(1, e^{iλ})`.
    pub fn p(&mut self, lambda: f64, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Phase(lambda), target)
    }

    pub fn rz(&mut self, lambda: f64, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Rz(lambda), target)
    }

    pub fn ry(&mut self, theta: f64, target: impl Into<QubitId>) -> &mut Self {
        self.gate(Gate::Ry(theta), target)
    }

    pub fn cx(&mut self, control: impl Into<QubitId>, target: impl Into<QubitId>) -> &mut Self {
        self.controlled(Gate::X, control, target)
    }

    pub fn cz(&mut self, control: impl Into<QubitId>, target: impl Into<QubitId>) -> &mut Self {
        self.controlled(Gate::Z, control, target)
    }

    /// Controlled phase, the gate older toolkits call `cu1`.
    pub fn cp(
        &mut self,
        lambda: f64,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> &mut Self {
        self.controlled(Gate::Phase(lambda), control, target)
    }

    pub fn crz(
        &mut self,
        lambda: f64,
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
    ) -> &mut Self {
        self.controlled(Gate::Rz(lambda), control, target)
    }

    pub fn swap(&mut self, a: impl Into<QubitId>, b: impl Into<QubitId>) -> &mut Self {
        self.add_operation(Operation::Swap { a: a.into(), b: b.into() })
    }

    pub fn cswap(
        &mut self,
        control: impl Into<QubitId>,
        a: impl Into<QubitId>,
        b: impl Into<QubitId>,
    ) -> &mut Self {
        self.add_operation(Operation::ControlledSwap {
            control: control.into(),
            a: a.into(),
            b: b.into(),
        })
    }

    pub fn measure(&mut self, qubit: impl Into<QubitId>, clbit: impl Into<ClbitId>) -> &mut Self {
        self.add_operation(Operation::Measure {
            qubit: qubit.into(),
            clbit: clbit.into(),
        })
    }

    pub fn reset(&mut self, qubit: impl Into<QubitId>) -> &mut Self {
        self.add_operation(Operation::Reset { qubit: qubit.into() })
    }

    /// Barrier across every qubit.
    pub fn barrier(&mut self) -> &mut Self {
        self.add_operation(Operation::Barrier { qubits: Vec::new() })
    }

    /// Runs `op` only if `clbit` holds `value` at that point of the run.
    pub fn if_test(&mut self, clbit: impl Into<ClbitId>, value: bool, op: Operation) -> &mut Self {
        self.add_operation(Operation::Conditional {
            clbit: clbit.into(),
            value,
            op: Box::new(op),
        })
    }

    /// Adds a `meas` register as wide as the circuit, a barrier, and a
    /// measurement of qubit `i` into `meas[i]`.
    pub fn measure_all(&mut self) -> &mut Self {
        let meas = self.add_creg("meas", self.num_qubits);
        self.barrier();
        for q in 0..self.num_qubits {
            self.measure(q, meas.clbit(q));
        }
        self
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Looks up a classical register by name.
    pub fn creg(&self, name: &str) -> Option<&ClassicalRegister> {
        self.cregs.iter().find(|r| r.name == name)
    }

    /// Returns a slice containing the ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Display label of a qubit: `name` for single-qubit registers,
    /// `name_i` otherwise.
    pub fn qubit_label(&self, qubit: QubitId) -> String {
        match self.qregs.iter().find(|r| r.contains(qubit)) {
            Some(reg) if reg.size == 1 => reg.name.clone(),
            Some(reg) => format!("{}_{}", reg.name, qubit.0 - reg.start),
            None => qubit.to_string(),
        }
    }

    /// Display label of a classical bit, same convention as qubits.
    pub fn clbit_label(&self, clbit: ClbitId) -> String {
        let found = self
            .cregs
            .iter()
            .find(|r| (r.start..r.start + r.size).contains(&clbit.0));
        match found {
            Some(reg) if reg.size == 1 => reg.name.clone(),
            Some(reg) => format!("{}_{}", reg.name, clbit.0 - reg.start),
            None => clbit.to_string(),
        }
    }

    /// Checks that every operation addresses existing qubits and bits and that
    /// multi-qubit operations act on distinct qubits.
    pub fn validate(&self) -> Result<()> {
        for op in &self.operations {
            self.validate_operation(op)?;
        }
        Ok(())
    }

    fn validate_operation(&self, op: &Operation) -> Result<()> {
        for qubit in op.involved_qubits() {
            if qubit.0 >= self.num_qubits {
                return Err(QlError::QubitOutOfRange { qubit, num_qubits: self.num_qubits });
            }
        }
        for clbit in op.involved_clbits() {
            if clbit.0 >= self.num_clbits {
                return Err(QlError::ClbitOutOfRange { clbit, num_clbits: self.num_clbits });
            }
        }
        let distinct = match op {
            Operation::Controlled { control, target, .. } => control != target,
            Operation::Swap { a, b } => a != b,
            Operation::ControlledSwap { control, a, b } => control != a && control != b && a != b,
            Operation::Conditional { op, .. } => return self.validate_operation(op),
            _ => true,
        };
        if !distinct {
            return Err(QlError::InvalidOperation {
                message: format!("Operation {:?} must act on distinct qubits", op),
            });
        }
        Ok(())
    }

    /// `true` when no gate, reset or conditional touches a qubit after it has
    /// been measured, and no operation is classically conditioned. Such
    /// circuits can be evolved once and sampled for every shot.
    pub fn has_only_terminal_measurements(&self) -> bool {
        let mut measured = vec![false; self.num_qubits];
        for op in &self.operations {
            match op {
                Operation::Measure { qubit, .. } => {
                    if let Some(flag) = measured.get_mut(qubit.0) {
                        *flag = true;
                    }
                }
                Operation::Barrier { .. } => {}
                other if !other.is_unitary() => return false,
                other => {
                    if other.involved_qubits().iter().any(|q| measured.get(q.0).copied().unwrap_or(false)) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Consuming builder for circuits over plain `q`/`c` registers.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    pub fn new(num_qubits: usize, num_clbits: usize) -> Self {
        Self {
            circuit: Circuit::with_size(num_qubits, num_clbits),
        }
    }

    /// Adds a single operation to the circuit being built.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations from an iterator to the circuit being built.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the circuit, rejecting out-of-range or degenerate operations.
    pub fn build(self) -> Result<Circuit> {
        self.circuit.validate()?;
        Ok(self.circuit)
    }
}
