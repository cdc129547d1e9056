// src/circuits/diagram.rs

//! Text rendering of circuits, one column per operation.

use super::Circuit;
use crate::core::QubitId;
use crate::operations::Operation;
use std::fmt;

const H_WIRE: char = '─';
const V_WIRE: char = '│';
const MIN_CELL_WIDTH: usize = 5;

/// One rendered column: an optional symbol per qubit row plus the span of
/// rows joined by a vertical connector.
struct Column {
    cells: Vec<Option<String>>,
    span: Option<(usize, usize)>,
}

impl Column {
    fn new(rows: usize) -> Self {
        Self { cells: vec![None; rows], span: None }
    }

    fn set(&mut self, qubit: QubitId, symbol: impl Into<String>) {
        if let Some(cell) = self.cells.get_mut(qubit.0) {
            *cell = Some(symbol.into());
        }
    }

    fn connect(&mut self, qubits: &[QubitId]) {
        let lo = qubits.iter().map(|q| q.0).min();
        let hi = qubits.iter().map(|q| q.0).max();
        if let (Some(lo), Some(hi)) = (lo, hi) {
            if lo != hi {
                self.span = Some((lo, hi));
            }
        }
    }

    fn width(&self) -> usize {
        let widest = self.cells.iter().flatten().map(|s| s.chars().count()).max().unwrap_or(0);
        (widest + 2).max(MIN_CELL_WIDTH)
    }
}

fn fill_column(circuit: &Circuit, column: &mut Column, op: &Operation, suffix: &str) {
    match op {
        Operation::Gate { gate, target } => column.set(*target, format!("{}{}", gate.symbol(), suffix)),
        Operation::Controlled { gate, control, target } => {
            column.set(*control, "@");
            column.set(*target, format!("{}{}", gate.symbol(), suffix));
            column.connect(&[*control, *target]);
        }
        Operation::Swap { a, b } => {
            column.set(*a, "x");
            column.set(*b, "x");
            column.connect(&[*a, *b]);
        }
        Operation::ControlledSwap { control, a, b } => {
            column.set(*control, "@");
            column.set(*a, "x");
            column.set(*b, "x");
            column.connect(&[*control, *a, *b]);
        }
        Operation::Measure { qubit, clbit } => {
            column.set(*qubit, format!("M→{}{}", circuit.clbit_label(*clbit), suffix))
        }
        Operation::Reset { qubit } => column.set(*qubit, format!("|0>{}", suffix)),
        Operation::Barrier { qubits } => {
            let rows: Vec<QubitId> = if qubits.is_empty() {
                (0..circuit.num_qubits()).map(QubitId).collect()
            } else {
                qubits.clone()
            };
            for q in rows {
                column.set(q, "░");
            }
        }
        Operation::Conditional { clbit, value, op } => {
            let condition = format!("[{}={}]", circuit.clbit_label(*clbit), u8::from(*value));
            fill_column(circuit, column, op, &condition);
        }
    }
}

fn centered(symbol: &str, width: usize, pad: char) -> String {
    let len = symbol.chars().count();
    let total = width.saturating_sub(len);
    let pre = total / 2;
    let post = total - pre;
    format!(
        "{}{}{}",
        pad.to_string().repeat(pre),
        symbol,
        pad.to_string().repeat(post)
    )
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.num_qubits();
        writeln!(
            f,
            "qlessons::Circuit[{} operations on {} qubits, {} clbits]",
            self.len(),
            rows,
            self.num_clbits()
        )?;
        if rows == 0 {
            return Ok(());
        }

        let columns: Vec<Column> = self
            .operations()
            .iter()
            .map(|op| {
                let mut column = Column::new(rows);
                fill_column(self, &mut column, op, "");
                column
            })
            .collect();
        let widths: Vec<usize> = columns.iter().map(Column::width).collect();

        let labels: Vec<String> = (0..rows).map(|q| self.qubit_label(QubitId(q))).collect();
        let label_width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 2;

        for r in 0..rows {
            write!(f, "{:<width$}", format!("{}: ", labels[r]), width = label_width)?;
            for (column, width) in columns.iter().zip(&widths) {
                let cell = match &column.cells[r] {
                    Some(symbol) => centered(symbol, *width, H_WIRE),
                    None => match column.span {
                        Some((lo, hi)) if lo < r && r < hi => centered(&V_WIRE.to_string(), *width, H_WIRE),
                        _ => H_WIRE.to_string().repeat(*width),
                    },
                };
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;

            if r + 1 < rows {
                write!(f, "{}", " ".repeat(label_width))?;
                for (column, width) in columns.iter().zip(&widths) {
                    let joined = matches!(column.span, Some((lo, hi)) if lo <= r && r < hi);
                    let connector = if joined { V_WIRE } else { ' ' };
                    write!(f, "{}", centered(&connector.to_string(), *width, ' '))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
