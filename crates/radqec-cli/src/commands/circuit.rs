//! Circuit command implementation.

use anyhow::Result;
use console::style;
use radqec_core::CircuitTopology;

/// Execute the circuit command.
pub fn execute() -> Result<()> {
    let topology = CircuitTopology::new()?;
    let circuit = topology.circuit();

    println!(
        "{} {}: {} qubits, {} clbits, depth {}",
        style("→").cyan().bold(),
        style(circuit.name()).green(),
        circuit.num_qubits(),
        circuit.num_clbits(),
        circuit.depth()?
    );

    println!("\nQubits:");
    for qubit in circuit.qubits() {
        match &qubit.slot {
            Some(slot) => println!("  q{:<3} {}[{}]", qubit.id.0, slot.register, slot.offset),
            None => println!("  q{}", qubit.id.0),
        }
    }

    println!("\nClassical registers:");
    for (round, creg) in circuit.classical_registers().iter().enumerate() {
        let bits: Vec<String> = creg.bits.iter().map(|b| format!("c{}", b.0)).collect();
        println!("  {:<4} round {}  [{}]", creg.name, round + 1, bits.join(", "));
    }

    println!("\nInstructions:");
    for (index, instruction) in circuit.instructions()?.iter().enumerate() {
        println!("  {:>3}  {}", index, instruction);
    }

    println!("\nOperation counts:");
    for (op, count) in circuit.count_ops() {
        println!("  {:<8} {}", style(op).cyan(), count);
    }
    Ok(())
}
