//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - radiation-aware [[4,2,2]] syndrome analysis",
        style("radqec").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  radqec-ir           Circuit and noise-model representation");
    println!("  radqec-hal          Executor abstraction");
    println!("  radqec-adapter-sim  Noisy trajectory simulator");
    println!("  radqec-core         Radiation model, circuit and post-selection");
    println!("  radqec-cli          Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
