//! bipolar - FlowSync export converter
//!
//! Converts Polar FlowSync training session exports into GPX, HRM and TCX
//! files.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default configuration
//! bipolar config init
//!
//! # See which sessions would be converted
//! bipolar scan
//!
//! # Convert everything not converted yet
//! bipolar convert
//! ```

mod commands;
mod exit_codes;

fn main() {
    match commands::run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            std::process::exit(exit_codes::EXIT_ERROR);
        }
    }
}
