//! Command-line interface

pub mod commands;
pub mod output;
pub mod types;

pub use types::{Cli, Commands};

use console::style;

use crate::domain::errors::EvaluationError;

/// Exit status for an evaluation interrupted by Ctrl-C.
pub const EXIT_CANCELLED: i32 = 130;

/// Report a failed command and terminate the process.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let code = match err.downcast_ref::<EvaluationError>() {
        Some(EvaluationError::Cancelled) => EXIT_CANCELLED,
        _ => 1,
    };

    if json_mode {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(code)
}
