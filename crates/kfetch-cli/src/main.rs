mod cli;

use kfetch_core::report::{Reporter, EXIT_FAILURE};

fn main() {
    let code = match cli::run_from_args() {
        Ok(code) => code,
        Err(err) => {
            let _ = Reporter::terminal().error(&format!("kfetch error: {:#}", err));
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
