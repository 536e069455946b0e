//! Timecard Vault main entrypoint.

use timecard_vault::run;
use timecard_vault::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
