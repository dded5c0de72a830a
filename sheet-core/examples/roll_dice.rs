//! Roll a few notations and print the results.
//!
//! Run with: `cargo run -p sheet-core --example roll_dice -- 2d6+3 d20`

use sheet_core::dice::DiceTray;

fn main() {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        args = vec!["1d20".into(), "2d6+3".into(), "3d".into(), "d".into(), "0d6".into()];
    }

    println!("=== Rolling Dice ===\n");

    let mut tray = DiceTray::default();
    for notation in &args {
        match tray.roll(notation, notation) {
            Ok(record) => println!("{notation}: {}", record.result),
            Err(e) => println!("{notation}: no roll ({e})"),
        }
    }

    println!("\nHistory: {} rolls", tray.history().count());
}
