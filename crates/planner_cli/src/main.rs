//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `planner_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use planner_core::SharedTree;

fn main() {
    println!("planner_core ping={}", planner_core::ping());
    println!("planner_core version={}", planner_core::core_version());

    let tree = SharedTree::in_memory();
    match tree.root_view() {
        Ok(root) => println!(
            "planner_core root id={} name={} entries={}",
            root.id,
            root.name,
            root.items.len()
        ),
        Err(err) => {
            eprintln!("planner_core root view failed: {err}");
            std::process::exit(1);
        }
    }
}
