//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `flowboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("flowboard_core ping={}", flowboard_core::ping());
    println!("flowboard_core version={}", flowboard_core::core_version());
}
