//! Build script for swrlb
//!
//! Embeds version and target information.

use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    if let Ok(version) = env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=SWRLB_VERSION={}", version);
    }

    if let Ok(target) = env::var("TARGET") {
        println!("cargo:rustc-env=SWRLB_TARGET={}", target);
    }
}
