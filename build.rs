// build.rs

use std::env;

fn main() {
    let version = env::var("SPINELJSON_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "dev".to_string()));

    println!("cargo:rustc-env=SPINELJSON_BUILD_VERSION={version}");
    println!("cargo:rerun-if-env-changed=SPINELJSON_VERSION");
}
