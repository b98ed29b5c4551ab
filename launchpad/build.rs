//! Puts `memory.x` on the linker search path for `cortex-m-rt`.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());
    println!("cargo:rerun-if-changed=memory.x");

    // Only the firmware examples are linked against the cortex-m-rt script.
    if env::var("CARGO_CFG_TARGET_ARCH").map_or(false, |arch| arch == "arm") {
        println!("cargo:rustc-link-arg-examples=-Tlink.x");
    }
}
