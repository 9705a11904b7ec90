//! Copies the `memory.x` file from the workspace root into a directory where
//! the linker can always find it when building this crate's examples.

use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rustc-link-arg-examples=--nmagic");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");

    println!("cargo:rerun-if-changed=../memory.x");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join("memory.x"), include_bytes!("../memory.x")).expect("OUT_DIR is writable");
    println!("cargo:rustc-link-search={}", out.display());
}
