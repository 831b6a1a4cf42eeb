//! Build script
//!
//! With the `native` feature, adds the directory holding `libdmapwm` to the
//! linker search path and warns when building for a target the driver does
//! not support.

use std::env;

/// Install prefix of `make install` in the driver's source tree
const DEFAULT_LIB_DIR: &str = "/usr/local/lib";

fn main() {
    println!("cargo:rerun-if-env-changed=DMA_PWM_LIB_DIR");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    let lib_dir = env::var("DMA_PWM_LIB_DIR").unwrap_or_else(|_| DEFAULT_LIB_DIR.into());
    println!("cargo:rustc-link-search=native={lib_dir}");

    let target = env::var("TARGET").unwrap_or_default();
    if !target.contains("linux") {
        println!("cargo:warning==============================================");
        println!("cargo:warning= Building `native` for target: {target}");
        println!("cargo:warning= libdmapwm runs on Raspberry Pi Linux only");
        println!("cargo:warning= (arm-unknown-linux-gnueabihf, armv7-, aarch64-)");
        println!("cargo:warning==============================================");
    }
}
