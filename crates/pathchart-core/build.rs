// File: crates/pathchart-core/build.rs
// Summary: Link the Windows system libraries Skia's font manager and ICU expect.

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    // cfg!(target_os) in a build script reports the host
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        // RegOpenKeyExW / RegQueryInfoKeyW from the Skia font manager
        println!("cargo:rustc-link-lib=advapi32");
    }
}
