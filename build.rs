fn main() {
    println!("cargo:rerun-if-env-changed=VERSION");

    // Release builds stamp VERSION; local builds fall back to the crate version.
    let version = std::env::var("VERSION")
        .unwrap_or_else(|_| format!("v{}", env!("CARGO_PKG_VERSION")));
    println!("cargo:rustc-env=VERSION={}", version);
}
