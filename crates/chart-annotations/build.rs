// File: crates/chart-annotations/build.rs
// Summary: Links the Windows system libraries Skia's font manager needs (registry lookups for fonts).

fn main() {
    #[cfg(target_os = "windows")]
    {
        // RegOpenKeyExW / RegQueryInfoKeyW from the system font manager
        println!("cargo:rustc-link-lib=advapi32");
    }
}
