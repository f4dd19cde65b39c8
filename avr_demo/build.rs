use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Recursion depths and heap sizes selectable through cargo features.
const DEPTHS: &[usize] = &[8, 32, 128, 512];
const HEAP_SIZES: &[usize] = &[0, 64, 256];

// Returns the first value whose `CARGO_FEATURE_<PREFIX>_<value>` is set.
fn selected(prefix: &str, values: &[usize], fallback: usize) -> usize {
    values
        .iter()
        .copied()
        .find(|value| env::var(format!("CARGO_FEATURE_{}_{}", prefix, value)).is_ok())
        .unwrap_or(fallback)
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("workload.rs");

    let depth = selected("DEPTH", DEPTHS, 32);
    let heap = selected("HEAP", HEAP_SIZES, 0);

    let mut f = File::create(&dest_path).unwrap();
    writeln!(f, "pub const RECURSION_DEPTH: usize = {};", depth).unwrap();
    writeln!(f, "pub const HEAP_BYTES: usize = {};", heap).unwrap();

    // This tells Cargo to re-run the build script if build.rs changes.
    println!("cargo:rerun-if-changed=build.rs");
}
