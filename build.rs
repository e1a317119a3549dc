use std::{env, fs, path::Path};

// Places config.json next to the built binary so `userstore` finds it
// when launched straight from target/<profile>.
fn main() {
    println!("cargo:rerun-if-changed=config.json");

    let src = Path::new("config.json");
    if !src.exists() {
        println!("cargo:warning=No config.json in package root; binary will use defaults");
        return;
    }

    // OUT_DIR = target/<profile>/build/<crate>/out
    let out_dir = env::var("OUT_DIR").expect("Cannot read OUT_DIR");
    let Some(exe_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        println!("cargo:warning=Cannot find executable directory from {out_dir}");
        return;
    };

    let dst = exe_dir.join("config.json");
    if let Err(e) = fs::copy(src, &dst) {
        println!("cargo:warning=Could NOT copy config.json to {}: {}", dst.display(), e);
    }
}
