use std::env;
use std::path::PathBuf;

fn main() {
    // GLPK_HOME is optional; without it the system include and library paths are used
    let glpk_home = env::var("GLPK_HOME").ok().map(PathBuf::from);

    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-env-changed=GLPK_HOME");

    let mut builder = bindgen::Builder::default()
        .header("wrapper.h")
        .parse_callbacks(Box::new(bindgen::CargoCallbacks::new()))
        .allowlist_function("glp_.*")
        .allowlist_type("glp_.*")
        .allowlist_var("GLP_.*")
        .derive_default(true)
        .default_macro_constant_type(bindgen::MacroTypeVariation::Signed);

    if let Some(home) = &glpk_home {
        let include_path = home.join("include");
        let lib_path = home.join("lib");

        if !include_path.exists() {
            panic!(
                "GLPK include directory not found at: {}",
                include_path.display()
            );
        }

        builder = builder.clang_arg(format!("-I{}", include_path.display()));
        println!("cargo:rustc-link-search=native={}", lib_path.display());

        if cfg!(any(target_os = "macos", target_os = "linux")) {
            println!("cargo:rustc-link-arg=-Wl,-rpath,{}", lib_path.display());
        }
    }

    println!("cargo:rustc-link-lib=glpk");

    let bindings = builder.generate().expect("Unable to generate bindings");

    let out_path = PathBuf::from(env::var("OUT_DIR").unwrap());
    bindings
        .write_to_file(out_path.join("bindings.rs"))
        .expect("Couldn't write bindings!");
}
