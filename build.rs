fn main() {
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_PYTHON");
    pyo3_build_config::use_pyo3_cfgs();

    // Only the extension-module build needs the Python link arguments.
    if std::env::var_os("CARGO_FEATURE_PYTHON").is_some() {
        pyo3_build_config::add_extension_module_link_args();
    }
}
