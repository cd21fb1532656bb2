fn main() {
    // Write build metadata (crate version, enabled features) for
    // src/build_info.rs to include.
    built::write_built_file().expect("Failed to acquire build-time information");
}
