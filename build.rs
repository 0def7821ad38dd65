// Sample files drive the generated tests in `tests/samples.rs`, so adding or
// removing one has to rerun the build for test_generator to see it.
fn main() {
    build_deps::rerun_if_changed_paths("samples/*/*.tree").unwrap();
    build_deps::rerun_if_changed_paths("samples/*").unwrap();
}
