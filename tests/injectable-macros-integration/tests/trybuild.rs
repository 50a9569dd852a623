//! trybuild UI tests for injectable_macros

#[test]
fn ui_injectable_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
}
