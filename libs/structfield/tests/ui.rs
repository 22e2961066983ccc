//! Compile-time rejections of `#[derive(Record)]`.

#[test]
fn derive_record_fail() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/fail/*.rs");
}
