use mzscope::parse_address_arg;

#[test]
fn parse_address_arg_accepts_common_bases() {
    assert_eq!(parse_address_arg("100").unwrap(), 100);
    assert_eq!(parse_address_arg("0x527c").unwrap(), 0x527C);
    assert_eq!(parse_address_arg("0o17").unwrap(), 0o17);
}

#[test]
fn parse_address_arg_rejects_garbage_with_a_readable_message() {
    let err = parse_address_arg("start").unwrap_err();
    assert!(err.to_string().contains("Invalid address 'start'"), "unexpected error: {err}");
}
