use mzscope_core::session::command::{Command, CommandError};
use mzscope_core::session::Mode;

#[test]
fn bare_verbs_parse() {
    assert_eq!(Command::parse("save").unwrap(), Command::Save);
    assert_eq!(Command::parse("header").unwrap(), Command::Header);
    assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
}

#[test]
fn empty_input_is_the_next_line_command() {
    assert_eq!(Command::parse("").unwrap(), Command::Next);
    assert_eq!(Command::parse("   \n").unwrap(), Command::Next);
}

#[test]
fn goto_accepts_any_integer_base() {
    assert_eq!(Command::parse("goto 100").unwrap(), Command::Goto(100));
    assert_eq!(Command::parse("goto 0x527c").unwrap(), Command::Goto(0x527C));
    assert_eq!(Command::parse("goto 0b101").unwrap(), Command::Goto(5));
}

#[test]
fn goto_rejects_garbage_addresses() {
    assert_eq!(
        Command::parse("goto banana").unwrap_err(),
        CommandError::BadAddress("banana".to_string())
    );
    assert_eq!(Command::parse("goto").unwrap_err(), CommandError::MissingArgument("goto"));
}

#[test]
fn find_parses_hex_with_or_without_spaces() {
    assert_eq!(Command::parse("find eb05").unwrap(), Command::Find(vec![0xEB, 0x05]));
    assert_eq!(Command::parse("find eb 05").unwrap(), Command::Find(vec![0xEB, 0x05]));
}

#[test]
fn find_rejects_malformed_patterns() {
    assert!(matches!(Command::parse("find xyz").unwrap_err(), CommandError::BadPattern(_)));
    assert!(matches!(Command::parse("find e").unwrap_err(), CommandError::BadPattern(_)));
    assert_eq!(Command::parse("find").unwrap_err(), CommandError::MissingArgument("find"));
}

#[test]
fn show_parses_count_and_restart_flag() {
    assert_eq!(Command::parse("show 10").unwrap(), Command::Show { count: 10, restart: false });
    assert_eq!(Command::parse("show !6").unwrap(), Command::Show { count: 6, restart: true });
    assert_eq!(Command::parse("show 0").unwrap(), Command::Show { count: 0, restart: false });
}

#[test]
fn show_rejects_bad_counts() {
    assert!(matches!(Command::parse("show many").unwrap_err(), CommandError::BadCount(_)));
    assert!(matches!(Command::parse("show !").unwrap_err(), CommandError::BadCount(_)));
    assert_eq!(Command::parse("show").unwrap_err(), CommandError::MissingArgument("show"));
}

#[test]
fn mode_parses_all_three_modes() {
    assert_eq!(Command::parse("mode hex").unwrap(), Command::SetMode(Mode::Hex));
    assert_eq!(Command::parse("mode bin").unwrap(), Command::SetMode(Mode::Binary));
    assert_eq!(Command::parse("mode asm").unwrap(), Command::SetMode(Mode::Disasm));
}

#[test]
fn mode_rejects_unknown_names() {
    assert_eq!(
        Command::parse("mode octal").unwrap_err(),
        CommandError::UnknownMode("octal".to_string())
    );
}

#[test]
fn label_takes_optional_address() {
    assert_eq!(
        Command::parse("label start").unwrap(),
        Command::Label { name: "start".to_string(), address: None }
    );
    assert_eq!(
        Command::parse("label start 0x20").unwrap(),
        Command::Label { name: "start".to_string(), address: Some(0x20) }
    );
    assert!(matches!(
        Command::parse("label start nowhere").unwrap_err(),
        CommandError::BadAddress(_)
    ));
}

#[test]
fn unknown_verbs_are_rejected() {
    assert_eq!(
        Command::parse("teleport 0x10").unwrap_err(),
        CommandError::UnknownVerb("teleport".to_string())
    );
}
