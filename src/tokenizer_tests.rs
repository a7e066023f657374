//! Tests for command-line scanning.

use super::dial::Dial;
use super::error::ParseError;
use super::kind::Kind;
use super::registry::Registry;
use super::tokenizer::{Assignment, CommandLine, tokenize};

/// Registry with a bool, string and list dial behind shorthands.
fn registry() -> Registry {
    let mut registry = Registry::new();
    for dial in [
        Dial::new("mybool-a", Kind::Bool).with_shorthand('a'),
        Dial::new("mybool-b", Kind::Bool).with_shorthand('b'),
        Dial::new("mystring", Kind::String)
            .with_shorthand('s')
            .with_default(""),
        Dial::new("myint", Kind::Int).with_shorthand('i').with_default(0),
        Dial::new("mystrings", Kind::Strings)
            .with_shorthand('S')
            .with_default(Vec::<String>::new()),
    ] {
        registry.register(dial).unwrap();
    }
    registry
}

fn switch(name: &str) -> Assignment {
    Assignment::Switch(name.to_string())
}

fn value(name: &str, raw: &str) -> Assignment {
    Assignment::Value(name.to_string(), raw.to_string())
}

mod long_flags {
    use super::*;

    #[test]
    fn bool_takes_no_value() {
        let line = tokenize(&["cmd", "--mybool-a", "pos"], &registry()).unwrap();

        assert_eq!(line.assignments, vec![switch("mybool-a")]);
        assert_eq!(line.positionals, vec!["pos"]);
    }

    #[test]
    fn value_flag_consumes_next_token() {
        let line = tokenize(&["cmd", "--mystring", "--mybool-a"], &registry()).unwrap();

        assert_eq!(line.assignments, vec![value("mystring", "--mybool-a")]);
        assert!(line.positionals.is_empty());
    }

    #[test]
    fn repeated_flags_are_kept_in_order() {
        let line = tokenize(
            &["cmd", "--mystrings", "a", "--mystrings", "b"],
            &registry(),
        )
        .unwrap();

        assert_eq!(
            line.assignments,
            vec![value("mystrings", "a"), value("mystrings", "b")]
        );
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let result = tokenize(&["cmd", "--unknown"], &registry());

        assert_eq!(result, Err(ParseError::UnknownFlag("unknown".to_string())));
    }

    #[test]
    fn bare_double_dash_is_an_unknown_flag() {
        let result = tokenize(&["cmd", "--"], &registry());

        assert_eq!(result, Err(ParseError::UnknownFlag(String::new())));
    }

    #[test]
    fn missing_value_is_rejected() {
        let result = tokenize(&["cmd", "--myint"], &registry());

        assert_eq!(result, Err(ParseError::MissingValue("--myint".to_string())));
    }
}

mod shorthand_clusters {
    use super::*;

    #[test]
    fn bools_combine() {
        let line = tokenize(&["cmd", "-ba"], &registry()).unwrap();

        assert_eq!(line.assignments, vec![switch("mybool-b"), switch("mybool-a")]);
    }

    #[test]
    fn value_shorthand_may_end_cluster() {
        let line = tokenize(&["cmd", "-bas", "a"], &registry()).unwrap();

        assert_eq!(
            line.assignments,
            vec![
                switch("mybool-b"),
                switch("mybool-a"),
                value("mystring", "a")
            ]
        );
    }

    #[test]
    fn value_shorthand_before_end_is_rejected() {
        let result = tokenize(&["cmd", "-asb", "a"], &registry());

        assert_eq!(
            result,
            Err(ParseError::ShorthandNotLast {
                shorthand: 's',
                token: "-asb".to_string(),
            })
        );
    }

    #[test]
    fn unknown_shorthand_is_rejected() {
        let result = tokenize(&["cmd", "-u"], &registry());

        assert_eq!(
            result,
            Err(ParseError::UnknownShorthand {
                shorthand: 'u',
                token: "-u".to_string(),
            })
        );
    }

    #[test]
    fn unknown_character_inside_cluster_is_rejected() {
        let result = tokenize(&["cmd", "-axs", "v"], &registry());

        assert!(matches!(
            result,
            Err(ParseError::UnknownShorthand { shorthand: 'x', .. })
        ));
    }

    #[test]
    fn bare_dash_is_rejected() {
        let result = tokenize(&["cmd", "-"], &registry());

        assert_eq!(result, Err(ParseError::EmptyShorthand));
    }

    #[test]
    fn missing_value_names_the_shorthand() {
        let result = tokenize(&["cmd", "-i"], &registry());

        assert_eq!(result, Err(ParseError::MissingValue("-i".to_string())));
    }

    #[test]
    fn shorthands_are_case_sensitive() {
        let line = tokenize(&["cmd", "-S", "x", "-s", "y"], &registry()).unwrap();

        assert_eq!(
            line.assignments,
            vec![value("mystrings", "x"), value("mystring", "y")]
        );
    }
}

mod positionals {
    use super::*;

    #[test]
    fn interleaved_with_flags() {
        let line = tokenize(
            &["cmd", "pos0", "--myint", "1", "pos1", "-a", "pos2"],
            &registry(),
        )
        .unwrap();

        assert_eq!(line.positionals, vec!["pos0", "pos1", "pos2"]);
        assert_eq!(line.assignments, vec![value("myint", "1"), switch("mybool-a")]);
    }

    #[test]
    fn program_name_is_skipped() {
        let line = tokenize(&["--mybool-a"], &registry()).unwrap();

        assert_eq!(line, CommandLine::default());
    }

    #[test]
    fn empty_args_scan_cleanly() {
        let args: [&str; 0] = [];

        assert_eq!(tokenize(&args, &registry()), Ok(CommandLine::default()));
    }

    #[test]
    fn no_flags() {
        let line = tokenize(&["cmd", "test"], &registry()).unwrap();

        assert!(line.assignments.is_empty());
        assert_eq!(line.positionals, vec!["test"]);
    }
}

#[test]
fn assignment_reports_its_dial() {
    assert_eq!(switch("mybool-a").name(), "mybool-a");
    assert_eq!(value("myint", "1").name(), "myint");
}
