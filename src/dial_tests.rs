//! Tests for dial declarations and validation.

use super::dial::{Dial, env_key, is_valid_name, is_valid_shorthand};
use super::error::DeclarationError;
use super::kind::Kind;
use super::value::Value;

mod names {
    use super::*;

    #[test]
    fn accepts_lowercase_digits_and_hyphens() {
        assert!(is_valid_name("valid-name-1"));
        assert!(is_valid_name("valid"));
        assert!(is_valid_name("v"));
        assert!(is_valid_name("1"));
    }

    #[test]
    fn rejects_empty_spaces_and_uppercase() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("invalid name 1"));
        assert!(!is_valid_name("Invalid-name-1"));
        assert!(!is_valid_name("-leading"));
        assert!(!is_valid_name("under_score"));
    }

    #[test]
    fn invalid_name_is_first_error() {
        let dial = Dial::new("Bad Name", Kind::String);

        assert_eq!(
            dial.validate(),
            Err(DeclarationError::InvalidName("Bad Name".to_string()))
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = Dial::new("", Kind::Bool).validate();

        assert!(matches!(result, Err(DeclarationError::InvalidName(_))));
    }
}

mod shorthands {
    use super::*;

    #[test]
    fn accepts_ascii_letters_and_digits() {
        assert!(is_valid_shorthand('v'));
        assert!(is_valid_shorthand('V'));
        assert!(is_valid_shorthand('1'));
    }

    #[test]
    fn rejects_space_punctuation_and_non_ascii() {
        assert!(!is_valid_shorthand(' '));
        assert!(!is_valid_shorthand('-'));
        assert!(!is_valid_shorthand('é'));
    }

    #[test]
    fn invalid_shorthand_fails_validation() {
        let result = Dial::new("valid-name-1", Kind::Bool)
            .with_shorthand(' ')
            .validate();

        assert_eq!(
            result,
            Err(DeclarationError::InvalidShorthand {
                name: "valid-name-1".to_string(),
                shorthand: ' ',
            })
        );
    }
}

mod defaults {
    use super::*;

    #[test]
    fn bool_needs_no_default() {
        let initial = Dial::new("test", Kind::Bool).validate().unwrap();

        assert_eq!(initial, Value::Bool(false));
    }

    #[test]
    fn bool_default_is_always_false() {
        let initial = Dial::new("test", Kind::Bool)
            .with_default(true)
            .validate()
            .unwrap();

        assert_eq!(initial, Value::Bool(false));
    }

    #[test]
    fn string_without_default_is_rejected() {
        let result = Dial::new("test", Kind::String).validate();

        assert_eq!(
            result,
            Err(DeclarationError::MissingDefault {
                name: "test".to_string(),
                kind: Kind::String,
            })
        );
    }

    #[test]
    fn mismatched_scalar_defaults_are_rejected() {
        let cases = [
            (Kind::String, Value::Int(1)),
            (Kind::Int, Value::Float(1.0)),
            (Kind::Float, Value::Int(1)),
            (Kind::Strings, Value::Str("value".to_string())),
            (Kind::Ints, Value::Int(1)),
            (Kind::Floats, Value::Float(1.0)),
        ];

        for (kind, default) in cases {
            let actual = default.kind();
            let result = Dial::new("test", kind).with_default(default).validate();

            assert_eq!(
                result,
                Err(DeclarationError::DefaultMismatch {
                    name: "test".to_string(),
                    expected: kind,
                    actual,
                }),
                "{kind} dial accepted a {actual} default"
            );
        }
    }

    #[test]
    fn matching_defaults_are_accepted() {
        let cases = [
            (Kind::String, Value::from("")),
            (Kind::String, Value::from("test value")),
            (Kind::Int, Value::from(1_i64)),
            (Kind::Float, Value::from(1.0)),
            (Kind::Strings, Value::Strs(vec![])),
            (Kind::Ints, Value::Ints(vec![])),
            (Kind::Floats, Value::Floats(vec![])),
            (Kind::Strings, Value::from(vec!["test"])),
            (Kind::Ints, Value::from(vec![1_i64])),
            (Kind::Floats, Value::from(vec![1.0])),
        ];

        for (kind, default) in cases {
            let initial = Dial::new("test", kind)
                .with_default(default.clone())
                .validate()
                .unwrap();

            assert_eq!(initial, default);
        }
    }
}

mod kinds {
    use super::*;

    #[test]
    fn parses_every_kind_name() {
        for kind in Kind::ALL {
            assert_eq!(kind.as_str().parse::<Kind>(), Ok(kind));
        }
    }

    #[test]
    fn unknown_kind_name_is_rejected() {
        assert_eq!(
            "uint".parse::<Kind>(),
            Err(DeclarationError::UnknownKind("uint".to_string()))
        );
        assert!("".parse::<Kind>().is_err());
    }

    #[test]
    fn only_bool_is_valueless() {
        for kind in Kind::ALL {
            assert_eq!(kind.takes_value(), kind != Kind::Bool);
        }
    }

    #[test]
    fn deserializes_from_lowercase_name() {
        let kind: Kind = serde_json::from_str(r#""floats""#).unwrap();

        assert_eq!(kind, Kind::Floats);
    }
}

mod environment_keys {
    use super::*;

    #[test]
    fn uppercases_and_replaces_hyphens() {
        assert_eq!(env_key("my-str"), "MY_STR");
        assert_eq!(env_key("port"), "PORT");
        assert_eq!(env_key("a-b-1"), "A_B_1");
    }

    #[test]
    fn dial_uses_its_name() {
        let dial = Dial::new("log-level", Kind::String).with_default("info");

        assert_eq!(dial.env_key(), "LOG_LEVEL");
    }
}
