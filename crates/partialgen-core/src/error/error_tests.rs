#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case(GenError::Cancelled, 1)]
#[test_case(
    GenError::UnbalancedBlocks {
        unit: "a.g.cs".into(),
        depth: 1,
    },
    2
)]
#[test_case(GenError::Config("bad".into()), 3)]
#[test_case(GenError::Serialization("bad".into()), 4)]
#[test_case(GenError::Sink("bad".into()), 5)]
#[test_case(GenError::Io(std::io::Error::other("bad")), 6)]
fn GenError___variant___maps_to_stable_code(error: GenError, expected_code: u32) {
    assert_eq!(error.error_code(), expected_code);
}

#[test]
fn GenError___unbalanced_blocks___display_names_unit_and_depth() {
    let error = GenError::UnbalancedBlocks {
        unit: "Game.Player.Accessors.g.cs".into(),
        depth: 2,
    };

    assert_eq!(
        error.to_string(),
        "unbalanced blocks in Game.Player.Accessors.g.cs: depth 2 at end of unit"
    );
}

#[test]
fn GenError___from_serde_json___becomes_serialization_error() {
    let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let error = GenError::from(json_error);

    assert!(matches!(error, GenError::Serialization(_)));
}

#[test]
fn GenError___from_io___keeps_source_message() {
    let error = GenError::from(std::io::Error::other("disk full"));

    assert_eq!(error.to_string(), "I/O error: disk full");
}
