//! Error codes and messages exposed by the core library.

use rstest::rstest;
use treehunt_core::{HuntError, HuntErrorCode};

#[rstest]
#[case(HuntError::TooFewTrees { got: 1 }, HuntErrorCode::TooFewTrees, "HUNT_TOO_FEW_TREES")]
#[case(
    HuntError::InvalidDegree { position: 2, degree: 9, trees: 4 },
    HuntErrorCode::InvalidDegree,
    "HUNT_INVALID_DEGREE",
)]
#[case(
    HuntError::SequenceExhausted { trees: 5, draws: 10 },
    HuntErrorCode::SequenceExhausted,
    "HUNT_SEQUENCE_EXHAUSTED",
)]
#[case(
    HuntError::GenerationExhausted { trees: 5, attempts: 3 },
    HuntErrorCode::GenerationExhausted,
    "HUNT_GENERATION_EXHAUSTED",
)]
#[case(
    HuntError::TreeOutOfRange { tree: 7, trees: 4 },
    HuntErrorCode::TreeOutOfRange,
    "HUNT_TREE_OUT_OF_RANGE",
)]
#[case(HuntError::SelfLoop { tree: 0 }, HuntErrorCode::SelfLoop, "HUNT_SELF_LOOP")]
#[case(
    HuntError::DuplicateEdge { left: 0, right: 1 },
    HuntErrorCode::DuplicateEdge,
    "HUNT_DUPLICATE_EDGE",
)]
#[case(HuntError::IsolatedTree { tree: 3 }, HuntErrorCode::IsolatedTree, "HUNT_ISOLATED_TREE")]
#[case(
    HuntError::TooManyTrees { trees: 40, limit: 32 },
    HuntErrorCode::TooManyTrees,
    "HUNT_TOO_MANY_TREES",
)]
#[case(HuntError::EmptyForest, HuntErrorCode::EmptyForest, "HUNT_EMPTY_FOREST")]
#[case(
    HuntError::Unbound { hunter: "exact-planner" },
    HuntErrorCode::Unbound,
    "HUNT_UNBOUND",
)]
#[case(
    HuntError::InvalidConfig { reason: "trials must be at least 1".into() },
    HuntErrorCode::InvalidConfig,
    "HUNT_INVALID_CONFIG",
)]
fn returns_expected_hunt_code(
    #[case] error: HuntError,
    #[case] expected: HuntErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
    assert_eq!(expected.to_string(), text);
}

#[rstest]
#[case(HuntError::EmptyForest, true)]
#[case(HuntError::Unbound { hunter: "probabilistic-tracker" }, true)]
#[case(HuntError::TreeOutOfRange { tree: 3, trees: 3 }, true)]
#[case(HuntError::GenerationExhausted { trees: 6, attempts: 1 }, false)]
#[case(HuntError::SequenceExhausted { trees: 6, draws: 1 }, false)]
fn separates_misuse_from_bad_luck(#[case] error: HuntError, #[case] precondition: bool) {
    assert_eq!(error.is_precondition(), precondition);
}

#[test]
fn messages_name_the_offending_values() {
    let error = HuntError::GenerationExhausted {
        trees: 12,
        attempts: 1000,
    };
    assert_eq!(
        error.to_string(),
        "failed to generate a forest with 12 trees after 1000 attempts"
    );
    assert_eq!(
        HuntError::Unbound { hunter: "exact-planner" }.to_string(),
        "hunter `exact-planner` has not been bound to a forest"
    );
}
