//! Tests for [`FunctionInitialComposition`].
//!
//! These live as integration tests rather than a `#[cfg(test)]` module
//! in `src/function.rs` because they need `orogen_test_utils`, which
//! depends on this crate's lib; a unit-test module would link a second
//! build of `orogen-plugins` whose `ExpressionCompiler` trait is
//! incompatible with the one test-utils implements.

use orogen_core::{
    CompositionError, ExpressionError, FieldIndex, ParameterError, ParameterSection, Point,
};
use orogen_plugins::function::{CONSTANTS_KEY, EXPRESSION_KEY};
use orogen_plugins::{FunctionInitialComposition, InitialComposition};
use orogen_test_utils::CalcCompiler;
use proptest::prelude::*;
use smallvec::smallvec;
use std::sync::Arc;

fn configured(n_fields: usize, expression: &str) -> FunctionInitialComposition {
    let mut plugin = FunctionInitialComposition::new(n_fields, Arc::new(CalcCompiler));
    plugin
        .parse_parameters(&ParameterSection::new().with(EXPRESSION_KEY, expression))
        .unwrap();
    plugin
}

#[test]
fn evaluates_sum_of_coordinates() {
    let plugin = configured(1, "x+y");
    let p: Point = smallvec![2.0, 3.0];
    assert_eq!(plugin.initial_composition(&p, FieldIndex(0)).unwrap(), 5.0);
}

#[test]
fn selects_the_requested_component() {
    let plugin = configured(3, "x; y; 7");
    let p: Point = smallvec![2.0, 3.0];
    assert_eq!(plugin.initial_composition(&p, FieldIndex(0)).unwrap(), 2.0);
    assert_eq!(plugin.initial_composition(&p, FieldIndex(1)).unwrap(), 3.0);
    assert_eq!(plugin.initial_composition(&p, FieldIndex(2)).unwrap(), 7.0);
}

#[test]
fn zero_expression_yields_zero_everywhere() {
    let plugin = configured(2, "0; 0");
    let p: Point = smallvec![-4.5, 8.0, 1.0];
    assert_eq!(plugin.initial_composition(&p, FieldIndex(0)).unwrap(), 0.0);
    assert_eq!(plugin.initial_composition(&p, FieldIndex(1)).unwrap(), 0.0);
}

#[test]
fn constants_are_substituted() {
    let mut plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    let section = ParameterSection::new()
        .with(EXPRESSION_KEY, "ampl * x")
        .with(CONSTANTS_KEY, "ampl=0.5");
    plugin.parse_parameters(&section).unwrap();
    let p: Point = smallvec![8.0];
    assert_eq!(plugin.initial_composition(&p, FieldIndex(0)).unwrap(), 4.0);
}

#[test]
fn field_index_out_of_range_is_an_error_not_zero() {
    let plugin = configured(2, "1; 2");
    let p: Point = smallvec![0.0];
    match plugin.initial_composition(&p, FieldIndex(2)) {
        Err(CompositionError::FieldIndexOutOfRange { index, components }) => {
            assert_eq!(index, FieldIndex(2));
            assert_eq!(components, 2);
        }
        other => panic!("expected FieldIndexOutOfRange, got {other:?}"),
    }
}

#[test]
fn evaluation_before_parse_parameters_fails_fast() {
    let plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    let p: Point = smallvec![1.0];
    assert_eq!(
        plugin.initial_composition(&p, FieldIndex(0)),
        Err(CompositionError::NotConfigured)
    );
}

#[test]
fn missing_expression_key_is_a_configuration_error() {
    let mut plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    match plugin.parse_parameters(&ParameterSection::new()) {
        Err(ParameterError::MissingKey { key }) => assert_eq!(key, EXPRESSION_KEY),
        other => panic!("expected MissingKey, got {other:?}"),
    }
}

#[test]
fn component_count_mismatch_is_detected_at_setup() {
    let mut plugin = FunctionInitialComposition::new(3, Arc::new(CalcCompiler));
    let section = ParameterSection::new().with(EXPRESSION_KEY, "x; y");
    match plugin.parse_parameters(&section) {
        Err(ParameterError::ComponentCountMismatch { declared, expected }) => {
            assert_eq!(declared, 2);
            assert_eq!(expected, 3);
        }
        other => panic!("expected ComponentCountMismatch, got {other:?}"),
    }
}

#[test]
fn malformed_expression_fails_at_setup() {
    let mut plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    let section = ParameterSection::new().with(EXPRESSION_KEY, "x +");
    assert!(matches!(
        plugin.parse_parameters(&section),
        Err(ParameterError::Expression(ExpressionError::Parse { .. }))
    ));
}

#[test]
fn undefined_symbol_fails_at_setup() {
    let mut plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    let section = ParameterSection::new().with(EXPRESSION_KEY, "ampl * x");
    assert!(matches!(
        plugin.parse_parameters(&section),
        Err(ParameterError::Expression(ExpressionError::Parse { .. }))
    ));
}

#[test]
fn bad_constants_pair_is_rejected() {
    let mut plugin = FunctionInitialComposition::new(1, Arc::new(CalcCompiler));
    let section = ParameterSection::new()
        .with(EXPRESSION_KEY, "x")
        .with(CONSTANTS_KEY, "ampl:0.5");
    assert!(matches!(
        plugin.parse_parameters(&section),
        Err(ParameterError::InvalidValue { .. })
    ));
}

proptest! {
    /// Pure function: identical inputs give identical outputs.
    #[test]
    fn initial_composition_is_idempotent(
        x in -1.0e3f64..1.0e3,
        y in -1.0e3f64..1.0e3,
        field in 0u32..2,
    ) {
        let plugin = configured(2, "x*y + 2; x - y");
        let p: Point = smallvec![x, y];
        let first = plugin.initial_composition(&p, FieldIndex(field)).unwrap();
        let second = plugin.initial_composition(&p, FieldIndex(field)).unwrap();
        prop_assert_eq!(first, second);
    }
}
