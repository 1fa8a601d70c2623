//! Classification failures are loud and all-or-nothing.

use rstest::rstest;
use symgraph::engine::{NativeScopeKind, NativeSymbolKind, SymbolSpec};
use symgraph::hir::{AdapterError, Declaration, DeclarationKind};

use crate::helpers::graph_fixtures::{Fixture, int};
use crate::helpers::node_assertions::find_class;

#[rstest]
#[case(NativeSymbolKind::TypeAlias, Some("Alias"))]
#[case(NativeSymbolKind::AnonymousObject, None)]
#[case(NativeSymbolKind::AnonymousFunction, None)]
#[case(NativeSymbolKind::LocalVariable, Some("tmp"))]
#[case(NativeSymbolKind::EnumEntry, Some("RED"))]
fn test_unsupported_member_fails_whole_file(
    #[case] kind: NativeSymbolKind,
    #[case] name: Option<&str>,
) {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::function("ok"));
    fixture.declare(SymbolSpec::of_kind(kind, name));
    fixture.declare(SymbolSpec::property("alsoOk", int()));

    let file = fixture.file();
    let err = file.declarations().unwrap_err();

    match err {
        AdapterError::UnsupportedSymbolKind { symbol, kind: reported } => {
            assert_eq!(symbol, name.unwrap_or("<anonymous>"));
            assert_eq!(reported, kind.to_string());
        }
        other => panic!("expected UnsupportedSymbolKind, got {other:?}"),
    }
}

#[test]
fn test_failed_enumeration_is_not_memoized() {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::of_kind(NativeSymbolKind::TypeAlias, Some("Alias")));

    let file = fixture.file();
    assert!(file.declarations().is_err());
    assert!(file.declarations().is_err());

    // Each access retried the enumeration.
    assert_eq!(fixture.memory.call_count("scope_members"), 2);
}

#[test]
fn test_unsupported_class_member_fails_class_only() {
    let fixture = Fixture::new();
    let holder = fixture.declare(SymbolSpec::class("Holder"));
    fixture
        .memory
        .add_member(holder, SymbolSpec::of_kind(NativeSymbolKind::TypeAlias, Some("Nested")));

    let file = fixture.file();
    let decls = file.declarations().unwrap();
    let holder = find_class(decls, "Holder");

    let err = holder.declarations().unwrap_err();
    assert!(matches!(err, AdapterError::UnsupportedSymbolKind { .. }));
    assert_eq!(err.to_string(), "Unsupported symbol kind TypeAlias for `Nested`");
}

#[rstest]
#[case(NativeScopeKind::Local)]
#[case(NativeScopeKind::Accessor)]
fn test_unsupported_function_scope(#[case] scope: NativeScopeKind) {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::function("helper").scope(scope));

    let file = fixture.file();
    let helper = file.declarations().unwrap()[0].as_function().unwrap();

    // The declaration itself classifies; only its function kind fails.
    assert_eq!(helper.kind(), DeclarationKind::Function);
    let err = helper.function_kind().unwrap_err();
    assert_eq!(err, AdapterError::unsupported("helper", scope));
}
