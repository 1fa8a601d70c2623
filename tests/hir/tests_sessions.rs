//! Session scoping: every access releases its session, and contexts that
//! went away fail instead of answering with stale data.

use symgraph::engine::{ContextEntity, SymbolSpec};
use symgraph::hir::{AdapterOptions, Declaration};

use crate::helpers::graph_fixtures::{Fixture, int, string};
use crate::helpers::node_assertions::{assert_stale, find_class, find_function};

#[test]
fn test_every_access_releases_its_session() {
    let fixture = Fixture::new();
    let class = fixture.declare(SymbolSpec::class("Repo"));
    fixture
        .memory
        .add_member(class, SymbolSpec::function("find").param("id", int()).returns(string()));

    let file = fixture.file();
    let repo = find_class(file.declarations().unwrap(), "Repo");
    assert_eq!(fixture.memory.open_sessions(), 0);

    let find = find_function(repo.declarations().unwrap(), "find");
    find.parameters().unwrap();
    find.return_type().unwrap().resolve().unwrap();
    find.annotations().unwrap();
    find.location().unwrap();

    assert_eq!(fixture.memory.open_sessions(), 0);
    assert!(fixture.memory.sessions_opened() >= 6);
}

#[test]
fn test_failed_access_releases_its_session() {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::function("f"));
    let file = fixture.file();
    let f = file.declarations().unwrap()[0].clone();

    fixture.memory.dispose_module(fixture.module);
    assert_stale(f.simple_name());
    assert_eq!(fixture.memory.open_sessions(), 0);
}

#[test]
fn test_disposed_context_fails_unmemoized_properties() {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::function("compute").param("n", int()).returns(int()));

    let file = fixture.file();
    let compute = find_function(file.declarations().unwrap(), "compute");
    assert_eq!(compute.simple_name().unwrap(), "compute");
    let return_type = compute.return_type().unwrap().clone();

    fixture.memory.dispose_module(fixture.module);

    // Already computed: still answered from the memo.
    assert_eq!(compute.simple_name().unwrap(), "compute");
    assert_eq!(file.declarations().unwrap().len(), 1);

    // Not yet computed: fails rather than guessing.
    assert_stale(compute.parameters());
    assert_stale(compute.qualified_name());
    assert_stale(return_type.resolve());
    assert_stale(file.annotations());
}

#[test]
fn test_disposed_context_fails_file_enumeration() {
    let fixture = Fixture::new();
    fixture.declare(SymbolSpec::function("f"));
    let file = fixture.file();

    fixture.memory.dispose_module(fixture.module);
    assert_stale(file.declarations());
}

#[test]
fn test_nested_queries_share_one_session() {
    let fixture = Fixture::new();
    let file = fixture.file();
    let context = ContextEntity::File(fixture.source.id);

    fixture
        .graph
        .with_context(&context, |_| {
            file.declarations()?;
            file.annotations()?;
            Ok(())
        })
        .unwrap();

    assert_eq!(fixture.memory.sessions_opened(), 1);
    assert_eq!(fixture.memory.open_sessions(), 0);
}

#[test]
fn test_nested_queries_without_reuse_open_fresh_sessions() {
    let fixture = Fixture::with_options(AdapterOptions::default().with_session_reuse(false));
    let file = fixture.file();
    let context = ContextEntity::File(fixture.source.id);

    fixture
        .graph
        .with_context(&context, |_| {
            file.declarations()?;
            file.annotations()?;
            Ok(())
        })
        .unwrap();

    assert_eq!(fixture.memory.sessions_opened(), 3);
    assert_eq!(fixture.memory.open_sessions(), 0);
}

#[test]
fn test_unknown_file_error_is_retried() {
    let fixture = Fixture::new();
    let source = crate::helpers::graph_fixtures::source_file(3, "Late.kt");
    let file = fixture.graph.file(source.clone());

    assert!(file.declarations().is_err());

    let late = fixture.memory.add_file(fixture.module, source, "");
    fixture.memory.add_member(late, SymbolSpec::function("arrived"));

    let decls = file.declarations().unwrap();
    assert_eq!(decls[0].simple_name().unwrap(), "arrived");
}
