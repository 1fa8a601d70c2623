//! Engine and graph fixtures.

use std::sync::Arc;

use symgraph::base::FileId;
use symgraph::engine::{EngineRef, MemoryEngine, ModuleId, RawSymbolId, SourceFile, SymbolSpec};
use symgraph::hir::{AdapterOptions, FileNode, SymbolGraph, Type};

pub const PACKAGE: &str = "com.example";

/// One module with one file, and a graph over it.
pub struct Fixture {
    pub memory: Arc<MemoryEngine>,
    pub graph: SymbolGraph,
    pub module: ModuleId,
    pub source: SourceFile,
    pub file_symbol: RawSymbolId,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_options(AdapterOptions::default())
    }

    pub fn with_options(options: AdapterOptions) -> Self {
        super::init_logging();
        let memory = Arc::new(MemoryEngine::new());
        let module = memory.add_module();
        let source = source_file(0, "Main.kt");
        let file_symbol = memory.add_file(module, source.clone(), "");
        let engine: EngineRef = memory.clone();
        Self {
            graph: SymbolGraph::with_options(engine, options),
            memory,
            module,
            source,
            file_symbol,
        }
    }

    /// Declare a top-level member of the fixture file.
    pub fn declare(&self, spec: SymbolSpec) -> RawSymbolId {
        self.memory.add_member(self.file_symbol, spec)
    }

    pub fn file(&self) -> FileNode {
        self.graph.file(self.source.clone())
    }
}

pub fn source_file(id: u32, name: &str) -> SourceFile {
    SourceFile::new(
        FileId::new(id),
        PACKAGE,
        name,
        format!("/src/com/example/{name}"),
    )
}

pub fn int() -> Type {
    Type::named("kotlin.Int")
}

pub fn string() -> Type {
    Type::named("kotlin.String")
}

pub fn list_of(element: Type) -> Type {
    Type::named("kotlin.collections.List").with_args([element])
}

pub fn map_of(key: Type, value: Type) -> Type {
    Type::named("kotlin.collections.Map").with_args([key, value])
}
