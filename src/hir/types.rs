//! Plain value types shared by all nodes.

use std::fmt;

use smol_str::SmolStr;

use crate::engine::NativeOrigin;

/// Provenance of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Declared in a source file being analyzed.
    Source,
    /// Loaded from a compiled artifact (library, class file).
    External,
    /// Made up by the engine (SAM constructors, generated overrides).
    Synthetic,
}

impl From<NativeOrigin> for Origin {
    fn from(origin: NativeOrigin) -> Self {
        match origin {
            NativeOrigin::Source
            | NativeOrigin::SourceMemberGenerated
            | NativeOrigin::JavaSource => Origin::Source,
            NativeOrigin::Library | NativeOrigin::JavaLibrary => Origin::External,
            NativeOrigin::SamConstructor
            | NativeOrigin::Delegated
            | NativeOrigin::SubstitutionOverride
            | NativeOrigin::IntersectionOverride
            | NativeOrigin::Plugin => Origin::Synthetic,
        }
    }
}

/// Declaration modifiers as written in source.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Private,
    Internal,
    Protected,
    Abstract,
    Open,
    Final,
    Sealed,
    Override,
    Inline,
    Suspend,
    Operator,
    Infix,
    Tailrec,
    External,
    Data,
    Inner,
    Enum,
    Annotation,
    Lateinit,
    Const,
    Vararg,
    Noinline,
    Crossinline,
    Expect,
    Actual,
}

/// Variance of a type parameter or type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

/// A type argument; `ty` is `None` for a star projection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeArgument {
    pub variance: Variance,
    pub ty: Option<Type>,
}

impl TypeArgument {
    pub fn invariant(ty: Type) -> Self {
        Self {
            variance: Variance::Invariant,
            ty: Some(ty),
        }
    }

    pub fn star() -> Self {
        Self {
            variance: Variance::Invariant,
            ty: None,
        }
    }
}

/// A resolved type, detached from any engine session.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Type {
    pub qualified_name: SmolStr,
    pub arguments: Vec<TypeArgument>,
    pub nullable: bool,
}

impl Type {
    pub fn named(qualified_name: impl Into<SmolStr>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = Type>) -> Self {
        self.arguments
            .extend(args.into_iter().map(TypeArgument::invariant));
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Last segment of the qualified name.
    pub fn short_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                match arg.variance {
                    Variance::Invariant => {}
                    Variance::Covariant => f.write_str("out ")?,
                    Variance::Contravariant => f.write_str("in ")?,
                }
                match &arg.ty {
                    Some(ty) => write!(f, "{ty}")?,
                    None => f.write_str("*")?,
                }
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}
