//! Package snapshot schema consumed by `configify`.
//!
//! The package loader type-checks the Go sources and hands over a JSON
//! document in this shape. Types are fully resolved: a named type records the
//! package that declares it and, where the loader resolved it, its
//! underlying type.

use serde::{Deserialize, Serialize};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: &str = "1";

/// Top-level loader output: every package matched by the load patterns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadedPackages {
    /// Snapshot schema version string (for example, "1").
    pub version: String,
    /// Packages resolved from the load patterns.
    pub packages: Vec<PackageSnapshot>,
}

/// A single type-checked Go package.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageSnapshot {
    /// Package name as written in its package clause.
    pub name: String,
    /// Import path of the package.
    pub path: String,
    /// Package-level type declarations.
    #[serde(default)]
    pub types: Vec<TypeDecl>,
}

impl PackageSnapshot {
    /// Looks up a package-level type declaration by name.
    #[must_use]
    pub fn find_type(&self, name: &str) -> Option<&TypeDecl> {
        self.types.iter().find(|decl| decl.name == name)
    }
}

/// A package-level `type` declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeDecl {
    /// Declared type name.
    pub name: String,
    /// Names of the declared type parameters, empty for non-generic types.
    #[serde(default)]
    pub type_params: Vec<String>,
    /// Underlying type of the declaration.
    pub underlying: GoType,
}

impl TypeDecl {
    /// Returns the struct fields when the declaration is a struct type.
    #[must_use]
    pub fn struct_fields(&self) -> Option<&[StructField]> {
        match &self.underlying {
            GoType::Struct { fields } => Some(fields),
            _ => None,
        }
    }
}

/// One field of a struct type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructField {
    /// Field identifier; for embedded fields, the embedded type's name.
    pub name: String,
    /// Declared field type.
    #[serde(rename = "type")]
    pub ty: GoType,
    /// Whether the field is embedded (anonymous).
    #[serde(default)]
    pub embedded: bool,
    /// Raw struct tag, without surrounding quotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl StructField {
    /// Creates a named, untagged field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            name: name.into(),
            ty,
            embedded: false,
            tag: None,
        }
    }

    /// Creates an embedded field of the given type.
    #[must_use]
    pub fn embedded(name: impl Into<String>, ty: GoType) -> Self {
        Self {
            embedded: true,
            ..Self::new(name, ty)
        }
    }
}

/// Reference to the package declaring a named type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageRef {
    /// Import path (for example, `gopkg.in/yaml.v3`).
    pub path: String,
    /// Package name used to qualify identifiers (for example, `yaml`).
    pub name: String,
}

impl PackageRef {
    /// Creates a package reference.
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ChanDir {
    /// `chan T`
    #[default]
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A method in an interface type literal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterfaceMethod {
    /// Method name.
    pub name: String,
    /// Method signature; must be a [`GoType::Func`].
    pub signature: GoType,
}

/// A fully resolved Go type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoType {
    /// Predeclared basic type (`int`, `string`, `unsafe.Pointer`, ...).
    Basic {
        /// Type name as Go prints it.
        name: String,
    },
    /// Defined (named) type, possibly instantiated.
    Named {
        /// Declaring package; absent for predeclared names such as `error`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        package: Option<PackageRef>,
        /// Type name.
        name: String,
        /// Type arguments of an instantiated generic type.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        type_args: Vec<GoType>,
        /// Underlying type, when the loader resolved it.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        underlying: Option<Box<GoType>>,
    },
    /// Bare type parameter.
    TypeParam {
        /// Parameter name.
        name: String,
    },
    /// Fixed-length array.
    Array {
        /// Array length.
        len: u64,
        /// Element type.
        elem: Box<GoType>,
    },
    /// Slice.
    Slice {
        /// Element type.
        elem: Box<GoType>,
    },
    /// Map.
    Map {
        /// Key type.
        key: Box<GoType>,
        /// Value type.
        value: Box<GoType>,
    },
    /// Pointer.
    Pointer {
        /// Pointee type.
        elem: Box<GoType>,
    },
    /// Channel.
    Chan {
        /// Channel direction.
        #[serde(default)]
        dir: ChanDir,
        /// Element type.
        elem: Box<GoType>,
    },
    /// Function signature.
    Func {
        /// Parameter types; the last is a slice when `variadic` is set.
        #[serde(default)]
        params: Vec<GoType>,
        /// Result types.
        #[serde(default)]
        results: Vec<GoType>,
        /// Whether the final parameter is variadic.
        #[serde(default)]
        variadic: bool,
    },
    /// Anonymous struct literal type.
    Struct {
        /// Struct fields in declaration order.
        #[serde(default)]
        fields: Vec<StructField>,
    },
    /// Interface literal type.
    Interface {
        /// Explicitly declared methods.
        #[serde(default)]
        methods: Vec<InterfaceMethod>,
        /// Embedded interfaces and type-set terms.
        #[serde(default)]
        embedded: Vec<GoType>,
    },
}

impl GoType {
    /// Predeclared basic type.
    #[must_use]
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic { name: name.into() }
    }

    /// Named type declared in `package` with a known underlying type.
    #[must_use]
    pub fn named(package: PackageRef, name: impl Into<String>, underlying: Self) -> Self {
        Self::Named {
            package: Some(package),
            name: name.into(),
            type_args: Vec::new(),
            underlying: Some(Box::new(underlying)),
        }
    }

    /// Slice of `elem`.
    #[must_use]
    pub fn slice(elem: Self) -> Self {
        Self::Slice {
            elem: Box::new(elem),
        }
    }

    /// Fixed-length array of `elem`.
    #[must_use]
    pub fn array(len: u64, elem: Self) -> Self {
        Self::Array {
            len,
            elem: Box::new(elem),
        }
    }

    /// Map from `key` to `value`.
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Pointer to `elem`.
    #[must_use]
    pub fn pointer(elem: Self) -> Self {
        Self::Pointer {
            elem: Box::new(elem),
        }
    }

    /// Bidirectional channel of `elem`.
    #[must_use]
    pub fn chan(elem: Self) -> Self {
        Self::Chan {
            dir: ChanDir::Both,
            elem: Box::new(elem),
        }
    }

    /// Non-variadic function signature.
    #[must_use]
    pub fn func(params: Vec<Self>, results: Vec<Self>) -> Self {
        Self::Func {
            params,
            results,
            variadic: false,
        }
    }

    /// The empty interface.
    #[must_use]
    pub const fn empty_interface() -> Self {
        Self::Interface {
            methods: Vec::new(),
            embedded: Vec::new(),
        }
    }

    /// Resolves named types to their underlying type.
    ///
    /// Returns `None` when a named type carries no underlying information.
    #[must_use]
    pub fn underlying(&self) -> Option<&Self> {
        match self {
            Self::Named { underlying, .. } => underlying.as_deref().and_then(Self::underlying),
            other => Some(other),
        }
    }
}
