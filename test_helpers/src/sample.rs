//! The `example` package used across integration tests.
//!
//! [`SAMPLE_SOURCE`] is the Go source and [`sample_package`] is the snapshot
//! a loader produces for it, so generated code can be checked both textually
//! and by compiling it next to the source.

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use configify::fs_helpers;
use configify::model::{
    GoType, InterfaceMethod, LoadedPackages, PackageRef, PackageSnapshot, SNAPSHOT_VERSION,
    StructField, TypeDecl,
};

/// Import path and name of the sample package.
pub const SAMPLE_PATH: &str = "example";

/// Struct type the tests generate options for.
pub const SAMPLE_TARGET: &str = "config";

/// Go source of the sample package.
pub const SAMPLE_SOURCE: &str = r#"package example

import (
	"io"
	"unsafe"
)

type config struct {
	myType  MyType
	color   string
	Height  int
	array   [3]int
	slice   []int
	maps    map[string]string
	funcs   func(int) error
	point   *string
	handler Handler
	raw     unsafe.Pointer
	inter   io.Reader
	MyType
}

type MyType string

type Handler interface {
	Handle() string
}
"#;

fn local() -> PackageRef {
    PackageRef::new(SAMPLE_PATH, SAMPLE_PATH)
}

fn my_type() -> GoType {
    GoType::named(local(), "MyType", GoType::basic("string"))
}

fn error_type() -> GoType {
    GoType::Named {
        package: None,
        name: "error".to_owned(),
        type_args: vec![],
        underlying: Some(Box::new(GoType::Interface {
            methods: vec![InterfaceMethod {
                name: "Error".to_owned(),
                signature: GoType::func(vec![], vec![GoType::basic("string")]),
            }],
            embedded: vec![],
        })),
    }
}

fn handler_interface() -> GoType {
    GoType::Interface {
        methods: vec![InterfaceMethod {
            name: "Handle".to_owned(),
            signature: GoType::func(vec![], vec![GoType::basic("string")]),
        }],
        embedded: vec![],
    }
}

fn handler() -> GoType {
    GoType::named(local(), "Handler", handler_interface())
}

fn io_reader() -> GoType {
    GoType::named(
        PackageRef::new("io", "io"),
        "Reader",
        GoType::Interface {
            methods: vec![InterfaceMethod {
                name: "Read".to_owned(),
                signature: GoType::func(
                    vec![GoType::slice(GoType::basic("byte"))],
                    vec![GoType::basic("int"), error_type()],
                ),
            }],
            embedded: vec![],
        },
    )
}

/// Snapshot of the sample package as a loader reports it.
#[must_use]
pub fn sample_package() -> PackageSnapshot {
    let fields = vec![
        StructField::new("myType", my_type()),
        StructField::new("color", GoType::basic("string")),
        StructField::new("Height", GoType::basic("int")),
        StructField::new("array", GoType::array(3, GoType::basic("int"))),
        StructField::new("slice", GoType::slice(GoType::basic("int"))),
        StructField::new(
            "maps",
            GoType::map(GoType::basic("string"), GoType::basic("string")),
        ),
        StructField::new(
            "funcs",
            GoType::func(vec![GoType::basic("int")], vec![error_type()]),
        ),
        StructField::new("point", GoType::pointer(GoType::basic("string"))),
        StructField::new("handler", handler()),
        StructField::new("raw", GoType::basic("unsafe.Pointer")),
        StructField::new("inter", io_reader()),
        StructField::embedded("MyType", my_type()),
    ];
    PackageSnapshot {
        name: SAMPLE_PATH.to_owned(),
        path: SAMPLE_PATH.to_owned(),
        types: vec![
            TypeDecl {
                name: SAMPLE_TARGET.to_owned(),
                type_params: vec![],
                underlying: GoType::Struct { fields },
            },
            TypeDecl {
                name: "MyType".to_owned(),
                type_params: vec![],
                underlying: GoType::basic("string"),
            },
            TypeDecl {
                name: "Handler".to_owned(),
                type_params: vec![],
                underlying: handler_interface(),
            },
        ],
    }
}

/// Wraps packages in a current-version snapshot document.
#[must_use]
pub fn snapshot_of(packages: Vec<PackageSnapshot>) -> LoadedPackages {
    LoadedPackages {
        version: SNAPSHOT_VERSION.to_owned(),
        packages,
    }
}

/// Writes `loaded` as JSON to `dir/snapshot.json` and returns the path.
///
/// # Errors
///
/// Returns an error if serialisation or the write fails.
pub fn write_snapshot(dir: &Utf8Path, loaded: &LoadedPackages) -> Result<Utf8PathBuf> {
    let path = dir.join("snapshot.json");
    let json = serde_json::to_string_pretty(loaded).context("serialise snapshot")?;
    fs_helpers::write_file(&path, &json).with_context(|| format!("write {path}"))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_snapshot_round_trips_through_json() {
        let loaded = snapshot_of(vec![sample_package()]);
        let json = serde_json::to_string(&loaded).expect("serialise");
        let parsed = configify::loader::parse_snapshot(&json).expect("parse");
        assert_eq!(parsed, loaded);
    }

    #[test]
    fn sample_source_declares_every_package_type() {
        for decl in sample_package().types {
            assert!(
                SAMPLE_SOURCE.contains(&format!("\ntype {} ", decl.name)),
                "{} missing from source",
                decl.name
            );
        }
    }

    #[test]
    fn foreign_reader_keeps_its_read_method() {
        let package = sample_package();
        let inter = package
            .find_type(SAMPLE_TARGET)
            .and_then(|decl| decl.struct_fields())
            .and_then(|fields| fields.iter().find(|field| field.name == "inter"))
            .expect("inter field");
        match inter.ty.underlying() {
            Some(GoType::Interface { methods, .. }) => {
                let names: Vec<_> = methods.iter().map(|method| method.name.as_str()).collect();
                assert_eq!(names, ["Read"]);
            }
            other => panic!("unexpected underlying type: {other:?}"),
        }
    }

    #[test]
    fn sample_source_declares_every_snapshot_field() {
        let package = sample_package();
        let fields = package
            .find_type(SAMPLE_TARGET)
            .and_then(|decl| decl.struct_fields())
            .expect("struct");
        for field in fields {
            assert!(
                SAMPLE_SOURCE.contains(&format!("\t{}", field.name)),
                "{} missing from source",
                field.name
            );
        }
    }
}
