//! Unit tests for field classification.

use super::*;
use crate::model::{ChanDir, PackageRef};
use rstest::rstest;

const LOCAL: &str = "github.com/acme/example";

fn local_pkg() -> PackageRef {
    PackageRef::new(LOCAL, "example")
}

fn my_type() -> GoType {
    GoType::named(local_pkg(), "MyType", GoType::basic("string"))
}

fn io_reader() -> GoType {
    GoType::named(
        PackageRef::new("io", "io"),
        "Reader",
        GoType::empty_interface(),
    )
}

fn field(name: &str, ty: GoType) -> StructField {
    StructField::new(name, ty)
}

#[rstest]
#[case::named_scalar(field("myType", my_type()), ShapeCategory::Scalar, "MyType")]
#[case::string(field("color", GoType::basic("string")), ShapeCategory::Scalar, "string")]
#[case::array(field("array", GoType::array(3, GoType::basic("int"))), ShapeCategory::Scalar, "[3]int")]
#[case::func(
    field("funcs", GoType::func(vec![GoType::basic("int")], vec![GoType::Named {
        package: None,
        name: "error".to_owned(),
        type_args: vec![],
        underlying: Some(Box::new(GoType::empty_interface())),
    }])),
    ShapeCategory::Scalar,
    "func(int) error"
)]
#[case::anonymous_struct(field("point2", GoType::Struct { fields: vec![] }), ShapeCategory::Scalar, "struct{}")]
#[case::slice(field("slice", GoType::slice(GoType::basic("int"))), ShapeCategory::Slice, "[]int")]
#[case::map(
    field("maps", GoType::map(GoType::basic("string"), GoType::basic("string"))),
    ShapeCategory::Map,
    "map[string]string"
)]
#[case::pointer_strips_marker(
    field("point", GoType::pointer(GoType::basic("string"))),
    ShapeCategory::Pointer,
    "string"
)]
#[case::local_interface(
    field("handler", GoType::named(local_pkg(), "Handler", GoType::empty_interface())),
    ShapeCategory::Interface,
    "Handler"
)]
#[case::anonymous_interface(field("any", GoType::empty_interface()), ShapeCategory::Interface, "interface{}")]
fn classifies_supported_shapes(
    #[case] input: StructField,
    #[case] category: ShapeCategory,
    #[case] rendered: &str,
) {
    let classified = classify(&input, LOCAL).expect("supported shape");
    assert_eq!(classified.category, category);
    assert_eq!(classified.rendered_type, rendered);
    assert_eq!(classified.name, input.name);
}

#[test]
fn named_types_classify_by_underlying_shape() {
    let tags = GoType::named(
        local_pkg(),
        "Tags",
        GoType::map(GoType::basic("string"), GoType::basic("string")),
    );
    let classified = classify(&field("tags", tags), LOCAL).expect("map");
    assert_eq!(classified.category, ShapeCategory::Map);
    assert_eq!(classified.rendered_type, "Tags");
}

#[test]
fn foreign_pointers_render_pointee_and_record_import() {
    let buffer = GoType::named(
        PackageRef::new("bytes", "bytes"),
        "Buffer",
        GoType::Struct { fields: vec![] },
    );
    let classified = classify(&field("buf", GoType::pointer(buffer)), LOCAL).expect("pointer");
    assert_eq!(classified.category, ShapeCategory::Pointer);
    assert_eq!(classified.rendered_type, "bytes.Buffer");
    assert_eq!(classified.carrier, Carrier::Defined);
    assert!(classified.imports.contains("bytes"));
    assert_eq!(classified.imports.len(), 1);
}

#[test]
fn named_pointer_types_use_the_underlying_pointee() {
    let handle = GoType::named(local_pkg(), "Handle", GoType::pointer(GoType::basic("int")));
    let classified = classify(&field("handle", handle), LOCAL).expect("pointer");
    assert_eq!(classified.category, ShapeCategory::Pointer);
    assert_eq!(classified.rendered_type, "int");
}

#[rstest]
#[case::interface_field(field("handler", GoType::named(local_pkg(), "Handler", GoType::empty_interface())))]
#[case::pointer_to_interface(field("reader", GoType::pointer(io_reader())))]
#[case::pointer_to_pointer(field("pp", GoType::pointer(GoType::pointer(GoType::basic("int")))))]
#[case::unsafe_pointer(field("raw", GoType::basic("unsafe.Pointer")))]
#[case::pointer_to_unsafe_pointer(field("rawp", GoType::pointer(GoType::basic("unsafe.Pointer"))))]
#[case::named_unsafe_pointer(field(
    "handle",
    GoType::named(local_pkg(), "Handle", GoType::basic("unsafe.Pointer"))
))]
fn wraps_payloads_that_cannot_carry_methods(#[case] input: StructField) {
    let classified = classify(&input, LOCAL).expect("supported");
    assert_eq!(classified.carrier, Carrier::Wrapped);
}

#[test]
fn foreign_named_interfaces_are_skipped() {
    let err = classify(&field("inter", io_reader()), LOCAL).expect_err("foreign interface");
    assert_eq!(
        err,
        SkipReason::ForeignInterface {
            name: "io.Reader".to_owned(),
            path: "io".to_owned(),
        }
    );
}

#[test]
fn foreign_named_structs_are_scalars_with_imports() {
    let time = GoType::named(
        PackageRef::new("time", "time"),
        "Time",
        GoType::Struct { fields: vec![] },
    );
    let classified = classify(&field("started", time), LOCAL).expect("scalar");
    assert_eq!(classified.category, ShapeCategory::Scalar);
    assert_eq!(classified.rendered_type, "time.Time");
    assert!(classified.imports.contains("time"));
}

#[rstest]
#[case::channel(GoType::chan(GoType::basic("int")), "channel")]
#[case::send_channel(
    GoType::Chan { dir: ChanDir::Send, elem: Box::new(GoType::basic("int")) },
    "channel"
)]
#[case::type_param(GoType::TypeParam { name: "T".to_owned() }, "type parameter")]
fn rejects_unsupported_shapes(#[case] ty: GoType, #[case] shape: &'static str) {
    let err = classify(&field("events", ty), LOCAL).expect_err("unsupported");
    assert_eq!(err, SkipReason::UnsupportedShape { shape });
}

#[test]
fn named_types_without_underlying_are_skipped() {
    let opaque = GoType::Named {
        package: Some(PackageRef::new("example.com/lib", "lib")),
        name: "Opaque".to_owned(),
        type_args: vec![],
        underlying: None,
    };
    let err = classify(&field("opaque", opaque), LOCAL).expect_err("no underlying");
    assert_eq!(
        err,
        SkipReason::MissingUnderlying {
            name: "lib.Opaque".to_owned()
        }
    );
}

#[test]
fn blank_fields_are_skipped() {
    let err = classify(&field("_", GoType::basic("int")), LOCAL).expect_err("blank");
    assert_eq!(err, SkipReason::BlankIdentifier);
}

#[test]
fn conflicting_package_names_in_one_type_are_skipped() {
    let core = GoType::named(
        PackageRef::new("k8s.io/api/core/v1", "v1"),
        "Pod",
        GoType::Struct { fields: vec![] },
    );
    let apps = GoType::named(
        PackageRef::new("k8s.io/api/apps/v1", "v1"),
        "Deployment",
        GoType::Struct { fields: vec![] },
    );
    let err = classify(&field("index", GoType::map(GoType::pointer(core), apps)), LOCAL)
        .expect_err("conflict");
    assert!(matches!(err, SkipReason::ImportConflict(_)));
}

#[test]
fn unsafe_pointer_fields_import_unsafe() {
    let classified =
        classify(&field("raw", GoType::basic("unsafe.Pointer")), LOCAL).expect("scalar");
    assert_eq!(classified.category, ShapeCategory::Scalar);
    assert_eq!(classified.rendered_type, "unsafe.Pointer");
    assert!(classified.imports.contains("unsafe"));
}
