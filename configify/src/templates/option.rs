//! Per-field option templates.
//!
//! Every fragment declares a private carrier type, its `Apply` method and an
//! exported `With*` factory. Only the apply body differs by category.

use super::FieldValues;
use crate::classify::{Carrier, ShapeCategory};

/// Renders the option fragment for one field.
#[must_use]
pub fn render_field(category: ShapeCategory, values: &FieldValues<'_>) -> String {
    match category {
        ShapeCategory::Scalar => scalar(values),
        ShapeCategory::Pointer => pointer(values),
        ShapeCategory::Slice => slice(values),
        ShapeCategory::Map => map(values),
        ShapeCategory::Interface => interface(values),
    }
}

fn scalar(values: &FieldValues<'_>) -> String {
    let doc = format!("sets the {} field.", values.orig_name);
    fragment(values, &assign_body(values), &doc)
}

fn slice(values: &FieldValues<'_>) -> String {
    let doc = format!("replaces the {} field with the given slice.", values.orig_name);
    fragment(values, &assign_body(values), &doc)
}

fn interface(values: &FieldValues<'_>) -> String {
    let doc = format!("sets the {} field.", values.orig_name);
    fragment(values, &assign_body(values), &doc)
}

fn pointer(values: &FieldValues<'_>) -> String {
    let cfg = &values.locals.target;
    let value = &values.locals.value;
    let body = format!(
        "\t{value} := {payload}\n\t{cfg}.{field} = &{value}\n",
        payload = payload_expr(values),
        field = values.orig_name,
    );
    let doc = format!(
        "sets the {} field to point at a copy of {value}.",
        values.orig_name
    );
    fragment(values, &body, &doc)
}

fn map(values: &FieldValues<'_>) -> String {
    let cfg = &values.locals.target;
    let key = &values.locals.key;
    let elem = &values.locals.elem;
    let carrier = &values.locals.carrier;
    let field = values.orig_name;
    let source = match values.carrier {
        Carrier::Defined => carrier.clone(),
        Carrier::Wrapped => format!("{carrier}.value"),
    };
    let body = format!(
        concat!(
            "\tif {cfg}.{field} == nil {{\n",
            "\t\t{cfg}.{field} = make({ty}, len({source}))\n",
            "\t}}\n",
            "\tfor {key}, {elem} := range {source} {{\n",
            "\t\t{cfg}.{field}[{key}] = {elem}\n",
            "\t}}\n",
        ),
        cfg = cfg,
        field = field,
        ty = values.orig_type,
        source = source,
        key = key,
        elem = elem,
    );
    let doc = format!("merges the given entries into the {field} field.");
    fragment(values, &body, &doc)
}

fn assign_body(values: &FieldValues<'_>) -> String {
    format!(
        "\t{cfg}.{field} = {payload}\n",
        cfg = values.locals.target,
        field = values.orig_name,
        payload = payload_expr(values),
    )
}

/// Expression reading the payload out of the carrier receiver.
fn payload_expr(values: &FieldValues<'_>) -> String {
    let carrier = &values.locals.carrier;
    match values.carrier {
        Carrier::Defined if needs_parens(values.orig_type) => {
            format!("({})({carrier})", values.orig_type)
        }
        Carrier::Defined => format!("{}({carrier})", values.orig_type),
        Carrier::Wrapped => format!("{carrier}.value"),
    }
}

/// Conversions to these types must be parenthesised to parse as intended.
fn needs_parens(ty: &str) -> bool {
    ["func", "*", "chan", "<-"]
        .iter()
        .any(|prefix| ty.starts_with(prefix))
}

fn fragment(values: &FieldValues<'_>, apply_body: &str, doc: &str) -> String {
    let carrier_type = format!("{}Option", values.name_lower);
    let factory = format!("With{}", values.name_upper);
    let ty = values.orig_type;
    let receiver = &values.locals.carrier;
    let cfg = &values.locals.target;
    let value = &values.locals.value;
    let target = values.target;

    let (declaration, construct) = match values.carrier {
        Carrier::Defined => (
            format!("type {carrier_type} {ty}\n"),
            format!("{carrier_type}({value})"),
        ),
        Carrier::Wrapped => (
            format!("type {carrier_type} struct {{\n\tvalue {ty}\n}}\n"),
            format!("{carrier_type}{{value: {value}}}"),
        ),
    };

    format!(
        concat!(
            "\n",
            "{declaration}",
            "\n",
            "func ({receiver} {carrier_type}) Apply({cfg} *{target}) {{\n",
            "{apply_body}",
            "}}\n",
            "\n",
            "// {factory} {doc}\n",
            "func {factory}({value} {ty}) Option {{\n",
            "\treturn {construct}\n",
            "}}\n",
        ),
        declaration = declaration,
        receiver = receiver,
        carrier_type = carrier_type,
        cfg = cfg,
        target = target,
        apply_body = apply_body,
        factory = factory,
        doc = doc,
        value = value,
        ty = ty,
        construct = construct,
    )
}
