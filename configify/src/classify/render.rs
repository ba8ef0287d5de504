//! Renders resolved types as Go source text.
//!
//! Named types declared in the target package print unqualified; all others
//! are qualified by their package name. Struct and interface literals use
//! gofmt's single-line layout so the output needs no reformatting.

use crate::model::{ChanDir, GoType, StructField};

/// Renders `ty` as it would be written inside the package at `local_path`.
#[must_use]
pub fn render_type(ty: &GoType, local_path: &str) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, local_path);
    out
}

fn write_type(out: &mut String, ty: &GoType, local_path: &str) {
    match ty {
        GoType::Basic { name } | GoType::TypeParam { name } => out.push_str(name),
        GoType::Named {
            package,
            name,
            type_args,
            ..
        } => {
            if let Some(package) = package.as_ref().filter(|pkg| pkg.path != local_path) {
                out.push_str(&package.name);
                out.push('.');
            }
            out.push_str(name);
            if !type_args.is_empty() {
                out.push('[');
                write_list(out, type_args, local_path);
                out.push(']');
            }
        }
        GoType::Array { len, elem } => {
            out.push('[');
            out.push_str(&len.to_string());
            out.push(']');
            write_type(out, elem, local_path);
        }
        GoType::Slice { elem } => {
            out.push_str("[]");
            write_type(out, elem, local_path);
        }
        GoType::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, local_path);
            out.push(']');
            write_type(out, value, local_path);
        }
        GoType::Pointer { elem } => {
            out.push('*');
            write_type(out, elem, local_path);
        }
        GoType::Chan { dir, elem } => write_chan(out, *dir, elem, local_path),
        GoType::Func {
            params,
            results,
            variadic,
        } => {
            out.push_str("func");
            write_signature(out, params, results, *variadic, local_path);
        }
        GoType::Struct { fields } => write_struct(out, fields, local_path),
        GoType::Interface { methods, embedded } => {
            if methods.is_empty() && embedded.is_empty() {
                out.push_str("interface{}");
                return;
            }
            out.push_str("interface{ ");
            let mut first = true;
            for term in embedded {
                separate(out, &mut first);
                write_type(out, term, local_path);
            }
            for method in methods {
                separate(out, &mut first);
                out.push_str(&method.name);
                match &method.signature {
                    GoType::Func {
                        params,
                        results,
                        variadic,
                    } => write_signature(out, params, results, *variadic, local_path),
                    other => {
                        out.push(' ');
                        write_type(out, other, local_path);
                    }
                }
            }
            out.push_str(" }");
        }
    }
}

fn write_chan(out: &mut String, dir: ChanDir, elem: &GoType, local_path: &str) {
    let needs_parens = matches!(dir, ChanDir::Both)
        && matches!(
            elem,
            GoType::Chan {
                dir: ChanDir::Recv,
                ..
            }
        );
    out.push_str(match dir {
        ChanDir::Both => "chan ",
        ChanDir::Send => "chan<- ",
        ChanDir::Recv => "<-chan ",
    });
    if needs_parens {
        out.push('(');
        write_type(out, elem, local_path);
        out.push(')');
    } else {
        write_type(out, elem, local_path);
    }
}

fn write_signature(
    out: &mut String,
    params: &[GoType],
    results: &[GoType],
    variadic: bool,
    local_path: &str,
) {
    out.push('(');
    for (index, param) in params.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let is_last = index + 1 == params.len();
        match param {
            GoType::Slice { elem } if variadic && is_last => {
                out.push_str("...");
                write_type(out, elem, local_path);
            }
            other => write_type(out, other, local_path),
        }
    }
    out.push(')');

    match results {
        [] => {}
        [single] => {
            out.push(' ');
            write_type(out, single, local_path);
        }
        many => {
            out.push_str(" (");
            write_list(out, many, local_path);
            out.push(')');
        }
    }
}

fn write_struct(out: &mut String, fields: &[StructField], local_path: &str) {
    if fields.is_empty() {
        out.push_str("struct{}");
        return;
    }
    out.push_str("struct{ ");
    let mut first = true;
    for field in fields {
        separate(out, &mut first);
        if !field.embedded {
            out.push_str(&field.name);
            out.push(' ');
        }
        write_type(out, &field.ty, local_path);
        if let Some(tag) = &field.tag {
            out.push(' ');
            out.push_str(&quote_tag(tag));
        }
    }
    out.push_str(" }");
}

fn write_list(out: &mut String, types: &[GoType], local_path: &str) {
    for (index, ty) in types.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        write_type(out, ty, local_path);
    }
}

fn separate(out: &mut String, first: &mut bool) {
    if !*first {
        out.push_str("; ");
    }
    *first = false;
}

/// Quotes a struct tag as a Go string literal, preferring a raw literal.
fn quote_tag(tag: &str) -> String {
    if !tag.contains('`') && !tag.contains('\r') {
        return format!("`{tag}`");
    }
    let mut quoted = String::with_capacity(tag.len() + 2);
    quoted.push('"');
    for ch in tag.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch.is_control() => {
                quoted.push_str(&format!("\\u{:04x}", u32::from(ch)));
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
