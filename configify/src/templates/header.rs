//! Header template: package clause, imports, constructor and `Option`.

use super::HeaderValues;

/// Marker recognised by Go tooling as generated code.
pub const GENERATED_MARKER: &str = "// Code generated by configify; DO NOT EDIT.";

/// Renders the file header for the target type.
#[must_use]
pub fn render_header(values: &HeaderValues<'_>) -> String {
    let HeaderValues {
        package,
        target,
        imports,
        locals,
    } = *values;
    let cfg = &locals.target;
    let options = &locals.options;
    let option = &locals.option;

    let mut out = String::with_capacity(1024);
    out.push_str(GENERATED_MARKER);
    out.push_str("\n\npackage ");
    out.push_str(package);
    out.push_str("\n\n");

    if !imports.is_empty() {
        out.push_str("import (\n");
        for (path, name) in imports.iter() {
            out.push('\t');
            if needs_alias(path, name) {
                out.push_str(name);
                out.push(' ');
            }
            out.push('"');
            out.push_str(path);
            out.push_str("\"\n");
        }
        out.push_str(")\n\n");
    }

    out.push_str(&format!(
        concat!(
            "// New returns a new {target} with every option applied in order.\n",
            "func New({options} ...Option) *{target} {{\n",
            "\t{cfg} := &{target}{{}}\n",
            "\t{cfg}.Apply({options}...)\n",
            "\treturn {cfg}\n",
            "}}\n",
            "\n",
            "// Apply applies each option to {cfg} in order; later options override earlier ones.\n",
            "func ({cfg} *{target}) Apply({options} ...Option) {{\n",
            "\tfor _, {option} := range {options} {{\n",
            "\t\t{option}.Apply({cfg})\n",
            "\t}}\n",
            "}}\n",
            "\n",
            "// Option configures a {target}.\n",
            "type Option interface {{\n",
            "\tApply(*{target})\n",
            "}}\n",
        ),
        target = target,
        cfg = cfg,
        options = options,
        option = option,
    ));
    out
}

/// Whether an import needs an explicit name because its path does not end in
/// the package name (`gopkg.in/yaml.v3` declares `yaml`).
fn needs_alias(path: &str, name: &str) -> bool {
    path.rsplit('/').next() != Some(name)
}
