//! Renders the TypeScript syntax tree as source text.
//!
//! Two-space indentation, single-quoted strings, one blank line between
//! top-level declarations and between class members groups.

use super::ts_ast::{
    BinaryOp, ClassDecl, ClassProperty, Constructor, Expr, Import, InterfaceDecl, Item,
    MethodDecl, Param, PropertySignature, Stmt, TsModule, TsType,
};
use super::ts_names::{escape_string, escape_template, escape_template_text};

/// Comment placed above compiled state machine methods.
const STATE_METHODS_COMMENT: &str = "// State Machine Methods";

/// Renders a whole module.
pub fn print_module(module: &TsModule) -> String {
    let mut output = String::new();

    if !module.header.is_empty() {
        output.push_str(&print_block_comment(&module.header, 0));
    }

    if !module.imports.is_empty() {
        if !output.is_empty() {
            output.push('\n');
        }
        for import in &module.imports {
            output.push_str(&print_import(import));
        }
    }

    let mut previous_was_export = false;
    for item in &module.items {
        let is_export = matches!(item, Item::ExportNamed { .. } | Item::ExportAll { .. });
        if !output.is_empty() && !(is_export && previous_was_export) {
            output.push('\n');
        }
        output.push_str(&print_item(item));
        previous_was_export = is_export;
    }

    output
}

/// Splits comment text on every JavaScript line terminator.
fn comment_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r', '\u{2028}', '\u{2029}'])
}

fn print_block_comment(lines: &[String], indent: usize) -> String {
    let spaces = "  ".repeat(indent);
    let mut output = format!("{}/**\n", spaces);
    for line in lines.iter().flat_map(|line| comment_lines(line)) {
        if line.is_empty() {
            output.push_str(&format!("{} *\n", spaces));
        } else {
            // `*/` would close the block early
            output.push_str(&format!("{} * {}\n", spaces, line.replace("*/", "*\\/")));
        }
    }
    output.push_str(&format!("{} */\n", spaces));
    output
}

fn print_import(import: &Import) -> String {
    format!("import {{ {} }} from '{}';\n", import.names.join(", "), import.from)
}

fn print_item(item: &Item) -> String {
    match item {
        Item::Interface(decl) => print_interface(decl),
        Item::Class(decl) => print_class(decl),
        Item::ExportNamed { names, from } => {
            format!("export {{ {} }} from '{}';\n", names.join(", "), from)
        }
        Item::ExportAll { from } => format!("export * from '{}';\n", from),
    }
}

/// Renders an interface declaration.
pub fn print_interface(decl: &InterfaceDecl) -> String {
    let mut output = format!("export interface {}", decl.name);
    if let Some(parent) = &decl.extends {
        output.push_str(&format!(" extends {}", parent));
    }
    output.push_str(" {\n");

    for property in &decl.properties {
        output.push_str(&print_property_signature(property));
    }

    output.push_str("}\n");
    output
}

fn print_property_signature(property: &PropertySignature) -> String {
    let optional_marker = if property.optional { "?" } else { "" };
    format!(
        "  {}{}: {};\n",
        property.name,
        optional_marker,
        print_type(&property.typ)
    )
}

/// Renders a class declaration with its members.
pub fn print_class(decl: &ClassDecl) -> String {
    let mut output = String::new();

    if !decl.doc.is_empty() {
        output.push_str(&print_block_comment(&decl.doc, 0));
    }

    output.push_str("export ");
    if decl.is_abstract {
        output.push_str("abstract ");
    }
    output.push_str(&format!("class {}", decl.name));
    if let Some(parent) = &decl.extends {
        output.push_str(&format!(" extends {}", parent));
    }
    if !decl.implements.is_empty() {
        output.push_str(&format!(" implements {}", decl.implements.join(", ")));
    }
    output.push_str(" {\n");

    for property in &decl.properties {
        output.push_str(&print_class_property(property));
    }
    if !decl.properties.is_empty() {
        output.push('\n');
    }

    output.push_str(&print_constructor(&decl.constructor));

    if let Some(methods) = &decl.state_methods {
        output.push_str(&format!("\n  {}\n", STATE_METHODS_COMMENT));
        let rendered: Vec<String> = methods.iter().map(print_method).collect();
        output.push_str(&rendered.join("\n"));
    }

    output.push_str("}\n");
    output
}

fn print_class_property(property: &ClassProperty) -> String {
    let optional_marker = if property.optional { "?" } else { "" };
    let mut output = format!(
        "  public {}{}: {}",
        property.name,
        optional_marker,
        print_type(&property.typ)
    );
    if let Some(init) = &property.initializer {
        output.push_str(&format!(" = {}", print_expression(init)));
    }
    output.push_str(";\n");
    output
}

fn print_params(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, print_type(&p.typ)))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_constructor(constructor: &Constructor) -> String {
    let mut output = format!("  constructor({}) {{\n", print_params(&constructor.params));
    for stmt in &constructor.body {
        output.push_str(&print_statement(stmt, 2));
    }
    output.push_str("  }\n");
    output
}

/// Renders a public method at class-member indentation.
pub fn print_method(method: &MethodDecl) -> String {
    let mut output = format!(
        "  public {}({}): {} {{\n",
        method.name,
        print_params(&method.params),
        print_type(&method.return_type)
    );
    for stmt in &method.body {
        output.push_str(&print_statement(stmt, 2));
    }
    output.push_str("  }\n");
    output
}

/// Renders a type annotation.
pub fn print_type(typ: &TsType) -> String {
    match typ {
        TsType::Named(name) => name.clone(),
        TsType::StringUnion(values) if values.is_empty() => "string".to_string(),
        TsType::StringUnion(values) => values
            .iter()
            .map(|v| format!("'{}'", escape_string(v)))
            .collect::<Vec<_>>()
            .join(" | "),
    }
}

/// Renders a statement at the given indentation level.
pub fn print_statement(stmt: &Stmt, indent: usize) -> String {
    let spaces = "  ".repeat(indent);

    match stmt {
        Stmt::If {
            condition,
            then_branch,
        } => {
            let mut output = format!("{}if ({}) {{\n", spaces, print_expression(condition));
            for s in then_branch {
                output.push_str(&print_statement(s, indent + 1));
            }
            output.push_str(&format!("{}}}\n", spaces));
            output
        }
        Stmt::Assign { target, value } => {
            format!(
                "{}{} = {};\n",
                spaces,
                print_expression(target),
                print_expression(value)
            )
        }
        Stmt::Expression(expr) => format!("{}{};\n", spaces, print_expression(expr)),
        Stmt::Return(expr) => format!("{}return {};\n", spaces, print_expression(expr)),
        Stmt::Comment(text) => comment_lines(text)
            .map(|line| format!("{}// {}\n", spaces, line))
            .collect(),
        Stmt::Disabled(inner) => comment_lines(print_statement(inner, 0).trim_end_matches('\n'))
            .map(|line| format!("{}// {}\n", spaces, line))
            .collect(),
    }
}

/// Renders an expression.
pub fn print_expression(expr: &Expr) -> String {
    match expr {
        Expr::StringLiteral(s) => format!("'{}'", escape_string(s)),
        Expr::Verbatim(text) => text.clone(),
        Expr::Identifier(name) => name.clone(),
        Expr::Member(name) => format!("this.{}", name),
        Expr::Template(body) => format!("`{}`", escape_template(body)),
        Expr::TemplateText(body) => format!("`{}`", escape_template_text(body)),
        Expr::Concat(parts) => parts
            .iter()
            .map(print_expression)
            .collect::<Vec<_>>()
            .join(" + "),
        Expr::Call { callee, arguments } => {
            let args: Vec<String> = arguments.iter().map(print_expression).collect();
            format!("{}({})", callee, args.join(", "))
        }
        Expr::Binary {
            left,
            operator,
            right,
        } => {
            let op = match operator {
                BinaryOp::StrictEq => "===",
            };
            format!("{} {} {}", print_expression(left), op, print_expression(right))
        }
    }
}
