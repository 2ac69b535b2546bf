//! Name and type transformations for generated TypeScript.
//!
//! All functions are total: any input string produces some output.

/// Extension of generated source files.
pub const SOURCE_EXTENSION: &str = ".ts";

/// TypeScript keywords that cannot be used as plain identifiers.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract", "any", "as", "asserts", "boolean", "break", "case", "catch", "class",
    "const", "continue", "debugger", "declare", "default", "delete", "do", "else",
    "enum", "export", "extends", "false", "finally", "for", "from", "function",
    "get", "if", "implements", "import", "in", "instanceof", "interface", "is",
    "keyof", "let", "module", "namespace", "never", "new", "null", "number",
    "object", "package", "private", "protected", "public", "readonly", "require",
    "return", "set", "static", "string", "super", "switch", "symbol", "this",
    "throw", "true", "try", "type", "typeof", "undefined", "unique", "unknown",
    "var", "void", "while", "with", "yield",
];

/// Maps a semantic data type tag to a TypeScript type.
///
/// Unknown or missing tags map to `any`.
pub fn convert_data_type(tag: Option<&str>) -> &'static str {
    let Some(tag) = tag else {
        return "any";
    };
    match tag.to_lowercase().as_str() {
        "boolean" | "bool" => "boolean",
        "string" | "id" | "uuid" | "state" => "string",
        "integer" | "int" | "real" | "float" | "double" => "number",
        "date" | "timestamp" | "datetime" => "Date",
        _ => "any",
    }
}

/// Converts `some_name`, `some-name` or `some name` to `SomeName`.
///
/// The tail of every word is lowercased, so `NIM` becomes `Nim`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    let rest = chars.as_str().to_lowercase();
                    first.to_uppercase().chain(rest.chars()).collect()
                }
            }
        })
        .collect()
}

/// Converts a name to camelCase.
pub fn to_camel_case(s: &str) -> String {
    let pascal = to_pascal_case(s);
    let mut chars = pascal.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// `I` followed by the PascalCase class name.
pub fn to_interface_name(class_name: &str) -> String {
    format!("I{}", to_pascal_case(class_name))
}

/// Module name of a type: PascalCase/camelCase turned into kebab-case.
///
/// A hyphen is inserted where a lowercase ASCII letter is followed by an
/// uppercase one. Empty names map to `unknown`.
pub fn to_file_stem(name: &str) -> String {
    if name.is_empty() {
        return "unknown".to_string();
    }

    let mut result = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
            result.push('-');
        }
        result.extend(c.to_lowercase());
        prev = Some(c);
    }
    result
}

/// File name of a type's module.
pub fn to_file_name(name: &str) -> String {
    format!("{}{}", to_file_stem(name), SOURCE_EXTENSION)
}

/// Escapes text for a quoted string literal.
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes text for the body of a template literal.
///
/// `${...}` placeholders are left intact.
pub fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\").replace('`', "\\`")
}

/// Escapes text for a template literal that must not interpolate.
pub fn escape_template_text(s: &str) -> String {
    escape_template(s).replace("${", "\\${")
}

/// Case-insensitive check against the TypeScript keyword list.
pub fn is_reserved_keyword(name: &str) -> bool {
    let lower = name.to_lowercase();
    RESERVED_KEYWORDS.contains(&lower.as_str())
}

/// Appends `_` to names that collide with a keyword.
pub fn escape_name(name: &str) -> String {
    if is_reserved_keyword(name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Identifier for a parameter or local: camelCase, keyword-escaped.
pub fn to_parameter_name(name: &str) -> String {
    escape_name(&to_camel_case(name))
}

/// Lines of a JSDoc block for a description, or `None` when it is blank.
pub fn doc_lines(description: Option<&str>) -> Option<Vec<String>> {
    let description = description?;
    if description.trim().is_empty() {
        return None;
    }
    Some(description.lines().map(|line| line.trim().to_string()).collect())
}
