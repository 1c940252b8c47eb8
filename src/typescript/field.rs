use crate::graphql::schema::Documentation;

/// TypeScript spelling of the built-in GraphQL scalars.
pub fn compile_scalar(type_name: &str) -> Option<&'static str> {
    match type_name {
        "Int" | "Float" => Some("number"),
        "Boolean" => Some("boolean"),
        "ID" | "String" => Some("string"),
        _ => None,
    }
}

/// A one line `/** */` comment, `prefix` placed before the opening marker.
pub fn compile_inline_documentation(docs: &Documentation, prefix: &str) -> String {
    match docs {
        Some(docs) => format!("{prefix}/** {docs} */\n"),
        None => String::new(),
    }
}

pub fn compile_documentation(docs: &Documentation, tab_width: usize) -> String {
    match docs {
        Some(docs) => {
            let tab = " ".repeat(tab_width);
            let processed_desc = docs
                .lines()
                .map(|line| line.trim())
                .filter(|line| !line.is_empty())
                .collect::<Vec<&str>>()
                .join(&format!("\n {}* ", tab))
                .replace("*/", "");
            format!("/**\n {}* {}\n {}*/\n{}", tab, processed_desc, tab, tab)
        }
        None => String::new(),
    }
}
