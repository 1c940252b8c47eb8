use crate::graphql::schema::SchemaNode;
use plain_objects::PlainObjectsGenerator;

mod enumeration;
mod field;
pub mod plain_objects;

pub use plain_objects::{generate_plain_objects_declaration, PLAIN_OBJECTS};

const HEADER: &str = "/* eslint-disable */
// This file was automatically generated and should not be edited.

";

pub struct Compile {
    pub filename: String,
    pub contents: String,
}

#[derive(Debug)]
pub struct CompileOptions<'a> {
    pub container_name: &'a str,
    pub emit_enums: bool,
}

impl Default for CompileOptions<'_> {
    fn default() -> Self {
        CompileOptions {
            container_name: PLAIN_OBJECTS,
            emit_enums: false,
        }
    }
}

/// Compile a whole generated module for the schema named `name`.
pub fn compile(name: &str, nodes: &[SchemaNode], options: &CompileOptions) -> Compile {
    let generator = PlainObjectsGenerator::new(nodes).with_container_name(options.container_name);
    let mut type_defs = if options.emit_enums {
        enumeration::enum_defs_from_nodes(nodes)
    } else {
        Vec::new()
    };
    type_defs.push(generator.declaration(nodes));
    Compile {
        filename: format!("{}.ts", name),
        contents: format!("{}{}", HEADER, type_defs.join("\n\n")),
    }
}
