//! The plain objects container: one exported type alias indexing the shape of
//! every schema type by its name.
use super::field::{compile_inline_documentation, compile_scalar};
use crate::graphql::schema::{FieldNode, NodeKind, SchemaNode};

/// Default name of the generated container type.
pub const PLAIN_OBJECTS: &str = "PlainObjects";

const ENTRY_SEPARATOR: &str = ",\n\t";

pub struct PlainObjectsGenerator<'a> {
    container_name: &'a str,
    root_nodes: &'a [SchemaNode],
}

impl<'a> PlainObjectsGenerator<'a> {
    pub fn new(root_nodes: &'a [SchemaNode]) -> Self {
        PlainObjectsGenerator {
            container_name: PLAIN_OBJECTS,
            root_nodes,
        }
    }

    pub fn with_container_name(mut self, container_name: &'a str) -> Self {
        self.container_name = container_name;
        self
    }

    fn resolve_value_type(&self, type_name: &str) -> String {
        format!("{}[\"{}\"]", self.container_name, type_name)
    }

    pub fn resolve_field(&self, field: &FieldNode) -> String {
        let field_type = &field.field_type;
        let is_array = field_type.is_array();
        let is_optional = if is_array {
            !field_type.is_array_required()
        } else {
            !field_type.is_required()
        };
        let value_type = compile_scalar(&field_type.name)
            .map(String::from)
            .unwrap_or_else(|| self.resolve_value_type(&field_type.name));
        let value_type = match (is_array, field_type.is_required()) {
            (true, false) => format!("({value_type} | undefined)[]"),
            (true, true) => format!("{value_type}[]"),
            (false, _) => value_type,
        };
        format!(
            "{}\t{}{}:{}",
            compile_inline_documentation(&field.description, "\t"),
            field.name,
            if is_optional { "?" } else { "" },
            value_type,
        )
    }

    fn resolve_fields(&self, fields: &[FieldNode], separator: &str) -> String {
        fields
            .iter()
            .map(|field| self.resolve_field(field))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn implementor_names(&self, interface_name: &str) -> Vec<&str> {
        self.root_nodes
            .iter()
            .filter(|root| root.implements(interface_name))
            .map(|root| root.name.as_str())
            .collect()
    }

    /// The container entry for one node, or an empty string for nodes that have no shape.
    pub fn resolve_node(&self, node: &SchemaNode) -> String {
        if !node.kind.is_type() {
            return String::new();
        }
        let doc = compile_inline_documentation(&node.description, "");
        let name = &node.name;
        let fields = node.fields();
        if fields.is_empty() {
            return format!("{doc}[\"{name}\"]:any");
        }
        match node.kind {
            NodeKind::DirectiveDefinition | NodeKind::Comment => String::new(),
            NodeKind::UnionTypeDefinition => {
                let members = fields
                    .iter()
                    .map(|member| member.name.as_str())
                    .collect::<Vec<_>>();
                format!("{doc}[\"{name}\"]: {}", members.join(" | "))
            }
            NodeKind::EnumTypeDefinition => format!("{doc}[\"{name}\"]:{name}"),
            NodeKind::InterfaceTypeDefinition => {
                let shape = format!(
                    "{doc}[\"{name}\"]: {{\n{}\n}}",
                    self.resolve_fields(fields, ";\n")
                );
                let implementors = self.implementor_names(name);
                if implementors.is_empty() {
                    shape
                } else {
                    format!("{shape} & ({})", implementors.join(" | "))
                }
            }
            NodeKind::InputObjectTypeDefinition
            | NodeKind::ObjectTypeDefinition
            | NodeKind::ScalarTypeDefinition => {
                format!(
                    "{doc}[\"{name}\"]: {{\n{}\n}}",
                    self.resolve_fields(fields, ",\n")
                )
            }
        }
    }

    pub fn declaration(&self, nodes: &[SchemaNode]) -> String {
        let entries = nodes
            .iter()
            .map(|node| self.resolve_node(node))
            .filter(|entry| !entry.is_empty())
            .collect::<Vec<_>>();
        format!(
            "export type {} = {{\n    {}\n  }}",
            self.container_name,
            entries.join(ENTRY_SEPARATOR)
        )
    }
}

pub fn generate_plain_objects_declaration(
    nodes: &[SchemaNode],
    root_nodes: &[SchemaNode],
) -> String {
    PlainObjectsGenerator::new(root_nodes).declaration(nodes)
}
