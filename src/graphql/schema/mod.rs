//! Produce consumable schema nodes from GraphQL SDL
use graphql_parser::schema as parsed_schema;
use graphql_parser::Pos;
use std::collections::HashMap;

pub mod field;

pub use field::{FieldNode, FieldType, FieldTypeOption};

pub type Documentation = Option<String>;

#[derive(Debug)]
pub enum Error {
    NestedListUnsupported { field_name: String, position: Pos },
    ExtensionOfUnknownType { type_name: String, position: Pos },
    ExtensionOfWrongKind { type_name: String, position: Pos },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    DirectiveDefinition,
    Comment,
    UnionTypeDefinition,
    EnumTypeDefinition,
    InputObjectTypeDefinition,
    InterfaceTypeDefinition,
    ObjectTypeDefinition,
    ScalarTypeDefinition,
}

impl NodeKind {
    pub fn is_type(&self) -> bool {
        !matches!(self, NodeKind::DirectiveDefinition | NodeKind::Comment)
    }
}

#[derive(Debug, Clone)]
pub struct SchemaNode {
    pub name: String,
    pub description: Documentation,
    pub kind: NodeKind,
    pub interfaces: Option<Vec<String>>,
    pub args: Option<Vec<FieldNode>>,
    pub position: Option<Pos>,
}

impl SchemaNode {
    pub fn new(name: &str, kind: NodeKind) -> Self {
        SchemaNode {
            name: name.to_string(),
            description: None,
            kind,
            interfaces: None,
            args: None,
            position: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn with_args(mut self, args: Vec<FieldNode>) -> Self {
        self.args = Some(args);
        self
    }

    pub fn with_interfaces(mut self, interfaces: &[&str]) -> Self {
        self.interfaces = Some(interfaces.iter().map(|name| name.to_string()).collect());
        self
    }

    pub fn implements(&self, interface_name: &str) -> bool {
        self.interfaces
            .as_ref()
            .map_or(false, |names| names.iter().any(|name| name == interface_name))
    }

    pub fn fields(&self) -> &[FieldNode] {
        self.args.as_deref().unwrap_or(&[])
    }

    fn extend_args(&mut self, mut more: Vec<FieldNode>) {
        self.args.get_or_insert_with(Vec::new).append(&mut more);
    }

    fn extend_interfaces(&mut self, more: &[String]) {
        if !more.is_empty() {
            self.interfaces
                .get_or_insert_with(Vec::new)
                .extend(more.iter().cloned());
        }
    }
}

/// Descriptions are emitted on a single `/** */` line.
pub(crate) fn process_description(description: &Option<String>) -> Documentation {
    description.as_ref().and_then(|docs| {
        let processed = docs
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .replace("*/", "");
        if processed.is_empty() {
            None
        } else {
            Some(processed)
        }
    })
}

fn optional_interfaces(names: &[String]) -> Option<Vec<String>> {
    if names.is_empty() {
        None
    } else {
        Some(names.to_vec())
    }
}

fn fields_from_parsed(fields: &[parsed_schema::Field<'_, String>]) -> Result<Vec<FieldNode>, Error> {
    fields.iter().map(FieldNode::try_from_field).collect()
}

fn input_fields_from_parsed(
    fields: &[parsed_schema::InputValue<'_, String>],
) -> Result<Vec<FieldNode>, Error> {
    fields.iter().map(FieldNode::try_from_input_value).collect()
}

fn union_members(names: &[String], position: Pos) -> Vec<FieldNode> {
    names
        .iter()
        .map(|name| FieldNode::named_member(name, None, position))
        .collect()
}

fn enum_members(values: &[parsed_schema::EnumValue<'_, String>]) -> Vec<FieldNode> {
    values
        .iter()
        .map(|value| {
            FieldNode::named_member(
                &value.name,
                process_description(&value.description),
                value.position,
            )
        })
        .collect()
}

fn node_from_type_definition(
    definition: &parsed_schema::TypeDefinition<'_, String>,
) -> Result<SchemaNode, Error> {
    use parsed_schema::TypeDefinition;
    let node = match definition {
        TypeDefinition::Scalar(scalar) => SchemaNode {
            name: scalar.name.clone(),
            description: process_description(&scalar.description),
            kind: NodeKind::ScalarTypeDefinition,
            interfaces: None,
            args: None,
            position: Some(scalar.position),
        },
        TypeDefinition::Object(object) => SchemaNode {
            name: object.name.clone(),
            description: process_description(&object.description),
            kind: NodeKind::ObjectTypeDefinition,
            interfaces: optional_interfaces(&object.implements_interfaces),
            args: Some(fields_from_parsed(&object.fields)?),
            position: Some(object.position),
        },
        TypeDefinition::Interface(interface) => SchemaNode {
            name: interface.name.clone(),
            description: process_description(&interface.description),
            kind: NodeKind::InterfaceTypeDefinition,
            interfaces: optional_interfaces(&interface.implements_interfaces),
            args: Some(fields_from_parsed(&interface.fields)?),
            position: Some(interface.position),
        },
        TypeDefinition::Union(union) => SchemaNode {
            name: union.name.clone(),
            description: process_description(&union.description),
            kind: NodeKind::UnionTypeDefinition,
            interfaces: None,
            args: Some(union_members(&union.types, union.position)),
            position: Some(union.position),
        },
        TypeDefinition::Enum(enumeration) => SchemaNode {
            name: enumeration.name.clone(),
            description: process_description(&enumeration.description),
            kind: NodeKind::EnumTypeDefinition,
            interfaces: None,
            args: Some(enum_members(&enumeration.values)),
            position: Some(enumeration.position),
        },
        TypeDefinition::InputObject(input) => SchemaNode {
            name: input.name.clone(),
            description: process_description(&input.description),
            kind: NodeKind::InputObjectTypeDefinition,
            interfaces: None,
            args: Some(input_fields_from_parsed(&input.fields)?),
            position: Some(input.position),
        },
    };
    Ok(node)
}

/// Directives have no plain object shape, so their arguments are not converted.
fn node_from_directive_definition(
    directive: &parsed_schema::DirectiveDefinition<'_, String>,
) -> SchemaNode {
    SchemaNode {
        name: directive.name.clone(),
        description: process_description(&directive.description),
        kind: NodeKind::DirectiveDefinition,
        interfaces: None,
        args: None,
        position: Some(directive.position),
    }
}

fn apply_extension(
    nodes: &mut [SchemaNode],
    index_by_name: &HashMap<String, usize>,
    extension: &parsed_schema::TypeExtension<'_, String>,
) -> Result<(), Error> {
    use parsed_schema::TypeExtension;
    let (type_name, position, expected_kind) = match extension {
        TypeExtension::Scalar(ext) => (&ext.name, ext.position, NodeKind::ScalarTypeDefinition),
        TypeExtension::Object(ext) => (&ext.name, ext.position, NodeKind::ObjectTypeDefinition),
        TypeExtension::Interface(ext) => {
            (&ext.name, ext.position, NodeKind::InterfaceTypeDefinition)
        }
        TypeExtension::Union(ext) => (&ext.name, ext.position, NodeKind::UnionTypeDefinition),
        TypeExtension::Enum(ext) => (&ext.name, ext.position, NodeKind::EnumTypeDefinition),
        TypeExtension::InputObject(ext) => {
            (&ext.name, ext.position, NodeKind::InputObjectTypeDefinition)
        }
    };
    let node = index_by_name
        .get(type_name)
        .and_then(|index| nodes.get_mut(*index))
        .ok_or_else(|| Error::ExtensionOfUnknownType {
            type_name: type_name.clone(),
            position,
        })?;
    if node.kind != expected_kind {
        return Err(Error::ExtensionOfWrongKind {
            type_name: type_name.clone(),
            position,
        });
    }
    match extension {
        TypeExtension::Scalar(_) => {}
        TypeExtension::Object(ext) => {
            node.extend_interfaces(&ext.implements_interfaces);
            node.extend_args(fields_from_parsed(&ext.fields)?);
        }
        TypeExtension::Interface(ext) => {
            node.extend_interfaces(&ext.implements_interfaces);
            node.extend_args(fields_from_parsed(&ext.fields)?);
        }
        TypeExtension::Union(ext) => node.extend_args(union_members(&ext.types, ext.position)),
        TypeExtension::Enum(ext) => node.extend_args(enum_members(&ext.values)),
        TypeExtension::InputObject(ext) => {
            node.extend_args(input_fields_from_parsed(&ext.fields)?)
        }
    }
    Ok(())
}

/// Lines of `#` comments that sit between definitions rather than inside a body.
fn top_level_comments(contents: &str) -> Vec<(Pos, String)> {
    let mut comments = Vec::new();
    let mut depth = 0usize;
    let mut in_block_string = false;
    for (line_index, line) in contents.lines().enumerate() {
        let trimmed = line.trim_start();
        if depth == 0 && !in_block_string && trimmed.starts_with('#') {
            let position = Pos {
                line: line_index + 1,
                column: line.len() - trimmed.len() + 1,
            };
            comments.push((position, trimmed[1..].trim().to_string()));
            continue;
        }
        let mut chars = line.char_indices().peekable();
        let mut in_string = false;
        while let Some((byte_index, c)) = chars.next() {
            if in_block_string {
                if line[byte_index..].starts_with("\"\"\"") {
                    in_block_string = false;
                    chars.next();
                    chars.next();
                }
                continue;
            }
            if in_string {
                match c {
                    '\\' => {
                        chars.next();
                    }
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '#' => break,
                '"' if line[byte_index..].starts_with("\"\"\"") => {
                    in_block_string = true;
                    chars.next();
                    chars.next();
                }
                '"' => in_string = true,
                '{' | '(' => depth += 1,
                '}' | ')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
    }
    comments
}

/// Build root nodes, in document order, from an SDL document and its source text.
pub fn nodes_from_document(
    document: &parsed_schema::Document<'_, String>,
    contents: &str,
) -> Result<Vec<SchemaNode>, Vec<Error>> {
    let mut positioned = Vec::with_capacity(document.definitions.len());
    let mut extensions = Vec::new();
    let mut errors = Vec::new();
    for definition in &document.definitions {
        let node = match definition {
            parsed_schema::Definition::SchemaDefinition(_) => continue,
            parsed_schema::Definition::TypeExtension(extension) => {
                extensions.push(extension);
                continue;
            }
            parsed_schema::Definition::TypeDefinition(type_def) => {
                node_from_type_definition(type_def)
            }
            parsed_schema::Definition::DirectiveDefinition(directive) => {
                Ok(node_from_directive_definition(directive))
            }
        };
        match node {
            Ok(node) => positioned.push(node),
            Err(error) => errors.push(error),
        }
    }
    positioned.extend(
        top_level_comments(contents)
            .into_iter()
            .map(|(position, text)| SchemaNode {
                name: String::from("comment"),
                description: Some(text),
                kind: NodeKind::Comment,
                interfaces: None,
                args: None,
                position: Some(position),
            }),
    );
    positioned.sort_by_key(|node| node.position.map(|pos| (pos.line, pos.column)));

    let mut index_by_name = HashMap::with_capacity(positioned.len());
    for (index, node) in positioned.iter().enumerate() {
        if node.kind.is_type() {
            index_by_name.entry(node.name.clone()).or_insert(index);
        }
    }
    for extension in extensions {
        if let Err(error) = apply_extension(&mut positioned, &index_by_name, extension) {
            errors.push(error);
        }
    }

    if errors.is_empty() {
        Ok(positioned)
    } else {
        Err(errors)
    }
}
