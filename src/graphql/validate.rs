//! Checks that schema nodes reference each other consistently before generation
use super::schema::{NodeKind, SchemaNode};
use crate::cli::{similar_help_suggestions, PrintableMessage};
use graphql_parser::Pos;
use std::collections::HashMap;
use std::path::Path;

const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "Boolean", "ID", "String"];

#[derive(Debug)]
pub enum Warning {
    InterfaceWithoutImplementors {
        interface_name: String,
        position: Option<Pos>,
    },
}

#[derive(Debug)]
pub enum Error {
    DuplicateTypeName {
        type_name: String,
        position: Option<Pos>,
    },
    UnknownInterface {
        type_name: String,
        interface_name: String,
        position: Option<Pos>,
        possible_names: Vec<String>,
    },
    NotAnInterface {
        type_name: String,
        interface_name: String,
        position: Option<Pos>,
    },
    UnknownFieldType {
        parent_type_name: String,
        field_name: String,
        type_name: String,
        position: Option<Pos>,
        possible_names: Vec<String>,
    },
    UnknownUnionMember {
        union_name: String,
        member_name: String,
        position: Option<Pos>,
        possible_names: Vec<String>,
    },
}

fn message_at(
    is_warning: bool,
    message: &str,
    file_path: &Path,
    contents: &str,
    position: Option<Pos>,
    help_text: Option<&str>,
) -> PrintableMessage {
    match position {
        Some(position) if is_warning => PrintableMessage::new_compile_warning(
            message, file_path, contents, &position, help_text,
        ),
        Some(position) => {
            PrintableMessage::new_compile_error(message, file_path, contents, &position, help_text)
        }
        None => {
            let mut printable = if is_warning {
                PrintableMessage::new_simple_compile_warning(message)
            } else {
                PrintableMessage::new_simple_compile_error(message)
            };
            printable.with_source_information(file_path, None);
            printable
        }
    }
}

impl From<(&str, &Path, Warning)> for PrintableMessage {
    fn from((contents, file_path, warning): (&str, &Path, Warning)) -> Self {
        match warning {
            Warning::InterfaceWithoutImplementors {
                interface_name,
                position,
            } => message_at(
                true,
                &format!("interface `{interface_name}` has no implementors"),
                file_path,
                contents,
                position,
                Some("Its generated entry only describes the interface's own fields."),
            ),
        }
    }
}

impl From<(&str, &Path, Error)> for PrintableMessage {
    fn from((contents, file_path, error): (&str, &Path, Error)) -> Self {
        match error {
            Error::DuplicateTypeName {
                type_name,
                position,
            } => message_at(
                false,
                &format!("the name `{type_name}` is defined multiple times"),
                file_path,
                contents,
                position,
                Some("Type names must be unique within a schema."),
            ),
            Error::UnknownInterface {
                type_name,
                interface_name,
                position,
                possible_names,
            } => {
                let extra = similar_help_suggestions(&interface_name, possible_names.into_iter())
                    .unwrap_or_default();
                message_at(
                    false,
                    &format!("unknown interface `{interface_name}` implemented by `{type_name}`"),
                    file_path,
                    contents,
                    position,
                    Some(&format!("This interface is not defined in the schema.{extra}")),
                )
            }
            Error::NotAnInterface {
                type_name,
                interface_name,
                position,
            } => message_at(
                false,
                &format!("`{type_name}` implements `{interface_name}`, which is not an interface"),
                file_path,
                contents,
                position,
                Some("Only interface types can be implemented."),
            ),
            Error::UnknownFieldType {
                parent_type_name,
                field_name,
                type_name,
                position,
                possible_names,
            } => {
                let extra = similar_help_suggestions(&type_name, possible_names.into_iter())
                    .unwrap_or_default();
                message_at(
                    false,
                    &format!("unknown type `{type_name}` for field `{field_name}`"),
                    file_path,
                    contents,
                    position,
                    Some(&format!("Check the fields of `{parent_type_name}`.{extra}")),
                )
            }
            Error::UnknownUnionMember {
                union_name,
                member_name,
                position,
                possible_names,
            } => {
                let extra = similar_help_suggestions(&member_name, possible_names.into_iter())
                    .unwrap_or_default();
                message_at(
                    false,
                    &format!("unknown member `{member_name}` in union `{union_name}`"),
                    file_path,
                    contents,
                    position,
                    Some(&format!("Union members must be defined types.{extra}")),
                )
            }
        }
    }
}

pub type ValidateResult = std::result::Result<Vec<Warning>, (Vec<Error>, Vec<Warning>)>;

struct Validator<'a> {
    kinds_by_name: HashMap<&'a str, NodeKind>,
    errors: Vec<Error>,
    warnings: Vec<Warning>,
}

impl<'a> Validator<'a> {
    fn type_names(&self) -> Vec<String> {
        let mut names = self
            .kinds_by_name
            .keys()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn is_known_type(&self, type_name: &str) -> bool {
        BUILTIN_SCALARS.contains(&type_name) || self.kinds_by_name.contains_key(type_name)
    }

    fn check_interfaces(&mut self, node: &SchemaNode) {
        for interface_name in node.interfaces.iter().flatten() {
            let error = match self.kinds_by_name.get(interface_name.as_str()) {
                Some(NodeKind::InterfaceTypeDefinition) => continue,
                Some(_) => Error::NotAnInterface {
                    type_name: node.name.clone(),
                    interface_name: interface_name.clone(),
                    position: node.position,
                },
                None => Error::UnknownInterface {
                    type_name: node.name.clone(),
                    interface_name: interface_name.clone(),
                    position: node.position,
                    possible_names: self.type_names(),
                },
            };
            self.errors.push(error);
        }
    }

    fn check_field_types(&mut self, node: &SchemaNode) {
        for field in node.fields() {
            let type_name = &field.field_type.name;
            if self.is_known_type(type_name) {
                continue;
            }
            let possible_names = self.type_names();
            self.errors.push(Error::UnknownFieldType {
                parent_type_name: node.name.clone(),
                field_name: field.name.clone(),
                type_name: type_name.clone(),
                position: field.position.or(node.position),
                possible_names,
            });
        }
    }

    fn check_union_members(&mut self, node: &SchemaNode) {
        for member in node.fields() {
            if self.kinds_by_name.contains_key(member.name.as_str()) {
                continue;
            }
            let possible_names = self.type_names();
            self.errors.push(Error::UnknownUnionMember {
                union_name: node.name.clone(),
                member_name: member.name.clone(),
                position: member.position.or(node.position),
                possible_names,
            });
        }
    }

    fn check_implementors(&mut self, node: &SchemaNode, nodes: &[SchemaNode]) {
        if !nodes.iter().any(|other| other.implements(&node.name)) {
            self.warnings.push(Warning::InterfaceWithoutImplementors {
                interface_name: node.name.clone(),
                position: node.position,
            });
        }
    }
}

/// Validate root nodes, collecting every error rather than stopping at the first.
pub fn validate(nodes: &[SchemaNode]) -> ValidateResult {
    let mut validator = Validator {
        kinds_by_name: HashMap::with_capacity(nodes.len()),
        errors: Vec::new(),
        warnings: Vec::new(),
    };
    for node in nodes.iter().filter(|node| node.kind.is_type()) {
        if validator
            .kinds_by_name
            .insert(node.name.as_str(), node.kind)
            .is_some()
        {
            validator.errors.push(Error::DuplicateTypeName {
                type_name: node.name.clone(),
                position: node.position,
            });
        }
    }
    for node in nodes {
        match node.kind {
            NodeKind::Comment
            | NodeKind::DirectiveDefinition
            | NodeKind::ScalarTypeDefinition
            | NodeKind::EnumTypeDefinition => {}
            NodeKind::UnionTypeDefinition => validator.check_union_members(node),
            NodeKind::InputObjectTypeDefinition => validator.check_field_types(node),
            NodeKind::ObjectTypeDefinition => {
                validator.check_interfaces(node);
                validator.check_field_types(node);
            }
            NodeKind::InterfaceTypeDefinition => {
                validator.check_interfaces(node);
                validator.check_field_types(node);
                validator.check_implementors(node, nodes);
            }
        }
    }
    let Validator {
        errors, warnings, ..
    } = validator;
    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err((errors, warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::schema::{FieldNode, FieldType, FieldTypeOption};

    fn field(name: &str, type_name: &str) -> FieldNode {
        FieldNode::new(name, FieldType::new(type_name, &[FieldTypeOption::Required]))
    }

    #[test]
    fn accepts_consistent_schema() {
        let nodes = vec![
            SchemaNode::new("Node", NodeKind::InterfaceTypeDefinition)
                .with_args(vec![field("id", "ID")]),
            SchemaNode::new("User", NodeKind::ObjectTypeDefinition)
                .with_interfaces(&["Node"])
                .with_args(vec![field("id", "ID"), field("born", "Date")]),
            SchemaNode::new("Date", NodeKind::ScalarTypeDefinition),
            SchemaNode::new("Result", NodeKind::UnionTypeDefinition)
                .with_args(vec![field("User", "User")]),
            SchemaNode::new("comment", NodeKind::Comment),
        ];
        let warnings = validate(&nodes).expect("valid schema");
        assert!(warnings.is_empty());
    }

    #[test]
    fn collects_every_error() {
        let nodes = vec![
            SchemaNode::new("Node", NodeKind::InterfaceTypeDefinition)
                .with_args(vec![field("id", "ID")]),
            SchemaNode::new("User", NodeKind::ObjectTypeDefinition)
                .with_interfaces(&["Nod", "Post"])
                .with_args(vec![field("friend", "Usr")]),
            SchemaNode::new("Post", NodeKind::ObjectTypeDefinition)
                .with_args(vec![field("id", "ID")]),
            SchemaNode::new("Post", NodeKind::ObjectTypeDefinition)
                .with_args(vec![field("id", "ID")]),
            SchemaNode::new("Result", NodeKind::UnionTypeDefinition)
                .with_args(vec![field("Missing", "Missing")]),
        ];
        let (errors, warnings) = validate(&nodes).expect_err("invalid schema");
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(matches!(&errors[0], Error::DuplicateTypeName { type_name, .. } if type_name == "Post"));
        assert!(matches!(
            &errors[1],
            Error::UnknownInterface { interface_name, possible_names, .. }
                if interface_name == "Nod" && possible_names.contains(&"Node".to_string())
        ));
        assert!(matches!(&errors[2], Error::NotAnInterface { interface_name, .. } if interface_name == "Post"));
        assert!(matches!(&errors[3], Error::UnknownFieldType { type_name, .. } if type_name == "Usr"));
        assert!(matches!(&errors[4], Error::UnknownUnionMember { member_name, .. } if member_name == "Missing"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn warns_about_interfaces_without_implementors() {
        let nodes = vec![SchemaNode::new("Lonely", NodeKind::InterfaceTypeDefinition)
            .with_args(vec![field("id", "ID")])];
        let warnings = validate(&nodes).expect("valid schema");
        assert!(matches!(
            &warnings[..],
            [Warning::InterfaceWithoutImplementors { interface_name, .. }] if interface_name == "Lonely"
        ));
    }

    #[test]
    fn unknown_names_render_suggestions() {
        let message = PrintableMessage::from((
            "",
            Path::new("schema.graphql"),
            Error::UnknownFieldType {
                parent_type_name: "User".to_string(),
                field_name: "friend".to_string(),
                type_name: "Usr".to_string(),
                position: None,
                possible_names: vec!["User".to_string(), "Post".to_string()],
            },
        ));
        colored::control::set_override(false);
        let rendered = message.to_string();
        assert!(rendered.contains("unknown type `Usr` for field `friend`"), "{rendered}");
        assert!(rendered.contains("--> schema.graphql"), "{rendered}");
    }
}
