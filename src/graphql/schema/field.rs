use super::{Documentation, Error};
use graphql_parser::schema as parsed_schema;
use graphql_parser::Pos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTypeOption {
    /// List of type
    Array,
    /// The list itself cannot be null
    ArrayRequired,
    /// The type (or each list item) cannot be null
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldType {
    pub name: String,
    pub options: Vec<FieldTypeOption>,
}

impl FieldType {
    pub fn new(name: &str, options: &[FieldTypeOption]) -> Self {
        FieldType {
            name: name.to_string(),
            options: options.to_vec(),
        }
    }

    pub fn has_option(&self, option: FieldTypeOption) -> bool {
        self.options.contains(&option)
    }

    pub fn is_array(&self) -> bool {
        self.has_option(FieldTypeOption::Array)
    }

    pub fn is_array_required(&self) -> bool {
        self.has_option(FieldTypeOption::ArrayRequired)
    }

    pub fn is_required(&self) -> bool {
        self.has_option(FieldTypeOption::Required)
    }

    /// Flatten a parsed type into a name and its options. Only one level of list is representable.
    pub(super) fn try_from_parsed(
        parsed: &parsed_schema::Type<'_, String>,
        field_name: &str,
        position: Pos,
    ) -> Result<Self, Error> {
        let nested_list = || Error::NestedListUnsupported {
            field_name: field_name.to_string(),
            position,
        };
        let (options, name): (&[FieldTypeOption], &String) = match parsed {
            parsed_schema::Type::NamedType(name) => (&[], name),
            parsed_schema::Type::NonNullType(inner) => match inner.as_ref() {
                parsed_schema::Type::NamedType(name) => (&[FieldTypeOption::Required], name),
                parsed_schema::Type::ListType(inner) => match inner.as_ref() {
                    parsed_schema::Type::NamedType(name) => {
                        (&[FieldTypeOption::Array, FieldTypeOption::ArrayRequired], name)
                    }
                    parsed_schema::Type::NonNullType(inner) => match inner.as_ref() {
                        parsed_schema::Type::NamedType(name) => (
                            &[
                                FieldTypeOption::Array,
                                FieldTypeOption::ArrayRequired,
                                FieldTypeOption::Required,
                            ],
                            name,
                        ),
                        _ => return Err(nested_list()),
                    },
                    parsed_schema::Type::ListType(_) => return Err(nested_list()),
                },
                parsed_schema::Type::NonNullType(_) => return Err(nested_list()),
            },
            parsed_schema::Type::ListType(inner) => match inner.as_ref() {
                parsed_schema::Type::NamedType(name) => (&[FieldTypeOption::Array], name),
                parsed_schema::Type::NonNullType(inner) => match inner.as_ref() {
                    parsed_schema::Type::NamedType(name) => {
                        (&[FieldTypeOption::Array, FieldTypeOption::Required], name)
                    }
                    _ => return Err(nested_list()),
                },
                parsed_schema::Type::ListType(_) => return Err(nested_list()),
            },
        };
        Ok(FieldType::new(name, options))
    }
}

#[derive(Debug, Clone)]
pub struct FieldNode {
    pub name: String,
    pub description: Documentation,
    pub field_type: FieldType,
    pub position: Option<Pos>,
}

impl FieldNode {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        FieldNode {
            name: name.to_string(),
            description: None,
            field_type,
            position: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub(super) fn try_from_field(field: &parsed_schema::Field<'_, String>) -> Result<Self, Error> {
        Ok(FieldNode {
            name: field.name.clone(),
            description: super::process_description(&field.description),
            field_type: FieldType::try_from_parsed(&field.field_type, &field.name, field.position)?,
            position: Some(field.position),
        })
    }

    pub(super) fn try_from_input_value(
        value: &parsed_schema::InputValue<'_, String>,
    ) -> Result<Self, Error> {
        Ok(FieldNode {
            name: value.name.clone(),
            description: super::process_description(&value.description),
            field_type: FieldType::try_from_parsed(&value.value_type, &value.name, value.position)?,
            position: Some(value.position),
        })
    }

    /// Union members and enum values are carried as fields named after themselves.
    pub(super) fn named_member(name: &str, description: Documentation, position: Pos) -> Self {
        FieldNode {
            name: name.to_string(),
            description,
            field_type: FieldType::new(name, &[FieldTypeOption::Required]),
            position: Some(position),
        }
    }
}
