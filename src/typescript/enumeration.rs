use super::field::compile_documentation;
use crate::graphql::schema::{NodeKind, SchemaNode};

fn enum_def_from_node(node: &SchemaNode) -> String {
    let doc_comment = compile_documentation(&node.description, 0);
    let values = node
        .fields()
        .iter()
        .map(|value| {
            format!(
                "  {}{} = \"{}\",",
                compile_documentation(&value.description, 2),
                value.name,
                value.name
            )
        })
        .collect::<Vec<String>>()
        .join("\n");
    format!("{}export enum {} {{\n{}\n}}", doc_comment, node.name, values)
}

/// Declarations for every enum in `nodes` so `["Name"]:Name` entries resolve locally.
pub fn enum_defs_from_nodes(nodes: &[SchemaNode]) -> Vec<String> {
    nodes
        .iter()
        .filter(|node| node.kind == NodeKind::EnumTypeDefinition)
        .map(enum_def_from_node)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::schema::{FieldNode, FieldType};

    #[test]
    fn declares_string_enums_with_documentation() {
        let nodes = vec![
            SchemaNode::new("Query", NodeKind::ObjectTypeDefinition),
            SchemaNode::new("Color", NodeKind::EnumTypeDefinition)
                .with_description("Paint colors")
                .with_args(vec![
                    FieldNode::new("RED", FieldType::new("RED", &[])),
                    FieldNode::new("BLUE", FieldType::new("BLUE", &[]))
                        .with_description("Like the sky"),
                ]),
        ];
        assert_eq!(
            enum_defs_from_nodes(&nodes),
            vec![
                "/**
 * Paint colors
 */
export enum Color {
  RED = \"RED\",
  /**
   * Like the sky
   */
  BLUE = \"BLUE\",
}"
            ]
        );
    }
}
