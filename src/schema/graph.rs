use std::collections::HashSet;

use serde_derive::Serialize;

use super::{CONTEXT, Schema, SchemaType};

#[derive(Serialize)]
struct Graph<'a> {
    #[serde(rename = "@context")]
    context: &'static str,
    #[serde(rename = "@graph")]
    graph: &'a [Schema],
}

/// Bundles nodes under a single `@context`, in the order given.
///
/// References between nodes are not checked here; see [`dangling_references`].
pub fn combine_schemas(schemas: &[Schema]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&Graph {
        context: CONTEXT,
        graph: schemas,
    })
}

/// A reference whose target `@id` is not declared in the same graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingRef {
    pub from: SchemaType,
    pub property: &'static str,
    pub id: String,
}

pub fn dangling_references(schemas: &[Schema]) -> Vec<DanglingRef> {
    let declared: HashSet<&str> = schemas.iter().filter_map(|s| s.id()).collect();

    schemas
        .iter()
        .flat_map(|schema| {
            schema
                .references()
                .into_iter()
                .map(move |(property, id)| (schema.schema_type(), property, id))
        })
        .filter(|(_, _, id)| !declared.contains(id))
        .map(|(from, property, id)| DanglingRef {
            from,
            property,
            id: id.to_string(),
        })
        .collect()
}
