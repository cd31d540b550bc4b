use crate::error::AssetListError;

use super::attrs::{AttrSpec, AttributeKind, EntityDef};

/// Separator convention used to split a field spec into path segments.
///
/// Filter strings only allow word characters in field names, so they reach
/// nested attributes with `_` (`owner_userName`). Programmatic conditions use
/// `.` (`owner.userName`). The two are kept apart: a dotted resolver does not
/// split on `_` and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Underscore,
    Dotted,
}

impl PathStyle {
    pub fn separator(&self) -> char {
        match self {
            PathStyle::Underscore => '_',
            PathStyle::Dotted => '.',
        }
    }
}

/// A relation traversed on the way to the compared attribute.
#[derive(Debug, Clone, Copy)]
struct Hop {
    owner: &'static EntityDef,
    relation: &'static AttrSpec,
    target: &'static EntityDef,
}

#[derive(Debug, Clone)]
pub struct AttributePath {
    hops: Vec<Hop>,
    owner: &'static EntityDef,
    leaf: &'static AttrSpec,
}

impl AttributePath {
    /// Number of relations crossed before the compared attribute.
    pub fn depth(&self) -> usize {
        self.hops.len()
    }

    pub fn kind(&self) -> AttributeKind {
        self.leaf.attr_type.kind()
    }

    pub fn leaf_column(&self) -> String {
        self.owner.qualified(self.leaf.name_db)
    }

    /// Wraps a predicate over `leaf_column()` in one `IN (SELECT ...)` per
    /// traversed relation, innermost relation first.
    pub(crate) fn wrap_predicate(&self, leaf_sql: String) -> String {
        self.hops.iter().rev().fold(leaf_sql, |inner, hop| {
            format!(
                "{} IN (SELECT {} FROM {} WHERE {})",
                hop.owner.qualified(hop.relation.name_db),
                hop.target.qualified(hop.target.primary_key),
                hop.target.table,
                inner
            )
        })
    }
}

pub struct FieldPathResolver;

impl FieldPathResolver {
    pub fn resolve(
        root: &'static EntityDef,
        field_spec: &str,
        style: PathStyle,
    ) -> Result<AttributePath, AssetListError> {
        let mut segments: Vec<&str> = field_spec.split(style.separator()).collect();

        // `owner_` resolves like `owner`
        while segments.len() > 1 && segments.last() == Some(&"") {
            segments.pop();
        }

        let unknown = |segment: &str, entity: &'static EntityDef| AssetListError::UnknownField {
            field: segment.to_owned(),
            entity: entity.name,
        };

        let (leaf_name, relation_names) = match segments.split_last() {
            Some((&leaf_name, relation_names)) => (leaf_name, relation_names),
            None => return Err(unknown(field_spec, root)),
        };

        let mut owner = root;
        let mut hops = Vec::with_capacity(relation_names.len());

        for &segment in relation_names {
            let relation = owner.attr(segment).ok_or_else(|| unknown(segment, owner))?;
            let target = relation
                .attr_type
                .relation_target()
                .ok_or_else(|| unknown(segment, owner))?;
            hops.push(Hop {
                owner,
                relation,
                target,
            });
            owner = target;
        }

        let leaf = owner
            .attr(leaf_name)
            .ok_or_else(|| unknown(leaf_name, owner))?;

        Ok(AttributePath {
            hops,
            owner,
            leaf,
        })
    }
}
