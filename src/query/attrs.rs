use std::fmt;

use rusqlite::Row;

pub type AttrMap = phf::Map<&'static str, AttrSpec>;

/// Width of an integer-family attribute. Operands are parsed at this width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumericWidth {
    I32,
    I64,
}

/// How the predicate compiler treats an attribute.
///
/// Only integers get numeric comparison semantics. Every other declared type
/// (text, bool, timestamp, enum) is compared as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Numeric(NumericWidth),
    Text,
}

impl AttributeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Numeric(_) => "numeric",
            AttributeKind::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum AttrType {
    Integer,
    Long,
    Text,
    Bool,
    Timestamp,
    Enum,
    /// Many-to-one link; the owning column holds the target's primary key.
    Relation(&'static EntityDef),
}

impl AttrType {
    pub fn kind(&self) -> AttributeKind {
        match self {
            AttrType::Integer => AttributeKind::Numeric(NumericWidth::I32),
            AttrType::Long | AttrType::Relation(_) => AttributeKind::Numeric(NumericWidth::I64),
            AttrType::Text | AttrType::Bool | AttrType::Timestamp | AttrType::Enum => {
                AttributeKind::Text
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            AttrType::Integer => "Integer",
            AttrType::Long => "Long",
            AttrType::Text => "Text",
            AttrType::Bool => "Bool",
            AttrType::Timestamp => "Timestamp",
            AttrType::Enum => "Enum",
            AttrType::Relation(_) => "Relation",
        }
    }

    pub fn relation_target(&self) -> Option<&'static EntityDef> {
        match self {
            AttrType::Relation(target) => Some(target),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct AttrSpec {
    pub name_db: &'static str,
    pub attr_type: AttrType,
}

impl AttrSpec {
    pub const fn new(name_db: &'static str, attr_type: AttrType) -> Self {
        AttrSpec { name_db, attr_type }
    }

    pub const fn relation(fk_db: &'static str, target: &'static EntityDef) -> Self {
        AttrSpec {
            name_db: fk_db,
            attr_type: AttrType::Relation(target),
        }
    }
}

/// A persistent collection and the attributes a filter may reach on it.
pub struct EntityDef {
    pub name: &'static str,
    pub table: &'static str,
    pub primary_key: &'static str,
    /// Columns in the order `Listable::from_row` reads them.
    pub select_cols: &'static [&'static str],
    pub attrs: &'static AttrMap,
}

impl fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl EntityDef {
    pub fn attr(&self, name: &str) -> Option<&'static AttrSpec> {
        self.attrs.get(name)
    }

    pub fn qualified(&self, col: &str) -> String {
        format!("{}.{}", self.table, col)
    }

    pub fn select_list(&self) -> String {
        self.select_cols
            .iter()
            .map(|col| self.qualified(col))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Attribute names sorted for display.
    pub fn attr_entries(&self) -> Vec<(&'static str, &'static AttrSpec)> {
        let mut entries: Vec<_> = self.attrs.entries().map(|(k, v)| (*k, v)).collect();
        entries.sort_by_key(|(name, _)| *name);
        entries
    }
}

/// A row type the listing engine can page through.
pub trait Listable: Sized {
    fn entity() -> &'static EntityDef;
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{ASSETS, ASSET_FILES};

    #[test]
    fn test_integer_family_is_numeric() {
        assert_eq!(
            AttrType::Integer.kind(),
            AttributeKind::Numeric(NumericWidth::I32)
        );
        assert_eq!(
            AttrType::Long.kind(),
            AttributeKind::Numeric(NumericWidth::I64)
        );
    }

    #[test]
    fn test_everything_else_is_text() {
        for attr_type in [
            AttrType::Text,
            AttrType::Bool,
            AttrType::Timestamp,
            AttrType::Enum,
        ] {
            assert_eq!(attr_type.kind(), AttributeKind::Text, "{attr_type:?}");
        }
    }

    #[test]
    fn test_relation_compares_as_long() {
        let asset = ASSET_FILES.attr("asset").unwrap();
        assert_eq!(
            asset.attr_type.kind(),
            AttributeKind::Numeric(NumericWidth::I64)
        );
        assert_eq!(asset.attr_type.relation_target().unwrap().table, "assets");
    }

    #[test]
    fn test_select_list_is_qualified() {
        let select_list = ASSETS.select_list();
        assert!(select_list.starts_with("assets.id, assets.asset_name"));
    }

    #[test]
    fn test_attr_entries_sorted() {
        let names: Vec<&str> = ASSETS.attr_entries().iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(names.contains(&"ownerUserId"));
    }
}
