use pest_derive::Parser;

pub mod attrs;
pub mod filter;
pub mod items;
pub mod list_param;
pub mod page;
pub mod path;
pub mod predicate;
pub mod process;
pub mod specification;
pub mod storage;

pub use attrs::{AttributeKind, EntityDef, Listable};
pub use filter::{ConditionToken, FilterParser, Operator, ParseMode};
pub use items::Items;
pub use list_param::{ListParam, RawListParams};
pub use page::PageRequest;
pub use path::{AttributePath, FieldPathResolver, PathStyle};
pub use predicate::{Conditions, Predicate, PredicateCompiler, Value};
pub use process::ListEngine;
pub use specification::SpecificationBuilder;
pub use storage::{SqliteStorage, Storage};

#[derive(Parser)]
#[grammar = "query/filter.pest"]
pub struct FilterGrammar;
