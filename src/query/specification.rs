use log::debug;

use crate::error::AssetListError;

use super::{
    attrs::Listable,
    filter::ConditionToken,
    path::{FieldPathResolver, PathStyle},
    predicate::{Predicate, PredicateCompiler},
};

pub struct SpecificationBuilder;

impl SpecificationBuilder {
    /// AND of one compiled predicate per token, in token order. Field names
    /// use `_` to reach nested attributes. No tokens yields a predicate that
    /// matches every record.
    pub fn build<T: Listable>(tokens: &[ConditionToken]) -> Result<Predicate<T>, AssetListError> {
        let entity = T::entity();

        let clauses = tokens
            .iter()
            .map(|token| {
                let path = FieldPathResolver::resolve(entity, &token.field, PathStyle::Underscore)?;
                PredicateCompiler::compile(path, token.operator, &token.value)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Built {} clause(s) for '{}'", clauses.len(), entity.name);

        Ok(Predicate::from_clauses(clauses))
    }
}
