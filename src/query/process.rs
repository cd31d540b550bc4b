use log::{debug, info};

use crate::error::AssetListError;

use super::{
    attrs::Listable,
    filter::{FilterParser, ParseMode},
    items::Items,
    list_param::ListParam,
    page::PageRequest,
    predicate::Predicate,
    specification::SpecificationBuilder,
    storage::Storage,
};

/// Turns a `ListParam` into one page of `T`.
///
/// Holds no per-call state, so one engine can serve concurrent callers as
/// long as the storage can. Every validation and compile error is raised
/// before storage is touched.
#[derive(Debug, Clone)]
pub struct ListEngine<S> {
    store: S,
    parse_mode: ParseMode,
}

impl<S: Storage> ListEngine<S> {
    pub fn new(store: S) -> Self {
        ListEngine {
            store,
            parse_mode: ParseMode::default(),
        }
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists `T` matching `param.filter` AND `extra`.
    ///
    /// `extra` is how callers add scoping that a filter string must not be
    /// able to widen.
    pub fn list<T: Listable>(
        &self,
        param: &ListParam,
        extra: Option<Predicate<T>>,
    ) -> Result<Items<T>, AssetListError> {
        param.validate()?;

        let page = PageRequest::of(param.limit, param.offset);
        let predicate = self.compile::<T>(param.filter.as_deref())?.and(extra);

        debug!(
            "Listing '{}' page {} (size {}) with {} clause(s)",
            T::entity().name,
            page.index,
            page.size,
            predicate.clause_count()
        );

        let (items, total) = self.store.execute(&predicate, page, param.count)?;
        let total = if param.count { total } else { None };

        info!(
            "Listed {} '{}' record(s), total: {:?}",
            items.len(),
            T::entity().name,
            total
        );

        Ok(Items::new(items, total))
    }

    /// Filter string to predicate. `None` and blank filters match everything.
    pub fn compile<T: Listable>(
        &self,
        filter: Option<&str>,
    ) -> Result<Predicate<T>, AssetListError> {
        match filter {
            Some(filter) => {
                let tokens = FilterParser::parse_with_mode(filter, self.parse_mode)?;
                SpecificationBuilder::build(&tokens)
            }
            None => Ok(Predicate::always()),
        }
    }
}
