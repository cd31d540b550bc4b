use log::trace;
use rusqlite::ToSql;

use crate::database::Database;
use crate::error::AssetListError;

use super::{attrs::Listable, page::PageRequest, predicate::Predicate};

/// Executes a predicate against a backing store. The listing engine only
/// talks to storage through this trait.
pub trait Storage {
    /// Returns the requested page, and the number of matching records across
    /// all pages when `with_total` is set.
    fn execute<T: Listable>(
        &self,
        predicate: &Predicate<T>,
        page: PageRequest,
        with_total: bool,
    ) -> Result<(Vec<T>, Option<i64>), AssetListError>;
}

#[derive(Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    const SELECT_QUERY: &str = "SELECT {select_list}\nFROM {table}{where_clause}\n\
                                ORDER BY {order_by}\nLIMIT {limit} OFFSET {offset}";
    const COUNT_QUERY: &str = "SELECT COUNT(*)\nFROM {table}{where_clause}";

    pub fn new(db: Database) -> Self {
        SqliteStorage { db }
    }

    fn param_refs(params: &[Box<dyn ToSql>]) -> Vec<&dyn ToSql> {
        params.iter().map(|p| p.as_ref()).collect()
    }
}

impl Storage for SqliteStorage {
    fn execute<T: Listable>(
        &self,
        predicate: &Predicate<T>,
        page: PageRequest,
        with_total: bool,
    ) -> Result<(Vec<T>, Option<i64>), AssetListError> {
        let entity = T::entity();
        let (where_clause, params) = predicate.where_clause();
        let param_refs = Self::param_refs(&params);

        let conn = self.db.get_connection()?;

        let select_sql = Self::SELECT_QUERY
            .replace("{select_list}", &entity.select_list())
            .replace("{table}", entity.table)
            .replace("{where_clause}", &where_clause)
            .replace("{order_by}", &entity.qualified(entity.primary_key))
            .replace("{limit}", &page.size.to_string())
            .replace("{offset}", &page.offset().to_string());

        trace!("Select SQL: {select_sql}");

        let mut stmt = conn.prepare(&select_sql)?;
        let rows = stmt
            .query_map(param_refs.as_slice(), |row| T::from_row(row))?
            .collect::<Result<Vec<T>, _>>()?;

        let total = match with_total {
            true => {
                let count_sql = Self::COUNT_QUERY
                    .replace("{table}", entity.table)
                    .replace("{where_clause}", &where_clause);

                trace!("Count SQL: {count_sql}");

                let count: i64 =
                    conn.query_row(&count_sql, param_refs.as_slice(), |row| row.get(0))?;
                Some(count)
            }
            false => None,
        };

        Ok((rows, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Asset;
    use crate::query::predicate::Conditions;
    use crate::test_fixtures;
    use crate::users::User;

    fn storage() -> SqliteStorage {
        SqliteStorage::new(test_fixtures::seeded_db())
    }

    #[test]
    fn test_rows_ordered_by_primary_key() {
        let (users, total) = storage()
            .execute::<User>(&Predicate::always(), PageRequest::of(100, 0), true)
            .unwrap();
        let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(total, Some(users.len() as i64));
    }

    #[test]
    fn test_total_only_when_requested() {
        let (_, total) = storage()
            .execute::<Asset>(&Predicate::always(), PageRequest::of(2, 0), false)
            .unwrap();
        assert_eq!(total, None);
    }

    #[test]
    fn test_page_window() {
        let store = storage();
        let (all, _) = store
            .execute::<Asset>(&Predicate::always(), PageRequest::of(100, 0), false)
            .unwrap();
        let (second, total) = store
            .execute::<Asset>(&Predicate::always(), PageRequest::of(2, 2), true)
            .unwrap();
        assert_eq!(second, all[2..4].to_vec());
        assert_eq!(total, Some(all.len() as i64));
    }

    #[test]
    fn test_predicate_params_bind() {
        let pred: Predicate<Asset> = Conditions::equals("owner.userName", "alice").unwrap();
        let (assets, total) = storage()
            .execute(&pred, PageRequest::of(10, 0), true)
            .unwrap();
        assert!(!assets.is_empty());
        assert!(assets
            .iter()
            .all(|a| a.owner_user_id == Some(test_fixtures::ALICE)));
        assert_eq!(total, Some(assets.len() as i64));
    }
}
