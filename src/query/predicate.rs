use std::{fmt, marker::PhantomData};

use rusqlite::{types::ToSqlOutput, ToSql};

use crate::database::UNICODE_LOWER_FN;
use crate::error::AssetListError;

use super::{
    attrs::{AttributeKind, Listable, NumericWidth},
    filter::Operator,
    path::{AttributePath, FieldPathResolver, PathStyle},
};

/// Defines the behavior of a filter.
pub trait Filter: fmt::Debug {
    /// return predicate text and params
    fn to_predicate_parts(&self) -> (String, Vec<Box<dyn ToSql>>);
}

/// A literal bound into a compiled predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            Value::Integer(i) => Ok(ToSqlOutput::from(*i)),
            Value::Text(s) => Ok(ToSqlOutput::from(s.as_str())),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Test {
    Compare(&'static str, Value),
    Like(String),
    ILike(String),
    In(Vec<Value>),
    IsNull,
}

/// One executable condition bound to a resolved attribute.
#[derive(Debug, Clone)]
pub struct CompiledPredicate {
    path: AttributePath,
    test: Test,
}

impl Filter for CompiledPredicate {
    fn to_predicate_parts(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let col = self.path.leaf_column();
        let mut pred_vec: Vec<Box<dyn ToSql>> = Vec::new();

        let leaf_str = match &self.test {
            Test::Compare(op, value) => {
                pred_vec.push(Box::new(value.clone()));
                format!("{col} {op} ?")
            }
            Test::Like(pattern) => {
                pred_vec.push(Box::new(pattern.clone()));
                format!("{col} LIKE ?")
            }
            Test::ILike(pattern) => {
                pred_vec.push(Box::new(pattern.clone()));
                format!("{UNICODE_LOWER_FN}({col}) LIKE ?")
            }
            Test::In(values) if values.is_empty() => "0 = 1".to_owned(),
            Test::In(values) => {
                let placeholders = vec!["?"; values.len()].join(", ");
                for value in values {
                    pred_vec.push(Box::new(value.clone()));
                }
                format!("{col} IN ({placeholders})")
            }
            Test::IsNull => format!("{col} IS NULL"),
        };

        (format!("({})", self.path.wrap_predicate(leaf_str)), pred_vec)
    }
}

pub struct PredicateCompiler;

impl PredicateCompiler {
    /// Builds the predicate for `path operator raw_value`. Integer attributes
    /// get numeric comparisons; every other attribute is compared as text.
    pub fn compile(
        path: AttributePath,
        operator: Operator,
        raw_value: &str,
    ) -> Result<CompiledPredicate, AssetListError> {
        let kind = path.kind();
        let unsupported = || AssetListError::UnsupportedOperator {
            operator: operator.to_string(),
            attribute_kind: kind.name(),
        };

        let test = match kind {
            AttributeKind::Numeric(width) => {
                let sql_op = match operator {
                    Operator::Eq => "=",
                    Operator::Ne => "!=",
                    Operator::Gt => ">",
                    Operator::Ge => ">=",
                    Operator::Lt => "<",
                    Operator::Le => "<=",
                    Operator::Like | Operator::ILike => return Err(unsupported()),
                };
                Test::Compare(sql_op, Value::Integer(Self::parse_operand(raw_value, width)?))
            }
            AttributeKind::Text => match operator {
                Operator::Eq => Test::Compare("=", Value::from(raw_value)),
                Operator::Ne => Test::Compare("!=", Value::from(raw_value)),
                Operator::Like => Test::Like(format!("%{raw_value}%")),
                // Folded with the same Unicode rules as the column side
                Operator::ILike => Test::ILike(format!("%{}%", raw_value.to_lowercase())),
                Operator::Gt | Operator::Ge | Operator::Lt | Operator::Le => {
                    return Err(unsupported())
                }
            },
        };

        Ok(CompiledPredicate { path, test })
    }

    /// Same as `compile` for an operator that has not been parsed yet.
    pub fn compile_str(
        path: AttributePath,
        operator: &str,
        raw_value: &str,
    ) -> Result<CompiledPredicate, AssetListError> {
        Self::compile(path, operator.parse()?, raw_value)
    }

    fn parse_operand(raw_value: &str, width: NumericWidth) -> Result<i64, AssetListError> {
        let parsed = match width {
            NumericWidth::I32 => raw_value.parse::<i32>().map(i64::from),
            NumericWidth::I64 => raw_value.parse::<i64>(),
        };

        parsed.map_err(|e| AssetListError::InvalidOperand {
            value: raw_value.to_owned(),
            reason: e.to_string(),
        })
    }
}

/// A conjunction of compiled conditions over `T`. No clauses means every
/// record matches.
pub struct Predicate<T> {
    clauses: Vec<CompiledPredicate>,
    entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Predicate {
            clauses: self.clauses.clone(),
            entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("clauses", &self.clauses)
            .finish()
    }
}

impl<T> Default for Predicate<T> {
    fn default() -> Self {
        Predicate::always()
    }
}

impl<T> Predicate<T> {
    pub fn always() -> Self {
        Predicate {
            clauses: Vec::new(),
            entity: PhantomData,
        }
    }

    pub(crate) fn from_clauses(clauses: Vec<CompiledPredicate>) -> Self {
        Predicate {
            clauses,
            entity: PhantomData,
        }
    }

    pub fn is_always(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Logical AND with an optional extra predicate. `None` leaves `self`
    /// unchanged.
    pub fn and(mut self, extra: Option<Predicate<T>>) -> Self {
        if let Some(extra) = extra {
            self.clauses.extend(extra.clauses);
        }
        self
    }

    /// `WHERE` clause text (empty when every record matches) and its params.
    pub(crate) fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        if self.clauses.is_empty() {
            return (String::new(), Vec::new());
        }
        let (pred_str, pred_vec) = self.to_predicate_parts();
        (format!("\nWHERE {pred_str}"), pred_vec)
    }
}

impl<T> Filter for Predicate<T> {
    fn to_predicate_parts(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut pred_str = String::new();
        let mut pred_vec: Vec<Box<dyn ToSql>> = Vec::new();
        let mut first = true;

        for clause in &self.clauses {
            match first {
                true => first = false,
                false => pred_str.push_str(" AND "),
            }
            let (clause_str, clause_vec) = clause.to_predicate_parts();
            pred_str.push_str(&clause_str);
            pred_vec.extend(clause_vec);
        }

        (pred_str, pred_vec)
    }
}

/// Programmatic conditions addressed with dotted paths such as `owner.userName`.
/// Used by callers to scope a listing beyond what the filter string allows.
pub struct Conditions;

impl Conditions {
    pub fn equals<T: Listable>(
        field_path: &str,
        value: impl Into<Value>,
    ) -> Result<Predicate<T>, AssetListError> {
        Self::single(field_path, Test::Compare("=", value.into()))
    }

    /// An empty `values` matches nothing.
    pub fn is_in<T: Listable, V: Into<Value>>(
        field_path: &str,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Predicate<T>, AssetListError> {
        let values = values.into_iter().map(Into::into).collect();
        Self::single(field_path, Test::In(values))
    }

    pub fn is_null<T: Listable>(field_path: &str) -> Result<Predicate<T>, AssetListError> {
        Self::single(field_path, Test::IsNull)
    }

    fn single<T: Listable>(field_path: &str, test: Test) -> Result<Predicate<T>, AssetListError> {
        let path = FieldPathResolver::resolve(T::entity(), field_path, PathStyle::Dotted)?;
        Ok(Predicate::from_clauses(vec![CompiledPredicate { path, test }]))
    }
}
