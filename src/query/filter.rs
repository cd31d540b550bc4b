use std::{fmt, str::FromStr};

use log::debug;
use pest::Parser;
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::error::AssetListError;

use super::{FilterGrammar, Rule};

/// Comparison operators accepted in a filter clause.
#[derive(AsRefStr, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = "like")]
    Like,
    #[strum(serialize = "ilike")]
    ILike,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Like => "like",
            Operator::ILike => "ilike",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = AssetListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::iter()
            .find(|op| op.as_ref() == s)
            .ok_or_else(|| AssetListError::UnsupportedOperator {
                operator: s.to_owned(),
                attribute_kind: "any",
            })
    }
}

/// One `field operator value` comparison taken from a filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionToken {
    pub field: String,
    pub operator: Operator,
    /// Literal with surrounding quotes and `%` markers already removed.
    pub value: String,
}

impl ConditionToken {
    pub fn new(field: &str, operator: Operator, value: &str) -> Self {
        ConditionToken {
            field: field.to_owned(),
            operator,
            value: value.to_owned(),
        }
    }
}

/// What to do with a clause that contains no comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Drop it and keep going.
    #[default]
    Lenient,
    /// Fail with `MalformedClause`.
    Strict,
}

pub struct FilterParser;

impl FilterParser {
    /// Splits `filter` on ` and ` and extracts one token per matching clause.
    /// Clauses without a comparison are dropped.
    pub fn parse(filter: &str) -> Result<Vec<ConditionToken>, AssetListError> {
        Self::parse_with_mode(filter, ParseMode::Lenient)
    }

    pub fn parse_with_mode(
        filter: &str,
        mode: ParseMode,
    ) -> Result<Vec<ConditionToken>, AssetListError> {
        if filter.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut parsed_filter = FilterGrammar::parse(Rule::filter, filter)
            .map_err(|err| AssetListError::ParsingError(Box::new(err)))?;

        let clauses = match parsed_filter.next() {
            Some(filter_pair) => filter_pair.into_inner(),
            None => return Ok(Vec::new()),
        };

        let mut tokens = Vec::new();

        for clause in clauses.filter(|pair| pair.as_rule() == Rule::clause_text) {
            let clause_str = clause.as_str();
            match Self::parse_clause(clause_str) {
                Some(token) => tokens.push(token),
                None => match mode {
                    ParseMode::Strict if !clause_str.trim().is_empty() => {
                        return Err(AssetListError::MalformedClause(clause_str.to_owned()));
                    }
                    _ => debug!("Dropping filter clause without a comparison: '{clause_str}'"),
                },
            }
        }

        debug!("Parsed filter '{filter}' into {} token(s): {tokens:?}", tokens.len());

        Ok(tokens)
    }

    fn parse_clause(clause: &str) -> Option<ConditionToken> {
        let mut parsed_clause = FilterGrammar::parse(Rule::clause, clause).ok()?;
        let condition = parsed_clause
            .next()?
            .into_inner()
            .find(|pair| pair.as_rule() == Rule::condition)?;

        let mut condition_iter = condition.into_inner();
        let field = condition_iter.next()?.as_str();
        let operator: Operator = condition_iter.next()?.as_str().parse().ok()?;
        let value = Self::strip_value(condition_iter.next()?.as_str());

        Some(ConditionToken {
            field: field.to_owned(),
            operator,
            value,
        })
    }

    /// Removes one leading `%`, one trailing `%`, and every single quote.
    /// Markers are only stripped at the outer edges of the raw literal, so
    /// `'%abc%'` keeps its inner wildcards.
    fn strip_value(raw: &str) -> String {
        let value = raw.strip_prefix('%').unwrap_or(raw);
        let value = value.strip_suffix('%').unwrap_or(value);
        value.replace('\'', "")
    }
}
