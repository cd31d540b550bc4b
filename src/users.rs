use chrono::NaiveDateTime;
use phf_macros::phf_map;
use rusqlite::Row;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::query::attrs::{AttrMap, AttrSpec, AttrType, EntityDef, Listable};
use crate::utils::Utils;

#[derive(AsRefStr, EnumIter, EnumString, Display, Serialize, Debug, PartialEq, Eq, Copy, Clone)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

pub static USER_ATTRS: AttrMap = phf_map! {
    "id" => AttrSpec::new("id", AttrType::Long),
    "userName" => AttrSpec::new("user_name", AttrType::Text),
    "role" => AttrSpec::new("role", AttrType::Enum),
    "createdAt" => AttrSpec::new("created_at", AttrType::Timestamp),
    "status" => AttrSpec::new("status", AttrType::Bool),
    "avatarCosKey" => AttrSpec::new("avatar_cos_key", AttrType::Text),
};

pub static USERS: EntityDef = EntityDef {
    name: "users",
    table: "users",
    primary_key: "id",
    select_cols: &[
        "id",
        "user_name",
        "role",
        "created_at",
        "status",
        "avatar_cos_key",
    ],
    attrs: &USER_ATTRS,
};

/// The password hash column is never selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub role: Role,
    pub created_at: NaiveDateTime,
    pub status: bool,
    pub avatar_cos_key: Option<String>,
}

impl Listable for User {
    fn entity() -> &'static EntityDef {
        &USERS
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            user_name: row.get(1)?,
            role: Utils::get_enum(row, 2)?,
            created_at: Utils::get_timestamp(row, 3)?,
            status: row.get(4)?,
            avatar_cos_key: row.get(5)?,
        })
    }
}

pub static USER_GROUP_ATTRS: AttrMap = phf_map! {
    "id" => AttrSpec::new("id", AttrType::Long),
    "groupName" => AttrSpec::new("group_name", AttrType::Text),
    "createdBy" => AttrSpec::relation("created_by", &USERS),
    "createdAt" => AttrSpec::new("created_at", AttrType::Timestamp),
    "memberCount" => AttrSpec::new("member_count", AttrType::Integer),
};

pub static USER_GROUPS: EntityDef = EntityDef {
    name: "user_groups",
    table: "user_groups",
    primary_key: "id",
    select_cols: &["id", "group_name", "created_by", "created_at", "member_count"],
    attrs: &USER_GROUP_ATTRS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGroup {
    pub id: i64,
    pub group_name: String,
    pub created_by: i64,
    pub created_at: NaiveDateTime,
    pub member_count: i32,
}

impl Listable for UserGroup {
    fn entity() -> &'static EntityDef {
        &USER_GROUPS
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(UserGroup {
            id: row.get(0)?,
            group_name: row.get(1)?,
            created_by: row.get(2)?,
            created_at: Utils::get_timestamp(row, 3)?,
            member_count: row.get(4)?,
        })
    }
}
