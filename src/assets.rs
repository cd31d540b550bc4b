use chrono::NaiveDateTime;
use phf_macros::phf_map;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::query::attrs::{AttrMap, AttrSpec, AttrType, EntityDef, Listable};
use crate::query::Value;
use crate::users::USERS;
use crate::utils::Utils;

#[derive(
    AsRefStr,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetType {
    File,
    Device,
    Book,
}

#[derive(
    AsRefStr,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    Public,
    Group,
    Private,
}

impl Visibility {
    /// Storage bucket that files of this visibility live in.
    pub const fn bucket(&self) -> BucketType {
        match self {
            Visibility::Public => BucketType::Public,
            Visibility::Group => BucketType::Groups,
            Visibility::Private => BucketType::Private,
        }
    }
}

#[derive(
    AsRefStr,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
    Debug,
    PartialEq,
    Eq,
    Copy,
    Clone,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BucketType {
    Public,
    Groups,
    Private,
}

macro_rules! text_value {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Text(value.as_ref().to_owned())
            }
        })*
    };
}

text_value!(AssetType, Visibility, BucketType);

pub static ASSET_ATTRS: AttrMap = phf_map! {
    "id" => AttrSpec::new("id", AttrType::Long),
    "assetName" => AttrSpec::new("asset_name", AttrType::Text),
    "description" => AttrSpec::new("description", AttrType::Text),
    "owner" => AttrSpec::relation("owner_user_id", &USERS),
    "ownerUserId" => AttrSpec::new("owner_user_id", AttrType::Long),
    "ownerGroupId" => AttrSpec::new("owner_group_id", AttrType::Long),
    "assetType" => AttrSpec::new("asset_type", AttrType::Enum),
    "visibility" => AttrSpec::new("visibility", AttrType::Enum),
    "createdAt" => AttrSpec::new("created_at", AttrType::Timestamp),
    "updatedAt" => AttrSpec::new("updated_at", AttrType::Timestamp),
    "relatedResourceCount" => AttrSpec::new("related_resource_count", AttrType::Integer),
    "version" => AttrSpec::new("version", AttrType::Integer),
};

pub static ASSETS: EntityDef = EntityDef {
    name: "assets",
    table: "assets",
    primary_key: "id",
    select_cols: &[
        "id",
        "asset_name",
        "description",
        "owner_user_id",
        "owner_group_id",
        "asset_type",
        "visibility",
        "created_at",
        "updated_at",
        "related_resource_count",
        "version",
    ],
    attrs: &ASSET_ATTRS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: i64,
    pub asset_name: String,
    pub description: Option<String>,
    pub owner_user_id: Option<i64>,
    pub owner_group_id: Option<i64>,
    pub asset_type: AssetType,
    pub visibility: Visibility,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub related_resource_count: i32,
    pub version: i32,
}

impl Listable for Asset {
    fn entity() -> &'static EntityDef {
        &ASSETS
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Asset {
            id: row.get(0)?,
            asset_name: row.get(1)?,
            description: row.get(2)?,
            owner_user_id: row.get(3)?,
            owner_group_id: row.get(4)?,
            asset_type: Utils::get_enum(row, 5)?,
            visibility: Utils::get_enum(row, 6)?,
            created_at: Utils::get_timestamp(row, 7)?,
            updated_at: Utils::get_opt_timestamp(row, 8)?,
            related_resource_count: row.get(9)?,
            version: row.get(10)?,
        })
    }
}

pub static ASSET_FILE_ATTRS: AttrMap = phf_map! {
    "id" => AttrSpec::new("id", AttrType::Long),
    "asset" => AttrSpec::relation("asset_id", &ASSETS),
    "bucketType" => AttrSpec::new("bucket_type", AttrType::Enum),
    "fileName" => AttrSpec::new("file_name", AttrType::Text),
    "fileType" => AttrSpec::new("file_type", AttrType::Text),
    "fileSize" => AttrSpec::new("file_size", AttrType::Long),
    "cosKey" => AttrSpec::new("cos_key", AttrType::Text),
    "uploadUserId" => AttrSpec::new("upload_user_id", AttrType::Long),
    "createdAt" => AttrSpec::new("created_at", AttrType::Timestamp),
};

pub static ASSET_FILES: EntityDef = EntityDef {
    name: "asset_files",
    table: "asset_files",
    primary_key: "id",
    select_cols: &[
        "id",
        "asset_id",
        "bucket_type",
        "file_name",
        "file_type",
        "file_size",
        "cos_key",
        "upload_user_id",
        "created_at",
    ],
    attrs: &ASSET_FILE_ATTRS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    pub id: i64,
    pub asset_id: i64,
    pub bucket_type: BucketType,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub cos_key: String,
    pub upload_user_id: i64,
    pub created_at: NaiveDateTime,
}

impl Listable for AssetFile {
    fn entity() -> &'static EntityDef {
        &ASSET_FILES
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(AssetFile {
            id: row.get(0)?,
            asset_id: row.get(1)?,
            bucket_type: Utils::get_enum(row, 2)?,
            file_name: row.get(3)?,
            file_type: row.get(4)?,
            file_size: row.get(5)?,
            cos_key: row.get(6)?,
            upload_user_id: row.get(7)?,
            created_at: Utils::get_timestamp(row, 8)?,
        })
    }
}
