use chrono::NaiveDateTime;
use phf_macros::phf_map;
use rusqlite::Row;
use serde::Serialize;

use crate::query::attrs::{AttrMap, AttrSpec, AttrType, EntityDef, Listable};
use crate::utils::Utils;

pub static SUPPLIER_ATTRS: AttrMap = phf_map! {
    "id" => AttrSpec::new("id", AttrType::Long),
    "name" => AttrSpec::new("supplier_name", AttrType::Text),
    "shortName" => AttrSpec::new("short_name", AttrType::Text),
    "status" => AttrSpec::new("status", AttrType::Text),
    "type" => AttrSpec::new("supplier_type", AttrType::Text),
    "primaryContact" => AttrSpec::new("primary_contact", AttrType::Text),
    "phone" => AttrSpec::new("contact_phone", AttrType::Text),
    "email" => AttrSpec::new("contact_email", AttrType::Text),
    "regionCode" => AttrSpec::new("region_code", AttrType::Text),
    "invoiceType" => AttrSpec::new("invoice_type", AttrType::Integer),
    "createdBy" => AttrSpec::new("created_by", AttrType::Long),
    "createdAt" => AttrSpec::new("created_at", AttrType::Timestamp),
};

pub static SUPPLIERS: EntityDef = EntityDef {
    name: "suppliers",
    table: "suppliers",
    primary_key: "id",
    select_cols: &[
        "id",
        "supplier_name",
        "short_name",
        "status",
        "supplier_type",
        "primary_contact",
        "contact_phone",
        "contact_email",
        "region_code",
        "invoice_type",
        "created_by",
        "created_at",
    ],
    attrs: &SUPPLIER_ATTRS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub short_name: Option<String>,
    pub status: String,
    #[serde(rename = "type")]
    pub supplier_type: String,
    pub primary_contact: String,
    pub phone: String,
    pub email: Option<String>,
    pub region_code: Option<String>,
    pub invoice_type: i32,
    pub created_by: i64,
    pub created_at: NaiveDateTime,
}

impl Listable for Supplier {
    fn entity() -> &'static EntityDef {
        &SUPPLIERS
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Supplier {
            id: row.get(0)?,
            name: row.get(1)?,
            short_name: row.get(2)?,
            status: row.get(3)?,
            supplier_type: row.get(4)?,
            primary_contact: row.get(5)?,
            phone: row.get(6)?,
            email: row.get(7)?,
            region_code: row.get(8)?,
            invoice_type: row.get(9)?,
            created_by: row.get(10)?,
            created_at: Utils::get_timestamp(row, 11)?,
        })
    }
}
