pub const SCHEMA_VERSION: &str = "1";

pub const CREATE_SCHEMA_SQL: &str = r#"
BEGIN TRANSACTION;

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

INSERT OR REPLACE INTO meta (key, value) VALUES ('schema_version', '1');

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL DEFAULT '',
    role TEXT NOT NULL,             -- 'ADMIN' or 'USER'
    created_at TEXT NOT NULL,       -- 'YYYY-MM-DD HH:MM:SS'
    status BOOLEAN NOT NULL DEFAULT 1,
    avatar_cos_key TEXT
);

CREATE TABLE IF NOT EXISTS user_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    group_name TEXT NOT NULL UNIQUE,
    created_by INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    member_count INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (created_by) REFERENCES users(id)
);

CREATE TABLE IF NOT EXISTS assets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_name TEXT NOT NULL,
    description TEXT,
    owner_user_id INTEGER,          -- NULL unless visibility is PRIVATE
    owner_group_id INTEGER,         -- NULL unless visibility is GROUP
    asset_type TEXT NOT NULL,       -- 'FILE', 'DEVICE' or 'BOOK'
    visibility TEXT NOT NULL,       -- 'PUBLIC', 'GROUP' or 'PRIVATE'
    created_at TEXT NOT NULL,
    updated_at TEXT,
    related_resource_count INTEGER NOT NULL DEFAULT 0,
    version INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (owner_user_id) REFERENCES users(id),
    FOREIGN KEY (owner_group_id) REFERENCES user_groups(id)
);

CREATE INDEX IF NOT EXISTS idx_assets_owner_user ON assets (owner_user_id);
CREATE INDEX IF NOT EXISTS idx_assets_owner_group ON assets (owner_group_id);

CREATE TABLE IF NOT EXISTS asset_files (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    asset_id INTEGER NOT NULL,
    bucket_type TEXT NOT NULL,      -- 'PUBLIC', 'GROUPS' or 'PRIVATE'
    file_name TEXT NOT NULL,
    file_type TEXT NOT NULL,
    file_size INTEGER NOT NULL,
    cos_key TEXT NOT NULL UNIQUE,
    upload_user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (asset_id) REFERENCES assets(id),
    FOREIGN KEY (upload_user_id) REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_asset_files_asset ON asset_files (asset_id);

CREATE TABLE IF NOT EXISTS suppliers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    supplier_name TEXT NOT NULL,
    short_name TEXT,
    status TEXT NOT NULL,
    supplier_type TEXT NOT NULL,
    primary_contact TEXT NOT NULL,
    contact_phone TEXT NOT NULL,
    contact_email TEXT,
    region_code TEXT,
    invoice_type INTEGER NOT NULL DEFAULT 0,
    created_by INTEGER NOT NULL,
    created_at TEXT NOT NULL
);

COMMIT;
"#;
