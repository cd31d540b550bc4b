//! In-memory database seeded with a small, fixed catalog.

use crate::database::Database;

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const JOHNNY: i64 = 3;

pub const ENGINEERING: i64 = 1;
pub const DESIGN: i64 = 2;

pub const ASSET_COUNT: i64 = 8;

const SEED_SQL: &str = r#"
INSERT INTO users (id, user_name, role, created_at, status, avatar_cos_key) VALUES
    (1, 'alice', 'ADMIN', '2024-01-02 09:00:00', 1, 'avatars/alice.png'),
    (2, 'bob', 'USER', '2024-01-03 10:30:00', 1, NULL),
    (3, 'JOHNNY', 'USER', '2024-02-11 16:45:00', 0, NULL),
    (4, 'carol', 'USER', '2024-03-20 08:15:00', 1, NULL);

INSERT INTO user_groups (id, group_name, created_by, created_at, member_count) VALUES
    (1, 'engineering', 1, '2024-01-05 12:00:00', 3),
    (2, 'design', 2, '2024-01-06 12:00:00', 2);

INSERT INTO assets (id, asset_name, description, owner_user_id, owner_group_id, asset_type,
                    visibility, created_at, updated_at, related_resource_count, version) VALUES
    (1, 'Laptop Pro', 'Work laptop', 1, NULL, 'DEVICE', 'PRIVATE', '2024-01-05 09:00:00', NULL, 2, 3),
    (2, 'Rust Book', NULL, NULL, NULL, 'BOOK', 'PUBLIC', '2024-01-07 09:00:00', NULL, 0, 1),
    (3, 'Design Specs', 'Q1 mockups', NULL, 2, 'FILE', 'GROUP', '2024-02-01 14:00:00', '2024-02-03 11:00:00', 40, 2),
    (4, 'Team Laptop', NULL, NULL, 1, 'DEVICE', 'GROUP', '2024-02-10 08:30:00', NULL, 12, 5),
    (5, 'Alice Notes', 'Meeting notes', 1, NULL, 'FILE', 'PRIVATE', '2024-03-01 17:20:00', NULL, 31, 1),
    (6, 'Bob Phone', NULL, 2, NULL, 'DEVICE', 'PRIVATE', '2024-03-04 13:00:00', NULL, 0, 2),
    (7, 'Public Handbook', 'Onboarding', NULL, NULL, 'FILE', 'PUBLIC', '2024-03-15 10:00:00', NULL, 30, 4),
    (8, 'Johnny Tablet', NULL, 3, NULL, 'DEVICE', 'PRIVATE', '2024-04-02 19:10:00', NULL, 7, 1);

INSERT INTO asset_files (id, asset_id, bucket_type, file_name, file_type, file_size, cos_key,
                         upload_user_id, created_at) VALUES
    (1, 5, 'PRIVATE', 'notes.txt', 'text/plain', 1200, 'private/1/notes.txt', 1, '2024-03-01 17:21:00'),
    (2, 5, 'PRIVATE', 'notes-v2.txt', 'text/plain', 1800, 'private/1/notes-v2.txt', 1, '2024-03-02 09:00:00'),
    (3, 3, 'GROUPS', 'specs.pdf', 'application/pdf', 52000, 'groups/2/specs.pdf', 2, '2024-02-01 14:05:00'),
    (4, 7, 'PUBLIC', 'handbook.pdf', 'application/pdf', 98000, 'public/handbook.pdf', 1, '2024-03-15 10:01:00'),
    (5, 2, 'PUBLIC', 'rust.epub', 'application/epub+zip', 4100000, 'public/rust.epub', 2, '2024-01-07 09:05:00'),
    (6, 3, 'GROUPS', 'mockup.png', 'image/png', 230000, 'groups/2/mockup.png', 2, '2024-02-02 10:00:00'),
    (7, 1, 'PRIVATE', 'invoice.pdf', 'application/pdf', 15000, 'private/1/invoice.pdf', 1, '2024-01-05 09:10:00'),
    (8, 7, 'PRIVATE', 'misfiled.pdf', 'application/pdf', 900, 'private/misfiled.pdf', 1, '2024-03-16 08:00:00');

INSERT INTO suppliers (id, supplier_name, short_name, status, supplier_type, primary_contact,
                       contact_phone, contact_email, region_code, invoice_type, created_by, created_at) VALUES
    (1, 'Acme Components', 'Acme', 'active', 'MANUFACTURER', 'Dana Li', '555-0100', 'dana@acme.test', 'EU', 1, 1, '2024-01-10 09:00:00'),
    (2, 'Northwind Logistics', NULL, 'inactive', 'DISTRIBUTOR', 'Sam Ortiz', '555-0101', NULL, 'NA', 2, 1, '2024-02-10 09:00:00'),
    (3, 'Sandy Paper Co', 'Sandy', 'active', 'MANUFACTURER', 'Lee Park', '555-0102', 'lee@sandy.test', NULL, 1, 2, '2024-03-10 09:00:00');
"#;

pub fn seeded_db() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.ensure_schema().unwrap();
    db.get_connection().unwrap().execute_batch(SEED_SQL).unwrap();
    db
}
