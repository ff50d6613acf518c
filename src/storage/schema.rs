//! Database schema definitions for ScootEase.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    no_hp TEXT,
    tanggal_lahir TEXT,
    role TEXT NOT NULL DEFAULT 'user'
);

-- Addresses table
CREATE TABLE IF NOT EXISTS alamat (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    id_user INTEGER NOT NULL REFERENCES users(id),
    nama_penerima TEXT NOT NULL,
    no_hp_penerima TEXT NOT NULL,
    jalan TEXT NOT NULL,
    rt TEXT NOT NULL,
    rw TEXT NOT NULL,
    desa_kelurahan TEXT NOT NULL,
    kecamatan TEXT NOT NULL,
    kota_kabupaten TEXT NOT NULL,
    provinsi TEXT NOT NULL,
    kode_pos TEXT NOT NULL,
    catatan TEXT
);

CREATE INDEX IF NOT EXISTS idx_alamat_id_user ON alamat(id_user);

-- Bikes table (rental catalog)
CREATE TABLE IF NOT EXISTS bikes (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    specs TEXT NOT NULL,
    price TEXT NOT NULL,
    rating REAL NOT NULL,
    imageRes TEXT NOT NULL,
    status TEXT NOT NULL,
    type TEXT NOT NULL
);

-- Bookings table
CREATE TABLE IF NOT EXISTS bookings (
    id TEXT PRIMARY KEY,
    bike_id INTEGER NOT NULL REFERENCES bikes(id),
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    total_price TEXT NOT NULL,
    status TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_bookings_bike_id ON bookings(bike_id);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
