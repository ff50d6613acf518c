//! Database operations using rusqlite.

use crate::auth::{password, Address, NewUser, User};
use crate::booking::{Booking, BookingStatus};
use crate::catalog::{default_catalog, Bike, BikeStatus, BikeType};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::path::PathBuf;
use thiserror::Error;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &PathBuf) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        // Create schema version table
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        // Check current version
        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            // Initial schema
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            // Record version
            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        // Future migrations would go here:
        // if from_version < 2 { ... }

        Ok(())
    }

    // ========== User operations ==========

    /// Insert a new user and return its row id.
    ///
    /// A duplicate email violates the unique constraint and inserts nothing.
    pub fn register_user(&self, user: &NewUser) -> Result<i64, DatabaseError> {
        let result = self.conn.execute(
            "INSERT INTO users (username, email, password, no_hp, tanggal_lahir, role)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.username,
                user.email,
                user.password_hash,
                user.phone,
                user.birth_date,
                user.role,
            ],
        );

        match result {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Err(DatabaseError::ConstraintViolation(format!(
                    "email {} is already registered",
                    user.email
                )))
            }
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Look up a user by credentials.
    ///
    /// Returns the stored row, with its addresses attached, when the email
    /// matches exactly and the password verifies against the stored hash;
    /// `None` on any mismatch.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<User>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, username, email, password, no_hp, tanggal_lahir, role
                 FROM users WHERE email = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = stmt.query_row(params![email], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                email: row.get(2)?,
                password_hash: row.get(3)?,
                phone: row.get(4)?,
                birth_date: row.get(5)?,
                role: row.get(6)?,
            })
        });

        let row = match result {
            Ok(row) => row,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(DatabaseError::QueryFailed(e.to_string())),
        };

        if !password::verify_password(password, &row.password_hash) {
            return Ok(None);
        }

        let addresses = self.alamat_by_user(row.id)?;
        Ok(Some(row.into_user(addresses)))
    }

    /// Check whether an email is already registered.
    pub fn email_exists(&self, email: &str) -> Result<bool, DatabaseError> {
        let result: SqliteResult<i64> = self.conn.query_row(
            "SELECT 1 FROM users WHERE email = ?1",
            params![email],
            |row| row.get(0),
        );

        match result {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(false),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Count users in the database.
    pub fn count_users(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    // ========== Address operations ==========

    /// Insert a delivery address and return its row id.
    pub fn insert_alamat(&self, address: &Address) -> Result<i64, DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO alamat (id_user, nama_penerima, no_hp_penerima, jalan, rt, rw,
                 desa_kelurahan, kecamatan, kota_kabupaten, provinsi, kode_pos, catatan)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    address.user_id,
                    address.recipient_name,
                    address.recipient_phone,
                    address.street,
                    address.rt,
                    address.rw,
                    address.village,
                    address.district,
                    address.city,
                    address.province,
                    address.postal_code,
                    address.note,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(self.conn.last_insert_rowid())
    }

    /// Get all addresses saved by a user.
    pub fn alamat_by_user(&self, user_id: i64) -> Result<Vec<Address>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id_user, nama_penerima, no_hp_penerima, jalan, rt, rw,
                 desa_kelurahan, kecamatan, kota_kabupaten, provinsi, kode_pos, catatan
                 FROM alamat WHERE id_user = ?1 ORDER BY id",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(Address {
                    user_id: row.get(0)?,
                    recipient_name: row.get(1)?,
                    recipient_phone: row.get(2)?,
                    street: row.get(3)?,
                    rt: row.get(4)?,
                    rw: row.get(5)?,
                    village: row.get(6)?,
                    district: row.get(7)?,
                    city: row.get(8)?,
                    province: row.get(9)?,
                    postal_code: row.get(10)?,
                    note: row.get(11)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut addresses = Vec::new();
        for row in rows {
            addresses.push(row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?);
        }

        Ok(addresses)
    }

    // ========== Catalog operations ==========

    /// Get the full bike catalog, seeding the default rows exactly once
    /// when the table is empty.
    pub fn all_bikes(&self) -> Result<Vec<Bike>, DatabaseError> {
        if self.count_bikes()? == 0 {
            self.seed_catalog()?;
        }

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, specs, price, rating, imageRes, status, type
                 FROM bikes ORDER BY id",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], Self::map_bike_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut bikes = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            bikes.push(row.into_bike()?);
        }

        Ok(bikes)
    }

    /// Get a catalog bike by id.
    pub fn bike_by_id(&self, id: i64) -> Result<Option<Bike>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, specs, price, rating, imageRes, status, type
                 FROM bikes WHERE id = ?1",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let result = stmt.query_row(params![id], Self::map_bike_row);

        match result {
            Ok(row) => Ok(Some(row.into_bike()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Count bikes in the catalog.
    pub fn count_bikes(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bikes", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    fn seed_catalog(&self) -> Result<(), DatabaseError> {
        let catalog = default_catalog();

        let mut stmt = self
            .conn
            .prepare(
                "INSERT INTO bikes (id, name, specs, price, rating, imageRes, status, type)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        for bike in &catalog {
            stmt.execute(params![
                bike.id,
                bike.name,
                bike.specs,
                bike.price,
                bike.rating,
                bike.image_res,
                format!("{:?}", bike.status).to_lowercase(),
                format!("{:?}", bike.bike_type).to_lowercase(),
            ])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        }

        tracing::info!("Seeded bike catalog with {} rows", catalog.len());
        Ok(())
    }

    fn map_bike_row(row: &rusqlite::Row) -> rusqlite::Result<BikeRow> {
        Ok(BikeRow {
            id: row.get(0)?,
            name: row.get(1)?,
            specs: row.get(2)?,
            price: row.get(3)?,
            rating: row.get(4)?,
            image_res: row.get(5)?,
            status: row.get(6)?,
            bike_type: row.get(7)?,
        })
    }

    // ========== Booking operations ==========

    /// Insert a new booking.
    pub fn insert_booking(&self, booking: &Booking) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO bookings (id, bike_id, start_date, end_date, total_price, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    booking.id,
                    booking.bike.id,
                    booking.start_date,
                    booking.end_date,
                    booking.total_price,
                    format!("{:?}", booking.status).to_lowercase(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Delete a booking by id.
    pub fn delete_booking(&self, id: &str) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM bookings WHERE id = ?1", params![id])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Booking {}", id)));
        }

        Ok(())
    }

    /// Update a booking's lifecycle status.
    pub fn update_booking_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE bookings SET status = ?2 WHERE id = ?1",
                params![id, format!("{:?}", status).to_lowercase()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Booking {}", id)));
        }

        Ok(())
    }

    /// Get all bookings, each joined with its catalog bike.
    ///
    /// A booking whose bike id no longer resolves is dropped from the
    /// result rather than surfacing an error.
    pub fn all_bookings(&self) -> Result<Vec<Booking>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, bike_id, start_date, end_date, total_price, status
                 FROM bookings ORDER BY id",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(BookingRow {
                    id: row.get(0)?,
                    bike_id: row.get(1)?,
                    start_date: row.get(2)?,
                    end_date: row.get(3)?,
                    total_price: row.get(4)?,
                    status: row.get(5)?,
                })
            })
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut bookings = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            match self.bike_by_id(row.bike_id)? {
                Some(bike) => bookings.push(row.into_booking(bike)?),
                None => {
                    tracing::warn!(
                        "Dropping booking {} referencing missing bike {}",
                        row.id,
                        row.bike_id
                    );
                }
            }
        }

        Ok(bookings)
    }

    /// Count bookings in the database.
    pub fn count_bookings(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    /// Next free booking id in the "SC-NNN" sequence.
    ///
    /// One past the highest existing numeric suffix, so deleted history
    /// never causes an id to be handed out twice.
    pub fn next_booking_id(&self) -> Result<String, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM bookings")
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut highest = 0u32;
        for row in rows {
            let id = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            if let Some(n) = id.strip_prefix("SC-").and_then(|s| s.parse::<u32>().ok()) {
                highest = highest.max(n);
            }
        }

        Ok(format!("SC-{:03}", highest + 1))
    }
}

/// Intermediate struct for reading user rows from database.
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    birth_date: Option<String>,
    role: String,
}

impl UserRow {
    fn into_user(self, addresses: Vec<Address>) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            addresses,
            phone: self.phone,
            birth_date: self.birth_date,
            role: self.role,
        }
    }
}

/// Intermediate struct for reading bike rows from database.
struct BikeRow {
    id: i64,
    name: String,
    specs: String,
    price: String,
    rating: f64,
    image_res: String,
    status: String,
    bike_type: String,
}

impl BikeRow {
    fn into_bike(self) -> Result<Bike, DatabaseError> {
        let status = match self.status.to_lowercase().as_str() {
            "available" => BikeStatus::Available,
            "unavailable" => BikeStatus::Unavailable,
            _ => {
                return Err(DatabaseError::DeserializationError(format!(
                    "Unknown bike status: {}",
                    self.status
                )))
            }
        };

        let bike_type = match self.bike_type.to_lowercase().as_str() {
            "matic" => BikeType::Matic,
            "manual" => BikeType::Manual,
            _ => {
                return Err(DatabaseError::DeserializationError(format!(
                    "Unknown bike type: {}",
                    self.bike_type
                )))
            }
        };

        Ok(Bike {
            id: self.id,
            name: self.name,
            specs: self.specs,
            price: self.price,
            rating: self.rating,
            image_res: self.image_res,
            status,
            bike_type,
        })
    }
}

/// Intermediate struct for reading booking rows from database.
struct BookingRow {
    id: String,
    bike_id: i64,
    start_date: String,
    end_date: String,
    total_price: String,
    status: String,
}

impl BookingRow {
    fn into_booking(self, bike: Bike) -> Result<Booking, DatabaseError> {
        let status = match self.status.to_lowercase().as_str() {
            "ongoing" => BookingStatus::Ongoing,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => {
                return Err(DatabaseError::DeserializationError(format!(
                    "Unknown booking status: {}",
                    self.status
                )))
            }
        };

        Ok(Booking {
            id: self.id,
            bike,
            start_date: self.start_date,
            end_date: self.end_date,
            total_price: self.total_price,
            status,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
