#[cfg(feature = "ssr")]
mod db_impl {
    use crate::models::restaurant::Restaurant;
    use crate::models::review::{Review, ReviewInput};
    use leptos::logging;
    use leptos::logging::log;
    use rusqlite::{params, Connection, Error, OptionalExtension, Row};
    use std::sync::Arc;
    use tokio::sync::Mutex;


    /// True only for UNIQUE violations. The one UNIQUE constraint in the
    /// schema is (restaurant_id, user_id) on reviews.
    pub fn is_unique_violation(err: &Error) -> bool {
        matches!(
            err,
            Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        )
    }

    fn restaurant_from_row(row: &Row<'_>) -> Result<Restaurant, Error> {
        Ok(Restaurant {
            id: row.get(0)?,
            name: row.get(1)?,
            cuisine: row.get(2)?,
            address: row.get(3)?,
            description: row.get(4)?,
            created_by: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn review_from_row(row: &Row<'_>) -> Result<Review, Error> {
        Ok(Review {
            id: row.get(0)?,
            restaurant_id: row.get(1)?,
            user_id: row.get(2)?,
            service_rating: row.get(3)?,
            price_rating: row.get(4)?,
            menu_rating: row.get(5)?,
            comment: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    const RESTAURANT_COLUMNS: &str =
        "id, name, cuisine, address, description, created_by, created_at";
    const REVIEW_COLUMNS: &str =
        "id, restaurant_id, user_id, service_rating, price_rating, menu_rating, comment, created_at";

    // Define a struct to represent a database connection
    #[derive(Debug)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        // Create a new database connection
        pub fn new(db_path: &str) -> Result<Self, Error> {
            let conn = Connection::open(db_path)?;
            logging::log!("Database connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        // Create the database schema
        pub async fn create_schema(&self) -> Result<(), Error> {
            let conn = self.conn.lock().await;

            // 1. Restaurants table
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS restaurants (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    cuisine TEXT,
                    address TEXT,
                    description TEXT,
                    created_by TEXT NOT NULL,
                    created_at TEXT NOT NULL
                );",
            )
            .map_err(|e| {
                logging::error!("Failed creating restaurants table: {}", e);
                e
            })?;

            // 2. Reviews table. No foreign key: reviews outlive a deleted restaurant.
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    restaurant_id TEXT NOT NULL,
                    user_id TEXT NOT NULL,
                    service_rating REAL NOT NULL,
                    price_rating REAL NOT NULL,
                    menu_rating REAL NOT NULL,
                    comment TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    UNIQUE (restaurant_id, user_id)
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews (user_id);",
            )
            .map_err(|e| {
                logging::error!("Failed creating reviews table: {}", e);
                e
            })?;
            Ok(())
        }

        pub async fn insert_restaurant(&self, restaurant: &Restaurant) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO restaurants (id, name, cuisine, address, description, created_by, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    &restaurant.id,
                    &restaurant.name,
                    &restaurant.cuisine,
                    &restaurant.address,
                    &restaurant.description,
                    &restaurant.created_by,
                    &restaurant.created_at
                ],
            )?;
            log!("[DB] Restaurant inserted: {}", restaurant.id);
            Ok(())
        }

        /// Overwrites the editable columns. Returns false if the id is unknown.
        pub async fn update_restaurant(&self, restaurant: &Restaurant) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let changed = conn.execute(
                "UPDATE restaurants SET name = ?, cuisine = ?, address = ?, description = ?
                WHERE id = ?",
                params![
                    &restaurant.name,
                    &restaurant.cuisine,
                    &restaurant.address,
                    &restaurant.description,
                    &restaurant.id
                ],
            )?;
            log!("[DB] Restaurant {} updated ({} rows)", restaurant.id, changed);
            Ok(changed > 0)
        }

        pub async fn delete_restaurant(&self, id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let changed = conn.execute("DELETE FROM restaurants WHERE id = ?", [id])?;
            log!("[DB] Restaurant deleted: {} ({} rows)", id, changed);
            Ok(changed > 0)
        }

        pub async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, Error> {
            let conn = self.conn.lock().await;
            conn.query_row(
                &format!("SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?"),
                [id],
                restaurant_from_row,
            )
            .optional()
        }

        // Retrieve all restaurants, newest first
        pub async fn get_restaurants(&self) -> Result<Vec<Restaurant>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!(
                "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY created_at DESC"
            ))?;
            let restaurants = stmt
                .query_map([], restaurant_from_row)?
                .collect::<Result<Vec<_>, _>>()?;
            logging::log!("Fetched {} restaurants from the database", restaurants.len());
            Ok(restaurants)
        }

        /// Fails with a constraint violation if the user already reviewed
        /// this restaurant.
        pub async fn insert_review(&self, review: &Review) -> Result<(), Error> {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO reviews (id, restaurant_id, user_id, service_rating, price_rating, menu_rating, comment, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    &review.id,
                    &review.restaurant_id,
                    &review.user_id,
                    review.service_rating,
                    review.price_rating,
                    review.menu_rating,
                    &review.comment,
                    &review.created_at
                ],
            )
            .map_err(|e| {
                log!("[DB] Review insert failed: {:?}", e);
                e
            })?;
            log!(
                "[DB] Review {} inserted for restaurant {}",
                review.id,
                review.restaurant_id
            );
            Ok(())
        }

        /// Replaces the three ratings and the comment.
        pub async fn update_review(&self, id: &str, input: &ReviewInput) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let changed = conn.execute(
                "UPDATE reviews SET service_rating = ?, price_rating = ?, menu_rating = ?, comment = ?
                WHERE id = ?",
                params![
                    input.service_rating,
                    input.price_rating,
                    input.menu_rating,
                    &input.comment,
                    id
                ],
            )?;
            log!("[DB] Review {} updated ({} rows)", id, changed);
            Ok(changed > 0)
        }

        pub async fn delete_review(&self, id: &str) -> Result<bool, Error> {
            let conn = self.conn.lock().await;
            let changed = conn.execute("DELETE FROM reviews WHERE id = ?", [id])?;
            log!("[DB] Review deleted: {} ({} rows)", id, changed);
            Ok(changed > 0)
        }

        pub async fn get_review(&self, id: &str) -> Result<Option<Review>, Error> {
            let conn = self.conn.lock().await;
            conn.query_row(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = ?"),
                [id],
                review_from_row,
            )
            .optional()
        }

        pub async fn get_reviews_by_restaurant(
            &self,
            restaurant_id: &str,
        ) -> Result<Vec<Review>, Error> {
            self.query_reviews(
                &format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE restaurant_id = ? ORDER BY created_at DESC"
                ),
                Some(restaurant_id),
            )
            .await
        }

        pub async fn get_reviews_by_user(&self, user_id: &str) -> Result<Vec<Review>, Error> {
            self.query_reviews(
                &format!(
                    "SELECT {REVIEW_COLUMNS} FROM reviews WHERE user_id = ? ORDER BY created_at DESC"
                ),
                Some(user_id),
            )
            .await
        }

        // Insertion order, so leaderboard ties stay stable between calls
        pub async fn get_all_reviews(&self) -> Result<Vec<Review>, Error> {
            self.query_reviews(
                &format!("SELECT {REVIEW_COLUMNS} FROM reviews ORDER BY rowid ASC"),
                None,
            )
            .await
        }

        async fn query_reviews(&self, sql: &str, key: Option<&str>) -> Result<Vec<Review>, Error> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(sql)?;
            let rows = match key {
                Some(key) => stmt.query_map([key], review_from_row)?,
                None => stmt.query_map([], review_from_row)?,
            };
            let reviews = rows.collect::<Result<Vec<_>, _>>()?;
            log!("[DB] Fetched {} reviews", reviews.len());
            Ok(reviews)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{is_unique_violation, Database};
