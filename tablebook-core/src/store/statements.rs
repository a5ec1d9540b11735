//! SQL issued for bookings
//!
//! Shared by every store backend so the same text runs against Postgres and
//! SQLite. Placeholders are `$N`; parameter order matches [`BookingValues`].
//!
//! [`BookingValues`]: super::BookingValues

pub(crate) const SELECT_BOOKINGS_FOR_PATRON: &str = r#"
    SELECT id,
           customer_id AS "customerId",
           num_guests AS "numGuests",
           start_at AS "startAt",
           notes
    FROM bookings
    WHERE customer_id = $1
"#;

pub(crate) const SELECT_TOP_PATRONS: &str = r#"
    SELECT p.id AS customer_id,
           p.first_name,
           p.last_name,
           p.first_name || ' ' || p.last_name AS "fullName",
           COUNT(b.id) AS reservation_count
    FROM patrons p
    JOIN bookings b ON p.id = b.customer_id
    GROUP BY p.id, p.first_name, p.last_name
    ORDER BY reservation_count DESC
    LIMIT 10
"#;

pub(crate) const INSERT_BOOKING: &str = r#"
    INSERT INTO bookings (customer_id, start_at, num_guests, notes)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

pub(crate) const UPDATE_BOOKING: &str = r#"
    UPDATE bookings
    SET customer_id = $1, start_at = $2, num_guests = $3, notes = $4
    WHERE id = $5
"#;
