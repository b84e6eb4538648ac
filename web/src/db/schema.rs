use sqlx::PgPool;

// The unique constraint is what turns a lost booking race into an error
// instead of a double booking.
const CREATE_BOOKINGS: &str = "
    CREATE TABLE IF NOT EXISTS bookings (
        id BIGSERIAL PRIMARY KEY,
        booking_date DATE NOT NULL,
        booking_time TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        CONSTRAINT bookings_slot_unique UNIQUE (booking_date, booking_time)
    )
";

const CREATE_DATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS bookings_booking_date_idx ON bookings (booking_date)";

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_BOOKINGS).execute(pool).await?;
    sqlx::query(CREATE_DATE_INDEX).execute(pool).await?;
    tracing::info!("Bookings schema ready");
    Ok(())
}
