//! SQL schema for the subscription store.
//!
//! Executed once at connection startup. There is no migration machinery;
//! `PRAGMA user_version` records the layout in case one is ever needed.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS subscriptions (
    id            TEXT PRIMARY KEY,
    service_name  TEXT NOT NULL CHECK (service_name <> ''),
    price         INTEGER NOT NULL CHECK (price BETWEEN 1 AND 2147483647), -- minor currency units
    user_id       TEXT NOT NULL,
    start_date    TEXT NOT NULL,   -- YYYY-MM-01
    end_date      TEXT,            -- YYYY-MM-01, NULL when open-ended
    created_at    TEXT NOT NULL,   -- RFC 3339 UTC, fixed nanosecond width
    updated_at    TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS subscriptions_user_idx    ON subscriptions(user_id);
CREATE INDEX IF NOT EXISTS subscriptions_service_idx ON subscriptions(service_name);
CREATE INDEX IF NOT EXISTS subscriptions_created_idx ON subscriptions(created_at);

PRAGMA user_version = 1;
";
