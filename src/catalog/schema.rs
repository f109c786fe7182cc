//! SQLite schema definition

/// SQL schema for the catalog database.
///
/// Table and column names match databases created by earlier deployments.
/// `AUTOINCREMENT` keeps ids strictly increasing: a deleted row's id is never
/// handed out again.
pub const SCHEMA_SQL: &str = r#"
-- Clients
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

-- Client checklists, displayed in id order
CREATE TABLE IF NOT EXISTS client_procedures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    procedure_text TEXT NOT NULL
);

-- Providers
CREATE TABLE IF NOT EXISTS providers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    image TEXT NOT NULL DEFAULT ''
);

-- Provider checklists, partitioned by claim type
CREATE TABLE IF NOT EXISTS provider_procedures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider_id INTEGER NOT NULL REFERENCES providers(id) ON DELETE CASCADE,
    sinistro_type TEXT NOT NULL,
    procedure_text TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS additional_provider_procedures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    provider_id INTEGER NOT NULL REFERENCES providers(id) ON DELETE CASCADE,
    sinistro_type TEXT NOT NULL,
    procedure_text TEXT NOT NULL
);

-- Reference procedures per claim type
CREATE TABLE IF NOT EXISTS sinistro_procedures (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sinistro_type TEXT NOT NULL,
    procedure_text TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_client_procedures_client ON client_procedures(client_id);
CREATE INDEX IF NOT EXISTS idx_provider_procedures_provider ON provider_procedures(provider_id, sinistro_type);
CREATE INDEX IF NOT EXISTS idx_additional_provider_procedures_provider ON additional_provider_procedures(provider_id, sinistro_type);
CREATE INDEX IF NOT EXISTS idx_sinistro_procedures_type ON sinistro_procedures(sinistro_type);
"#;
