use diesel::pg::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies every pending migration. Safe to call on every startup: already
/// applied migrations are skipped.
pub fn run_pending(conn: &mut PgConnection) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  conn.run_pending_migrations(MIGRATIONS)?;
  Ok(())
}
