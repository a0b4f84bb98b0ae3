//! Directory seeding command.

use std::sync::Arc;

use clap::Args;

use usersvc_auth::{
    AdminAccount, AdminOutcome, DirectorySeeder, PasswordHasher, PostgresDirectoryWriter,
};
use usersvc_core::config::AppConfig;
use usersvc_core::error::AppError;
use usersvc_database::DatabasePool;
use usersvc_database::migration::run_migrations;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Email of the admin user to create
    #[arg(long, env = "USERSVC_SEED_ADMIN_EMAIL", requires = "admin_password")]
    pub admin_email: Option<String>,

    /// Password of the admin user to create
    #[arg(long, env = "USERSVC_SEED_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: Option<String>,

    /// Display name of the admin user
    #[arg(long, default_value = "Administrator")]
    pub admin_name: String,
}

impl SeedArgs {
    fn admin(&self) -> Option<AdminAccount> {
        let (email, password) = (self.admin_email.as_ref()?, self.admin_password.as_ref()?);
        Some(AdminAccount {
            name: self.admin_name.clone(),
            email: email.clone(),
            password: password.clone(),
        })
    }
}

/// Runs migrations, then seeds the directory.
///
/// Passwords are hashed with the configured pepper, so the seeded admin
/// can log in to a server started with the same configuration.
pub async fn execute(args: &SeedArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    let hasher = PasswordHasher::from_config(&config.auth)?;
    let seeder = DirectorySeeder::new(Arc::new(PostgresDirectoryWriter::new(&db)), hasher);

    let outcome = seeder.seed(args.admin().as_ref()).await;
    db.close().await;
    let report = outcome?;

    match report.admin {
        Some(AdminOutcome::Created(id)) => {
            tracing::info!(user_id = %id, "Seeding completed, admin created");
        }
        Some(AdminOutcome::Existing(id)) => {
            tracing::info!(user_id = %id, "Seeding completed, existing user granted Admin");
        }
        None => tracing::info!("Seeding completed without an admin user"),
    }
    Ok(())
}
