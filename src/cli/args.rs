//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// Lei Em Mãos - civic engagement API
#[derive(Parser, Debug)]
#[command(name = "lei-em-maos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Load reference data and the initial accounts
    Seed(SeedArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (overrides SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the seed command
#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Administrator login
    #[arg(long, default_value = "admin@leiemmaos.com", env = "SEED_ADMIN_EMAIL")]
    pub admin_email: String,

    /// Administrator password
    #[arg(long, env = "SEED_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// Sample politician login
    #[arg(long, default_value = "politico@sp.gov.br", env = "SEED_POLITICIAN_EMAIL")]
    pub politician_email: String,

    /// Sample politician password
    #[arg(long, env = "SEED_POLITICIAN_PASSWORD", hide_env_values = true)]
    pub politician_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_requires_passwords() {
        let parsed = Cli::try_parse_from([
            "lei-em-maos",
            "seed",
            "--admin-password",
            "admin-secret",
            "--politician-password",
            "politico-secret",
        ])
        .unwrap();

        match parsed.command {
            Commands::Seed(args) => {
                assert_eq!(args.admin_email, "admin@leiemmaos.com");
                assert_eq!(args.politician_password, "politico-secret");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_serve_overrides_are_optional() {
        let parsed = Cli::try_parse_from(["lei-em-maos", "serve", "--port", "8080"]).unwrap();

        match parsed.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_migrate_actions() {
        let parsed = Cli::try_parse_from(["lei-em-maos", "-v", "migrate", "fresh"]).unwrap();
        assert!(parsed.verbose);
        assert!(matches!(
            parsed.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Fresh
            })
        ));
    }
}
