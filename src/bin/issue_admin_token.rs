//! Mint an admin bearer token signed with the configured `jwt_secret`.

use anyhow::Context;
use clap::Parser;

use hotel_catalog_api::{
    auth::{AuthService, ADMIN_ROLE},
    config,
};

#[derive(Parser)]
#[command(
    name = "issue-admin-token",
    about = "Print a JWT accepted by the back-office routes",
    version
)]
struct Cli {
    #[arg(long, default_value = "admin", help = "Subject recorded in the token")]
    subject: String,
    #[arg(
        long,
        default_value_t = 24,
        value_parser = clap::value_parser!(i64).range(1..),
        help = "Lifetime in hours"
    )]
    ttl_hours: i64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config().context("failed to load configuration")?;
    let auth = AuthService::new(cfg.jwt_secret, cfg.jwt_issuer);
    let token = auth
        .issue_token(
            &cli.subject,
            &[ADMIN_ROLE],
            chrono::Duration::hours(cli.ttl_hours),
        )
        .context("failed to sign token")?;

    println!("{token}");
    Ok(())
}
