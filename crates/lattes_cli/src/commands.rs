//! Subcommand dispatch onto core services.

use std::process::ExitCode;

use anyhow::Result;
use lattes_core::{AccountService, CatalogService, StoreRepository};

use crate::output;
use crate::Commands;

/// Runs one subcommand against an already loaded store.
///
/// Lookups that find nothing print a message and exit non-zero instead of
/// returning an error.
pub(crate) fn execute(
    command: Commands,
    repo: StoreRepository<'_>,
    json: bool,
) -> Result<ExitCode> {
    match command {
        Commands::Register { username, password } => {
            let mut accounts = AccountService::new(repo);
            let user = accounts.register(&username, &password)?;
            output::user(&user, json)?;
        }
        Commands::Login { username, password } => {
            let accounts = AccountService::new(repo);
            match accounts.login(&username, &password)? {
                Some(user) => output::user(&user, json)?,
                None => {
                    eprintln!("Invalid credentials.");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::AddShop {
            user,
            name,
            location,
        } => {
            let mut catalog = CatalogService::new(repo);
            let shop = catalog.add_shop(user, &name, location.as_deref())?;
            output::shop(&shop, json)?;
        }
        Commands::SpeedTest {
            user,
            shop,
            download,
            upload,
        } => {
            let mut catalog = CatalogService::new(repo);
            let test = catalog.submit_speed_test(user, shop, download, upload)?;
            output::speed_test(&test, json)?;
        }
        Commands::Vote {
            user,
            shop,
            direction,
        } => {
            let mut catalog = CatalogService::new(repo);
            let shop = catalog.cast_vote(user, shop, direction)?;
            output::shop(&shop, json)?;
        }
        Commands::Shops => {
            let catalog = CatalogService::new(repo);
            output::summaries(&catalog.list_shop_summaries()?, json)?;
        }
        Commands::Show { shop } => {
            let catalog = CatalogService::new(repo);
            match catalog.shop_detail(shop)? {
                Some(detail) => output::detail(&detail, json)?,
                None => {
                    eprintln!("Coffee shop not found: {shop}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
