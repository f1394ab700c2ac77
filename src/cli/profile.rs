//! Profile CLI commands

use clap::Subcommand;

use crate::display::format_profile;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{ProfilePatch, SUPPORTED_CURRENCIES};
use crate::store::FinanceStore;
use crate::storage::KeyValueStorage;

/// Profile subcommands
#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the profile and lifetime stats
    Show,

    /// Edit profile details
    Edit {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Default currency symbol (₹, $, € or £)
        #[arg(short, long)]
        currency: Option<String>,
    },
}

/// Handle a profile command
pub fn handle_profile_command<S: KeyValueStorage>(
    store: &mut FinanceStore<S>,
    cmd: ProfileCommands,
) -> FinanceResult<()> {
    match cmd {
        ProfileCommands::Show => {
            print!("{}", format_profile(store.profile(), &store.totals()));
        }

        ProfileCommands::Edit {
            name,
            email,
            currency,
        } => {
            let mut patch = ProfilePatch::new();
            if let Some(name) = name {
                patch = patch.name(name.trim());
            }
            if let Some(email) = email {
                patch = patch.email(email.trim());
            }
            if let Some(currency) = currency {
                let currency = currency.trim();
                if !currency.is_empty() && !SUPPORTED_CURRENCIES.contains(&currency) {
                    return Err(FinanceError::Validation(format!(
                        "Unsupported currency '{}'. Use one of: {}",
                        currency,
                        SUPPORTED_CURRENCIES.join(", ")
                    )));
                }
                patch = patch.default_currency(currency);
            }

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }
            patch.validate().map_err(FinanceError::Validation)?;

            let profile = store.update_profile(patch)?;
            println!("Updated profile for {}", profile.name);
        }
    }

    Ok(())
}
