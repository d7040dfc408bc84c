//! # Profile Commands
//!
//! The display name saved on first login. Orders are placed under the
//! caller's principal; the profile is what operators see next to it.

use clap::Subcommand;
use munchies_client::{Backend, QueryClient};
use munchies_core::validation::validate_name;
use munchies_core::{UserProfile, UserRole};
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Print the saved profile and role
    Show,

    /// Save the display name
    Set { name: String },
}

pub async fn run<B: Backend>(cmd: ProfileCommand, client: &QueryClient<B>) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Show => {
            let role = client.caller_role().await?;
            match client.current_user_profile().await? {
                Some(profile) => println!("{} ({})", profile.name, role_label(role)),
                None => {
                    println!("No profile yet ({}).", role_label(role));
                    println!("Run `munchies profile set <NAME>` to finish signing up.");
                }
            }
        }
        ProfileCommand::Set { name } => {
            let profile = save(client, &name).await?;
            println!("Saved profile for {}", profile.name);
        }
    }
    Ok(())
}

/// Validates and saves the caller's display name.
pub async fn save<B: Backend>(client: &QueryClient<B>, name: &str) -> anyhow::Result<UserProfile> {
    let profile = UserProfile {
        name: validate_name("name", name)?,
    };
    client.save_caller_user_profile(profile.clone()).await?;
    info!(name = %profile.name, "Profile saved");
    Ok(profile)
}

fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "admin",
        UserRole::User => "customer",
        UserRole::Guest => "guest",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use munchies_client::InMemoryBackend;

    #[tokio::test]
    async fn test_save_trims_and_stores_name() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("alice"));
        assert_eq!(client.current_user_profile().await.unwrap(), None);

        let profile = save(&client, "  Alice ").await.unwrap();
        assert_eq!(profile.name, "Alice");
        assert_eq!(client.current_user_profile().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_blank_name_is_not_sent() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("bob"));

        assert!(save(&client, "   ").await.is_err());
        assert_eq!(client.current_user_profile().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_guests_cannot_save() {
        let client = QueryClient::new(InMemoryBackend::demo("admin").as_caller("anonymous"));
        assert!(save(&client, "Ghost").await.is_err());
    }
}
