//! Command-line shell for the Pet Your Pet service.
//!
//! Wraps the REST API (sign-up/sign-in, pet management) and hosts the
//! interactive petting session: the CLI owns the mutable session cell and
//! drives the pure interaction cycle engine from keypresses.

mod play;
mod session_file;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Password};
use petpet_client::ApiClient;
use petpet_model::{PetAttributes, PetId, PetUpdate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_file::CliSession;

#[derive(Parser, Debug)]
#[command(name = "petpetctl")]
#[command(about = "Manage and pet your pets from the terminal")]
struct Cli {
    /// Server base URL
    #[arg(
        long,
        env = "PETPET_SERVER_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account and sign in
    Signup {
        /// Username to register
        username: String,
    },
    /// Sign in to an existing account
    Login {
        /// Username to sign in as
        username: String,
    },
    /// Revoke the current session token
    Logout,
    /// Show the identity behind the stored token
    Whoami,
    /// Manage your pets
    #[command(subcommand)]
    Pets(PetsCommand),
    /// Interactive petting session
    Play,
}

#[derive(Subcommand, Debug)]
enum PetsCommand {
    /// List your pets
    List,
    /// Add a pet
    Add {
        name: String,
        species: String,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        weight: Option<i64>,
        /// Default image URL
        #[arg(long)]
        image: Option<String>,
        /// Alternate image URL shown at the peak
        #[arg(long)]
        alt_image: Option<String>,
    },
    /// Remove a pet
    Rm {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Edit a pet's attributes
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        #[arg(long)]
        weight: Option<i64>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        alt_image: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Signup { username } => {
            let password = Password::new()
                .with_prompt("Password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()?;
            let mut client = ApiClient::new(&cli.server)?;
            client.sign_up(&username, &password).await?;
            CliSession::new(&cli.server, client.token().unwrap_or_default())
                .save()?;
            println!("Signed up and logged in as {username}");
        }
        Command::Login { username } => {
            let password = Password::new().with_prompt("Password").interact()?;
            let mut client = ApiClient::new(&cli.server)?;
            client.sign_in(&username, &password).await?;
            CliSession::new(&cli.server, client.token().unwrap_or_default())
                .save()?;
            println!("Logged in as {username}");
        }
        Command::Logout => {
            let mut client = authed_client(&cli.server)?;
            client.sign_out().await?;
            CliSession::clear()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let client = authed_client(&cli.server)?;
            let profile = client.me().await?;
            println!("{} ({})", profile.username, profile.id);
        }
        Command::Pets(command) => run_pets(&cli.server, command).await?,
        Command::Play => {
            let client = authed_client(&cli.server)?;
            play::run(&client).await?;
        }
    }
    Ok(())
}

async fn run_pets(server: &str, command: PetsCommand) -> Result<()> {
    let client = authed_client(server)?;
    match command {
        PetsCommand::List => {
            let pets = client.list_pets().await?;
            if pets.is_empty() {
                println!("No pets yet. Add one with `petpetctl pets add`.");
                return Ok(());
            }
            for pet in pets {
                let age = pet
                    .age
                    .map(|a| format!("{a}y"))
                    .unwrap_or_else(|| "?".to_string());
                println!("{}  {}  ({}, {})", pet.id, pet.name, pet.species, age);
            }
        }
        PetsCommand::Add {
            name,
            species,
            age,
            weight,
            image,
            alt_image,
        } => {
            let attributes = PetAttributes {
                name,
                species,
                age,
                weight,
                default_image_url: image,
                alternate_image_url: alt_image,
            };
            let pet = client.create_pet(&attributes).await?;
            println!("Created {} ({})", pet.name, pet.id);
        }
        PetsCommand::Rm { id, yes } => {
            let id = parse_id(&id)?;
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Really delete this pet?")
                    .default(false)
                    .interact()?;
                if !confirmed {
                    return Ok(());
                }
            }
            let pet = client.delete_pet(id).await?;
            println!("Deleted {}", pet.name);
        }
        PetsCommand::Edit {
            id,
            name,
            species,
            age,
            weight,
            image,
            alt_image,
        } => {
            let id = parse_id(&id)?;
            let update = PetUpdate {
                name,
                species,
                age,
                weight,
                default_image_url: image,
                alternate_image_url: alt_image,
            };
            if update.is_empty() {
                bail!("nothing to change; pass at least one --flag");
            }
            let pet = client.update_pet(id, &update).await?;
            println!("Updated {}", pet.name);
        }
    }
    Ok(())
}

fn authed_client(server: &str) -> Result<ApiClient> {
    let session = CliSession::load()?
        .context("not logged in; run `petpetctl login <username>` first")?;
    let base = if session.server_url.is_empty() {
        server
    } else {
        &session.server_url
    };
    Ok(ApiClient::new(base)?.with_token(session.token))
}

fn parse_id(raw: &str) -> Result<PetId> {
    PetId::parse(raw).map_err(|e| anyhow::anyhow!("invalid pet id: {e}"))
}
