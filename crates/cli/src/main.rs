//! `dressup` -- command-line front-end for the actor wardrobe backend.
//!
//! Drives the same create-actor form and detail loaders the app screens
//! use, against a real Appwrite project.
//!
//! # Environment variables
//!
//! | Variable                        | Required | Default | Description                      |
//! |---------------------------------|----------|---------|----------------------------------|
//! | `APPWRITE_ENDPOINT`             | yes      | --      | API base, e.g. `https://cloud.appwrite.io/v1` |
//! | `APPWRITE_PROJECT_ID`           | yes      | --      | Project id                       |
//! | `APPWRITE_API_KEY`              | no       | --      | Server API key                   |
//! | `APPWRITE_DATABASE_ID`          | yes      | --      | Database holding the collections |
//! | `APPWRITE_ACTOR_COLLECTION_ID`  | yes      | --      | Actors collection                |
//! | `APPWRITE_OUTFIT_COLLECTION_ID` | yes      | --      | Outfits collection               |
//! | `APPWRITE_BUCKET_ID`            | yes      | --      | Image bucket                     |
//! | `REQUEST_TIMEOUT_SECS`          | no       | `30`    | HTTP request timeout             |

mod host;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dressup_backend::{ActorStore, AppwriteStore, BackendConfig};
use dressup_core::actor::{Gender, Genre};
use dressup_core::record::{ActorWithImage, OutfitWithImage};
use dressup_form::detail::{DetailState, DetailView};
use dressup_form::picker::FileImagePicker;
use dressup_form::ActorForm;

use host::{LogNavigator, StderrNotifier};

#[derive(Debug, Parser)]
#[command(name = "dressup", version, about = "Create and inspect wardrobe actors and outfits")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate and upload a new actor with its portrait.
    CreateActor(CreateActorArgs),
    /// Print one actor as JSON.
    GetActor { id: String },
    /// Print one outfit as JSON.
    GetOutfit { id: String },
}

#[derive(Debug, Args)]
struct CreateActorArgs {
    #[arg(long)]
    name: String,
    /// Portrait image file.
    #[arg(long)]
    image: PathBuf,
    /// Years, 1-99.
    #[arg(long)]
    age: Option<String>,
    /// Centimeters, 50-250.
    #[arg(long)]
    height: Option<String>,
    /// Kilograms, 20-200.
    #[arg(long)]
    weight: Option<String>,
    #[arg(long)]
    gender: Option<Gender>,
    #[arg(long)]
    genre: Option<Genre>,
    #[arg(long)]
    bio: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "dressup_cli=info,dressup_form=info,dressup_backend=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = BackendConfig::from_env().context("Failed to load backend configuration")?;
    tracing::info!(endpoint = %config.endpoint, project = %config.project_id, "Backend configured");
    let store: Arc<dyn ActorStore> = Arc::new(AppwriteStore::new(config)?);

    match cli.command {
        Command::CreateActor(args) => create_actor(store, args).await,
        Command::GetActor { id } => {
            let view = DetailView::<ActorWithImage>::load_actor(store.as_ref(), id).await;
            print_detail(view.state())
        }
        Command::GetOutfit { id } => {
            let view = DetailView::<OutfitWithImage>::load_outfit(store.as_ref(), id).await;
            print_detail(view.state())
        }
    }
}

async fn create_actor(store: Arc<dyn ActorStore>, args: CreateActorArgs) -> anyhow::Result<()> {
    let form = ActorForm::new(store, Arc::new(LogNavigator), Arc::new(StderrNotifier));

    form.edit(|d| {
        d.set_name(args.name);
        d.set_age(args.age.unwrap_or_default());
        d.set_height(args.height.unwrap_or_default());
        d.set_weight(args.weight.unwrap_or_default());
        d.set_bio(args.bio.unwrap_or_default());
        if let Some(gender) = args.gender {
            d.set_gender(gender);
        }
        if let Some(genre) = args.genre {
            d.toggle_genre(genre);
        }
    });

    if !form.pick_image(&FileImagePicker::new(&args.image)).await {
        bail!("Cannot read an image from {}", args.image.display());
    }

    // The notifier has already shown the user-facing message.
    let id = form.submit().await.context("Actor was not created")?;
    println!("{id}");
    Ok(())
}

fn print_detail<T: Serialize>(state: &DetailState<T>) -> anyhow::Result<()> {
    match state {
        DetailState::Loaded(record) => {
            println!("{}", serde_json::to_string_pretty(record)?);
            Ok(())
        }
        DetailState::Failed(reason) => bail!("{reason}"),
        DetailState::Loading => bail!("Record did not load"),
    }
}
