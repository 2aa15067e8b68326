use dotenvy::dotenv;
use product_catalog::{
    config,
    core::{
        client::HttpCatalogClient,
        notify::{ChannelNotifier, Notification},
        store::CatalogStore,
    },
    errors::{Error, Result},
    view::{self, Outcome},
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Build the store and load the catalog
    let client = HttpCatalogClient::new(&app_config.api)?;
    info!("Using catalog API at {}", client.base_url());
    let (notifier, mut notifications) = ChannelNotifier::channel();
    let mut store = CatalogStore::new(Arc::new(notifier), app_config.defaults);

    println!("{}", view::render(&store));
    store.initialize(&client).await;
    print_notifications(&mut notifications);
    println!("{}", view::render(&store));
    println!("Type 'help' for commands.");

    // 5. Console loop
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match view::parse_intent(&line).and_then(|intent| view::dispatch(&mut store, intent)) {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Message(text)) => println!("{text}"),
            Ok(Outcome::Updated | Outcome::Added(_)) => {
                print_notifications(&mut notifications);
                println!("{}", view::render(&store));
            }
            Err(Error::Validation(errors)) => {
                for (field, message) in errors.iter() {
                    println!("  {field}: {message}");
                }
            }
            Err(e) => println!("{e}"),
        }
    }

    info!("Goodbye.");
    Ok(())
}

fn print_notifications(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(n) = notifications.try_recv() {
        println!("{}", view::notification_line(&n));
    }
}
