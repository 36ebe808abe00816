use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

pub struct Database {
    pub client: Client,
}

impl Database {
    pub async fn init(mongodb_uri: &str) -> mongodb::error::Result<Self> {
        let mut client_options = ClientOptions::parse(mongodb_uri).await?;
        client_options.app_name = Some("todoapp".to_string());

        let client = Client::with_options(client_options)?;

        // Fail at startup rather than on the first request.
        client
            .database("admin")
            .run_command(doc! {"ping": 1})
            .await?;

        log::info!("Connected successfully to MongoDB");

        Ok(Self { client })
    }
}

pub async fn connect_to_mongo(mongodb_uri: &str) -> mongodb::error::Result<Client> {
    let database = Database::init(mongodb_uri).await.map_err(|e| {
        log::error!("Failed to initialize database: {e}");
        e
    })?;
    Ok(database.client)
}
