use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{
    clock::Clock, repositories::AccountError, settings::Settings, storage::KeyValueStore,
};

pub mod http;
pub mod users;

const CHANNEL_CAPACITY: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("Communication error: {0} - {1}")]
    Communication(String, String),
}

#[async_trait]
pub trait RequestHandler<T>: Send + Sync + 'static
where
    T: Send + 'static,
{
    async fn handle_request(&self, request: T);
}

#[async_trait]
pub trait Service<T, H>: Send + Sync + 'static
where
    T: Send + 'static,
    H: RequestHandler<T> + Send,
{
    /// Requests are handled one at a time, in arrival order.
    async fn run(&mut self, handler: H, receiver: &mut mpsc::Receiver<T>) {
        while let Some(request) = receiver.recv().await {
            handler.handle_request(request).await;
        }
    }
}

pub fn spawn_user_service(
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
) -> mpsc::Sender<users::UserRequest> {
    let (user_tx, mut user_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let mut user_service = users::UserService::new();

    tokio::spawn(async move {
        user_service
            .run(users::UserRequestHandler::new(store, clock), &mut user_rx)
            .await;
        log::info!("User service stopped.");
    });

    user_tx
}

pub async fn start_services(
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: Settings,
) -> Result<(), anyhow::Error> {
    log::info!("Starting user service.");
    let user_tx = spawn_user_service(store, clock);

    log::info!("Starting HTTP server.");
    http::start_http_server(&settings.http.listen, user_tx).await
}
