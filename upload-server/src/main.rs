use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use blob_store::{create_s3_client, BlobStore, LocalFileBlobStore, MemoryBlobStore, S3BlobStore};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use upload_server::download_url::DownloadUrlBuilder;
use upload_server::handler::UploadHandler;
use upload_server::params::{Args, StoreKind};
use upload_server::services::upload_service::{self, AppState};
use upload_server::token::UuidTokenSource;

async fn build_store(args: &Args) -> Arc<dyn BlobStore> {
    match args.store {
        StoreKind::Local => Arc::new(LocalFileBlobStore::new(&args.data_dir, args.bucket.clone())),
        StoreKind::S3 => {
            let client = create_s3_client(args.s3_endpoint.as_deref()).await;
            Arc::new(S3BlobStore::new(client, args.bucket.clone()))
        }
        StoreKind::Memory => Arc::new(MemoryBlobStore::new(args.bucket.clone())),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = build_store(&args).await;
    let handler = UploadHandler::new(
        store,
        Arc::new(UuidTokenSource),
        DownloadUrlBuilder::new(&args.media_host),
    );
    let state = web::Data::new(AppState::new(handler));
    let max_body_bytes = args.max_body_bytes;

    tracing::info!(addr = %args.http_addr, bucket = %args.bucket, store = ?args.store, "starting upload server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(upload_service::configure_with_limit(max_body_bytes))
    })
        .bind(args.http_addr.clone())?
        .run()
        .await
}
