use clap::{Parser, ValueEnum};
use crate::download_url::DEFAULT_MEDIA_HOST;
use crate::services::upload_service::DEFAULT_MAX_BODY_BYTES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Files under `--data-dir`.
    Local,
    /// An S3-compatible object store.
    S3,
    /// Process memory, lost on exit.
    Memory,
}

#[derive(Debug, Parser)]
pub struct Args {
    #[clap(long, env = "UPLOAD_HTTP_ADDR", default_value = "127.0.0.1:8080")]
    pub http_addr: String,
    #[clap(long, env = "UPLOAD_BUCKET")]
    pub bucket: String,
    /// Host serving public download URLs; may include a scheme.
    #[clap(long, env = "UPLOAD_MEDIA_HOST", default_value = DEFAULT_MEDIA_HOST)]
    pub media_host: String,
    #[clap(long, env = "UPLOAD_STORE", value_enum, default_value_t = StoreKind::Local)]
    pub store: StoreKind,
    #[clap(long, env = "UPLOAD_DATA_DIR", default_value = "data")]
    pub data_dir: String,
    #[clap(long, env = "UPLOAD_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,
    #[clap(long, env = "UPLOAD_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["upload-server", "--bucket", "demo.appspot.com"]).unwrap();
        assert_eq!(args.http_addr, "127.0.0.1:8080");
        assert_eq!(args.media_host, "firebasestorage.googleapis.com");
        assert_eq!(args.store, StoreKind::Local);
        assert_eq!(args.s3_endpoint, None);
        assert_eq!(args.max_body_bytes, 32 * 1024 * 1024);
    }

    #[test]
    fn store_selection() {
        let args = Args::try_parse_from([
            "upload-server", "--bucket", "b", "--store", "s3", "--s3-endpoint", "http://minio:9000",
        ]).unwrap();
        assert_eq!(args.store, StoreKind::S3);
        assert_eq!(args.s3_endpoint.as_deref(), Some("http://minio:9000"));
    }
}
