use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use base64::Engine;
use blob_store::ObjectHandle;
use upload_server::download_url::DownloadUrlBuilder;
use upload_server::handler::decode_image;


fn decode_benchmark(c: &mut Criterion) {
    let image = vec![0xA5u8; 256 * 1024];
    let encoded = base64::engine::general_purpose::STANDARD.encode(&image);
    c.bench_function("decode 256KiB image", |b| b.iter(|| {
        decode_image(black_box(&encoded)).unwrap()
    }));
}

fn download_url_benchmark(c: &mut Criterion) {
    let builder = DownloadUrlBuilder::default();
    let handle = ObjectHandle {
        bucket_name: "demo.appspot.com".to_string(),
        object_key: "uploads/holiday photo (1).jpg".to_string(),
    };
    c.bench_function("build download url", |b| b.iter(|| builder.build(black_box(&handle))));
}

criterion_group!(benches, decode_benchmark, download_url_benchmark);
criterion_main!(benches);
