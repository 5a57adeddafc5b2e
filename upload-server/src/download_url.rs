use blob_store::ObjectHandle;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const DEFAULT_MEDIA_HOST: &str = "firebasestorage.googleapis.com";

/// Everything `encodeURIComponent` escapes: all but alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds public media URLs of the form
/// `<base>/v0/b/<bucket>/o/<encoded key>?alt=media`.
#[derive(Debug, Clone)]
pub struct DownloadUrlBuilder {
    base: String,
}

impl DownloadUrlBuilder {
    /// `media_host` may be a bare host (`https` is assumed) or carry its own
    /// scheme, e.g. `http://localhost:9199` for an emulator.
    pub fn new(media_host: &str) -> Self {
        let host = media_host.trim_end_matches('/');
        let base = if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        };
        Self { base }
    }

    pub fn build(&self, handle: &ObjectHandle) -> String {
        format!(
            "{}/v0/b/{}/o/{}?alt=media",
            self.base,
            handle.bucket_name,
            encode_uri_component(&handle.object_key)
        )
    }
}

impl Default for DownloadUrlBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_HOST)
    }
}

pub fn encode_uri_component(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(bucket: &str, key: &str) -> ObjectHandle {
        ObjectHandle { bucket_name: bucket.to_string(), object_key: key.to_string() }
    }

    #[test]
    fn builds_firebase_style_url() {
        let url = DownloadUrlBuilder::default().build(&handle("demo.appspot.com", "uploads/a.jpg"));
        assert_eq!(
            url,
            "https://firebasestorage.googleapis.com/v0/b/demo.appspot.com/o/uploads%2Fa.jpg?alt=media"
        );
    }

    #[test]
    fn encodes_like_encode_uri_component() {
        assert_eq!(encode_uri_component("uploads/my photo (1).jpg"), "uploads%2Fmy%20photo%20(1).jpg");
        assert_eq!(encode_uri_component("a+b&c=d?e#f"), "a%2Bb%26c%3Dd%3Fe%23f");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("ảnh.jpg"), "%E1%BA%A3nh.jpg");
    }

    #[test]
    fn keeps_explicit_scheme_and_drops_trailing_slash() {
        let builder = DownloadUrlBuilder::new("http://localhost:9199/");
        assert_eq!(
            builder.build(&handle("b", "uploads/x.jpg")),
            "http://localhost:9199/v0/b/b/o/uploads%2Fx.jpg?alt=media"
        );
    }
}
