use uuid::Uuid;

/// Source of the opaque download tokens attached to stored objects.
pub trait TokenSource: Send + Sync {
    fn generate_token(&self) -> String;
}

/// Random v4 UUIDs in their hyphenated lower-case form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTokenSource;

impl TokenSource for UuidTokenSource {
    fn generate_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
