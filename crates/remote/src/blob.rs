//! Blob storage: file bytes in, public URL out.
//!
//! Objects are named `{code}_{timestamp}.{ext}` so repeated uploads for
//! the same document code never collide, and the register row links to a
//! stable public URL.

use chrono::NaiveDateTime;

use crate::client::{RemoteError, TableClient};

const BUCKET: &str = "documents";

/// Object name for an upload: `{code}_{YYYYmmdd_HHMMSS}.{ext}`.
pub fn object_name(code: &str, ext: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.{}", code, at.format("%Y%m%d_%H%M%S"), ext)
}

/// Compute the blake3 content hash of upload bytes (with algorithm prefix).
pub fn hash_bytes(data: &[u8]) -> String {
    format!("blake3:{}", blake3::hash(data).to_hex())
}

impl TableClient {
    /// Store file bytes under a generated object name and return the
    /// public URL for the register's link column.
    pub fn upload_blob(
        &self,
        code: &str,
        ext: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<String, RemoteError> {
        let name = object_name(code, ext, chrono::Utc::now().naive_utc());
        self.upload_blob_named(&name, content_type, data)?;
        Ok(self.public_url(&name))
    }

    /// Upload under an explicit object name. The content hash travels in a
    /// header so the service can verify the bytes it stored.
    pub fn upload_blob_named(
        &self,
        name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<(), RemoteError> {
        let url = format!("{}/storage/{}/{}", self.api_base(), BUCKET, name);
        let hash = hash_bytes(&data);
        self.send(
            self.http_put(&url)
                .header("Content-Type", content_type)
                .header("x-content-hash", hash)
                .body(data),
        )?;
        Ok(())
    }

    /// Public retrieval URL for a stored object.
    pub fn public_url(&self, name: &str) -> String {
        format!("{}/storage/{}/{}", self.api_base(), BUCKET, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ServiceCredentials;
    use chrono::NaiveDate;

    fn client(base: &str) -> TableClient {
        TableClient::new(ServiceCredentials::new(base.into(), "test-key".into()))
    }

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 7, 9)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap()
    }

    #[test]
    fn object_name_format() {
        assert_eq!(object_name("SGC-001", "pdf", at()), "SGC-001_20250709_143005.pdf");
    }

    #[test]
    fn hash_is_stable_and_prefixed() {
        let h1 = hash_bytes(b"contents");
        let h2 = hash_bytes(b"contents");
        assert_eq!(h1, h2);
        assert!(h1.starts_with("blake3:"));
        assert_ne!(h1, hash_bytes(b"other"));
    }

    #[test]
    fn upload_puts_bytes_with_hash_header() {
        let server = httpmock::MockServer::start();
        let name = object_name("SGC-001", "pdf", at());
        let mock = server.mock(|when, then| {
            when.method(httpmock::Method::PUT)
                .path(format!("/storage/documents/{name}"))
                .header("content-type", "application/pdf")
                .header("x-content-hash", hash_bytes(b"%PDF-1.4 fake"));
            then.status(200);
        });

        let c = client(&server.base_url());
        c.upload_blob_named(&name, "application/pdf", b"%PDF-1.4 fake".to_vec())
            .unwrap();
        mock.assert();

        assert_eq!(
            c.public_url(&name),
            format!("{}/storage/documents/{name}", server.base_url())
        );
    }
}
