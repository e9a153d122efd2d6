use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::ServiceSettings;
use crate::error::ClientError;
use crate::features::form::FieldDescriptor;

pub const UPLOAD_PATH: &str = "/api/upload";
pub const SUBMIT_PATH: &str = "/api/submit";
const UPLOAD_FIELD: &str = "pdf";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub pdf_id: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Body of `POST /api/submit`. `pdf_id` and `signature` serialize as `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPayload {
    pub pdf_id: Option<String>,
    pub form_data: BTreeMap<String, String>,
    pub signature: Option<String>,
}

/// Blocking client for the two document-service endpoints.
#[derive(Debug, Clone)]
pub struct DocumentService {
    client: Client,
    base_url: String,
}

impl DocumentService {
    pub fn new(settings: &ServiceSettings) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(settings.timeout_secs.map(Duration::from_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send the file at `source` as multipart field `pdf`. The file is sent as-is.
    pub fn upload(&self, source: &Path) -> Result<UploadResponse, ClientError> {
        let form = multipart::Form::new().file(UPLOAD_FIELD, source)?;
        let response = self
            .client
            .post(self.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()?;
        let body = read_success_body(response)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Returns the filled document bytes. The content type is not checked.
    pub fn submit(&self, payload: &SubmitPayload) -> Result<Vec<u8>, ClientError> {
        let response = self
            .client
            .post(self.endpoint(SUBMIT_PATH))
            .json(payload)
            .send()?;
        read_success_body(response)
    }
}

fn read_success_body(response: Response) -> Result<Vec<u8>, ClientError> {
    let status = response.status();
    let body = response.bytes()?;
    if !status.is_success() {
        return Err(ClientError::from_status(status.as_u16(), &body));
    }
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;

    fn service_for(url: &str) -> DocumentService {
        DocumentService::new(&ServiceSettings {
            base_url: url.to_string(),
            timeout_secs: Some(10),
        })
        .unwrap()
    }

    fn pdf_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"%PDF-1.4 test").unwrap();
        file
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let svc = service_for("http://127.0.0.1:5001/");
        assert_eq!(svc.endpoint(UPLOAD_PATH), "http://127.0.0.1:5001/api/upload");
        assert_eq!(svc.endpoint(SUBMIT_PATH), "http://127.0.0.1:5001/api/submit");
    }

    #[test]
    fn upload_sends_multipart_pdf_field_and_parses_fields() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/upload")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::Regex(r#"name="pdf"; filename=""#.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"pdfId":"abc-123","fields":[
                    {"name":"Name","type":"/Tx","value":"Ada"},
                    {"name":"Signature","type":"/Sig","value":null}
                ]}"#,
            )
            .create();

        let file = pdf_file();
        let resp = service_for(&server.url()).upload(file.path()).unwrap();
        mock.assert();
        assert_eq!(resp.pdf_id, "abc-123");
        assert_eq!(resp.fields.len(), 2);
        assert_eq!(resp.fields[0].value.as_deref(), Some("Ada"));
        assert_eq!(resp.fields[1].value, None);
    }

    #[test]
    fn upload_error_status_carries_server_message() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(400)
            .with_body(r#"{"error":"bad file"}"#)
            .create();

        let file = pdf_file();
        let err = service_for(&server.url()).upload(file.path()).unwrap_err();
        match err {
            ClientError::Status { status, ref message } => {
                assert_eq!(status, 400);
                assert_eq!(message.as_deref(), Some("bad file"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn upload_success_without_pdf_id_is_decode_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/upload")
            .with_status(200)
            .with_body(r#"{"fields":[]}"#)
            .create();

        let file = pdf_file();
        let err = service_for(&server.url()).upload(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn upload_of_missing_file_is_io_error() {
        let svc = service_for("http://127.0.0.1:5001");
        let err = svc
            .upload(Path::new("/definitely/not/here/form.pdf"))
            .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn submit_posts_json_and_returns_raw_bytes() {
        let mut server = mockito::Server::new();
        let pdf_bytes: Vec<u8> = b"%PDF-1.7\x00\x01\x02\xff".to_vec();
        let mock = server
            .mock("POST", "/api/submit")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "pdfId": "abc",
                "formData": {"Name": "Ada"},
                "signature": null
            })))
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(pdf_bytes.clone())
            .create();

        let payload = SubmitPayload {
            pdf_id: Some("abc".into()),
            form_data: BTreeMap::from([("Name".to_string(), "Ada".to_string())]),
            signature: None,
        };
        let body = service_for(&server.url()).submit(&payload).unwrap();
        mock.assert();
        assert_eq!(body, pdf_bytes);
    }

    #[test]
    fn submit_failure_with_html_body_has_no_server_message() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/submit")
            .with_status(500)
            .with_body("<html>Internal Server Error</html>")
            .create();

        let payload = SubmitPayload {
            pdf_id: None,
            form_data: BTreeMap::new(),
            signature: None,
        };
        let err = service_for(&server.url()).submit(&payload).unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, message: None }));
    }

    #[test]
    fn unreachable_service_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let svc = service_for("http://127.0.0.1:9");
        let payload = SubmitPayload {
            pdf_id: None,
            form_data: BTreeMap::new(),
            signature: None,
        };
        let err = svc.submit(&payload).unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }
}
