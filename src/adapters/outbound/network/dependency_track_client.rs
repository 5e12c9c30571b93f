use crate::ports::outbound::{SbomUploader, UploadTarget};
use crate::shared::error::SbomError;
use crate::shared::Result;
use base64::Engine;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Api-Key";
const PROJECT_CLASSIFIER: &str = "OPERATING_SYSTEM";

#[derive(Debug, Serialize)]
struct ProjectRequest<'a> {
    name: &'a str,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<ProjectRef<'a>>,
    classifier: &'static str,
}

#[derive(Debug, Serialize)]
struct ProjectRef<'a> {
    uuid: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProjectUuid {
    uuid: String,
}

#[derive(Debug, Serialize)]
struct BomUpload<'a> {
    project: &'a str,
    #[serde(rename = "autoCreate")]
    auto_create: bool,
    bom: String,
}

/// Dependency-Track API client for uploading SBOMs
///
/// Each host is filed as a child project (named after the host, versioned by
/// the OS version) below a parent project named after the distribution. Both
/// projects are created on demand; an existing project is looked up by name.
pub struct DependencyTrackClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl DependencyTrackClient {
    const TIMEOUT_SECONDS: u64 = 60;

    /// Creates a client for the API at `api_url`
    ///
    /// With `tls_verify` disabled, invalid and self-signed server certificates
    /// are accepted.
    pub fn new(api_url: &str, api_key: &str, tls_verify: bool) -> Result<Self> {
        let user_agent = format!("distro2sbom/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .danger_accept_invalid_certs(!tls_verify)
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.api_url, path)
    }

    /// Looks up the UUID of the first project with the given name
    fn project_uuid(&self, name: &str) -> Result<String> {
        let url = format!(
            "{}?name={}",
            self.endpoint("project"),
            urlencoding::encode(name)
        );
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()?;
        let response = ensure_success(response, "project lookup")?;

        let projects: Vec<ProjectUuid> = response.json()?;
        projects
            .into_iter()
            .next()
            .map(|project| project.uuid)
            .ok_or_else(|| anyhow::anyhow!("project '{}' not found", name))
    }

    /// Creates a project, or resolves the existing one on conflict
    fn create_project(&self, name: &str, version: &str, parent: Option<&str>) -> Result<String> {
        let request = ProjectRequest {
            name,
            version,
            parent: parent.map(|uuid| ProjectRef { uuid }),
            classifier: PROJECT_CLASSIFIER,
        };
        let response = self
            .client
            .put(self.endpoint("project"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()?;

        if response.status() == StatusCode::CONFLICT {
            tracing::debug!(project = name, "project already exists, looking it up");
            return self.project_uuid(name);
        }

        let response = ensure_success(response, "project creation")?;
        let created: ProjectUuid = response.json()?;
        Ok(created.uuid)
    }

    fn upload_bom(&self, project_uuid: &str, document: &str) -> Result<()> {
        let upload = BomUpload {
            project: project_uuid,
            auto_create: true,
            bom: base64::engine::general_purpose::STANDARD.encode(document),
        };
        let response = self
            .client
            .put(self.endpoint("bom"))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&upload)
            .send()?;
        ensure_success(response, "BOM upload")?;
        Ok(())
    }
}

/// Accepts 200 and 201; anything else becomes an error carrying the response body.
fn ensure_success(response: Response, operation: &str) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK || status == StatusCode::CREATED {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    anyhow::bail!(
        "{} returned unexpected status {}: {}",
        operation,
        status,
        body.trim()
    )
}

impl SbomUploader for DependencyTrackClient {
    fn upload(&self, document: &str, target: &UploadTarget) -> Result<()> {
        let run = || -> Result<()> {
            let parent = self
                .create_project(&target.distribution, "", None)
                .map_err(|e| e.context("creating the distribution project"))?;
            let project = self
                .create_project(&target.hostname, &target.os_version, Some(&parent))
                .map_err(|e| e.context("creating the host project"))?;
            tracing::debug!(parent = %parent, project = %project, "uploading BOM");
            self.upload_bom(&project, document)
        };

        run().map_err(|e| {
            SbomError::Upload {
                details: format!("{:#}", e),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Debug, Clone)]
    struct RecordedRequest {
        request_line: String,
        api_key: Option<String>,
        body: String,
    }

    /// Serves one scripted `(status, body)` response per connection.
    fn fake_server(
        responses: Vec<(u16, &'static str)>,
    ) -> (String, Arc<Mutex<Vec<RecordedRequest>>>, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&recorded);

        let handle = thread::spawn(move || {
            for (status, body) in responses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut content_length = 0;
                let mut api_key = None;
                loop {
                    let mut header = String::new();
                    reader.read_line(&mut header).unwrap();
                    let header = header.trim_end();
                    if header.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = header.split_once(':') {
                        if name.eq_ignore_ascii_case("content-length") {
                            content_length = value.trim().parse().unwrap();
                        }
                        if name.eq_ignore_ascii_case(API_KEY_HEADER) {
                            api_key = Some(value.trim().to_string());
                        }
                    }
                }
                let mut request_body = vec![0; content_length];
                reader.read_exact(&mut request_body).unwrap();

                sink.lock().unwrap().push(RecordedRequest {
                    request_line: request_line.trim_end().to_string(),
                    api_key,
                    body: String::from_utf8(request_body).unwrap(),
                });

                let mut stream = stream;
                write!(
                    stream,
                    "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .unwrap();
                stream.flush().unwrap();
            }
        });

        (url, recorded, handle)
    }

    fn target() -> UploadTarget {
        UploadTarget {
            distribution: "ubuntu".to_string(),
            hostname: "build-host-01".to_string(),
            os_version: "24.04".to_string(),
        }
    }

    #[test]
    fn test_upload_creates_projects_and_uploads() {
        let (url, recorded, handle) = fake_server(vec![
            (201, r#"{"uuid":"parent-uuid"}"#),
            (201, r#"{"uuid":"host-uuid"}"#),
            (200, r#"{"token":"abc"}"#),
        ]);

        let client = DependencyTrackClient::new(&url, "secret", true).unwrap();
        client.upload(r#"{"bomFormat":"CycloneDX"}"#, &target()).unwrap();
        handle.join().unwrap();

        let requests = recorded.lock().unwrap();
        assert_eq!(requests.len(), 3);
        assert!(requests.iter().all(|r| r.api_key.as_deref() == Some("secret")));

        assert!(requests[0].request_line.starts_with("PUT /api/v1/project "));
        let parent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(parent["name"], "ubuntu");
        assert_eq!(parent["classifier"], "OPERATING_SYSTEM");
        assert!(parent.get("parent").is_none());

        let host: serde_json::Value = serde_json::from_str(&requests[1].body).unwrap();
        assert_eq!(host["name"], "build-host-01");
        assert_eq!(host["version"], "24.04");
        assert_eq!(host["parent"]["uuid"], "parent-uuid");

        assert!(requests[2].request_line.starts_with("PUT /api/v1/bom "));
        let upload: serde_json::Value = serde_json::from_str(&requests[2].body).unwrap();
        assert_eq!(upload["project"], "host-uuid");
        assert_eq!(upload["autoCreate"], true);
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(upload["bom"].as_str().unwrap())
            .unwrap();
        assert_eq!(decoded, br#"{"bomFormat":"CycloneDX"}"#);
    }

    #[test]
    fn test_existing_project_is_looked_up_on_conflict() {
        let (url, recorded, handle) = fake_server(vec![
            (409, ""),
            (200, r#"[{"uuid":"existing-parent"},{"uuid":"other"}]"#),
            (200, r#"{"uuid":"host-uuid"}"#),
            (201, "{}"),
        ]);

        let client = DependencyTrackClient::new(&format!("{}/", url), "secret", true).unwrap();
        client.upload("{}", &target()).unwrap();
        handle.join().unwrap();

        let requests = recorded.lock().unwrap();
        assert!(requests[1]
            .request_line
            .starts_with("GET /api/v1/project?name=ubuntu "));
        let host: serde_json::Value = serde_json::from_str(&requests[2].body).unwrap();
        assert_eq!(host["parent"]["uuid"], "existing-parent");
    }

    #[test]
    fn test_rejected_upload_is_upload_error() {
        let (url, _recorded, handle) = fake_server(vec![
            (201, r#"{"uuid":"parent-uuid"}"#),
            (201, r#"{"uuid":"host-uuid"}"#),
            (403, "forbidden"),
        ]);

        let client = DependencyTrackClient::new(&url, "wrong", true).unwrap();
        let err = client.upload("{}", &target()).unwrap_err();
        handle.join().unwrap();

        match err.downcast_ref::<SbomError>() {
            Some(SbomError::Upload { details }) => {
                assert!(details.contains("403"));
                assert!(details.contains("forbidden"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_server_is_upload_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = DependencyTrackClient::new(&url, "secret", false).unwrap();
        let err = client.upload("{}", &target()).unwrap_err();
        assert!(err.to_string().contains("Failed to upload SBOM"));
    }
}
