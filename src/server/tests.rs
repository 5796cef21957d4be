#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Cursor;
    use std::path::Path;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use image::{ImageFormat, Rgb, RgbImage};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::server::upload::claim_name;
    use crate::server::{router, sanitize_file_name, ServerConfig, REPORT_FILE_NAME, UPLOAD_FIELD};

    const BOUNDARY: &str = "stego-test-boundary";

    fn gray_png() -> Vec<u8> {
        let mut bytes = Vec::new();
        RgbImage::from_pixel(10, 10, Rgb([128, 128, 128]))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Builds a multipart body from `(field name, file name, contents)` parts.
    fn multipart_body(parts: &[(&str, &str, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, file_name, contents) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            body.extend_from_slice(contents);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn send(scratch_parent: &Path, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let config = ServerConfig::builder()
            .scratch_parent(Some(scratch_parent.to_path_buf()))
            .build();

        let response = router(&config).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("photo.png").as_deref(), Some("photo.png"));
        assert_eq!(
            sanitize_file_name("holiday/pics/beach.jpg").as_deref(),
            Some("holiday_pics_beach.jpg")
        );
        assert_eq!(sanitize_file_name("..\\..\\evil.png").as_deref(), Some("evil.png"));
        assert_eq!(sanitize_file_name("../../etc/passwd").as_deref(), Some("etc_passwd"));
        assert_eq!(sanitize_file_name("./a//b/./x.png").as_deref(), Some("a_b_x.png"));
        assert_eq!(sanitize_file_name("my photo (1).png").as_deref(), Some("my_photo_1.png"));
        assert_eq!(sanitize_file_name(".hidden.png").as_deref(), Some("hidden.png"));
        assert_eq!(sanitize_file_name(""), None);
        assert_eq!(sanitize_file_name(".."), None);
        assert_eq!(sanitize_file_name("../.."), None);
        assert_eq!(sanitize_file_name("dir/"), Some("dir".to_string()));
    }

    #[test]
    fn test_claim_name_suffixes_collisions() {
        let mut taken = HashSet::from([REPORT_FILE_NAME.to_string()]);

        assert_eq!(claim_name("x.png".to_string(), &mut taken), "x.png");
        assert_eq!(claim_name("x.png".to_string(), &mut taken), "x_1.png");
        assert_eq!(claim_name("x.png".to_string(), &mut taken), "x_2.png");
        assert_eq!(claim_name("README".to_string(), &mut taken), "README");
        assert_eq!(claim_name("README".to_string(), &mut taken), "README_1");
        assert_eq!(claim_name(REPORT_FILE_NAME.to_string(), &mut taken), "analysis_report_1.txt");
    }

    #[test]
    fn test_server_config_builder() {
        let config = ServerConfig::builder()
            .listen_addr("0.0.0.0:8080".parse().unwrap())
            .max_upload_bytes(1024)
            .build();

        assert_eq!(config.listen_addr.port(), 8080);
        assert_eq!(config.max_upload_bytes, 1024);
        assert!(config.scratch_parent.is_none());

        let default = ServerConfig::default();
        assert_eq!(default.listen_addr.to_string(), crate::server::DEFAULT_LISTEN_ADDR);
    }

    #[tokio::test]
    async fn test_upload_returns_report_and_cleans_up() {
        let parent = TempDir::new().unwrap();
        let png = gray_png();
        let body = multipart_body(&[
            (UPLOAD_FIELD, "uploads/gray.png", png.as_slice()),
            (UPLOAD_FIELD, "broken.png", &b"not an image"[..]),
        ]);

        let (status, json) = send(parent.path(), upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let report = json["report"].as_str().unwrap();
        assert!(report.contains("File: gray.png"));
        assert!(report.contains("Unusual pixel distribution in channel 2"));
        assert!(report.contains("Error analyzing broken.png"));
        assert!(report.contains("Total images analyzed: 2"));
        assert!(report.contains("Suspicious files found: 1"));
        assert!(is_empty_dir(parent.path()));
    }

    #[tokio::test]
    async fn test_upload_keeps_files_with_same_base_name() {
        let parent = TempDir::new().unwrap();
        let png = gray_png();
        let body = multipart_body(&[
            (UPLOAD_FIELD, "holiday/a/x.png", png.as_slice()),
            (UPLOAD_FIELD, "holiday/b/x.png", png.as_slice()),
            (UPLOAD_FIELD, "x.png", png.as_slice()),
            (UPLOAD_FIELD, "x.png", png.as_slice()),
        ]);

        let (status, json) = send(parent.path(), upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        let report = json["report"].as_str().unwrap();
        assert!(report.contains("File: holiday_a_x.png"));
        assert!(report.contains("File: holiday_b_x.png"));
        assert!(report.contains("File: x.png"));
        assert!(report.contains("File: x_1.png"));
        assert!(report.contains("Total images analyzed: 4"));
        assert!(is_empty_dir(parent.path()));
    }

    #[tokio::test]
    async fn test_upload_without_folder_field_is_rejected() {
        let parent = TempDir::new().unwrap();
        let body = multipart_body(&[("other", "gray.png", &b"data"[..])]);

        let (status, json) = send(parent.path(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No folder uploaded");
        assert!(is_empty_dir(parent.path()));
    }

    #[tokio::test]
    async fn test_upload_with_empty_selection_is_rejected() {
        let parent = TempDir::new().unwrap();
        let body = multipart_body(&[(UPLOAD_FIELD, "", &b""[..])]);

        let (status, json) = send(parent.path(), upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "No files selected");
        assert!(is_empty_dir(parent.path()));
    }

    #[tokio::test]
    async fn test_health() {
        let response = router(&ServerConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
