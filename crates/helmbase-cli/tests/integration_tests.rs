//! Integration tests for CLI commands

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const NGINX_TYPE: &str = "kubernetes-ingress-nginx:index:IngressController";

/// Helper to run the helmbase command
fn helmbase(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_helmbase"))
        .args(args)
        .env_remove("HELMBASE_CATALOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute helmbase")
}

/// Write a catalog declaring the ingress-nginx chart
fn write_catalog(dir: &Path) -> String {
    let path = dir.join("charts.yaml");
    std::fs::write(
        &path,
        format!(
            "apiVersion: helmbase.io/v1\ncharts:\n  - type: \"{}\"\n    chart: ingress-nginx\n    repo: https://kubernetes.github.io/ingress-nginx\n",
            NGINX_TYPE
        ),
    )
    .unwrap();
    path.display().to_string()
}

mod preview_command {
    use super::*;

    #[test]
    fn test_preview_json_uses_catalog_defaults() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&["--catalog", &catalog, "preview", NGINX_TYPE, "web", "--json"]);
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

        let stdout = String::from_utf8_lossy(&output.stdout);
        let entries: serde_json::Value =
            serde_json::from_str(&stdout).expect("Output should be valid JSON");
        let entries = entries.as_array().unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0]["kind"], "component");
        assert_eq!(entries[0]["type"], NGINX_TYPE);
        assert_eq!(entries[0]["name"], "web");

        let release = &entries[1];
        assert_eq!(release["kind"], "resource");
        assert_eq!(release["type"], "kubernetes:helm.sh/v3:Release");
        assert_eq!(release["name"], "web-helm");
        assert_eq!(release["parent"], entries[0]["urn"]);
        assert_eq!(release["properties"]["chart"], "ingress-nginx");
        assert_eq!(
            release["properties"]["repositoryOpts"]["repo"],
            "https://kubernetes.github.io/ingress-nginx"
        );
        assert_eq!(release["properties"]["values"], serde_json::json!({}));

        assert_eq!(entries[2]["kind"], "outputs");
        assert_eq!(entries[2]["properties"]["status"]["status"], "deployed");

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("would register 2 resources"));
    }

    #[test]
    fn test_preview_with_inputs_and_set() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());
        let inputs = dir.path().join("inputs.yaml");
        std::fs::write(
            &inputs,
            "helmOptions:\n  namespace: ingress\n  chart: ingress-nginx-custom\ncontroller:\n  replicaCount: 1\n",
        )
        .unwrap();

        let output = helmbase(&[
            "--catalog",
            &catalog,
            "preview",
            NGINX_TYPE,
            "edge",
            "-f",
            inputs.to_str().unwrap(),
            "--set",
            "controller.replicaCount=3",
            "--json",
        ]);
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

        let entries: serde_json::Value =
            serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
        let properties = &entries[1]["properties"];
        assert_eq!(properties["chart"], "ingress-nginx-custom");
        assert_eq!(properties["namespace"], "ingress");
        assert_eq!(properties["values"]["controller"]["replicaCount"], 3);
        assert!(properties["values"].get("helmOptions").is_none());
    }

    #[test]
    fn test_preview_yaml_is_default_output() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&["--catalog", &catalog, "preview", NGINX_TYPE, "web"]);
        assert!(output.status.success());

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("kind: component"));
        assert!(stdout.contains("name: web-helm"));
    }

    #[test]
    fn test_preview_unknown_type_is_a_catalog_error() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&["--catalog", &catalog, "preview", "acme:index:Missing", "web"]);
        assert_eq!(output.status.code(), Some(3));

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("acme:index:Missing"));
    }

    #[test]
    fn test_preview_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&[
            "--catalog",
            &catalog,
            "preview",
            NGINX_TYPE,
            "web",
            "-f",
            "/nonexistent/inputs.yaml",
        ]);
        assert_eq!(output.status.code(), Some(64));
    }

    #[test]
    fn test_preview_scalar_helm_options_is_a_construct_error() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&[
            "--catalog",
            &catalog,
            "preview",
            NGINX_TYPE,
            "web",
            "--set",
            "helmOptions=42",
        ]);
        assert_eq!(output.status.code(), Some(2));
    }
}

mod catalog_command {
    use super::*;

    #[test]
    fn test_add_then_list() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("nested").join("charts.yaml");
        let catalog = catalog.to_str().unwrap();

        let output = helmbase(&[
            "--catalog",
            catalog,
            "catalog",
            "add",
            "bitnami-redis:index:Redis",
            "--chart",
            "redis",
            "--repo",
            "https://charts.bitnami.com/bitnami",
            "--description",
            "Redis cache",
        ]);
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

        let output = helmbase(&["--catalog", catalog, "catalog", "list", "--json"]);
        assert!(output.status.success());

        let charts: serde_json::Value =
            serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
        assert_eq!(
            charts,
            serde_json::json!([{
                "type": "bitnami-redis:index:Redis",
                "chart": "redis",
                "repo": "https://charts.bitnami.com/bitnami",
                "description": "Redis cache"
            }])
        );
    }

    #[test]
    fn test_add_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&[
            "--catalog",
            &catalog,
            "catalog",
            "add",
            NGINX_TYPE,
            "--chart",
            "ingress-nginx",
            "--repo",
            "https://kubernetes.github.io/ingress-nginx",
        ]);
        assert_eq!(output.status.code(), Some(3));
    }

    #[test]
    fn test_add_rejects_bad_type_token() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("charts.yaml");

        let output = helmbase(&[
            "--catalog",
            catalog.to_str().unwrap(),
            "catalog",
            "add",
            "not-a-token",
            "--chart",
            "x",
            "--repo",
            "https://example.com/charts",
        ]);
        assert_eq!(output.status.code(), Some(3));
        assert!(!catalog.exists());
    }

    #[test]
    fn test_remove() {
        let dir = TempDir::new().unwrap();
        let catalog = write_catalog(dir.path());

        let output = helmbase(&["--catalog", &catalog, "catalog", "remove", NGINX_TYPE]);
        assert!(output.status.success());

        let output = helmbase(&["--catalog", &catalog, "catalog", "list"]);
        assert!(String::from_utf8_lossy(&output.stdout).contains("No charts declared"));
    }

    #[test]
    fn test_list_missing_catalog_file() {
        let output = helmbase(&["--catalog", "/nonexistent/charts.yaml", "catalog", "list"]);
        assert_eq!(output.status.code(), Some(3));
    }
}
