//! Integration tests for the hexogen CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A project directory plus an install directory with the built-in template layout
struct Workspace {
    project: TempDir,
    package: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let package = TempDir::new().unwrap();
        for id in [
            "generate/relational-resource",
            "generate-sub-entity/relational-resource",
            "generate-version/add-to-relational-resource",
            "property/add-to-relational-resource",
        ] {
            fs::create_dir_all(package.path().join("templates").join(id)).unwrap();
        }
        Self {
            project: TempDir::new().unwrap(),
            package,
        }
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.project.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.project.path().join(relative)).unwrap()
    }

    fn exists(&self, relative: &str) -> bool {
        self.project.path().join(relative).exists()
    }

    /// Renderer replaced by a shell script written into the package directory
    fn renderer_script(&self, body: &str) -> String {
        let script = self.package.path().join("renderer.sh");
        fs::write(&script, body).unwrap();
        format!("sh {}", script.display())
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("hexogen").unwrap();
        cmd.current_dir(self.project.path())
            .env("HEXOGEN_PACKAGE_DIR", self.package.path())
            .env("HEXOGEN_FORMATTER", "true")
            .env("HEXOGEN_RENDERER", "false")
            .env_remove("SCHEMA_FILE")
            .env_remove("HEXOGEN_LOG")
            .env_remove("RUST_LOG");
        cmd
    }
}

const USER_SCHEMA: &str = r#"{
  "name": "User",
  "isAddTestCase": true,
  "functionalities": ["create", "findAll"],
  "fields": [
    { "name": "email", "type": "varchar", "dto": true },
    { "name": "age", "type": "int", "optional": true }
  ]
}"#;

#[test]
fn test_help_command() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hexogen CLI Usage Examples"))
        .stdout(predicate::str::contains("$ hexogen resource"))
        .stdout(predicate::str::contains("Usage: hexogen"));
}

#[test]
fn test_missing_schema_file() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["resource", "--schema", "./missing.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("missing.json"));

    assert!(!ws.exists(".hygen.js"));
}

#[test]
fn test_malformed_schema_file() {
    let ws = Workspace::new();
    ws.write("bad.json", "{ invalid }");

    ws.cmd()
        .args(["resource", "--schema", "bad.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid JSON"));
}

#[test]
fn test_schema_from_environment() {
    let ws = Workspace::new();

    ws.cmd()
        .env("SCHEMA_FILE", "from-env.json")
        .arg("resource")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("from-env.json"));
}

#[test]
fn test_unknown_generator() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["g", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown generator: nope"))
        .stderr(predicate::str::contains("relational-resource"))
        .stderr(predicate::str::contains("simplified commands"));
}

#[test]
fn test_list_templates_without_custom() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["list", "templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Available generators:"))
        .stdout(predicate::str::contains("- relational-resource"))
        .stdout(predicate::str::contains("- generate-sub-entity/relational-resource"))
        .stdout(predicate::str::contains("- add-to-relational-resource"))
        .stdout(predicate::str::contains("property/add-to-relational-resource").not())
        .stdout(predicate::str::contains("Custom").not());
}

#[test]
fn test_list_templates_with_custom() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.project.path().join("templates/migration/create-table")).unwrap();

    ws.cmd()
        .args(["list", "templates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Custom:"))
        .stdout(predicate::str::contains("- migration/create-table"));

    ws.cmd()
        .arg("custom:list")
        .assert()
        .success()
        .stdout(predicate::str::contains("- migration/create-table"))
        .stdout(predicate::str::contains("relational-resource").not());
}

#[test]
fn test_list_types() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.project.path().join("templates/seed/users")).unwrap();

    ws.cmd()
        .args(["list", "types"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- generate-version"))
        .stdout(predicate::str::contains("- seed"));
}

#[test]
fn test_invalid_project_config() {
    let ws = Workspace::new();
    ws.write("hexogen.toml", "[renderer]\nunknown = 1\n");

    ws.cmd()
        .args(["list", "templates"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[cfg(unix)]
#[test]
fn test_resource_generation_restores_config() {
    let ws = Workspace::new();
    ws.write("user.json", USER_SCHEMA);
    ws.write(".hygen.js", "module.exports = { local: true };\n");
    let renderer = ws.renderer_script(
        "echo \"$@\" > args.txt\ncp .hygen.js seen-config.js\ncp \"$SCHEMA_FILE\" seen-schema.json\n",
    );

    ws.cmd()
        .env("HEXOGEN_RENDERER", renderer)
        .args(["resource", "--schema", "user.json", "--no-prettier"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded schema from user.json"))
        .stdout(predicate::str::contains("Using entity definition from file"))
        .stdout(predicate::str::contains("✔ Success!"))
        .stdout(predicate::str::contains("Skipping Prettier formatting"));

    assert_eq!(ws.read(".hygen.js"), "module.exports = { local: true };\n");
    assert!(ws.read("args.txt").starts_with("generate relational-resource --name User --schema "));
    assert!(ws.read("seen-config.js").contains("getType"));

    let schema: serde_json::Value = serde_json::from_str(&ws.read("seen-schema.json")).unwrap();
    assert_eq!(schema["name"], "User");
    assert_eq!(schema["fields"][0]["tsType"], "string");
    assert_eq!(schema["fields"][0]["dto"], true);
    assert_eq!(schema["fields"][1]["propertyType"], "Number");
}

#[cfg(unix)]
#[test]
fn test_renderer_failure_exits_non_zero() {
    let ws = Workspace::new();
    ws.write("user.json", USER_SCHEMA);
    let renderer = ws.renderer_script("exit 3\n");

    ws.cmd()
        .env("HEXOGEN_RENDERER", renderer)
        .args(["resource", "--schema", "user.json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("✖ Renderer failed with code 3"))
        .stderr(predicate::str::contains("Renderer failed with code 3"));

    assert!(!ws.exists(".hygen.js"));
}

#[cfg(unix)]
#[test]
fn test_generation_copies_common_files() {
    let ws = Workspace::new();
    ws.write("user.json", USER_SCHEMA);
    fs::create_dir_all(ws.package.path().join("common")).unwrap();
    for file in [
        "pagination-options.ts",
        "pagination-response.dto.ts",
        "infinity-pagination-response.dto.ts",
        "infinity-pagination.ts",
    ] {
        fs::write(ws.package.path().join("common").join(file), "// util\n").unwrap();
    }
    let renderer = ws.renderer_script(
        "mkdir -p src/users\necho \"import { IPaginationOptions } from '../common/types/pagination-options';\" > src/users/users.service.ts\n",
    );

    ws.cmd()
        .env("HEXOGEN_RENDERER", renderer)
        .args(["resource", "--schema", "user.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied pagination-options.ts"));

    assert!(ws.exists("src/common/types/pagination-options.ts"));
    assert!(ws.exists("src/common/dto/pagination-response.dto.ts"));
    assert!(ws.exists("src/common/infinity-pagination.ts"));
}

#[cfg(unix)]
#[test]
fn test_custom_template_generation() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.project.path().join("templates/test/unit-test")).unwrap();
    let renderer = ws.renderer_script("echo \"$@ $USE_CUSTOM_TEMPLATES $HYGEN_TMPLS\" > args.txt\n");

    ws.cmd()
        .env("HEXOGEN_RENDERER", renderer)
        .args(["custom", "test/unit-test", "--name", "User", "--no-prettier"])
        .assert()
        .success();

    let templates = ws.project.path().join("templates");
    assert_eq!(
        ws.read("args.txt").trim_end(),
        format!("test unit-test --name User true {}", templates.display())
    );
    assert!(Path::new(&templates).is_dir());
}
