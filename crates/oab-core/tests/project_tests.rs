use std::fs;
use std::path::Path;

use oab_core::codec::{self, Format};
use oab_core::model::{Document, HttpMethod, RefOr};
use oab_core::{LoadError, LoadOptions, load_project, load_project_with, split_document, write_document};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// The smallest project the default options accept.
fn minimal_project(root: &Path) {
    write(root, "openapi_version", "3.0.3\n");
    write(root, "info.yml", "title: Minimal\nversion: 0.1.0\n");
    write(root, "servers.yml", "- url: https://api.example.com\n");
    write(root, "security.yml", "[]\n");
    write(root, "tags.yml", "[]\n");
    fs::create_dir_all(root.join("paths")).unwrap();
}

fn petstore_project(root: &Path) {
    write(root, "openapi_version", "3.0.3\n");
    write(
        root,
        "info.yml",
        r#"title: Petstore
description: A sample pet store
version: 1.0.0
contact:
  name: API team
  email: api@example.com
license:
  name: MIT
x-audience: public
"#,
    );
    write(
        root,
        "servers.yml",
        r#"- url: https://{env}.example.com/v1
  variables:
    env:
      default: api
      enum: [api, staging]
"#,
    );
    write(root, "security.yml", "- api_key: []\n");
    write(
        root,
        "tags.yml",
        "- name: pets\n  description: Everything about pets\n",
    );

    write(root, "paths/pets/index.yml", "summary: Pet collection\n");
    write(
        root,
        "paths/pets/get.yml",
        r##"operationId: listPets
tags: [pets]
x-codeSamples:
  - lang: curl
    source: curl https://api.example.com/pets
parameters:
  - $ref: "#/components/parameters/Limit"
responses:
  200:
    description: A page of pets
    content:
      application/json:
        schema:
          type: array
          items:
            $ref: "#/components/schemas/Pet"
  default:
    $ref: "#/components/responses/Error"
"##,
    );
    write(
        root,
        "paths/pets/post.yml",
        r##"operationId: createPet
tags: [pets]
requestBody:
  $ref: "#/components/requestBodies/NewPet"
responses:
  "201":
    description: Created
"##,
    );
    write(
        root,
        "paths/pets/{petId}/index.yml",
        r#"parameters:
  - name: petId
    in: path
    required: true
    schema:
      type: string
"#,
    );
    write(
        root,
        "paths/pets/{petId}/delete.yml",
        "operationId: deletePet\ndeprecated: true\nresponses:\n  \"204\":\n    description: Deleted\n",
    );
    write(
        root,
        "paths/uploads/index.yml",
        "summary: Uploads\nservers:\n  - url: https://api.example.com\n",
    );
    write(root, "paths/uploads/servers.yml", "- url: https://upload.example.com\n");
    write(root, "paths/uploads/put.yml", "operationId: upload\n");

    write(
        root,
        "components/schemas/Pet.yml",
        r#"type: object
required: [id, name]
properties:
  id:
    type: integer
    format: int64
  name:
    type: string
    maxLength: 64
"#,
    );
    write(root, "components/schemas/PetId.json", r#"{"type": "integer"}"#);
    write(
        root,
        "components/responses/Error.yml",
        "description: Unexpected error\n",
    );
    write(
        root,
        "components/parameters/Limit.yaml",
        "name: limit\nin: query\nschema:\n  type: integer\n",
    );
    write(
        root,
        "components/requestBodies/NewPet.yml",
        r##"required: true
content:
  application/json:
    schema:
      $ref: "#/components/schemas/Pet"
"##,
    );
    write(
        root,
        "components/securitySchemes/api_key.yml",
        "type: apiKey\nname: X-API-Key\nin: header\n",
    );
    write(
        root,
        "components/examples/Fido.yml",
        "summary: A dog\nvalue:\n  id: 1\n  name: Fido\n",
    );
}

#[test]
fn minimal_project_has_empty_paths_and_components() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_project(tmp.path());

    let doc = load_project(tmp.path()).expect("minimal project should load");
    assert_eq!(doc.openapi, "3.0.3");
    assert_eq!(doc.info.title, "Minimal");
    assert_eq!(doc.servers.len(), 1);
    assert!(doc.paths.is_empty());
    assert!(doc.components.is_empty());
    assert!(doc.security.is_empty());
    assert!(doc.tags.is_empty());
}

#[test]
fn missing_servers_fails_whole_load() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_project(tmp.path());
    fs::remove_file(tmp.path().join("servers.yml")).unwrap();

    let err = load_project(tmp.path()).unwrap_err();
    assert!(err.is_not_found());
    match &err {
        LoadError::Project { dir, source } => {
            assert_eq!(dir, tmp.path());
            assert!(matches!(source.as_ref(), LoadError::Io { .. }));
        }
        other => panic!("expected project error, got {other:?}"),
    }
    assert!(err.to_string().contains(&tmp.path().display().to_string()));
    assert!(err.path().ends_with("servers.yml"));
}

#[test]
fn lenient_load_tolerates_missing_sections() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write(root, "openapi_version", "3.1.0");
    write(root, "info.yml", "title: Bare\nversion: 1.0.0\n");

    let doc = load_project_with(root, &LoadOptions::lenient()).unwrap();
    assert_eq!(doc.openapi, "3.1.0");
    assert!(doc.servers.is_empty());
    assert!(doc.paths.is_empty());
    assert!(doc.tags.is_empty());
    assert!(doc.security.is_empty());
}

#[test]
fn lenient_load_still_requires_info() {
    let tmp = tempfile::tempdir().unwrap();
    write(tmp.path(), "openapi_version", "3.1.0\n");

    let err = load_project_with(tmp.path(), &LoadOptions::lenient()).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.path().ends_with("info.yml"));
}

#[test]
fn petstore_project_assembles() {
    let tmp = tempfile::tempdir().unwrap();
    petstore_project(tmp.path());

    let doc = load_project(tmp.path()).unwrap();
    let keys: Vec<&str> = doc.paths.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["/pets", "/pets/{petId}", "/uploads"]);
    assert_eq!(doc.operation_count(), 4);

    let pets = &doc.paths["/pets"];
    assert_eq!(pets.summary.as_deref(), Some("Pet collection"));
    let list = pets.operation(HttpMethod::Get).unwrap();
    assert_eq!(list.operation_id.as_deref(), Some("listPets"));
    assert_eq!(list.extensions["x-codeSamples"][0]["lang"], "curl");
    assert_eq!(doc.info.extensions["x-audience"], "public");
    assert!(list.parameters[0].is_reference());
    assert!(list.responses.contains_key("200"));
    assert!(list.responses["default"].is_reference());

    let create = pets.post.as_ref().unwrap();
    assert_eq!(
        create.request_body.as_ref().and_then(RefOr::as_reference),
        Some("#/components/requestBodies/NewPet")
    );

    let pet = &doc.paths["/pets/{petId}"];
    assert_eq!(pet.parameters.len(), 1);
    assert_eq!(pet.delete.as_ref().unwrap().deprecated, Some(true));

    assert_eq!(doc.paths["/uploads"].servers[0].url, "https://upload.example.com");

    let components = &doc.components;
    assert_eq!(components.schemas.len(), 2);
    assert_eq!(components.responses.len(), 1);
    assert_eq!(components.parameters.len(), 1);
    assert_eq!(components.request_bodies.len(), 1);
    assert_eq!(components.security_schemes.len(), 1);
    assert_eq!(components.examples.len(), 1);
    let pet_schema = components.schemas["Pet"].as_item().unwrap();
    assert_eq!(pet_schema.properties["name"].as_item().unwrap().extra["maxLength"], 64);

    assert_eq!(doc.servers[0].variables["env"].enum_values, vec!["api", "staging"]);
    assert_eq!(doc.security[0]["api_key"], Vec::<String>::new());
    assert_eq!(doc.tags[0].name, "pets");
}

#[test]
fn bundle_round_trips_through_yaml() {
    let tmp = tempfile::tempdir().unwrap();
    petstore_project(tmp.path());
    let doc = load_project(tmp.path()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("openapi.yml");
    write_document(&output, &doc).unwrap();

    let reread: Document = codec::decode(fs::File::open(&output).unwrap(), Format::Yaml).unwrap();
    assert_eq!(reread, doc);
}

#[test]
fn bundle_to_json_path_writes_json() {
    let tmp = tempfile::tempdir().unwrap();
    petstore_project(tmp.path());
    let doc = load_project(tmp.path()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("openapi.json");
    write_document(&output, &doc).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with('{'));
    let reread: Document = codec::decode(text.as_bytes(), Format::Json).unwrap();
    assert_eq!(reread, doc);
}

#[test]
fn bundle_overwrites_existing_output() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_project(tmp.path());
    let doc = load_project(tmp.path()).unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let output = out_dir.path().join("openapi.yml");
    fs::write(&output, "x".repeat(4096)).unwrap();
    write_document(&output, &doc).unwrap();

    let text = fs::read_to_string(&output).unwrap();
    assert!(!text.contains("xxxx"));
    assert!(!text.contains("paths"));
    assert!(!text.contains("components"));
    assert!(text.contains("title: Minimal"));
}

#[test]
fn split_then_load_reproduces_document() {
    let tmp = tempfile::tempdir().unwrap();
    petstore_project(tmp.path());
    let doc = load_project(tmp.path()).unwrap();

    let target = tempfile::tempdir().unwrap();
    split_document(&doc, target.path()).unwrap();

    assert!(target.path().join("paths/pets/get.yml").is_file());
    assert!(target.path().join("paths/pets/{petId}/delete.yml").is_file());
    assert!(target.path().join("components/schemas/PetId.yml").is_file());

    let reloaded = load_project(target.path()).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn split_minimal_document_is_loadable() {
    let tmp = tempfile::tempdir().unwrap();
    minimal_project(tmp.path());
    let doc = load_project(tmp.path()).unwrap();

    let target = tempfile::tempdir().unwrap();
    split_document(&doc, target.path()).unwrap();

    assert!(target.path().join("paths").is_dir());
    assert!(!target.path().join("components").exists());
    assert_eq!(load_project(target.path()).unwrap(), doc);
}
