//! Integration tests for the `convert` and `config` commands.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use chunkmark_cli::cli::ConvertArgs;
use chunkmark_cli::config_handlers::{lookup_config_value, write_default_config};
use chunkmark_cli::{ChunkmarkCli, ChunkmarkConfig, CliArgs};
use chunkmark_core::Error;
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;

const CHAPTER: &str = r#"---
cri:
  - slug: intro
    question: "What is X?"
    answer: "X is Y."
---
Lead paragraph that is dropped.

## Intro {#intro .big}
Some text.
## Next
More text.
"#;

fn write_config(dir: &Path, body: &str) -> String {
    let path = dir.join("chunkmark.toml");
    std::fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_convert_uses_configured_paths() {
    let dir = tempfile::TempDir::new().unwrap();
    let book = dir.path().join("book");
    std::fs::create_dir_all(&book).unwrap();
    std::fs::write(book.join("1-intro.md"), CHAPTER).unwrap();
    let site = dir.path().join("site");

    let config_path = write_config(
        dir.path(),
        &format!(
            "[input]\npath = {:?}\n\n[output]\npath = {:?}\nmanifest = true\n",
            book.to_str().unwrap(),
            site.to_str().unwrap()
        ),
    );

    let args = CliArgs::parse_from(["chunkmark", "-c", &config_path, "convert"]);
    let cli = ChunkmarkCli::from_args(&args).unwrap();
    assert_eq!(cli.run(args).await.unwrap(), ExitCode::SUCCESS);

    let html = std::fs::read_to_string(site.join("1-intro.html")).unwrap();
    assert!(html.starts_with(
        r#"<section class="content-chunk" data-chunk-slug="intro" aria-labelledby="intro">"#
    ));
    assert!(html.contains(r#"<i-question question="What is X?" answer="X is Y.">"#));
    assert!(!html.contains("Lead paragraph"));

    let manifest: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(site.join("1-intro.json")).unwrap())
            .unwrap();
    assert_eq!(manifest.as_array().unwrap().len(), 2);
    assert_eq!(manifest[1]["title"], "Next");
}

#[tokio::test]
async fn test_convert_reruns_over_existing_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let input = dir.path().join("doc.md");
    std::fs::write(&input, CHAPTER).unwrap();
    let out = dir.path().join("out");

    let cli = ChunkmarkCli::new(ChunkmarkConfig::default());
    for _ in 0..2 {
        let report = cli
            .convert(ConvertArgs {
                inputs: vec![input.clone()],
                output: Some(out.clone()),
                ..ConvertArgs::default()
            })
            .await
            .unwrap();
        assert!(report.is_success());
    }
    let entries: Vec<_> = std::fs::read_dir(&out).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[tokio::test]
async fn test_convert_missing_input_spares_siblings() {
    let dir = tempfile::TempDir::new().unwrap();
    let good = dir.path().join("good.md");
    std::fs::write(&good, CHAPTER).unwrap();
    let missing = dir.path().join("missing.md");
    let out = dir.path().join("out");

    let cli = ChunkmarkCli::new(ChunkmarkConfig::default());
    let report = cli
        .convert(ConvertArgs {
            inputs: vec![good, missing.clone()],
            output: Some(out.clone()),
            ..ConvertArgs::default()
        })
        .await
        .unwrap();

    assert_eq!(report.converted, vec![out.join("good.html")]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, missing);
    assert!(matches!(report.failed[0].1, Error::IoWithPath { .. }));
    assert!(out.join("good.html").exists());
    assert!(!out.join("missing.html").exists());

    let args = CliArgs::parse_from([
        "chunkmark",
        "convert",
        dir.path().join("good.md").to_str().unwrap(),
        missing.to_str().unwrap(),
        "-o",
        out.to_str().unwrap(),
    ]);
    assert_eq!(cli.run(args).await.unwrap(), ExitCode::FAILURE);
}

#[test]
fn test_config_init_then_get() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    write_default_config(path.to_str(), false).unwrap();

    let config = ChunkmarkConfig::load(path.to_str()).unwrap();
    assert_eq!(config, ChunkmarkConfig::default());
    assert_eq!(lookup_config_value(&config, "output.path").unwrap(), "output");
    assert_eq!(lookup_config_value(&config, "input.extension").unwrap(), "md");
}
