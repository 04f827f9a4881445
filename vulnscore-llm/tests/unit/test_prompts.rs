//! Unit tests for prompt templates, PromptBuilder and prompt loaders

use vulnscore_core::VulnerabilityRecord;
use vulnscore_core::config::PromptConfig;
use vulnscore_llm::prompts::{
    CVSS_HUMAN_PROMPT, CVSS_SYSTEM_PROMPT, FilePromptLoader, MISSING_DESCRIPTION, PromptBuilder,
    PromptError, PromptLoader, prompt_loader_from_config, render,
};

use crate::common::sample_record;

#[test]
fn test_system_prompt_demands_bare_vector() {
    assert!(CVSS_SYSTEM_PROMPT.contains("CVSS:3.1/AV:_/AC:_/PR:_/UI:_/S:_/C:_/I:_/A:_"));
    assert!(CVSS_SYSTEM_PROMPT.contains("ONLY"));
}

#[test]
fn test_human_prompt_has_placeholders() {
    assert!(CVSS_HUMAN_PROMPT.contains("{id}"));
    assert!(CVSS_HUMAN_PROMPT.contains("{title}"));
    assert!(CVSS_HUMAN_PROMPT.contains("{description}"));
    assert!(CVSS_HUMAN_PROMPT.contains("{additional_context}"));
}

#[test]
fn test_prompt_builder_fills_fields() {
    let prompt = PromptBuilder::build_cvss_prompt(&sample_record());

    assert!(prompt.contains("VULN-001"));
    assert!(prompt.contains("Example Vulnerability"));
    assert!(prompt.contains("An example CVE issue description."));
    assert!(!prompt.contains("{id}"));
    assert!(!prompt.contains("{title}"));
    assert!(!prompt.contains("{description}"));
    assert!(!prompt.contains("{additional_context}"));
    assert!(!prompt.contains("Additional Context"));
}

#[test]
fn test_prompt_builder_without_description() {
    let record = VulnerabilityRecord::new("VULN-001", "Bad Vulnerability");
    let prompt = PromptBuilder::build_cvss_prompt(&record);

    assert!(prompt.contains(MISSING_DESCRIPTION));
    assert!(prompt.contains("Bad Vulnerability"));
}

#[test]
fn test_prompt_builder_includes_extra_fields() {
    let record = VulnerabilityRecord::new("GHSA-jfh8-c2jp-5v3q", "Log4Shell")
        .with_field("package", "org.apache.logging.log4j:log4j-core")
        .with_field("cwe", "CWE-917");
    let prompt = PromptBuilder::build_cvss_prompt(&record);

    assert!(prompt.contains("Additional Context"));
    assert!(prompt.contains("- cwe: CWE-917"));
    assert!(prompt.contains("- package: org.apache.logging.log4j:log4j-core"));
    // Keys are listed in sorted order
    assert!(prompt.find("- cwe").unwrap() < prompt.find("- package").unwrap());
}

#[test]
fn test_prompt_builder_keeps_braces_in_record_text() {
    let record = VulnerabilityRecord::new("VULN-7", "Template injection via {title}")
        .with_description("Payload `{{7*7}}` is evaluated; see {id}");
    let prompt = PromptBuilder::build_cvss_prompt(&record);

    assert!(prompt.contains("Template injection via {title}"));
    assert!(prompt.contains("Payload `{{7*7}}` is evaluated; see {id}"));
}

#[test]
fn test_render_leaves_unknown_placeholders() {
    assert_eq!(render("{a} and {b}", &[("a", "x")]), "x and {b}");
    assert_eq!(render("open { brace", &[("a", "x")]), "open { brace");
}

#[tokio::test]
async fn test_file_loader_reads_prompt() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cvss_system.txt"), "Custom system prompt").unwrap();

    let loader = FilePromptLoader::new(dir.path());
    let text = loader.load("cvss_system.txt").await.unwrap();
    assert_eq!(text, "Custom system prompt");
}

#[tokio::test]
async fn test_file_loader_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FilePromptLoader::new(dir.path());

    let err = loader.load("cvss_system.txt").await.unwrap_err();
    assert!(matches!(err, PromptError::NotFound { .. }));
}

#[tokio::test]
async fn test_file_loader_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cvss_system.txt"), "  \n").unwrap();

    let loader = FilePromptLoader::new(dir.path());
    let err = loader.load("cvss_system.txt").await.unwrap_err();
    assert!(matches!(err, PromptError::Empty { .. }));
}

#[tokio::test]
async fn test_loader_from_config() {
    let builtin = prompt_loader_from_config(&PromptConfig::default());
    assert_eq!(
        builtin.load("cvss_system.txt").await.unwrap(),
        CVSS_SYSTEM_PROMPT
    );

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cvss_system.txt"), "From disk").unwrap();
    let config = PromptConfig {
        directory: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let from_disk = prompt_loader_from_config(&config);
    assert_eq!(from_disk.load("cvss_system.txt").await.unwrap(), "From disk");
}
