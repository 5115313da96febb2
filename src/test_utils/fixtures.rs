//! Terraform and Terrafile snippets for tests.

/// A `module` block sourced from `git::<url>`, pinned with `?ref=` when
/// `revision` is given.
pub fn git_module(name: &str, url: &str, revision: Option<&str>) -> String {
    let source = match revision {
        Some(revision) => format!("git::{url}?ref={revision}"),
        None => format!("git::{url}"),
    };
    format!("module \"{name}\" {{\n  source = \"{source}\"\n}}\n")
}

/// A `module` block with an explicit `version` attribute.
pub fn versioned_module(name: &str, source: &str, version: &str) -> String {
    format!("module \"{name}\" {{\n  source  = \"{source}\"\n  version = \"{version}\"\n}}\n")
}

/// A Terrafile with a single entry.
pub fn terrafile_entry(name: &str, source: &str, version: &str) -> String {
    format!("{name}:\n  source: {source}\n  version: {version}\n")
}

/// A source file mixing git, registry, local, and interpolated modules with
/// comments and a resource block.
pub const MIXED_SOURCES: &str = r#"# Network layer
variable "region" {
  default = "eu-west-1"
}

module "network" {
  # pinned release
  source  = "git::https://example.com/org/network.git?ref=v1.2.0"
  version = "v1.2.0"
  region  = var.region
}

module "consul" {
  source  = "hashicorp/consul/aws"
  version = "0.1.0"
}

module "local" {
  source = "./modules/local"
}

module "dynamic" {
  source = "git::https://example.com/org/${var.repo}.git"
}

resource "aws_s3_bucket" "logs" {
  bucket = "logs"
}
"#;
