//! Where ACLs come from.
//!
//! The refresh loop only sees the [`AclSource`] trait. [`FileSource`] reads an
//! exported listing from disk, [`CommandSource`] asks a live cluster through
//! the admin tools shipped with the Kafka distribution.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::acl::AclRecord;
use crate::acl_parser::parse_topic_list;
use crate::error::{Error, Result};

#[async_trait]
pub trait AclSource: Send + Sync {
    /// Short description used in log lines.
    fn name(&self) -> String;

    /// Every ACL the cluster knows about, unfiltered.
    async fn list_acls(&self) -> Result<Vec<AclRecord>>;

    async fn list_topics(&self) -> Result<BTreeSet<String>>;
}

/// Reads ACLs from a file on every call, so edits show up on the next refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    acl_path: PathBuf,
    topics_path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(acl_path: impl Into<PathBuf>) -> Self {
        Self {
            acl_path: acl_path.into(),
            topics_path: None,
        }
    }

    pub fn with_topics(mut self, topics_path: impl Into<PathBuf>) -> Self {
        self.topics_path = Some(topics_path.into());
        self
    }
}

#[async_trait]
impl AclSource for FileSource {
    fn name(&self) -> String {
        format!("file:{}", self.acl_path.display())
    }

    async fn list_acls(&self) -> Result<Vec<AclRecord>> {
        let content = tokio::fs::read_to_string(&self.acl_path).await?;
        crate::parse_acls(&content)
    }

    async fn list_topics(&self) -> Result<BTreeSet<String>> {
        match &self.topics_path {
            Some(path) => Ok(parse_topic_list(&tokio::fs::read_to_string(path).await?)),
            None => Ok(BTreeSet::new()),
        }
    }
}

/// Runs `kafka-acls.sh` / `kafka-topics.sh` against a bootstrap server.
///
/// TLS and SASL settings live in the client properties file passed through
/// `--command-config`.
#[derive(Debug, Clone)]
pub struct CommandSource {
    bootstrap_servers: String,
    command_config: Option<PathBuf>,
    bin_dir: Option<PathBuf>,
}

impl CommandSource {
    pub fn new(bootstrap_servers: &str) -> Self {
        Self {
            bootstrap_servers: bootstrap_servers.to_string(),
            command_config: None,
            bin_dir: None,
        }
    }

    pub fn with_command_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.command_config = Some(path.into());
        self
    }

    pub fn with_bin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bin_dir = Some(dir.into());
        self
    }

    fn tool(&self, name: &str) -> PathBuf {
        match &self.bin_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    fn args(&self) -> Vec<String> {
        let mut args = vec![
            "--bootstrap-server".to_string(),
            self.bootstrap_servers.clone(),
            "--list".to_string(),
        ];
        if let Some(config) = &self.command_config {
            args.push("--command-config".to_string());
            args.push(config.display().to_string());
        }
        args
    }

    async fn run(&self, tool: &Path) -> Result<String> {
        tracing::debug!(tool = %tool.display(), servers = %self.bootstrap_servers, "running kafka tool");
        let output = Command::new(tool)
            .args(self.args())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| Error::upstream(format!("failed to run {}: {e}", tool.display())))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::upstream(format!(
                "{} exited with {}: {}",
                tool.display(),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl AclSource for CommandSource {
    fn name(&self) -> String {
        format!("kafka:{}", self.bootstrap_servers)
    }

    async fn list_acls(&self) -> Result<Vec<AclRecord>> {
        let stdout = self.run(&self.tool("kafka-acls.sh")).await?;
        crate::acl_parser::parse_acl_listing(&stdout)
    }

    async fn list_topics(&self) -> Result<BTreeSet<String>> {
        let stdout = self.run(&self.tool("kafka-topics.sh")).await?;
        Ok(parse_topic_list(&stdout))
    }
}
