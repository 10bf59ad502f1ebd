// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tech-stack icon resolution.
//!
//! Maps tech names ("React", "Node.js") to devicon CDN URLs for the
//! profile page. Each icon is probed with a HEAD request; any failure
//! substitutes the bundled default, never aborting the batch. Resolved
//! URLs are memoized per normalized name.

use anyhow::Context;
use dashmap::DashMap;
use futures_util::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

const DEVICON_BASE: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";
/// Served by the frontend from its public assets.
const DEFAULT_ICON: &str = "/tech.svg";
const HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// A resolved icon for one tech-stack entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechIcon {
    /// Original name as stored on the interview
    pub tech: String,
    pub url: String,
}

/// Resolves tech names to icon URLs, with a shared memo cache.
#[derive(Clone)]
pub struct TechIconService {
    client: reqwest::Client,
    /// normalized name -> resolved URL
    cache: Arc<DashMap<String, String>>,
}

impl TechIconService {
    pub fn new() -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("failed building icon HTTP client")?;

        Ok(Self {
            client,
            cache: Arc::new(DashMap::new()),
        })
    }

    /// Resolve icons for a tech stack, one concurrent probe per name.
    pub async fn resolve(&self, techstack: &[String]) -> Vec<TechIcon> {
        let probes = techstack.iter().map(|tech| async move {
            TechIcon {
                tech: tech.clone(),
                url: self.resolve_one(tech).await,
            }
        });

        join_all(probes).await
    }

    /// Resolve one name. Never fails: unknown or unreachable icons map to
    /// the default.
    async fn resolve_one(&self, tech: &str) -> String {
        let normalized = normalize_tech_name(tech);
        if normalized.is_empty() {
            return DEFAULT_ICON.to_string();
        }

        if let Some(url) = self.cache.get(&normalized) {
            return url.clone();
        }

        let candidate = format!("{DEVICON_BASE}/{normalized}/{normalized}-original.svg");

        let url = if self.icon_exists(&candidate).await {
            candidate
        } else {
            tracing::debug!(tech, normalized, "No devicon found, using default");
            DEFAULT_ICON.to_string()
        };

        self.cache.insert(normalized, url.clone());
        url
    }

    async fn icon_exists(&self, url: &str) -> bool {
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!(url, error = %e, "Icon probe failed");
                false
            }
        }
    }
}

/// Normalize a tech name to a devicon slug: lowercase, no spaces, no
/// trailing ".js", aliases for spellings devicon doesn't use.
fn normalize_tech_name(tech: &str) -> String {
    let key = tech
        .trim()
        .to_lowercase()
        .replace(".js", "")
        .replace(char::is_whitespace, "");

    match key.as_str() {
        "react" | "reactjs" => "react",
        "next" | "nextjs" => "nextjs",
        "vue" | "vuejs" => "vuejs",
        "node" | "nodejs" => "nodejs",
        "express" | "expressjs" => "express",
        "nest" | "nestjs" => "nestjs",
        "typescript" | "ts" => "typescript",
        "javascript" | "js" => "javascript",
        "tailwind" | "tailwindcss" => "tailwindcss",
        "postgres" | "postgresql" => "postgresql",
        "mongo" | "mongodb" => "mongodb",
        "golang" => "go",
        "aws" | "amazonwebservices" => "amazonwebservices",
        "gcp" | "googlecloud" => "googlecloud",
        "k8s" | "kubernetes" => "kubernetes",
        "c#" | "csharp" => "csharp",
        "c++" | "cplusplus" => "cplusplus",
        other => other,
    }
    .to_string()
}
