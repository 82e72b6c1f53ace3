use std::env;

use serde::{Deserialize, Serialize};

use crate::error::RegIntelError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn profiled_env_f32(profile: &str, key: &str, default: f32) -> f32 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Comma-separated list; empty entries are dropped.
fn profiled_env_list(profile: &str, key: &str, default: &[&str]) -> Vec<String> {
    match profiled_env_opt(profile, key) {
        Some(raw) => raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => default.iter().map(|s| s.to_string()).collect(),
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
    pub generation: GenerationConfig,
}

/// Built-in defaults, ignoring the environment.
impl Default for Config {
    fn default() -> Self {
        Self {
            profile: String::new(),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Well-known env keys that identify a profile when prefixed.
const PROFILE_MARKER_KEYS: &[&str] = &["CHUNK_SIZE", "TOP_K_RESULTS", "GEN_MODEL"];

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `REGINTEL_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("REGINTEL_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            chunking: ChunkingConfig::from_env_profiled(p),
            retrieval: RetrievalConfig::from_env_profiled(p),
            generation: GenerationConfig::from_env_profiled(p),
        }
    }

    /// Discover available profiles by scanning env vars for `{PREFIX}_{MARKER_KEY}` patterns.
    /// Always includes "default" (the unprefixed config).
    pub fn available_profiles() -> Vec<String> {
        let mut profiles = std::collections::BTreeSet::new();
        profiles.insert("default".to_string());

        for (key, _) in env::vars() {
            for marker in PROFILE_MARKER_KEYS {
                if let Some(prefix) = key.strip_suffix(&format!("_{}", marker)) {
                    if !prefix.is_empty()
                        && prefix.chars().all(|c| c.is_ascii_uppercase() || c == '_')
                    {
                        profiles.insert(prefix.to_string());
                    }
                }
            }
        }

        profiles.into_iter().collect()
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Reject values that would make chunking or selection meaningless.
    ///
    /// Overlap >= max size is accepted: the window chunker degrades it to zero.
    pub fn validate(&self) -> Result<(), RegIntelError> {
        let checks = [
            (self.chunking.max_chars, "CHUNK_SIZE"),
            (self.chunking.principle_max_chars, "PRINCIPLE_CHUNK_SIZE"),
            (self.retrieval.top_k, "TOP_K_RESULTS"),
            (self.retrieval.per_source_cap, "PER_SOURCE_CAP"),
            (self.retrieval.enumeration_cap, "ENUMERATION_CAP"),
            (self.retrieval.snippet_chars, "SNIPPET_CHARS"),
            (self.retrieval.select_multiplier, "SELECT_MULTIPLIER"),
        ];
        for (value, key) in checks {
            if value == 0 {
                return Err(RegIntelError::MalformedConfiguration(format!(
                    "{key} must be greater than zero"
                )));
            }
        }
        Ok(())
    }

    /// Print the effective settings for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  chunking:    max_chars={}, overlap={}, min_section_chars={}",
            self.chunking.max_chars,
            self.chunking.overlap,
            self.chunking.min_section_chars
        );
        tracing::info!(
            "  principles:  max_chars={}, overlap={}, prefixes={:?}",
            self.chunking.principle_max_chars,
            self.chunking.principle_overlap,
            self.chunking.principle_prefixes
        );
        tracing::info!(
            "  retrieval:   top_k={}, per_source_cap={}, enumeration_cap={}",
            self.retrieval.top_k,
            self.retrieval.per_source_cap,
            self.retrieval.enumeration_cap
        );
        tracing::info!("  generation:  model={}", self.generation.model);
    }

    /// Effective settings as JSON.
    pub fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "profile": self.profile_label(),
            "chunking": self.chunking,
            "retrieval": {
                "top_k": self.retrieval.top_k,
                "fetch_width": self.retrieval.fetch_width(),
                "max_evidence": self.retrieval.max_evidence(),
                "per_source_cap": self.retrieval.per_source_cap,
                "enumeration_cap": self.retrieval.enumeration_cap,
                "snippet_chars": self.retrieval.snippet_chars,
            },
            "generation": self.generation,
        })
    }
}

// ── Chunking ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap: usize,
    pub min_section_chars: usize,
    pub principle_max_chars: usize,
    pub principle_overlap: usize,
    /// Optional framework prefixes before "Principle N" (e.g. "BCBS").
    pub principle_prefixes: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 1800,
            overlap: 200,
            min_section_chars: 600,
            principle_max_chars: 2200,
            principle_overlap: 200,
            principle_prefixes: vec!["BCBS".to_string()],
        }
    }
}

impl ChunkingConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            max_chars: profiled_env_usize(p, "CHUNK_SIZE", d.max_chars),
            overlap: profiled_env_usize(p, "CHUNK_OVERLAP", d.overlap),
            min_section_chars: profiled_env_usize(p, "MIN_SECTION_CHARS", d.min_section_chars),
            principle_max_chars: profiled_env_usize(p, "PRINCIPLE_CHUNK_SIZE", d.principle_max_chars),
            principle_overlap: profiled_env_usize(p, "PRINCIPLE_CHUNK_OVERLAP", d.principle_overlap),
            principle_prefixes: profiled_env_list(p, "PRINCIPLE_PREFIXES", &["BCBS"]),
        }
    }
}

// ── Retrieval / evidence selection ────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Base retrieval width.
    pub top_k: usize,
    pub fetch_multiplier: usize,
    pub min_fetch: usize,
    pub select_multiplier: usize,
    pub per_source_cap: usize,
    pub enumeration_cap: usize,
    pub snippet_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 8,
            fetch_multiplier: 4,
            min_fetch: 30,
            select_multiplier: 3,
            per_source_cap: 4,
            enumeration_cap: 60,
            snippet_chars: 280,
        }
    }
}

impl RetrievalConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            top_k: profiled_env_usize(p, "TOP_K_RESULTS", d.top_k),
            fetch_multiplier: profiled_env_usize(p, "FETCH_MULTIPLIER", d.fetch_multiplier),
            min_fetch: profiled_env_usize(p, "MIN_FETCH", d.min_fetch),
            select_multiplier: profiled_env_usize(p, "SELECT_MULTIPLIER", d.select_multiplier),
            per_source_cap: profiled_env_usize(p, "PER_SOURCE_CAP", d.per_source_cap),
            enumeration_cap: profiled_env_usize(p, "ENUMERATION_CAP", d.enumeration_cap),
            snippet_chars: profiled_env_usize(p, "SNIPPET_CHARS", d.snippet_chars),
        }
    }

    /// Number of candidates to request from similarity search.
    pub fn fetch_width(&self) -> usize {
        self.min_fetch.max(self.top_k * self.fetch_multiplier)
    }

    /// Upper bound on generic-path evidence before clamping to the candidate count.
    pub fn max_evidence(&self) -> usize {
        self.top_k * self.select_multiplier
    }
}

// ── Generation (forwarded to collaborators) ───────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub model: String,
    pub embedding_model: String,
    pub rag_temperature: f32,
    pub llm_temperature: f32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            rag_temperature: 0.2,
            llm_temperature: 0.4,
        }
    }
}

impl GenerationConfig {
    fn from_env_profiled(p: &str) -> Self {
        let d = Self::default();
        Self {
            model: profiled_env_or(p, "GEN_MODEL", &d.model),
            embedding_model: profiled_env_or(p, "EMBED_MODEL", &d.embedding_model),
            rag_temperature: profiled_env_f32(p, "RAG_TEMPERATURE", d.rag_temperature),
            llm_temperature: profiled_env_f32(p, "LLM_TEMPERATURE", d.llm_temperature),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_prefixed_keys_take_precedence() {
        env::set_var("CFGTESTA_CHUNK_SIZE", "900");
        env::set_var("CFGTESTA_PRINCIPLE_PREFIXES", "BCBS, EBA ,");
        let cfg = Config::for_profile("cfgtesta");
        assert_eq!(cfg.profile, "CFGTESTA");
        assert_eq!(cfg.chunking.max_chars, 900);
        assert_eq!(cfg.chunking.principle_prefixes, vec!["BCBS", "EBA"]);
    }

    #[test]
    fn unparsable_numbers_fall_back_to_defaults() {
        env::set_var("CFGTESTB_PER_SOURCE_CAP", "many");
        let cfg = Config::for_profile("CFGTESTB");
        assert_eq!(cfg.retrieval.per_source_cap, 4);
    }

    #[test]
    fn retrieval_widths_derive_from_top_k() {
        env::set_var("CFGTESTC_TOP_K_RESULTS", "10");
        let cfg = Config::for_profile("CFGTESTC");
        assert_eq!(cfg.retrieval.fetch_width(), 40);
        assert_eq!(cfg.retrieval.max_evidence(), 30);
    }

    #[test]
    fn validate_rejects_zero_caps_but_not_large_overlap() {
        env::set_var("CFGTESTD_CHUNK_OVERLAP", "5000");
        let mut cfg = Config::for_profile("CFGTESTD");
        assert!(cfg.validate().is_ok());

        cfg.retrieval.per_source_cap = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("PER_SOURCE_CAP"));
    }

    #[test]
    fn available_profiles_includes_default() {
        env::set_var("CFGTESTE_GEN_MODEL", "local");
        let profiles = Config::available_profiles();
        assert!(profiles.contains(&"default".to_string()));
        assert!(profiles.contains(&"CFGTESTE".to_string()));
    }
}
