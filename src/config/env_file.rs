use crate::utils::error::Result;
use regex::Regex;
use std::path::Path;

/// Keys the backend refuses to start without.
pub const REQUIRED_KEYS: &[&str] = &["SECRET_KEY", "ENCRYPTION_KEY"];

#[derive(Debug, Clone)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
}

/// Parsed view of a `.env` file. Order-preserving, comments and blanks skipped.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    entries: Vec<EnvEntry>,
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            entries.push(EnvEntry {
                key: key.to_string(),
                value: strip_quotes(value.trim()).to_string(),
            });
        }

        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Required keys that are absent entirely.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| self.get(key).is_none())
            .collect()
    }

    /// Required keys whose value is empty or still a template placeholder.
    pub fn placeholder_required_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| matches!(self.get(key), Some(value) if is_placeholder(value)))
            .collect()
    }
}

/// 判斷是否仍是範本佔位值
pub fn is_placeholder(value: &str) -> bool {
    if value.trim().is_empty() {
        return true;
    }
    let re = Regex::new(r"(?i)(changeme|change_me|your[-_][a-z0-9_-]*[-_]here|<[^>]+>)").unwrap();
    re.is_match(value)
}

/// Copy the template into place for the user to fill in. Never overwrites.
pub fn copy_template(template: &Path, target: &Path) -> Result<()> {
    std::fs::copy(template, target)?;
    tracing::debug!(
        "Copied env template {} -> {}",
        template.display(),
        target.display()
    );
    Ok(())
}

fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let env = EnvFile::parse("# comment\n\nSECRET_KEY=abc123\nDEBUG=false\n");
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("SECRET_KEY"), Some("abc123"));
        assert_eq!(env.get("DEBUG"), Some("false"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn test_parse_strips_quotes() {
        let env = EnvFile::parse("A=\"quoted\"\nB='single'\nC=plain\n");
        assert_eq!(env.get("A"), Some("quoted"));
        assert_eq!(env.get("B"), Some("single"));
        assert_eq!(env.get("C"), Some("plain"));
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("changeme"));
        assert!(is_placeholder("your-secret-key-here"));
        assert!(is_placeholder("your_encryption_key_here"));
        assert!(is_placeholder("<fill me in>"));
        assert!(!is_placeholder("sk-live-8f4a2b"));
    }

    #[test]
    fn test_required_key_checks() {
        let env = EnvFile::parse("SECRET_KEY=your-secret-key-here\nDEBUG=false\n");
        assert_eq!(env.missing_required(), vec!["ENCRYPTION_KEY"]);
        assert_eq!(env.placeholder_required_keys(), vec!["SECRET_KEY"]);

        let filled = EnvFile::parse("SECRET_KEY=abc\nENCRYPTION_KEY=def\n");
        assert!(filled.missing_required().is_empty());
        assert!(filled.placeholder_required_keys().is_empty());
    }
}
