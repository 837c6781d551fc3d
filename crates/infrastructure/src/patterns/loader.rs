use gtld_census_application::services::{ClassificationPatterns, PatternList};
use gtld_census_domain::config::PatternsConfig;
use gtld_census_domain::DomainError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Reads one regular expression per line. Blank lines and lines starting
/// with `#` are skipped.
pub fn load_pattern_list(name: &str, path: &Path) -> Result<PatternList, DomainError> {
    let text = std::fs::read_to_string(path).map_err(|e| DomainError::PatternFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim_end()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let list = PatternList::compile(name, lines.iter().map(|(_, line)| *line)).map_err(
        |(index, reason)| DomainError::InvalidPattern {
            path: path.display().to_string(),
            line: lines[index].0,
            reason,
        },
    )?;

    debug!(list = name, path = %path.display(), patterns = list.len(), "Pattern list loaded");
    Ok(list)
}

/// Like [`load_pattern_list`], but an unset or missing file gives an empty
/// list. A file that exists and cannot be read is still an error.
pub fn load_optional_pattern_list(
    name: &str,
    path: Option<&str>,
) -> Result<PatternList, DomainError> {
    let Some(path) = path else {
        return Ok(PatternList::empty(name));
    };

    let path = Path::new(path);
    if !path.exists() {
        warn!(list = name, path = %path.display(), "Pattern file not found, using empty list");
        return Ok(PatternList::empty(name));
    }

    load_pattern_list(name, path)
}

pub fn load_classification_patterns(
    config: &PatternsConfig,
) -> Result<ClassificationPatterns, DomainError> {
    let patterns = ClassificationPatterns {
        parked_nameservers: load_optional_pattern_list(
            "parked_nameservers",
            config.parked_nameservers.as_deref(),
        )?,
        blocked_nameservers: load_optional_pattern_list(
            "blocked_nameservers",
            config.blocked_nameservers.as_deref(),
        )?,
        parked_ptr: load_optional_pattern_list("parked_ptr", config.parked_ptr.as_deref())?,
        expired_ptr: load_optional_pattern_list("expired_ptr", config.expired_ptr.as_deref())?,
        other_inactive_nameservers: load_optional_pattern_list(
            "other_inactive_nameservers",
            config.other_inactive_nameservers.as_deref(),
        )?,
    };

    for list in patterns.lists() {
        info!(list = list.name(), patterns = list.len(), "Pattern list ready");
    }

    Ok(patterns)
}
