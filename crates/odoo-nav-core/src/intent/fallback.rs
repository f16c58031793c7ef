use regex::Regex;

use crate::errors::NavigatorError;

const NAVIGATION_PATTERNS: [&str; 3] = [
    r"(?:go to|open|navigate to|show|get to|take me to|bring up) (?:the )?(.*?) (?:page|module|menu|screen)",
    r"(?:go to|open|navigate to|show|get to|take me to|bring up) (?:the )?(.*?)(?:$| page| module| screen)",
    r"(?:get|take) me to (.*?)(?:$| page| module| screen)",
];

/// Phrase patterns for commands like "take me to the sales page".
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    patterns: Vec<Regex>,
}

impl RuleMatcher {
    pub fn new() -> Result<Self, NavigatorError> {
        let patterns = NAVIGATION_PATTERNS
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| {
                    NavigatorError::InternalError(format!("Invalid navigation pattern: {}", e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Capture of the first pattern that matches, trimmed. Input is expected
    /// to be lower-cased already.
    pub fn extract_entity(&self, input: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .captures(input)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
    }
}
