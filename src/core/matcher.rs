// finds which known module a message is talking about

/// Matches free text against a fixed, ordered list of module names.
///
/// When a message mentions more than one known module, the one listed first
/// wins. There is no other disambiguation.
#[derive(Debug, Clone)]
pub struct ModuleMatcher {
    // (configured name, lowercased name) in priority order
    modules: Vec<(String, String)>,
}

impl ModuleMatcher {
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let modules = modules
            .into_iter()
            .map(Into::into)
            .map(|name: String| {
                let lower = name.to_lowercase();
                (name, lower)
            })
            .filter(|(_, lower)| !lower.trim().is_empty())
            .collect();

        Self { modules }
    }

    /// Returns the first known module contained in `message`, ignoring case.
    pub fn find(&self, message: &str) -> Option<&str> {
        let msg = message.to_lowercase();

        self.modules
            .iter()
            .find(|(_, lower)| msg.contains(lower.as_str()))
            .map(|(name, _)| name.as_str())
    }
}
