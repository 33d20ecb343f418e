// tests for module detection in chat messages

use ifaghelper::ModuleMatcher;

fn default_matcher() -> ModuleMatcher {
    ModuleMatcher::new([
        "sécurité informatique",
        "cloud computing",
        "gestion de projet",
        "systèmes distribués",
        "développement web",
        "langue anglaise",
        "compilation",
    ])
}

#[test]
fn test_no_module() {
    let matcher = default_matcher();
    assert_eq!(matcher.find("when is the next exam?"), None);
    assert_eq!(matcher.find(""), None);
}

#[test]
fn test_case_insensitive() {
    let matcher = default_matcher();
    assert_eq!(
        matcher.find("What did I get in CLOUD Computing?"),
        Some("cloud computing")
    );
}

#[test]
fn test_accented_uppercase() {
    let matcher = default_matcher();
    assert_eq!(
        matcher.find("Ma note en SÉCURITÉ INFORMATIQUE ?"),
        Some("sécurité informatique")
    );
}

#[test]
fn test_substring_match() {
    let matcher = default_matcher();
    assert_eq!(
        matcher.find("notes de compilation2024 svp"),
        Some("compilation")
    );
}

#[test]
fn test_first_listed_wins() {
    let matcher = default_matcher();
    // compilation appears first in the text but is listed last
    assert_eq!(
        matcher.find("compilation or cloud computing, which is better?"),
        Some("cloud computing")
    );
}

#[test]
fn test_returns_configured_name() {
    let matcher = ModuleMatcher::new(["Cloud Computing"]);
    assert_eq!(
        matcher.find("grade in cloud computing"),
        Some("Cloud Computing")
    );
}

#[test]
fn test_blank_entries_ignored() {
    let matcher = ModuleMatcher::new(["", "  ", "compilation"]);
    assert_eq!(matcher.find("anything at all"), None);
    assert_eq!(matcher.find("compilation"), Some("compilation"));
}
