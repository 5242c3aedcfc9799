//! Guessing device types from host names.
//!
//! A [`Classifier`] maps a node name to the icon and semantic type used when
//! rendering it. The default [`PatternClassifier`] matches domain-shaped names
//! against configurable firewall, vlan and switch patterns; anything else is
//! treated as a plain server.

use std::{net::Ipv4Addr, sync::LazyLock};

use regex::Regex;

use topovis_core::identifier::PUBLIC_ROOT;

use crate::config::ClassifyConfig;

/// Icon and semantic type chosen for a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub icon: String,
    pub kind: String,
}

impl Classification {
    pub fn new(icon: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            icon: icon.into(),
            kind: kind.into(),
        }
    }
}

/// Chooses an icon and type for a node from its name.
///
/// Implementations must be total: every name gets a classification.
pub trait Classifier: Send + Sync {
    fn classify(&self, node: &str) -> Classification;
}

const CLOUD_ICON: &str = "osa_cloud.svg";
const FIREWALL_ICON: &str = "osa_firewall.svg";
const VLAN_ICON: &str = "osa_vpn.svg";
const SWITCH_ICON: &str = "osa_ics_plc.svg";
const SERVER_ICON: &str = "osa_server.svg";

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9_-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z0-9][a-zA-Z0-9_-]{0,61}[a-zA-Z]$",
    )
    .expect("domain pattern is valid")
});

/// Host-name heuristics driven by [`ClassifyConfig`] patterns.
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    firewall: Regex,
    vlan: Regex,
    switch: Regex,
}

impl PatternClassifier {
    /// Compiles the configured patterns.
    ///
    /// # Errors
    ///
    /// Returns a message naming the pattern that failed to compile.
    pub fn new(config: &ClassifyConfig) -> Result<Self, String> {
        let [firewall, vlan, switch] = config.compile()?;
        Ok(Self {
            firewall,
            vlan,
            switch,
        })
    }

    fn classify_domain(&self, name: &str) -> Classification {
        if self.firewall.is_match(name) {
            Classification::new(FIREWALL_ICON, "firewall")
        } else if self.vlan.is_match(name) {
            Classification::new(VLAN_ICON, "vlan")
        } else if self.switch.is_match(name) {
            Classification::new(SWITCH_ICON, "switch")
        } else {
            Classification::new(SERVER_ICON, "misc")
        }
    }
}

impl Classifier for PatternClassifier {
    fn classify(&self, node: &str) -> Classification {
        if node == PUBLIC_ROOT {
            return Classification::new(CLOUD_ICON, "not-a-host");
        }
        if is_domain(node) {
            return self.classify_domain(node);
        }
        // Addresses and bare names carry no type information
        Classification::new(SERVER_ICON, "misc")
    }
}

fn is_domain(name: &str) -> bool {
    name.len() <= 253 && name.parse::<Ipv4Addr>().is_err() && DOMAIN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PatternClassifier {
        PatternClassifier::new(&ClassifyConfig::default()).unwrap()
    }

    #[test]
    fn test_public_root() {
        let classification = classifier().classify("PUBLIC");
        assert_eq!(classification, Classification::new("osa_cloud.svg", "not-a-host"));
    }

    #[test]
    fn test_default_patterns() {
        let classifier = classifier();

        assert_eq!(classifier.classify("fw1.corp.example").kind, "firewall");
        assert_eq!(classifier.classify("edge-asa.corp.example").icon, "osa_firewall.svg");
        assert_eq!(classifier.classify("vlan20.corp.example").kind, "vlan");
        assert_eq!(classifier.classify("core-sw3.corp.example").kind, "switch");
        assert_eq!(classifier.classify("core-sw3.corp.example").icon, "osa_ics_plc.svg");
        assert_eq!(classifier.classify("db01.corp.example").kind, "misc");
    }

    #[test]
    fn test_firewall_wins_over_switch() {
        assert_eq!(classifier().classify("fw-sw.corp.example").kind, "firewall");
    }

    #[test]
    fn test_addresses_and_bare_names_are_servers() {
        let classifier = classifier();

        for name in ["10.0.0.1", "fw1", "", "not a host"] {
            assert_eq!(
                classifier.classify(name),
                Classification::new("osa_server.svg", "misc"),
                "{name}"
            );
        }
    }

    #[test]
    fn test_custom_patterns() {
        let config = ClassifyConfig::new("^gate", "^seg", "^access");
        let classifier = PatternClassifier::new(&config).unwrap();

        assert_eq!(classifier.classify("gate.example.org").kind, "firewall");
        assert_eq!(classifier.classify("fw1.example.org").kind, "misc");
    }

    #[test]
    fn test_is_domain() {
        assert!(is_domain("host.example.com"));
        assert!(!is_domain("host"));
        assert!(!is_domain("192.168.0.1"));
        assert!(!is_domain("-bad.example.com"));
    }
}
