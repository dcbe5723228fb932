//! Sample client profiles. Static data, not served by any route.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAppetite {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProfile {
    pub name: String,
    pub risk_appetite: RiskAppetite,
    /// Asset classes in order of preference.
    pub preferred_assets: Vec<String>,
    pub relationship_manager: String,
}

impl ClientProfile {
    fn new(
        name: &str,
        risk_appetite: RiskAppetite,
        preferred_assets: &[&str],
        relationship_manager: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            risk_appetite,
            preferred_assets: preferred_assets.iter().map(|a| a.to_string()).collect(),
            relationship_manager: relationship_manager.to_string(),
        }
    }
}

pub fn client_profiles() -> Vec<ClientProfile> {
    vec![
        ClientProfile::new(
            "Ranveer Kapoor",
            RiskAppetite::High,
            &["Equity", "Real Estate"],
            "Ajay Sharma",
        ),
        ClientProfile::new(
            "Virat Kohli",
            RiskAppetite::Medium,
            &["Mutual Funds", "Bonds"],
            "Priya Mehta",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn fixture_is_stable() {
        let profiles = client_profiles();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].risk_appetite, RiskAppetite::High);
        assert_eq!(profiles[1].preferred_assets, vec!["Mutual Funds", "Bonds"]);
        assert_eq!(profiles, client_profiles());
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let value = serde_json::to_value(&client_profiles()[0]).unwrap();

        assert_eq!(
            value,
            json!({
                "name": "Ranveer Kapoor",
                "risk_appetite": "High",
                "preferred_assets": ["Equity", "Real Estate"],
                "relationship_manager": "Ajay Sharma"
            })
        );
    }
}
