use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use crate::utils;

/// One participant certificate as stored in the verification file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(rename = "Cert_ID")]
    pub cert_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Team_Name")]
    pub team_name: String,
    #[serde(rename = "College")]
    pub college: String,
    #[serde(rename = "Startup_Idea")]
    pub startup_idea: String,
    #[serde(rename = "Email", default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(rename = "Phone", default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(rename = "Event")]
    pub event: String,
    #[serde(rename = "Date")]
    pub date: String,
    /// Keys outside the fixed schema, kept so a rewrite of the store
    /// does not drop them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

impl Certificate {
    /// `(key, value)` pairs in serialized key order, extra keys last.
    pub fn fields(&self) -> Vec<(&str, String)> {
        let fixed = [
            ("Cert_ID", &self.cert_id),
            ("Name", &self.name),
            ("Team_Name", &self.team_name),
            ("College", &self.college),
            ("Startup_Idea", &self.startup_idea),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Event", &self.event),
            ("Date", &self.date),
        ];
        fixed
            .into_iter()
            .map(|(k, v)| (k, v.clone()))
            .chain(self.extra.iter().map(|(k, v)| (k.as_str(), utils::cell_text(v))))
            .collect()
    }

    pub fn matches_id(&self, cert_id: &str) -> bool {
        self.cert_id.to_uppercase() == cert_id.to_uppercase()
    }
}

/// Listing form: `Cert_ID - Name (Team_Name)`.
impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.cert_id, self.name, self.team_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Certificate {
        Certificate {
            cert_id: "PITCHDECK25-001".to_string(),
            name: "Asha Verma".to_string(),
            team_name: "Nimbus".to_string(),
            college: "UCER".to_string(),
            startup_idea: "Solar kiosks".to_string(),
            email: String::new(),
            phone: "9876543210".to_string(),
            event: "Eureka! Pitching Competition 2025".to_string(),
            date: "29-08-2025".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn serializes_keys_in_record_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        let keys = ["Cert_ID", "Name", "Team_Name", "College", "Startup_Idea", "Email", "Phone", "Event", "Date"];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(&format!("\"{k}\"")).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let json = r#"{"Cert_ID":"A","Name":"B","Team_Name":"C","College":"D","Startup_Idea":"E","Event":"F","Date":"G"}"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.email, "");
        assert_eq!(cert.phone, "");
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let json = r#"{"Cert_ID":"A","Team_Name":"C","College":"D","Startup_Idea":"E","Event":"F","Date":"G"}"#;
        assert!(serde_json::from_str::<Certificate>(json).is_err());
    }

    #[test]
    fn null_optionals_load_as_empty() {
        let json = r#"{"Cert_ID":"A","Name":"B","Team_Name":"C","College":"D","Startup_Idea":"E","Email":null,"Phone":null,"Event":"F","Date":"G"}"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.email, "");
        assert_eq!(cert.phone, "");
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let json = r#"{"Cert_ID":"A","Name":"B","Team_Name":"C","College":"D","Startup_Idea":"E","Event":"F","Date":"G","Certificate_URL":"https://e.cell/a.pdf","Rank":2}"#;
        let cert: Certificate = serde_json::from_str(json).unwrap();
        assert_eq!(cert.extra["Certificate_URL"], "https://e.cell/a.pdf");
        let again: Certificate = serde_json::from_str(&serde_json::to_string(&cert).unwrap()).unwrap();
        assert_eq!(again, cert);

        let fields = cert.fields();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[9], ("Certificate_URL", "https://e.cell/a.pdf".to_string()));
        assert_eq!(fields[10], ("Rank", "2".to_string()));
    }

    #[test]
    fn id_match_ignores_case() {
        let cert = sample();
        assert!(cert.matches_id("pitchdeck25-001"));
        assert!(!cert.matches_id("pitchdeck25-002"));
    }

    #[test]
    fn display_is_listing_line() {
        assert_eq!(sample().to_string(), "PITCHDECK25-001 - Asha Verma (Nimbus)");
    }
}
