//! The résumé wire model, exactly as the form UI posts it (camelCase JSON).
//!
//! Consumed read-only by the render backends; never persisted. Every field
//! defaults so partially filled forms still deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub full_name: String,
    pub job_role: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub summary: String,
    /// Comma-separated free text, split only by the preview/snapshot layer.
    pub skills: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_camel_case_form_payload() {
        let json = r#"{
            "fullName": "Ada Lovelace",
            "jobRole": "Software Engineer",
            "email": "ada@example.com",
            "experience": [
                {"title": "Engineer", "company": "Analytical Engines", "start": "1840", "end": "1843", "description": "Wrote the first program."}
            ]
        }"#;
        let data: ResumeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.full_name, "Ada Lovelace");
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.experience[0].company, "Analytical Engines");
        // Missing fields fall back to empty defaults.
        assert!(data.phone.is_empty());
        assert!(data.education.is_empty());
    }

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let data: ResumeData = serde_json::from_str("{}").unwrap();
        assert!(data.full_name.is_empty());
        assert!(data.experience.is_empty());
    }
}
