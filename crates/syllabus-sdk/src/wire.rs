//! JSON wire types and their conversions to domain types
//!
//! Bodies use camelCase; snake_case field names are accepted on input.
//! Identifiers may arrive as JSON strings or integers.

use serde::{Deserialize, Deserializer, Serialize};
use syllabus_domain::{Course, NewRelationship, Relationship, Specialty, Subject};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

fn de_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawNumber::Number(n)) => Ok(n),
        Some(RawNumber::Text(s)) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// A list payload, either bare or wrapped in a `data` envelope
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListBody<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListBody::Bare(items) | ListBody::Wrapped { data: items } => items,
        }
    }
}

/// A single-record payload, either bare or wrapped in a `data` envelope
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemBody<T> {
    Bare(T),
    Wrapped { data: T },
}

impl<T> ItemBody<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            ItemBody::Bare(item) | ItemBody::Wrapped { data: item } => item,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CourseDto {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubjectDto {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, deserialize_with = "de_number")]
    credits: f64,
    #[serde(default, alias = "passing_score", deserialize_with = "de_number")]
    passing_score: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SpecialtyDto {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelationshipDto {
    #[serde(deserialize_with = "de_id")]
    id: String,
    #[serde(alias = "course_id", deserialize_with = "de_id")]
    course_id: String,
    #[serde(alias = "subject_id", deserialize_with = "de_id")]
    subject_id: String,
    #[serde(alias = "specialty_id", deserialize_with = "de_id")]
    specialty_id: String,
    #[serde(default)]
    notes: Option<String>,
}

/// Body of a relationship creation request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateRelationshipBody<'a> {
    course_id: &'a str,
    specialty_id: &'a str,
    subject_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

impl<'a> From<&'a NewRelationship> for CreateRelationshipBody<'a> {
    fn from(rel: &'a NewRelationship) -> Self {
        Self {
            course_id: rel.course_id.as_str(),
            specialty_id: rel.specialty_id.as_str(),
            subject_id: rel.subject_id.as_str(),
            notes: rel.notes.as_deref(),
        }
    }
}

/// Error payload; servers disagree on which field carries the message
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, falling back to the raw text as the message
    pub(crate) fn parse(text: &str) -> (Option<String>, Option<String>) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return (None, None);
        }

        match serde_json::from_str::<ErrorBody>(trimmed) {
            Ok(body) => {
                let message = body
                    .message
                    .or(body.error)
                    .or(body.detail)
                    .filter(|m| !m.trim().is_empty());
                (message, body.code)
            }
            Err(_) => (Some(trimmed.to_string()), None),
        }
    }
}

impl From<CourseDto> for Course {
    fn from(dto: CourseDto) -> Self {
        Course::new(dto.id, dto.name)
    }
}

impl From<SubjectDto> for Subject {
    fn from(dto: SubjectDto) -> Self {
        Subject::new(dto.id, dto.name, dto.credits, dto.passing_score)
    }
}

impl From<SpecialtyDto> for Specialty {
    fn from(dto: SpecialtyDto) -> Self {
        Specialty::new(dto.id, dto.name)
    }
}

impl From<RelationshipDto> for Relationship {
    fn from(dto: RelationshipDto) -> Self {
        Relationship::new(
            dto.id,
            dto.course_id,
            dto.subject_id,
            dto.specialty_id,
            dto.notes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_camel_case_with_numeric_ids() {
        let json = r#"[
            {"id": 7, "courseId": 1, "subjectId": "math", "specialtyId": 3, "notes": "core"}
        ]"#;

        let body: ListBody<RelationshipDto> = serde_json::from_str(json).unwrap();
        let rels: Vec<Relationship> = body
            .into_vec()
            .into_iter()
            .map(Relationship::from)
            .collect();

        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].id.as_str(), "7");
        assert_eq!(rels[0].course_id.as_str(), "1");
        assert_eq!(rels[0].subject_id.as_str(), "math");
        assert_eq!(rels[0].specialty_id.as_str(), "3");
        assert_eq!(rels[0].notes.as_deref(), Some("core"));
    }

    #[test]
    fn test_relationship_snake_case_in_envelope() {
        let json = r#"{"data": [
            {"id": "r1", "course_id": "c1", "subject_id": "s1", "specialty_id": "p1"}
        ]}"#;

        let body: ListBody<RelationshipDto> = serde_json::from_str(json).unwrap();
        let rels = body.into_vec();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels[0].notes, None);
    }

    #[test]
    fn test_subject_numbers_as_strings() {
        let json = r#"{"id": 2, "name": "Physics", "credits": "3", "passingScore": 70.5}"#;
        let subject: Subject = serde_json::from_str::<SubjectDto>(json).unwrap().into();

        assert_eq!(subject.id.as_str(), "2");
        assert_eq!(subject.credits, 3.0);
        assert_eq!(subject.passing_score, 70.5);
    }

    #[test]
    fn test_subject_missing_numbers_default_to_zero() {
        let json = r#"{"id": "s", "name": "Ethics"}"#;
        let subject: Subject = serde_json::from_str::<SubjectDto>(json).unwrap().into();
        assert_eq!(subject.credits, 0.0);
        assert_eq!(subject.passing_score, 0.0);
    }

    #[test]
    fn test_create_body_shape() {
        let draft =
            NewRelationship::new("c1".into(), "cardio".into(), "math".into(), None).unwrap();
        let value = serde_json::to_value(CreateRelationshipBody::from(&draft)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"courseId": "c1", "specialtyId": "cardio", "subjectId": "math"})
        );
    }

    #[test]
    fn test_error_body_variants() {
        assert_eq!(
            ErrorBody::parse(r#"{"message": "Relationship already exists", "code": "DUPLICATE"}"#),
            (Some("Relationship already exists".to_string()), Some("DUPLICATE".to_string()))
        );
        assert_eq!(
            ErrorBody::parse(r#"{"error": "nope"}"#),
            (Some("nope".to_string()), None)
        );
        assert_eq!(
            ErrorBody::parse("Bad Gateway"),
            (Some("Bad Gateway".to_string()), None)
        );
        assert_eq!(ErrorBody::parse("  "), (None, None));
    }
}
