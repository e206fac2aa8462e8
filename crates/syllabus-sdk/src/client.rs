//! Syllabus client implementation.

use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::wire::{
    CourseDto, CreateRelationshipBody, ErrorBody, ItemBody, ListBody, RelationshipDto,
    SpecialtyDto, SubjectDto,
};
use serde::de::DeserializeOwned;
use syllabus_domain::{
    ApiError, Course, CourseId, LearningMatrixApi, NewRelationship, Relationship, RelationshipId,
    Specialty, SpecialtyId, Subject,
};

/// REST client for the learning-matrix API
#[derive(Debug, Clone)]
pub struct MatrixClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl MatrixClient {
    /// Create a client for `base_url` with default routes and timeout
    pub fn new(base_url: &str) -> Result<Self, SdkError> {
        Self::from_config(ClientConfig::new(base_url))
    }

    /// Create a client from explicit configuration
    pub fn from_config(config: ClientConfig) -> Result<Self, SdkError> {
        if config.base_url.trim().is_empty() {
            return Err(SdkError::ConfigError("base_url must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http, config })
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Turn a non-success response into an `HttpError` carrying the body message
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SdkError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let (message, code) = ErrorBody::parse(&text);
        let message = message.unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(|r| format!("HTTP {} {}", status.as_u16(), r))
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

        tracing::debug!("Request failed with {}: {}", status, message);

        Err(SdkError::HttpError {
            status: status.as_u16(),
            message,
            code,
        })
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, SdkError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let body: ListBody<T> = serde_json::from_slice(&bytes)?;
        Ok(body.into_vec())
    }

    async fn delete(&self, path: &str) -> Result<(), SdkError> {
        let url = self.url(path);
        tracing::debug!("DELETE {}", url);

        let response = self.http.delete(&url).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Fetch every relationship
    pub async fn fetch_relationships(&self) -> Result<Vec<Relationship>, SdkError> {
        let dtos: Vec<RelationshipDto> = self.get_list(&self.config.routes.relationships).await?;
        Ok(dtos.into_iter().map(Relationship::from).collect())
    }

    /// Fetch the course catalog
    pub async fn fetch_courses(&self) -> Result<Vec<Course>, SdkError> {
        let dtos: Vec<CourseDto> = self.get_list(&self.config.routes.courses).await?;
        Ok(dtos.into_iter().map(Course::from).collect())
    }

    /// Fetch the subject catalog
    pub async fn fetch_subjects(&self) -> Result<Vec<Subject>, SdkError> {
        let dtos: Vec<SubjectDto> = self.get_list(&self.config.routes.subjects).await?;
        Ok(dtos.into_iter().map(Subject::from).collect())
    }

    /// Fetch the specialty catalog
    pub async fn fetch_specialties(&self) -> Result<Vec<Specialty>, SdkError> {
        let dtos: Vec<SpecialtyDto> = self.get_list(&self.config.routes.specialties).await?;
        Ok(dtos.into_iter().map(Specialty::from).collect())
    }

    /// Create a relationship
    ///
    /// Servers that answer a successful create with an empty body get a
    /// placeholder record built from the request; the id stays empty until
    /// the next refresh brings the authoritative record.
    pub async fn create(&self, relationship: &NewRelationship) -> Result<Relationship, SdkError> {
        let url = self.url(&self.config.routes.relationships);
        tracing::debug!(
            "POST {} (course={}, specialty={}, subject={})",
            url,
            relationship.course_id,
            relationship.specialty_id,
            relationship.subject_id
        );

        let response = self
            .http
            .post(&url)
            .json(&CreateRelationshipBody::from(relationship))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Relationship {
                id: RelationshipId::default(),
                course_id: relationship.course_id.clone(),
                subject_id: relationship.subject_id.clone(),
                specialty_id: relationship.specialty_id.clone(),
                notes: relationship.notes.clone(),
            });
        }

        let body: ItemBody<RelationshipDto> = serde_json::from_slice(&bytes)?;
        Ok(body.into_inner().into())
    }

    /// Path of one relationship record
    fn relationship_path(&self, id: &RelationshipId) -> String {
        format!(
            "{}/{}",
            self.config.routes.relationships,
            urlencoding::encode(id.as_str())
        )
    }

    /// Path of the bulk delete for one specialty within a course
    fn specialty_path(&self, course_id: &CourseId, specialty_id: &SpecialtyId) -> String {
        format!(
            "{}/course/{}/specialty/{}",
            self.config.routes.relationships,
            urlencoding::encode(course_id.as_str()),
            urlencoding::encode(specialty_id.as_str())
        )
    }

    /// Delete one relationship
    pub async fn remove(&self, id: &RelationshipId) -> Result<(), SdkError> {
        self.delete(&self.relationship_path(id)).await
    }

    /// Delete every relationship of a specialty within a course
    pub async fn remove_all_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Result<(), SdkError> {
        self.delete(&self.specialty_path(course_id, specialty_id)).await
    }
}

impl LearningMatrixApi for MatrixClient {
    async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        Ok(self.fetch_relationships().await?)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, ApiError> {
        Ok(self.fetch_courses().await?)
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        Ok(self.fetch_subjects().await?)
    }

    async fn list_specialties(&self) -> Result<Vec<Specialty>, ApiError> {
        Ok(self.fetch_specialties().await?)
    }

    async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ApiError> {
        Ok(self.create(relationship).await?)
    }

    async fn delete_relationship(&self, id: &RelationshipId) -> Result<(), ApiError> {
        Ok(self.remove(id).await?)
    }

    async fn delete_all_relationships_for_specialty(
        &self,
        course_id: &CourseId,
        specialty_id: &SpecialtyId,
    ) -> Result<(), ApiError> {
        Ok(self.remove_all_for_specialty(course_id, specialty_id).await?)
    }
}
