use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Collection};

use crate::{
    db::{collections, Database},
    errors::AppResult,
    models::domain::ExamReadinessReport,
};

#[async_trait]
pub trait ReadinessReportRepository: Send + Sync {
    async fn create(&self, report: ExamReadinessReport) -> AppResult<ExamReadinessReport>;
    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<ExamReadinessReport>>;
}

pub struct MongoReadinessReportRepository {
    collection: Collection<ExamReadinessReport>,
}

impl MongoReadinessReportRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(collections::EXAM_READINESS_REPORTS);
        Self { collection }
    }
}

#[async_trait]
impl ReadinessReportRepository for MongoReadinessReportRepository {
    async fn create(&self, report: ExamReadinessReport) -> AppResult<ExamReadinessReport> {
        self.collection.insert_one(&report).await?;
        Ok(report)
    }

    async fn find_by_user_and_topic(
        &self,
        user_id: &str,
        topic_id: &str,
    ) -> AppResult<Vec<ExamReadinessReport>> {
        let cursor = self
            .collection
            .find(doc! { "user_id": user_id, "topic_id": topic_id })
            .await?;
        let reports: Vec<ExamReadinessReport> = cursor.try_collect().await?;
        Ok(reports)
    }
}
