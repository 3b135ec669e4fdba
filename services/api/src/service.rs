//! Submission and report orchestration.
//!
//! Thin coordination over the repositories: handlers validate, services
//! sequence the store and mail-transport calls, the aggregation engine in
//! `leadform-utils` does the actual reconciliation work.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use leadform_database::{
    OrderItemRepository, PostgresPool, SubmissionFilter, SubmissionRepository,
};
use leadform_models::{
    AggregationReport, NewOrderItem, NewSubmission, Submission, SubmissionStatus,
};
use leadform_utils::{aggregation::build_report, EmailConfig, ResolvedPeriod};

use crate::smtp_client::SmtpClient;
use crate::template_engine::{
    NotificationContext, TemplateEngine, ADMIN_NOTIFICATION, APPLICANT_RECEIPT,
};

/// Submission lifecycle: persistence plus the two notification emails.
#[derive(Clone)]
pub struct SubmissionService {
    submissions: Arc<SubmissionRepository>,
    order_items: Arc<OrderItemRepository>,
    smtp: Option<Arc<SmtpClient>>,
    templates: Arc<TemplateEngine>,
    email: EmailConfig,
}

impl SubmissionService {
    pub fn new(
        pool: PostgresPool,
        smtp: Option<Arc<SmtpClient>>,
        templates: Arc<TemplateEngine>,
        email: EmailConfig,
    ) -> Self {
        Self {
            submissions: Arc::new(SubmissionRepository::new(pool.clone())),
            order_items: Arc::new(OrderItemRepository::new(pool)),
            smtp,
            templates,
            email,
        }
    }

    /// Persist a new submission and its structured line items.
    pub async fn create(
        &self,
        submission: &NewSubmission,
        items: &[NewOrderItem],
    ) -> Result<Submission> {
        let created = self.submissions.create(submission).await?;
        info!(submission_id = %created.id, "Submission saved");

        if !items.is_empty() {
            let saved = self
                .order_items
                .create_for_submission(created.id, items)
                .await?;
            info!(submission_id = %created.id, count = saved.len(), "Order items saved");
        }

        Ok(created)
    }

    /// Dispatch the admin notification and the applicant receipt
    /// concurrently. The submission is already persisted at this point, so
    /// delivery failures are logged and swallowed, never surfaced.
    pub async fn notify_created(&self, submission: &Submission) {
        let Some(smtp) = &self.smtp else {
            warn!(submission_id = %submission.id, "SMTP transport not configured, skipping notifications");
            return;
        };

        let context = NotificationContext::from_submission(submission);
        let admin_recipients = self.email.admin_recipient_list();
        let applicant_recipients = vec![submission.email.clone()];

        let admin_mail = async {
            let rendered = self.templates.render(ADMIN_NOTIFICATION, &context)?;
            smtp.send(
                &self.email.admin_from_name,
                &admin_recipients,
                &rendered.subject,
                &rendered.body_html,
            )
            .await
        };
        let applicant_mail = async {
            let rendered = self.templates.render(APPLICANT_RECEIPT, &context)?;
            smtp.send(
                &self.email.applicant_from_name,
                &applicant_recipients,
                &rendered.subject,
                &rendered.body_html,
            )
            .await
        };

        let (admin_result, applicant_result) = tokio::join!(admin_mail, applicant_mail);

        match (&admin_result, &applicant_result) {
            (Ok(()), Ok(())) => {
                info!(submission_id = %submission.id, "All notification emails sent")
            }
            _ => {
                if let Err(error) = admin_result {
                    warn!(submission_id = %submission.id, error = %error, "Admin notification failed");
                }
                if let Err(error) = applicant_result {
                    warn!(submission_id = %submission.id, error = %error, "Applicant receipt failed");
                }
            }
        }
    }

    pub async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>> {
        self.submissions.list(filter).await
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        self.submissions.update_status(id, status).await
    }

    /// Delete one submission and its order items.
    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        self.order_items.delete_by_submission_ids(&[id]).await?;
        self.submissions.delete(id).await
    }

    /// Delete a batch of submissions and their order items. Returns the
    /// number of submissions removed.
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<u64> {
        self.order_items.delete_by_submission_ids(ids).await?;
        self.submissions.delete_many(ids).await
    }
}

/// Monthly report orchestration: fetch confirmed submissions and their
/// items for the window, hand everything to the pure aggregation pipeline.
#[derive(Clone)]
pub struct AggregationService {
    submissions: Arc<SubmissionRepository>,
    order_items: Arc<OrderItemRepository>,
}

impl AggregationService {
    pub fn new(pool: PostgresPool) -> Self {
        Self {
            submissions: Arc::new(SubmissionRepository::new(pool.clone())),
            order_items: Arc::new(OrderItemRepository::new(pool)),
        }
    }

    pub async fn build(&self, period: &ResolvedPeriod) -> Result<AggregationReport> {
        let submissions = self
            .submissions
            .find_confirmed_between(period.start, period.end)
            .await?;

        let ids: Vec<Uuid> = submissions.iter().map(|s| s.id).collect();
        let order_items = self.order_items.find_by_submission_ids(&ids).await?;

        Ok(build_report(&submissions, &order_items, period))
    }
}
